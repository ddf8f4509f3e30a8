/// Configuration for [`PathFilter`](crate::PathFilter).
///
/// # Examples
///
/// ```rust
/// use taihen_config::{FilterOptions, PathFilter, TokenizeError};
///
/// let long_line = "x".repeat(300);
/// let document = format!("*ALL\nux0:a.suprx\n{long_line}\n");
/// let options = FilterOptions {
///     surface_errors: true,
///     ..Default::default()
/// };
///
/// let mut paths = PathFilter::with_options(&document, "main", options);
/// assert!(paths.next().unwrap().is_ok());
/// assert!(matches!(
///     paths.next(),
///     Some(Err(TokenizeError::LineTooLong { line: 3, len: 300 }))
/// ));
/// assert!(paths.next().is_none());
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Whether to yield a tokenizer error as the last item of the stream.
    ///
    /// By default the stream simply ends where the tokenizer fails, leaving
    /// the rest of the document unread. Callers are expected to
    /// [`validate`](crate::validate) first, in which case no error can occur.
    ///
    /// # Default
    ///
    /// `false`
    pub surface_errors: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on tokenizer errors instead of ending the stream.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces.
    pub panic_on_error: bool,
}
