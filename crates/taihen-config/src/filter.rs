//! Section-filtered path stream.
//!
//! Paths are emitted in document order for every section block the query
//! selects:
//!
//! - a block named exactly like the query is selected;
//! - a block named [`ALL_SECTION`] is selected for every query except an
//!   exact [`KERNEL_SECTION`] query.
//!
//! A section header starting with `!` is halt-marked. When the next section
//! header is reached while a selected, halt-marked block is open, the scan
//! stops and the rest of the document is never read.

use alloc::vec::Vec;
use core::{iter::FusedIterator, ops::ControlFlow};

use bstr::{BStr, BString};
use tracing::debug;

use crate::{
    error::TokenizeError,
    options::FilterOptions,
    token::{Payload, Token},
    tokenizer::Tokenizer,
};

/// Section whose paths apply to every query except [`KERNEL_SECTION`].
pub const ALL_SECTION: &str = "ALL";

/// Section whose paths apply only when queried by this exact name.
pub const KERNEL_SECTION: &str = "KERNEL";

/// Whether a block named `name` contributes to a query for `section`.
pub(crate) fn selects(name: &[u8], section: &[u8]) -> bool {
    (name == ALL_SECTION.as_bytes() && section != KERNEL_SECTION.as_bytes()) || name == section
}

/// Iterator over the paths a query selects.
///
/// Created by [`filter_paths`] or [`PathFilter::with_options`]. Drop it to
/// stop early.
pub struct PathFilter<'a> {
    tokenizer: Tokenizer<'a>,
    section: &'a [u8],
    options: FilterOptions,
    recording: bool,
    pending_halt: bool,
    finished: bool,
}

impl<'a> PathFilter<'a> {
    /// Creates a path stream for `section` with default options.
    pub fn new<I, S>(input: &'a I, section: &'a S) -> Self
    where
        I: AsRef<[u8]> + ?Sized,
        S: AsRef<[u8]> + ?Sized,
    {
        Self::with_options(input, section, FilterOptions::default())
    }

    /// Creates a path stream for `section`.
    pub fn with_options<I, S>(input: &'a I, section: &'a S, options: FilterOptions) -> Self
    where
        I: AsRef<[u8]> + ?Sized,
        S: AsRef<[u8]> + ?Sized,
    {
        Self {
            tokenizer: Tokenizer::new(input),
            section: section.as_ref(),
            options,
            recording: false,
            pending_halt: false,
            finished: false,
        }
    }

    fn fail(&self, err: TokenizeError) -> Option<Result<Payload, TokenizeError>> {
        #[cfg(any(test, feature = "fuzzing"))]
        if self.options.panic_on_error {
            panic!("path stream failed: {err}");
        }

        if self.options.surface_errors {
            Some(Err(err))
        } else {
            debug!(%err, "path stream truncated");
            None
        }
    }
}

impl Iterator for PathFilter<'_> {
    type Item = Result<Payload, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.tokenizer.advance() {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(err) => {
                    self.finished = true;
                    return self.fail(err);
                }
            }

            match self.tokenizer.token() {
                Token::SectionHalt => self.pending_halt = true,
                Token::SectionName(name) => {
                    self.recording = selects(name.as_bytes(), self.section);
                    debug!(
                        section = %name,
                        line = self.tokenizer.line_number(),
                        recording = self.recording,
                        halt = self.pending_halt,
                        "section opened"
                    );
                }
                Token::Section => {
                    if self.recording && self.pending_halt {
                        debug!(line = self.tokenizer.line_number(), "halted after selected section");
                        self.finished = true;
                        return None;
                    }
                    self.pending_halt = false;
                }
                Token::Path(path) if self.recording => return Some(Ok(path.clone())),
                _ => {}
            }
        }
    }
}

impl FusedIterator for PathFilter<'_> {}

/// Lazily streams the paths `section` selects from `input`.
///
/// The stream ends silently on a tokenizer error; see
/// [`FilterOptions::surface_errors`] to change that.
pub fn filter_paths<'a, I, S>(input: &'a I, section: &'a S) -> PathFilter<'a>
where
    I: AsRef<[u8]> + ?Sized,
    S: AsRef<[u8]> + ?Sized,
{
    PathFilter::new(input, section)
}

/// Calls `sink` with every path `section` selects, in document order.
///
/// No validation happens here: on malformed input the stream is cut short
/// at the first tokenizer error without notice. Call
/// [`validate`](crate::validate) first.
///
/// ```rust
/// use taihen_config::for_each_path;
///
/// let document = "*ALL\n/a/b.so\n*GAME1\n/c/d.so\n";
/// let mut paths = Vec::new();
/// for_each_path(document, "GAME1", |path| paths.push(path.to_string()));
/// assert_eq!(paths, ["/a/b.so", "/c/d.so"]);
/// ```
pub fn for_each_path<I, S, F>(input: &I, section: &S, mut sink: F)
where
    I: AsRef<[u8]> + ?Sized,
    S: AsRef<[u8]> + ?Sized,
    F: FnMut(&BStr),
{
    for path in PathFilter::new(input, section).map_while(Result::ok) {
        sink(path.as_bstr());
    }
}

/// Like [`for_each_path`], but the sink can stop the scan and tokenizer
/// errors are reported.
///
/// # Errors
///
/// Returns the tokenizer error that cut the document short, if any. Paths
/// before the error have already been passed to `sink`.
pub fn try_for_each_path<I, S, F>(input: &I, section: &S, mut sink: F) -> Result<(), TokenizeError>
where
    I: AsRef<[u8]> + ?Sized,
    S: AsRef<[u8]> + ?Sized,
    F: FnMut(&BStr) -> ControlFlow<()>,
{
    let options = FilterOptions {
        surface_errors: true,
        ..Default::default()
    };
    for path in PathFilter::with_options(input, section, options) {
        if sink(path?.as_bstr()).is_break() {
            break;
        }
    }
    Ok(())
}

/// Collects the paths `section` selects into owned byte strings.
#[must_use]
pub fn collect_paths<I, S>(input: &I, section: &S) -> Vec<BString>
where
    I: AsRef<[u8]> + ?Sized,
    S: AsRef<[u8]> + ?Sized,
{
    PathFilter::new(input, section)
        .map_while(Result::ok)
        .map(|path| BString::from(path.as_bytes()))
        .collect()
}
