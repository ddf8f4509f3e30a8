use tracing::debug;

use crate::{
    error::ValidationError,
    token::{Payload, Token},
    tokenizer::Tokenizer,
    utf8::is_well_formed,
};

/// Checks that a document is well-formed, reporting the first problem.
///
/// A document is valid when it tokenizes to the end without error, every
/// section name and path is non-empty and well-formed UTF-8 (see
/// [`is_well_formed`]), and no path appears before the first section.
///
/// # Errors
///
/// Returns the first rule the document breaks, with the offending line.
pub fn check<I>(input: &I) -> Result<(), ValidationError>
where
    I: AsRef<[u8]> + ?Sized,
{
    let mut tokenizer = Tokenizer::new(input);
    let mut have_section = false;

    while tokenizer.advance()? {
        let line = tokenizer.line_number();
        match tokenizer.token() {
            Token::SectionName(name) => {
                check_identifier(name, line)?;
                have_section = true;
            }
            Token::Path(path) => {
                if !have_section {
                    return Err(ValidationError::PathBeforeSection { line });
                }
                check_identifier(path, line)?;
            }
            Token::Start | Token::End | Token::Comment | Token::Section | Token::SectionHalt => {}
        }
    }

    Ok(())
}

fn check_identifier(payload: &Payload, line: usize) -> Result<(), ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::EmptyIdentifier { line });
    }
    if !is_well_formed(payload.as_bytes()) {
        return Err(ValidationError::InvalidEncoding { line });
    }
    Ok(())
}

/// Returns `true` if the document is well-formed.
///
/// Run this before [`for_each_path`](crate::for_each_path): the path stream
/// does no checking of its own and stops silently on malformed input.
///
/// ```rust
/// use taihen_config::validate;
///
/// assert!(validate("*KERNEL\nur0:tai/kernel.skprx\n"));
/// assert!(!validate("ur0:tai/orphan.suprx\n*KERNEL\n"));
/// ```
#[must_use]
pub fn validate<I>(input: &I) -> bool
where
    I: AsRef<[u8]> + ?Sized,
{
    match check(input) {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "configuration rejected");
            false
        }
    }
}
