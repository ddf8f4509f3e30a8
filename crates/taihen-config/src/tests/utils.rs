use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;

use crate::{Payload, Token, TokenizeError, Tokenizer, for_each_path};

pub fn tokens<I: AsRef<[u8]> + ?Sized>(input: &I) -> Result<Vec<Token>, TokenizeError> {
    Tokenizer::new(input).collect()
}

pub fn name(text: &str) -> Token {
    Token::SectionName(Payload::new(text.as_bytes()))
}

pub fn path(text: &str) -> Token {
    Token::Path(Payload::new(text.as_bytes()))
}

pub fn paths<I: AsRef<[u8]> + ?Sized>(input: &I, section: &str) -> Vec<String> {
    let mut out = Vec::new();
    for_each_path(input, section, |p| out.push(p.to_str_lossy().into_owned()));
    out
}

pub fn quickcheck_tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}
