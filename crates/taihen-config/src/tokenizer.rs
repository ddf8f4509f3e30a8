//! Line-oriented tokenizer.
//!
//! The tokenizer walks an immutable input one *sub-token* at a time. Which
//! action it takes next depends only on the token it produced last:
//!
//! | previous token                          | next action                          |
//! |-----------------------------------------|--------------------------------------|
//! | `Start`, `Comment`, `Path`, `SectionName` | read the next physical line         |
//! | `Section`                               | look for the `!` halt marker         |
//! | `SectionHalt`                           | the rest of the line is the name     |
//! | `End`                                   | error, the input is exhausted        |
//!
//! Each physical line is copied into a fixed-capacity buffer before it is
//! examined, so a line of [`MAX_LINE_LENGTH`] bytes or more aborts
//! tokenization with [`TokenizeError::LineTooLong`]. Payloads are copied out
//! of that buffer into [`Payload`] values; nothing here allocates.
//!
//! The tokenizer does not check well-formedness. A path before any section
//! or an empty section name tokenizes fine; [`check`](crate::check) rejects
//! those.

use core::iter::FusedIterator;

use bstr::ByteSlice;
use tracing::trace;

use crate::{
    error::TokenizeError,
    line::{LineBuffer, skip_whitespace},
    token::{MAX_LINE_LENGTH, Payload, Token, TokenKind},
};

const COMMENT_MARKER: u8 = b'#';
const SECTION_MARKER: u8 = b'*';
const HALT_MARKER: u8 = b'!';

/// Turns a configuration document into a stream of [`Token`]s.
///
/// The document ends at the first NUL byte, if there is one. Lines end at
/// `\r` or `\n`; exactly one terminator byte is consumed per line, so a
/// `\r\n` pair produces an extra blank line.
///
/// ```rust
/// use taihen_config::{Token, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new("*!NAME");
/// assert_eq!(tokenizer.next(), Some(Ok(Token::Section)));
/// assert_eq!(tokenizer.next(), Some(Ok(Token::SectionHalt)));
/// assert!(matches!(tokenizer.next(), Some(Ok(Token::SectionName(name))) if name == "NAME"));
/// assert_eq!(tokenizer.next(), None);
/// ```
pub struct Tokenizer<'a> {
    input: &'a [u8],
    cursor: usize,
    token: Token,
    line: LineBuffer,
    line_pos: usize,
    line_no: usize,
    failure: Option<TokenizeError>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned before the first line of `input`.
    pub fn new<I>(input: &'a I) -> Self
    where
        I: AsRef<[u8]> + ?Sized,
    {
        let input = input.as_ref();
        let end = input.find_byte(0).unwrap_or(input.len());
        Self {
            input: &input[..end],
            cursor: 0,
            token: Token::Start,
            line: LineBuffer::default(),
            line_pos: 0,
            line_no: 0,
            failure: None,
        }
    }

    /// The most recently produced token.
    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The 1-based number of the physical line the current token came from.
    ///
    /// Zero before the first line has been read. Counts every terminator
    /// byte, so `\r\n` advances it by two.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Produces the next token.
    ///
    /// Returns `Ok(true)` when a new token is available through
    /// [`token`](Self::token), and `Ok(false)` once the input is exhausted and
    /// the token is [`Token::End`].
    ///
    /// # Errors
    ///
    /// - [`TokenizeError::LineTooLong`] when the next physical line does not
    ///   fit in the line buffer. The tokenizer does not recover: every later
    ///   call returns the same error.
    /// - [`TokenizeError::CalledAfterEnd`] when called after `End`.
    pub fn advance(&mut self) -> Result<bool, TokenizeError> {
        if let Some(err) = self.failure {
            return Err(err);
        }

        let result = match self.token.kind() {
            TokenKind::Start | TokenKind::Comment | TokenKind::Path | TokenKind::SectionName => {
                self.lex_line()
            }
            TokenKind::Section => {
                self.lex_section_halt();
                Ok(true)
            }
            TokenKind::SectionHalt => {
                self.lex_section_name();
                Ok(true)
            }
            TokenKind::End => return Err(TokenizeError::CalledAfterEnd),
        };

        match result {
            Ok(more) => {
                trace!(line = self.line_no, token = ?self.token, "token");
                Ok(more)
            }
            Err(err) => {
                self.failure = Some(err);
                Err(err)
            }
        }
    }

    fn lex_line(&mut self) -> Result<bool, TokenizeError> {
        if self.cursor >= self.input.len() {
            self.token = Token::End;
            return Ok(false);
        }

        let input = self.input;
        let rest = &input[self.cursor..];
        let len = rest.find_byteset(b"\r\n").unwrap_or(rest.len());
        self.line_no += 1;

        if len >= MAX_LINE_LENGTH {
            return Err(TokenizeError::LineTooLong {
                line: self.line_no,
                len,
            });
        }

        self.line.load(&rest[..len]);
        self.cursor += len + 1;
        self.line_pos = skip_whitespace(self.line.as_bytes(), 0);

        if matches!(self.line.as_bytes().get(self.line_pos), None | Some(&COMMENT_MARKER)) {
            self.token = Token::Comment;
            return Ok(true);
        }

        self.line.trim_end(self.line_pos);
        let line = &self.line.as_bytes()[self.line_pos..];

        self.token = match line.first() {
            None => Token::Comment,
            Some(&SECTION_MARKER) => Token::Section,
            Some(_) => Token::Path(Payload::new(line)),
        };
        Ok(true)
    }

    /// Runs right after `Section`, on the same line. `line_pos` sits on the
    /// section marker.
    fn lex_section_halt(&mut self) {
        let line = self.line.as_bytes();
        self.line_pos = skip_whitespace(line, self.line_pos + 1);

        self.token = if line.get(self.line_pos) == Some(&HALT_MARKER) {
            Token::SectionHalt
        } else {
            Token::SectionName(Payload::new(&line[self.line_pos..]))
        };
    }

    /// Runs right after `SectionHalt`, on the same line. `line_pos` sits on
    /// the halt marker.
    fn lex_section_name(&mut self) {
        let line = self.line.as_bytes();
        self.line_pos = skip_whitespace(line, self.line_pos + 1);
        self.token = Token::SectionName(Payload::new(&line[self.line_pos..]));
    }
}

/// Yields every token up to, but not including, [`Token::End`].
///
/// A tokenizer error is yielded once, after which the iterator is exhausted.
impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failure.is_some() || self.token.is_end() {
            return None;
        }

        match self.advance() {
            Ok(true) => Some(Ok(self.token.clone())),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}
