use core::{fmt, ops::Deref, str::Utf8Error};

use bstr::BStr;

/// Lines must be strictly shorter than this many bytes, excluding the line
/// terminator.
pub const MAX_LINE_LENGTH: usize = 255;

/// Largest payload a single line can carry.
const PAYLOAD_CAPACITY: usize = MAX_LINE_LENGTH - 1;

/// Text carried by a [`Token::SectionName`] or [`Token::Path`].
///
/// The payload is copied out of the tokenizer's line buffer, so it stays
/// valid after the tokenizer moves on. It lives inline and never allocates.
/// The bytes are not guaranteed to be UTF-8; use [`Payload::to_str`] or the
/// [`BStr`] methods available through `Deref`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Payload {
    len: u8,
    bytes: [u8; PAYLOAD_CAPACITY],
}

impl Payload {
    /// Copies `bytes` into a new payload. Anything past the payload capacity
    /// is dropped; the tokenizer never produces such input.
    pub(crate) fn new(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= PAYLOAD_CAPACITY, "payload exceeds line capacity");
        let len = bytes.len().min(PAYLOAD_CAPACITY);
        let mut payload = Self {
            len: u8::try_from(len).unwrap_or(u8::MAX),
            bytes: [0; PAYLOAD_CAPACITY],
        };
        payload.bytes[..len].copy_from_slice(&bytes[..len]);
        payload
    }

    /// The payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// The payload as a byte string.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// The payload as UTF-8 text, if it decodes as such.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when the payload is not valid UTF-8 by the
    /// standard library's definition, which is stricter than
    /// [`is_well_formed`](crate::is_well_formed).
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Deref for Payload {
    type Target = BStr;

    fn deref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<BStr> for Payload {
    fn as_ref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl PartialEq<[u8]> for Payload {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<str> for Payload {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Payload {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Payload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_str() {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}

/// A token produced by the [`Tokenizer`](crate::Tokenizer).
///
/// A physical line yields either a single `Comment` or `Path`, or a chain
/// anchored on the same line: `Section, SectionName` or
/// `Section, SectionHalt, SectionName`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Token {
    /// Nothing has been read yet.
    Start,
    /// The input is exhausted.
    End,
    /// A blank line or a line starting with `#`.
    Comment,
    /// A line starting with `*`. The name follows as a separate token.
    Section,
    /// The `!` marker right after the `*` of a section header.
    SectionHalt,
    /// The trimmed name of the section opened on this line.
    SectionName(Payload),
    /// A trimmed module path.
    Path(Payload),
}

impl Token {
    /// The tag of this token, without its payload.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Start => TokenKind::Start,
            Token::End => TokenKind::End,
            Token::Comment => TokenKind::Comment,
            Token::Section => TokenKind::Section,
            Token::SectionHalt => TokenKind::SectionHalt,
            Token::SectionName(_) => TokenKind::SectionName,
            Token::Path(_) => TokenKind::Path,
        }
    }

    /// The payload of a `SectionName` or `Path` token.
    #[must_use]
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Token::SectionName(payload) | Token::Path(payload) => Some(payload),
            _ => None,
        }
    }

    /// Returns `true` if the token is [`End`].
    ///
    /// [`End`]: Token::End
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

/// Payload-free tag of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum TokenKind {
    Start,
    End,
    Comment,
    Section,
    SectionHalt,
    SectionName,
    Path,
}
