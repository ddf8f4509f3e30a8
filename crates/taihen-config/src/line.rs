//! Fixed-capacity line storage and the whitespace rules of the format.
//!
//! Whitespace is the ASCII set of the "C" locale: space, tab, line feed,
//! vertical tab, form feed and carriage return. Nothing outside of it counts,
//! in particular no Unicode spaces.

use crate::token::MAX_LINE_LENGTH;

#[inline]
pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Index of the first non-whitespace byte at or after `pos`, or `line.len()`.
#[inline]
pub(crate) fn skip_whitespace(line: &[u8], pos: usize) -> usize {
    line.get(pos..)
        .and_then(|rest| rest.iter().position(|&b| !is_space(b)))
        .map_or(line.len(), |offset| pos + offset)
}

/// The current physical line, copied out of the input.
///
/// Overwritten, never appended to, each time a new line is read.
pub(crate) struct LineBuffer {
    bytes: [u8; MAX_LINE_LENGTH],
    len: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self {
            bytes: [0; MAX_LINE_LENGTH],
            len: 0,
        }
    }
}

impl LineBuffer {
    /// Replaces the buffer contents with `line`, which must be shorter than
    /// [`MAX_LINE_LENGTH`].
    pub(crate) fn load(&mut self, line: &[u8]) {
        debug_assert!(line.len() < MAX_LINE_LENGTH);
        self.len = line.len();
        self.bytes[..self.len].copy_from_slice(line);
    }

    /// Drops trailing whitespace, never going below `start`.
    pub(crate) fn trim_end(&mut self, start: usize) {
        while self.len > start && is_space(self.bytes[self.len - 1]) {
            self.len -= 1;
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}
