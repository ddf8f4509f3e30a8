//! Byte-level UTF-8 shape check.
//!
//! Only the structure of each sequence is checked: the lead byte announces
//! how many continuation bytes follow, and exactly that many `10xxxxxx`
//! bytes must be there. Overlong forms, surrogate code points and code
//! points above U+10FFFF all pass. Existing configuration files rely on that
//! acceptance set, so [`core::str::from_utf8`] is not a drop-in replacement.

/// `(mask, lead bits, continuation bytes)` for 1 to 4 byte sequences.
const SEQUENCES: [(u8, u8, usize); 4] = [
    (0x80, 0x00, 0), // 0xxxxxxx
    (0xE0, 0xC0, 1), // 110xxxxx
    (0xF0, 0xE0, 2), // 1110xxxx
    (0xF8, 0xF0, 3), // 11110xxx
];

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[inline]
fn continuation_len(lead: u8) -> Option<usize> {
    SEQUENCES
        .iter()
        .find(|&&(mask, bits, _)| lead & mask == bits)
        .map(|&(_, _, len)| len)
}

/// Returns `true` if every byte sequence in `bytes` has a valid lead byte
/// followed by the right number of continuation bytes.
///
/// ```rust
/// use taihen_config::is_well_formed;
///
/// assert!(is_well_formed("ux0:/tai/plugin.suprx".as_bytes()));
/// assert!(is_well_formed(b"\xC0\x80")); // overlong NUL passes
/// assert!(!is_well_formed(b"\xE2\x82")); // truncated sequence
/// ```
#[must_use]
pub fn is_well_formed(bytes: &[u8]) -> bool {
    let mut rest = bytes;
    while let Some((&lead, tail)) = rest.split_first() {
        let Some(len) = continuation_len(lead) else {
            return false;
        };
        match tail.get(..len) {
            Some(continuation) if continuation.iter().all(|&b| is_continuation(b)) => {
                rest = &tail[len..];
            }
            _ => return false,
        }
    }
    true
}
