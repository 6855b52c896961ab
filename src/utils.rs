//! Useful functions for classifying address entries.

/// The minimum number of consecutive asterisks that makes an address entry a
/// sentinel divider rather than a real mailing address.
pub const SENTINEL_RUN: usize = 6;

/// Returns true if `text` contains at least `len` consecutive `*` characters.
pub fn has_asterisk_run(text: &str, len: usize) -> bool {
    if len == 0 {
        return true;
    }
    let mut run = 0;
    for c in text.chars() {
        if c == '*' {
            run += 1;
            if run >= len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Returns true if the address entry is a sentinel divider, i.e. it signals
/// "no new account here, continue the previous statement".
pub fn is_sentinel_address(entry: &str) -> bool {
    has_asterisk_run(entry, SENTINEL_RUN)
}
