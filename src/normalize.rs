//! Line-ending normalization.
//!
//! Golden files are always stored with `\n` line endings. Output produced on a
//! platform that emits `\r\n` (windows) or a lone `\r` (classic mac) is folded
//! into `\n` before comparison so goldens recorded on one OS match everywhere.

use std::borrow::Cow;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Collapses `\r\n` and standalone `\r` into `\n`.
///
/// Input that contains no carriage return (including empty input) is returned
/// borrowed. `\r\n` is consumed as a unit, so a windows line ending produces a
/// single `\n`, never two.
pub fn normalize_line_endings(data: &[u8]) -> Cow<'_, [u8]> {
    if !data.contains(&CR) {
        return Cow::Borrowed(data);
    }

    let mut out = Vec::with_capacity(data.len());
    let mut bytes = data.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        if b == CR {
            if bytes.peek() == Some(&LF) {
                bytes.next();
            }
            out.push(LF);
        } else {
            out.push(b);
        }
    }
    Cow::Owned(out)
}

/// Text flavour of [`normalize_line_endings`].
pub fn normalize_str(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}
