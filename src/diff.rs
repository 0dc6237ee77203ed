//! Mismatch rendering.
//!
//! Builds a line diff between the stored golden and the candidate output
//! with `difference` and paints it through a `termcolor` buffer, so the
//! result can be embedded in a panic message.

use difference::{Changeset, Difference};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::config::DiffStyle;

/// Renders a line diff from `expected` to `actual`.
///
/// Lines only in the golden are prefixed `-`, lines only in the candidate `+`.
pub fn render_diff(expected: &[u8], actual: &[u8], style: DiffStyle) -> String {
    let expected = String::from_utf8_lossy(expected);
    let actual = String::from_utf8_lossy(actual);
    let changeset = Changeset::new(&expected, &actual, "\n");

    let mut buffer = match style {
        DiffStyle::Colored => Buffer::ansi(),
        DiffStyle::Plain => Buffer::no_color(),
    };
    // Writes into an in-memory buffer cannot fail.
    let _ = write_diff(&mut buffer, &changeset.diffs);
    String::from_utf8_lossy(buffer.as_slice()).into_owned()
}

/// Writes `diffs` line by line to any color-aware sink.
pub fn write_diff<W: WriteColor>(out: &mut W, diffs: &[Difference]) -> std::io::Result<()> {
    writeln!(out, "--- expected")?;
    writeln!(out, "+++ actual")?;
    for diff in diffs {
        let (prefix, chunk, color) = match diff {
            Difference::Same(x) => (' ', x, None),
            Difference::Add(x) => ('+', x, Some(Color::Green)),
            Difference::Rem(x) => ('-', x, Some(Color::Red)),
        };
        match color {
            Some(c) => out.set_color(ColorSpec::new().set_fg(Some(c)))?,
            None => out.reset()?,
        }
        let mut lines = chunk.split('\n').peekable();
        while let Some(line) = lines.next() {
            // Text ending in a newline leaves an empty tail segment.
            if line.is_empty() && lines.peek().is_none() && is_last(diffs, diff) {
                break;
            }
            writeln!(out, "{}{}", prefix, line)?;
        }
    }
    out.reset()
}

fn is_last(diffs: &[Difference], diff: &Difference) -> bool {
    diffs.last().is_some_and(|last| std::ptr::eq(last, diff))
}
