//! Handles all user-facing output for the CLI.

use std::io::{self, Write};

use difference::Changeset;
use termcolor::{ColorChoice, StandardStream};

use crate::diff::write_diff;

/// Picks colors only when stdout is a terminal.
pub fn color_choice(plain: bool) -> ColorChoice {
    if !plain && atty::is(atty::Stream::Stdout) {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}

/// Prints a line diff from `expected` to `actual`.
pub fn print_diff(expected: &str, actual: &str, plain: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(plain));
    let changeset = Changeset::new(expected, actual, "\n");
    write_diff(&mut stdout, &changeset.diffs)?;
    stdout.flush()
}

/// Writes raw bytes to stdout.
pub fn print_bytes(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}
