//! The `gold` command-line interface.
//!
//! Small file-level helpers around the library: show a golden verbatim,
//! diff two outputs the way an assertion would, normalize line endings, and
//! list the goldens under a fixture directory.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::cli::args::{Command, GoldArgs};
use crate::normalize::normalize_line_endings;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = GoldArgs::parse();
    init_logging(args.debug);

    match dispatch(args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("gold=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gold=info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Runs one subcommand. `Ok(false)` means the command ran but found a difference.
fn dispatch(command: Command) -> Result<bool> {
    match command {
        Command::Show { file } => handle_show(&file),
        Command::Diff {
            expected,
            actual,
            plain,
        } => handle_diff(&expected, &actual, plain),
        Command::Normalize { file, write } => handle_normalize(&file, write),
        Command::List { dir, suffix } => handle_list(&dir, &suffix),
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("unable to read '{}'", path.display()))
}

fn handle_show(path: &Path) -> Result<bool> {
    let bytes = read(path)?;
    output::print_bytes(&bytes).into_diagnostic()?;
    Ok(true)
}

fn handle_diff(expected: &Path, actual: &Path, plain: bool) -> Result<bool> {
    let expected_bytes = read(expected)?;
    let actual_bytes = read(actual)?;
    let expected_norm = normalize_line_endings(&expected_bytes);
    let actual_norm = normalize_line_endings(&actual_bytes);
    if expected_norm == actual_norm {
        tracing::debug!(expected = %expected.display(), actual = %actual.display(), "files match");
        return Ok(true);
    }
    output::print_diff(
        &String::from_utf8_lossy(&expected_norm),
        &String::from_utf8_lossy(&actual_norm),
        plain,
    )
    .into_diagnostic()?;
    Ok(false)
}

fn handle_normalize(path: &Path, write: bool) -> Result<bool> {
    let bytes = read(path)?;
    let normalized = normalize_line_endings(&bytes);
    if !write {
        output::print_bytes(&normalized).into_diagnostic()?;
        return Ok(true);
    }
    if let Cow::Owned(ref normalized) = normalized {
        fs::write(path, normalized)
            .into_diagnostic()
            .wrap_err_with(|| format!("unable to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "normalized line endings");
    }
    Ok(true)
}

fn handle_list(dir: &Path, suffix: &str) -> Result<bool> {
    for file in find_goldens(dir, suffix)? {
        println!("{}", file.display());
    }
    Ok(true)
}

/// Finds files ending in `suffix` under `root`, sorted for stable output.
pub fn find_goldens(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry
            .into_diagnostic()
            .wrap_err_with(|| format!("unable to walk '{}'", root.display()))?;
        let is_golden = entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(suffix));
        if is_golden {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_goldens_filters_by_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("suite").join("case");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("b.golden"), "b").unwrap();
        fs::write(tmp.path().join("a.golden"), "a").unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let found = find_goldens(tmp.path(), ".golden").unwrap();
        assert_eq!(found, vec![tmp.path().join("a.golden"), nested.join("b.golden")]);
    }
}
