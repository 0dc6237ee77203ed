//! The golden-file facility.
//!
//! `Golden` maps a test and a golden name onto a `goldenfile::Mint`, which
//! owns the file handling: candidates are staged in a temp directory, then
//! either copied over the golden (update mode) or handed to a differ. This
//! module adds name checks, the per-test layout and error mapping. It knows
//! nothing about encodings; see [`crate::Gold`] for that.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use goldenfile::Mint;
use once_cell::sync::Lazy;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::config::GoldConfig;
use crate::context::TestContext;
use crate::diff::render_diff;
use crate::error::{GoldError, GoldResult};

static VALID_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid golden name regex"));

/// Compare-or-update access to golden files.
#[derive(Debug, Clone, Default)]
pub struct Golden {
    config: GoldConfig,
}

impl Golden {
    pub fn new(config: GoldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GoldConfig {
        &self.config
    }

    /// Directory holding the goldens of test `t`.
    pub fn golden_dir(&self, t: &TestContext) -> PathBuf {
        let mut dir = self.config.fixture_dir.clone();
        if self.config.dir_per_test {
            dir.extend(t.path_segments());
        }
        dir
    }

    /// Resolves where the golden `name` of test `t` is stored.
    pub fn golden_file_name(&self, t: &TestContext, name: &str) -> PathBuf {
        self.golden_dir(t).join(self.file_name(name))
    }

    fn file_name(&self, name: &str) -> String {
        format!("{}{}", name, self.config.name_suffix)
    }

    /// Compares `actual` with the stored golden, or rewrites it in update mode.
    ///
    /// Stops the test on mismatch or when the golden cannot be read.
    #[track_caller]
    pub fn assert(&self, t: &TestContext, name: &str, actual: &[u8]) {
        t.check(self.try_assert(t, name, actual))
    }

    pub fn try_assert(&self, t: &TestContext, name: &str, actual: &[u8]) -> GoldResult<()> {
        validate_name(t, name)?;
        if self.config.update {
            return self.try_update(t, name, actual);
        }

        let path = self.golden_file_name(t, name);
        fs::File::open(&path).map_err(|source| GoldError::MissingGolden {
            name: name.to_string(),
            test: t.name().to_string(),
            path: path.clone(),
            source,
        })?;
        tracing::debug!(test = %t, name, path = %path.display(), "comparing golden");

        let diff = Arc::new(OnceCell::new());
        let mut mint = self.mint(t, &path)?;
        self.stage(&mut mint, name, actual, &path, Arc::clone(&diff))?;
        mint.check_goldenfiles();
        let mismatch = diff.get().cloned();
        drop(mint);

        match mismatch {
            None => Ok(()),
            Some(diff) => {
                tracing::warn!(test = %t, name, path = %path.display(), "golden mismatch");
                Err(GoldError::Mismatch {
                    name: name.to_string(),
                    test: t.name().to_string(),
                    path,
                    diff,
                })
            }
        }
    }

    /// Writes `actual` as the golden `name`, regardless of update mode.
    #[track_caller]
    pub fn update(&self, t: &TestContext, name: &str, actual: &[u8]) {
        t.check(self.try_update(t, name, actual))
    }

    pub fn try_update(&self, t: &TestContext, name: &str, actual: &[u8]) -> GoldResult<()> {
        validate_name(t, name)?;
        let path = self.golden_file_name(t, name);
        let mut mint = self.mint(t, &path)?;
        self.stage(&mut mint, name, actual, &path, Arc::new(OnceCell::new()))?;
        mint.update_goldenfiles();
        tracing::info!(test = %t, name, path = %path.display(), bytes = actual.len(), "golden updated");
        Ok(())
    }

    /// Reads the stored golden verbatim.
    pub fn try_read(&self, t: &TestContext, name: &str) -> GoldResult<Vec<u8>> {
        validate_name(t, name)?;
        let path = self.golden_file_name(t, name);
        fs::read(&path).map_err(|source| GoldError::MissingGolden {
            name: name.to_string(),
            test: t.name().to_string(),
            path,
            source,
        })
    }

    /// `Mint::new` panics when it cannot create its directory, so the
    /// directory is created here first and the failure reported as a value.
    fn mint(&self, t: &TestContext, path: &Path) -> GoldResult<Mint> {
        let dir = self.golden_dir(t);
        fs::create_dir_all(&dir).map_err(|source| GoldError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Mint::new(dir))
    }

    /// Writes `actual` into the mint's staging copy of `name`. On check, a
    /// differing golden leaves its rendered diff in `diff`.
    fn stage(
        &self,
        mint: &mut Mint,
        name: &str,
        actual: &[u8],
        path: &Path,
        diff: Arc<OnceCell<String>>,
    ) -> GoldResult<()> {
        let style = self.config.diff_style;
        let differ = Box::new(move |old: &Path, new: &Path| {
            let expected = fs::read(old).unwrap_or_default();
            let candidate = fs::read(new).unwrap_or_default();
            if expected != candidate {
                let _ = diff.set(render_diff(&expected, &candidate, style));
            }
        });
        let write_err = |source: std::io::Error| GoldError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = mint
            .new_goldenfile_with_differ(self.file_name(name), differ)
            .map_err(write_err)?;
        file.write_all(actual).map_err(write_err)?;
        Ok(())
    }
}

/// Rejects names that are not a single safe path segment.
pub fn validate_name(t: &TestContext, name: &str) -> GoldResult<()> {
    if name == "." || name == ".." || !VALID_NAME.is_match(name) {
        return Err(GoldError::InvalidName {
            name: name.to_string(),
            test: t.name().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffStyle;

    fn golden_in(dir: &Path, update: bool) -> Golden {
        Golden::new(
            GoldConfig::builder()
                .fixture_dir(dir)
                .diff_style(DiffStyle::Plain)
                .update(update)
                .build(),
        )
    }

    #[test]
    fn file_name_with_dir_per_test() {
        let golden = golden_in(Path::new("testdata"), false);
        let t = TestContext::new("suite::case");
        assert_eq!(
            golden.golden_file_name(&t, "sample"),
            Path::new("testdata").join("suite").join("case").join("sample.golden")
        );
    }

    #[test]
    fn file_name_without_dir_per_test() {
        let golden = Golden::new(
            GoldConfig::builder()
                .fixture_dir("fx")
                .dir_per_test(false)
                .name_suffix(".yaml")
                .build(),
        );
        let t = TestContext::new("suite::case");
        assert_eq!(golden.golden_file_name(&t, "sample"), Path::new("fx").join("sample.yaml"));
    }

    #[test]
    fn update_then_compare() {
        let tmp = tempfile::tempdir().unwrap();
        let t = TestContext::new("case");
        golden_in(tmp.path(), true).try_assert(&t, "out", b"hello\n").unwrap();
        golden_in(tmp.path(), false).try_assert(&t, "out", b"hello\n").unwrap();

        let err = golden_in(tmp.path(), false)
            .try_assert(&t, "out", b"bye\n")
            .unwrap_err();
        match err {
            GoldError::Mismatch { diff, .. } => {
                assert!(diff.contains("-hello"), "{diff}");
                assert!(diff.contains("+bye"), "{diff}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn compare_without_golden_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let t = TestContext::new("case");
        let err = golden_in(tmp.path(), false)
            .try_assert(&t, "absent", b"x")
            .unwrap_err();
        assert_eq!(err.code_str(), "gold::missing_golden");
    }

    #[test]
    fn update_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let t = TestContext::new("case");
        let golden = golden_in(tmp.path(), false);
        golden.try_update(&t, "out", b"first").unwrap();
        golden.try_update(&t, "out", b"second").unwrap();
        assert_eq!(golden.try_read(&t, "out").unwrap(), b"second");
    }

    #[test]
    fn mismatch_leaves_golden_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let t = TestContext::new("suite::keep");
        let golden = golden_in(tmp.path(), false);
        golden.try_update(&t, "out", b"stored\n").unwrap();

        let err = golden.try_assert(&t, "out", b"changed\n").unwrap_err();
        assert_eq!(err.code_str(), "gold::mismatch");
        assert_eq!(golden.try_read(&t, "out").unwrap(), b"stored\n");
        assert_eq!(
            golden.golden_dir(&t),
            tmp.path().join("suite").join("keep")
        );
    }

    #[test]
    fn names_are_validated() {
        let t = TestContext::new("case");
        for ok in ["sample", "a-b_c.1", "UPPER"] {
            assert!(validate_name(&t, ok).is_ok(), "{ok}");
        }
        for bad in ["", ".", "..", "a/b", "a b", "x\\y", "é"] {
            assert!(validate_name(&t, bad).is_err(), "{bad:?}");
        }
    }
}
