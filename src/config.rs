//! Configuration for the golden-file facility.
//!
//! [`GoldConfig::default`] gives the standard layout: goldens live under
//! `testdata/<test path>/<name>.golden`, mismatches render a colored diff,
//! and update mode follows the `UPDATE_GOLDENS` environment variable.
//! `GOLD_FIXTURE_DIR` moves the fixture root.
//! Override only what you need through [`GoldConfig::builder`].

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that switches assertions into update mode.
pub const UPDATE_ENV: &str = "UPDATE_GOLDENS";
/// The storage layer's own update switch, honored as well.
pub const GOLDENFILE_UPDATE_ENV: &str = "UPDATE_GOLDENFILES";
/// Environment variable that overrides the fixture directory.
pub const FIXTURE_DIR_ENV: &str = "GOLD_FIXTURE_DIR";

pub const DEFAULT_FIXTURE_DIR: &str = "testdata";
pub const DEFAULT_NAME_SUFFIX: &str = ".golden";

/// How a mismatch diff is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffStyle {
    /// Line diff with ANSI colors: removals red, additions green.
    #[default]
    Colored,
    /// Same line diff without escape codes.
    Plain,
}

/// Settings for [`crate::Golden`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldConfig {
    pub fixture_dir: PathBuf,
    pub name_suffix: String,
    pub diff_style: DiffStyle,
    /// Place goldens in a subdirectory named after the test.
    pub dir_per_test: bool,
    /// Overwrite goldens instead of comparing.
    pub update: bool,
}

impl Default for GoldConfig {
    fn default() -> Self {
        Self {
            fixture_dir: env::var_os(FIXTURE_DIR_ENV)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_DIR)),
            name_suffix: DEFAULT_NAME_SUFFIX.to_string(),
            diff_style: DiffStyle::Colored,
            dir_per_test: true,
            update: update_requested(),
        }
    }
}

impl GoldConfig {
    /// Starts a builder from the defaults.
    pub fn builder() -> GoldConfigBuilder {
        GoldConfigBuilder {
            config: GoldConfig::default(),
        }
    }
}

/// Field-by-field overrides on top of [`GoldConfig::default`].
#[derive(Debug, Clone)]
pub struct GoldConfigBuilder {
    config: GoldConfig,
}

impl GoldConfigBuilder {
    pub fn fixture_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.fixture_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.name_suffix = suffix.into();
        self
    }

    pub fn diff_style(mut self, style: DiffStyle) -> Self {
        self.config.diff_style = style;
        self
    }

    pub fn dir_per_test(mut self, enabled: bool) -> Self {
        self.config.dir_per_test = enabled;
        self
    }

    pub fn update(mut self, enabled: bool) -> Self {
        self.config.update = enabled;
        self
    }

    pub fn build(self) -> GoldConfig {
        self.config
    }
}

/// True when `UPDATE_GOLDENS` or `UPDATE_GOLDENFILES` is set to anything
/// other than empty, `0` or `false`.
pub fn update_requested() -> bool {
    [UPDATE_ENV, GOLDENFILE_UPDATE_ENV]
        .iter()
        .any(|key| env::var(key).map(|v| is_truthy(&v)).unwrap_or(false))
}

fn is_truthy(value: &str) -> bool {
    let v = value.trim();
    !(v.is_empty() || v == "0" || v.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GoldConfig::builder().update(false).build();
        if env::var_os(FIXTURE_DIR_ENV).is_none() {
            assert_eq!(config.fixture_dir, PathBuf::from("testdata"));
        }
        assert_eq!(config.name_suffix, ".golden");
        assert_eq!(config.diff_style, DiffStyle::Colored);
        assert!(config.dir_per_test);
        assert!(!config.update);
    }

    #[test]
    fn builder_overrides_only_named_fields() {
        let config = GoldConfig::builder()
            .fixture_dir("fixtures")
            .diff_style(DiffStyle::Plain)
            .build();
        assert_eq!(config.fixture_dir, PathBuf::from("fixtures"));
        assert_eq!(config.diff_style, DiffStyle::Plain);
        assert_eq!(config.name_suffix, DEFAULT_NAME_SUFFIX);
        assert!(config.dir_per_test);
    }

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "yes", "on"] {
            assert!(is_truthy(v), "{v}");
        }
        for v in ["", " ", "0", "false", "FALSE"] {
            assert!(!is_truthy(v), "{v:?}");
        }
    }
}
