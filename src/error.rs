//! Error taxonomy for golden assertions.
//!
//! Every variant is terminal for the test that produced it. The panicking
//! entry points on [`crate::Gold`] and [`crate::Golden`] route these through
//! [`crate::TestContext::fatal`]; the `try_` variants hand them back as values.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Type alias for results produced by this crate.
pub type GoldResult<T> = Result<T, GoldError>;

/// Unified error type for every golden-assertion failure mode.
#[derive(Debug, Error, Diagnostic)]
pub enum GoldError {
    /// The value could not be encoded.
    #[error("unable to marshal actual '{value}' for test '{test}'; err={cause}")]
    #[diagnostic(code(gold::serialize))]
    Serialize {
        value: String,
        test: String,
        cause: String,
    },

    /// Candidate bytes differ from the stored golden file.
    #[error("result did not match the golden fixture '{name}' for test '{test}' at path '{}'\n{diff}", .path.display())]
    #[diagnostic(
        code(gold::mismatch),
        help("rerun with UPDATE_GOLDENS=1 to accept the new output")
    )]
    Mismatch {
        name: String,
        test: String,
        path: PathBuf,
        diff: String,
    },

    /// The golden file does not exist or cannot be read.
    #[error("unable to read golden master '{name}' for test '{test}' at path '{}'; err={source}", .path.display())]
    #[diagnostic(
        code(gold::missing_golden),
        help("run with UPDATE_GOLDENS=1 to create it")
    )]
    MissingGolden {
        name: String,
        test: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Update mode could not write the golden file.
    #[error("unable to write golden file at path '{}'; err={source}", .path.display())]
    #[diagnostic(code(gold::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The golden name is not a safe file name.
    #[error("invalid golden name '{name}' for test '{test}'; use only a-z, A-Z, 0-9, '.', '-' and '_'")]
    #[diagnostic(code(gold::invalid_name))]
    InvalidName { name: String, test: String },
}

impl GoldError {
    /// Stable short code, handy for matching in tests.
    pub fn code_str(&self) -> &'static str {
        match self {
            GoldError::Serialize { .. } => "gold::serialize",
            GoldError::Mismatch { .. } => "gold::mismatch",
            GoldError::MissingGolden { .. } => "gold::missing_golden",
            GoldError::Write { .. } => "gold::write",
            GoldError::InvalidName { .. } => "gold::invalid_name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_message_names_value_test_and_cause() {
        let err = GoldError::Serialize {
            value: "Cyclic".to_string(),
            test: "mod::case".to_string(),
            cause: "boom".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Cyclic'"));
        assert!(msg.contains("'mod::case'"));
        assert!(msg.contains("err=boom"));
        assert_eq!(err.code_str(), "gold::serialize");
    }

    #[test]
    fn missing_golden_message_has_path() {
        let err = GoldError::MissingGolden {
            name: "sample".to_string(),
            test: "case".to_string(),
            path: PathBuf::from("testdata/case/sample.golden"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'sample'"));
        assert!(msg.contains("testdata/case/sample.golden"));
        assert!(msg.contains("gone"));
    }
}
