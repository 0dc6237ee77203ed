//! The test-context handle.
//!
//! Carries the identity of the running test (used to place golden files) and
//! is the channel through which fatal failures are raised. Under libtest a
//! failure panics, which stops the current test and leaves the rest of the
//! run alone.

use std::fmt;

use crate::error::GoldError;

const UNNAMED: &str = "unnamed";

/// Identity of the test that owns a set of golden files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContext {
    name: String,
}

impl TestContext {
    /// Creates a context for an explicitly named test.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            UNNAMED.to_string()
        } else {
            name
        };
        Self { name }
    }

    /// Creates a context named after the current thread.
    ///
    /// libtest runs each test on a thread named after the test's path
    /// (`module::test_fn`), so inside a `#[test]` this yields the test name.
    pub fn current() -> Self {
        let name = std::thread::current()
            .name()
            .filter(|n| *n != "main")
            .unwrap_or(UNNAMED)
            .to_string();
        Self::new(name)
    }

    /// Full test name, e.g. `tests::sample_round_trip`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Test name split into directory segments (`a::b` becomes `["a", "b"]`).
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.name
            .split("::")
            .flat_map(|part| part.split('/'))
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
    }

    /// Reports `err` and stops the current test.
    #[track_caller]
    pub fn fatal(&self, err: GoldError) -> ! {
        tracing::error!(test = %self.name, code = err.code_str(), "golden assertion failed");
        panic!("{}", err)
    }

    /// Unwraps `result`, stopping the current test on error.
    #[track_caller]
    pub fn check<T>(&self, result: Result<T, GoldError>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => self.fatal(e),
        }
    }
}

impl fmt::Display for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
