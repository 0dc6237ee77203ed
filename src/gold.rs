//! Structured golden assertions.
//!
//! [`Gold`] wraps a [`Golden`] facility and adds encoding: a value is
//! serialized, its line endings normalized, and the bytes handed to the
//! facility's compare-or-update step.
//!
//! ```rust,no_run
//! use gold::{Gold, TestContext};
//! use std::collections::BTreeMap;
//!
//! let t = TestContext::current();
//! let gold = Gold::default();
//! let value = BTreeMap::from([("a", vec![1, 2])]);
//! gold.assert_yaml(&t, "sample", &value, 2);
//! ```

use std::fmt::Debug;

use serde::Serialize;

use crate::config::GoldConfig;
use crate::context::TestContext;
use crate::encode::{self, EncodeError};
use crate::error::{GoldError, GoldResult};
use crate::golden::Golden;
use crate::normalize::normalize_line_endings;

/// Golden assertions for serializable values.
#[derive(Debug, Clone, Default)]
pub struct Gold {
    golden: Golden,
}

impl Gold {
    pub fn new(config: GoldConfig) -> Self {
        Self {
            golden: Golden::new(config),
        }
    }

    /// The wrapped facility, for raw byte assertions and path lookups.
    pub fn golden(&self) -> &Golden {
        &self.golden
    }

    /// Asserts that `actual`, encoded as YAML with `indent` spaces per level,
    /// matches the golden `name`. In update mode the golden is rewritten.
    #[track_caller]
    pub fn assert_yaml<T>(&self, t: &TestContext, name: &str, actual: &T, indent: usize)
    where
        T: Serialize + Debug + ?Sized,
    {
        t.check(self.try_assert_yaml(t, name, actual, indent))
    }

    pub fn try_assert_yaml<T>(
        &self,
        t: &TestContext,
        name: &str,
        actual: &T,
        indent: usize,
    ) -> GoldResult<()>
    where
        T: Serialize + Debug + ?Sized,
    {
        let yaml = encode::to_yaml(actual, indent).map_err(|e| serialize_error(t, actual, e))?;
        self.golden
            .try_assert(t, name, &normalize_line_endings(yaml.as_bytes()))
    }

    /// Like [`Gold::assert_yaml`], encoding as pretty JSON instead.
    #[track_caller]
    pub fn assert_json<T>(&self, t: &TestContext, name: &str, actual: &T)
    where
        T: Serialize + Debug + ?Sized,
    {
        t.check(self.try_assert_json(t, name, actual))
    }

    pub fn try_assert_json<T>(&self, t: &TestContext, name: &str, actual: &T) -> GoldResult<()>
    where
        T: Serialize + Debug + ?Sized,
    {
        let json = encode::to_json(actual).map_err(|e| serialize_error(t, actual, e))?;
        self.golden
            .try_assert(t, name, &normalize_line_endings(json.as_bytes()))
    }

    /// Returns the stored golden `name` as text and as the exact bytes on disk.
    ///
    /// No normalization is applied. Stops the test if the file cannot be read.
    #[track_caller]
    pub fn get(&self, t: &TestContext, name: &str) -> (String, Vec<u8>) {
        t.check(self.try_get(t, name))
    }

    pub fn try_get(&self, t: &TestContext, name: &str) -> GoldResult<(String, Vec<u8>)> {
        let bytes = self.golden.try_read(t, name)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok((text, bytes))
    }
}

fn serialize_error<T: Debug + ?Sized>(t: &TestContext, actual: &T, err: EncodeError) -> GoldError {
    GoldError::Serialize {
        value: format!("{:?}", actual),
        test: t.name().to_string(),
        cause: err.to_string(),
    }
}
