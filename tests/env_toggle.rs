//! Update mode and fixture root driven purely by the environment.
//!
//! Kept in its own test binary with a single test, since it mutates process
//! environment that every other default config would observe.

use std::collections::BTreeMap;
use std::env;
use std::fs;

use gold::config::{FIXTURE_DIR_ENV, GOLDENFILE_UPDATE_ENV, UPDATE_ENV};
use gold::{Gold, GoldConfig, TestContext};

#[test]
fn environment_switches_default_config_into_update_mode() {
    let tmp = tempfile::tempdir().unwrap();
    env::set_var(FIXTURE_DIR_ENV, tmp.path());
    env::remove_var(GOLDENFILE_UPDATE_ENV);
    env::set_var(UPDATE_ENV, "1");

    let config = GoldConfig::default();
    assert!(config.update);
    assert_eq!(config.fixture_dir, tmp.path());

    let t = TestContext::new("env::toggle");
    let value = BTreeMap::from([("a", vec![1, 2])]);
    Gold::default().assert_yaml(&t, "sample", &value, 2);

    let path = tmp.path().join("env").join("toggle").join("sample.golden");
    assert_eq!(fs::read_to_string(&path).unwrap(), "a:\n  - 1\n  - 2\n");

    env::set_var(UPDATE_ENV, "0");
    assert!(!GoldConfig::default().update);
    Gold::default().assert_yaml(&t, "sample", &value, 2);
}
