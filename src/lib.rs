pub use crate::config::{DiffStyle, GoldConfig, GoldConfigBuilder};
pub use crate::context::TestContext;
pub use crate::error::{GoldError, GoldResult};
pub use crate::gold::Gold;
pub use crate::golden::Golden;
pub use crate::normalize::{normalize_line_endings, normalize_str};

pub mod cli;
pub mod config;
pub mod context;
pub mod diff;
pub mod encode;
pub mod error;
pub mod gold;
pub mod golden;
pub mod limit;
pub mod normalize;
