#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use std::path::PathBuf;

/// 解析後的執行模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Single {
        email: String,
        name: Option<String>,
    },
    Template {
        template: String,
        start: u64,
        end: Option<u64>,
    },
    Batch {
        file: PathBuf,
    },
}
