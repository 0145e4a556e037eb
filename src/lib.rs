pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::adapters::prompt::TerminalPrompt;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::galaxy::GalaxyClient;
pub use crate::config::Mode;
pub use crate::core::orchestrator::Provisioner;
pub use crate::utils::error::{ProvisionError, Result};
