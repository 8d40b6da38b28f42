pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::MongoStore;
pub use config::{toml_config::TomlConfig, ConfigOverrides, ProbeConfig};
pub use core::{probe::ProbeEngine, render::render_outcome};
pub use domain::model::{OutputFormat, ProbeOutcome, ProbeTarget};
pub use domain::ports::{ConfigProvider, DocumentStore};
pub use utils::error::{ProbeError, Result};
