#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{OutputFormat, ProbeTarget, DEFAULT_COLLECTION, DEFAULT_DATABASE};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ProbeError, Result};
use crate::utils::redact::redact_uri;
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_API_VERSION: &str = "1";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const MAX_TIMEOUT_MS: u64 = 600_000;

/// One layer of optional settings. Later layers win when merged.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub uri: Option<String>,
    pub server_api_version: Option<String>,
    pub timeout_ms: Option<u64>,
    pub tls_ca_file: Option<PathBuf>,
    pub app_name: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
    pub field: Option<String>,
    pub output: Option<OutputFormat>,
}

impl ConfigOverrides {
    pub fn merge(self, over: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            uri: over.uri.or(self.uri),
            server_api_version: over.server_api_version.or(self.server_api_version),
            timeout_ms: over.timeout_ms.or(self.timeout_ms),
            tls_ca_file: over.tls_ca_file.or(self.tls_ca_file),
            app_name: over.app_name.or(self.app_name),
            database: over.database.or(self.database),
            collection: over.collection.or(self.collection),
            field: over.field.or(self.field),
            output: over.output.or(self.output),
        }
    }
}

/// Fully resolved probe settings.
#[derive(Clone)]
pub struct ProbeConfig {
    pub uri: String,
    pub server_api_version: String,
    pub timeout_ms: u64,
    pub tls_ca_file: Option<PathBuf>,
    pub app_name: Option<String>,
    pub database: String,
    pub collection: String,
    pub field: Option<String>,
    pub output: OutputFormat,
}

impl ProbeConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            server_api_version: DEFAULT_SERVER_API_VERSION.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            tls_ca_file: None,
            app_name: None,
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            field: None,
            output: OutputFormat::default(),
        }
    }

    /// Applies defaults to a merged layer. The connection string has no default.
    pub fn resolve(layer: ConfigOverrides) -> Result<Self> {
        let uri = layer.uri.ok_or_else(|| ProbeError::MissingConfigError {
            field: "connection.uri".to_string(),
        })?;

        let defaults = Self::new(uri);
        Ok(Self {
            server_api_version: layer
                .server_api_version
                .unwrap_or(defaults.server_api_version),
            timeout_ms: layer.timeout_ms.unwrap_or(defaults.timeout_ms),
            tls_ca_file: layer.tls_ca_file,
            app_name: layer.app_name,
            database: layer.database.unwrap_or(defaults.database),
            collection: layer.collection.unwrap_or(defaults.collection),
            field: layer.field,
            output: layer.output.unwrap_or(defaults.output),
            uri: defaults.uri,
        })
    }
}

// Hand-written so the password in `uri` never reaches a log line.
impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("uri", &redact_uri(&self.uri))
            .field("server_api_version", &self.server_api_version)
            .field("timeout_ms", &self.timeout_ms)
            .field("tls_ca_file", &self.tls_ca_file)
            .field("app_name", &self.app_name)
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("field", &self.field)
            .field("output", &self.output)
            .finish()
    }
}

impl ConfigProvider for ProbeConfig {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn server_api_version(&self) -> &str {
        &self.server_api_version
    }

    fn server_selection_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn tls_ca_file(&self) -> Option<&Path> {
        self.tls_ca_file.as_deref()
    }

    fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    fn target(&self) -> ProbeTarget {
        ProbeTarget::new(&self.database, &self.collection).with_field(self.field.clone())
    }

    fn output_format(&self) -> OutputFormat {
        self.output
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<()> {
        if let Some(var) = toml_config::unresolved_placeholder(&self.uri) {
            return Err(ProbeError::ConfigValidationError {
                field: "connection.uri".to_string(),
                message: format!("environment variable {} is not set", var),
            });
        }
        validation::validate_mongo_uri("connection.uri", &self.uri)?;
        validation::validate_one_of(
            "connection.server_api_version",
            &self.server_api_version,
            &[DEFAULT_SERVER_API_VERSION],
        )?;
        validation::validate_range("connection.timeout_ms", self.timeout_ms, 1, MAX_TIMEOUT_MS)?;

        if let Some(ca_file) = &self.tls_ca_file {
            validation::validate_path("connection.tls_ca_file", &ca_file.to_string_lossy())?;
        }
        if let Some(app_name) = &self.app_name {
            validation::validate_non_empty_string("connection.app_name", app_name)?;
        }

        validation::validate_database_name("target.database", &self.database)?;
        validation::validate_collection_name("target.collection", &self.collection)?;
        if let Some(field) = &self.field {
            validation::validate_non_empty_string("target.field", field)?;
        }

        Ok(())
    }
}
