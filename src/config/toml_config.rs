use crate::config::ConfigOverrides;
use crate::domain::model::OutputFormat;
use crate::utils::error::{ProbeError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub connection: ConnectionConfig,
    pub target: TargetConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
    pub uri: Option<String>,
    pub server_api_version: Option<String>,
    pub timeout_ms: Option<u64>,
    pub tls_ca_file: Option<PathBuf>,
    pub app_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub database: Option<String>,
    pub collection: Option<String>,
    pub field: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProbeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MONGODB_URI})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
            })
            .into_owned()
    }

    /// The file's values as a layer to merge under command-line overrides.
    pub fn as_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            uri: self.connection.uri.clone(),
            server_api_version: self.connection.server_api_version.clone(),
            timeout_ms: self.connection.timeout_ms,
            tls_ca_file: self.connection.tls_ca_file.clone(),
            app_name: self.connection.app_name.clone(),
            database: self.target.database.clone(),
            collection: self.target.collection.clone(),
            field: self.target.field.clone(),
            output: self.output.format,
        }
    }
}

/// Returns the first `${VAR}` placeholder left in `value`, if any.
pub fn unresolved_placeholder(value: &str) -> Option<&str> {
    env_var_pattern()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
