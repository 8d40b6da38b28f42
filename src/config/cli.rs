use crate::config::ConfigOverrides;
use crate::domain::model::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Parser)]
#[command(name = "mongo-probe")]
#[command(about = "Fetch the first document of a MongoDB collection to check connectivity")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Connection string (mongodb:// or mongodb+srv://)
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub uri: Option<String>,

    #[arg(long)]
    pub database: Option<String>,

    #[arg(long)]
    pub collection: Option<String>,

    /// Top-level key to extract from the first document
    #[arg(long)]
    pub field: Option<String>,

    /// Server selection timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// CA bundle used to verify the server certificate
    #[arg(long)]
    pub tls_ca_file: Option<PathBuf>,

    #[arg(long)]
    pub app_name: Option<String>,

    #[arg(long)]
    pub server_api_version: Option<String>,

    /// Output format: pretty or compact
    #[arg(long)]
    pub output: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            uri: self.uri.clone(),
            server_api_version: self.server_api_version.clone(),
            timeout_ms: self.timeout_ms,
            tls_ca_file: self.tls_ca_file.clone(),
            app_name: self.app_name.clone(),
            database: self.database.clone(),
            collection: self.collection.clone(),
            field: self.field.clone(),
            output: self.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::try_parse_from([
            "mongo-probe",
            "--uri",
            "mongodb://localhost:27017",
            "--collection",
            "videos",
            "--field",
            "229202",
            "--timeout-ms",
            "250",
            "--output",
            "compact",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.uri.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(overrides.collection.as_deref(), Some("videos"));
        assert_eq!(overrides.field.as_deref(), Some("229202"));
        assert_eq!(overrides.timeout_ms, Some(250));
        assert_eq!(overrides.output, Some(OutputFormat::Compact));
        assert!(overrides.database.is_none());
    }

    #[test]
    fn test_rejects_unknown_output_format() {
        let result = CliConfig::try_parse_from([
            "mongo-probe",
            "--uri",
            "mongodb://localhost",
            "--output",
            "yaml",
        ]);
        assert!(result.is_err());
    }
}
