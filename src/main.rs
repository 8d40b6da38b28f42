use clap::Parser;
use mongo_probe::utils::{logger, validation::Validate};
use mongo_probe::{
    render_outcome, CliConfig, ConfigOverrides, ConfigProvider, MongoStore, ProbeConfig,
    ProbeEngine, ProbeError, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting mongo-probe");

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let store = match MongoStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };

    let engine = ProbeEngine::new(store, config.target());

    match engine.run().await {
        Ok(outcome) => {
            match render_outcome(&outcome, config.output_format()) {
                Ok(text) => println!("{}", text),
                Err(e) => exit_with(&e),
            }
            if outcome.is_reachable() {
                tracing::info!("✅ Probe completed");
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Probe failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e);
        }
    }
}

fn load_config(cli: &CliConfig) -> mongo_probe::Result<ProbeConfig> {
    let file_layer = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            TomlConfig::from_file(path)?.as_overrides()
        }
        None => ConfigOverrides::default(),
    };

    ProbeConfig::resolve(file_layer.merge(cli.overrides()))
}

fn exit_with(e: &ProbeError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1));
}
