use clap::Parser;
use newsdesk::config::env::EnvOverrides;
use newsdesk::utils::{logger, validation::Validate};
use newsdesk::ServerArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // 日誌設定來自配置，載入失敗時只能直接輸出到 stderr
    let config = match EnvOverrides::from_env().and_then(|env| args.into_config(&env)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_server_logger(config.logging.verbose, config.logging.json);

    tracing::info!("Starting newsdesk proxy");
    tracing::debug!("Server config: {:?}", config);

    // 驗證配置：錯誤中止，警告繼續
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    for warning in config.warnings() {
        tracing::warn!(warning = ?warning, "{}", warning.message());
    }

    if let Err(e) = newsdesk::app::serve(config).await {
        tracing::error!(
            "❌ Server stopped with error: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    Ok(())
}
