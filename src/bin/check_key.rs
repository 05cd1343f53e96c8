use anyhow::Context;
use clap::Parser;
use newsdesk::config::env::EnvOverrides;
use newsdesk::utils::{logger, validation::Validate};
use newsdesk::{AppConfig, KeyCheck, NewsApiClient, NewsService};

#[derive(Parser)]
#[command(name = "check-key")]
#[command(about = "Checks whether the configured NEWSAPI_KEY is accepted by NewsAPI")]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let env = EnvOverrides::from_env().context("reading environment")?;
    let config = AppConfig::from_sources(args.config.as_deref(), &env)
        .context("loading configuration")?;
    config.validate().context("validating configuration")?;

    let client = NewsApiClient::new(&config.upstream)?;
    let service = NewsService::new(client, &config);

    let status = match service.check_key().await {
        KeyCheck::NotConfigured => {
            eprintln!("❌ NEWSAPI_KEY is not set");
            std::process::exit(1);
        }
        KeyCheck::Checked(status) => status,
    };

    println!("{}", serde_json::to_string_pretty(&status)?);
    if !status.valid {
        std::process::exit(1);
    }

    Ok(())
}
