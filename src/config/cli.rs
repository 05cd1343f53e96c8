use crate::config::env::EnvOverrides;
use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "newsdesk")]
#[command(about = "News search proxy that keeps the NewsAPI key on the server")]
pub struct ServerArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bind host (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory with the prebuilt frontend bundle
    #[arg(long)]
    pub public_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ServerArgs {
    /// 預設值 → TOML → 環境變數 → 命令列參數
    pub fn into_config(self, env: &EnvOverrides) -> Result<AppConfig> {
        let mut config = AppConfig::from_sources(self.config.as_deref(), env)?;

        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(public_dir) = self.public_dir {
            config.server.public_dir = public_dir;
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.log_json;

        Ok(config)
    }
}
