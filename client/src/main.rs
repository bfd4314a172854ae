use anyhow::Context;
use clap::Parser;
use log::error;
use sansi_client::cli::{self, Cli};
use sansi_client::config::parse_api_url;
use sansi_client::{ApiClient, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let mut config = ClientConfig::load().context("Failed to load configuration")?;
    if let Some(url) = &args.api_url {
        config.api_url = parse_api_url(url)?;
    }
    if let Some(token) = &args.token {
        config.token = Some(token.clone());
    }

    let client = ApiClient::new(config)?;
    match cli::run(&args.command, &client).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            Err(e)
        }
    }
}
