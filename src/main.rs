use std::sync::Arc;

use card_advisor::api::HttpAdvisorApi;
use card_advisor::channels::CliChannel;
use card_advisor::config::AdvisorConfig;
use card_advisor::conversation::ConversationController;

#[tokio::main]
async fn main() -> card_advisor::error::Result<()> {
    // Logs go to stderr; stdout carries the chat.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AdvisorConfig::from_env()?;
    tracing::info!(api = %config.api_base_url, "Starting card advisor");

    let api = Arc::new(HttpAdvisorApi::new(config.api_base_url.clone()));
    let controller = Arc::new(ConversationController::new(api));

    CliChannel::new(controller)
        .run(&config.name, CliChannel::start())
        .await?;

    Ok(())
}
