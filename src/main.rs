use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinefeed::{Config, FeedOrchestrator, HttpGateway, Section, SectionState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let gateway = Arc::new(HttpGateway::from_config(&config)?);
    let orchestrator = FeedOrchestrator::new(gateway, &config);

    tracing::info!(api = %config.catalog_api_url, "Fetching feed sections");
    orchestrator.start_all().await;

    let snapshot = orchestrator.snapshot().await;
    for section in Section::ALL {
        match snapshot.section(section).map(|view| &view.state) {
            Some(SectionState::Loaded(records)) => {
                tracing::info!(section = %section, records = records.len(), "Section ready");
            }
            Some(SectionState::Failed(message)) => {
                tracing::warn!(section = %section, message = %message, "Section failed");
            }
            _ => {}
        }
    }

    let carousel = orchestrator.primary_carousel().await;
    tracing::info!(records = carousel.len(), "Primary carousel selected");

    Ok(())
}
