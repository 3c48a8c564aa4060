use anyhow::Context;
use club_api::config::AppConfig;
use club_api::server::ServerBuilder;
use club_api::storage::RestGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Hosted deployments inject variables directly
    if std::env::var_os("VERCEL").is_none() {
        let _ = dotenvy::dotenv();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(store = ?config.store, "configuration loaded");

    let gateway = RestGateway::new(&config.store).context("failed to build data API client")?;

    ServerBuilder::new()
        .with_gateway(gateway)
        .with_upstream_errors(config.expose_upstream_errors)
        .serve(&config.server.bind_addr())
        .await
}
