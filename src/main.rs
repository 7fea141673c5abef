mod config;
mod data;
mod error;
mod model;
mod patreon;
mod scheduler;
mod service;
mod startup;
mod util;

use crate::{
    config::Config,
    error::AppError,
    patreon::client::PatreonProxyClient,
    scheduler::entitlement_sync,
    service::reconciler::{Reconciler, SyncSettings},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let _sentry = startup::init_sentry(&config);
    startup::init_tracing(&config)?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let client = PatreonProxyClient::new(
        http_client,
        config.patreon_proxy_root_url.clone(),
        config.patreon_proxy_auth_token.clone(),
    );
    let settings = SyncSettings::from_config(&config);

    if !config.daemon {
        tracing::info!("Running entitlement sync once");
        let summary = Reconciler::new(&db, &client, &settings)
            .run()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Entitlement sync failed"))?;
        tracing::info!(?summary, "Entitlement sync finished");

        return Ok(());
    }

    tracing::info!("Starting entitlement sync daemon");
    let mut scheduler =
        entitlement_sync::start_scheduler(db, client, settings, config.run_frequency).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Error waiting for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");
    scheduler.shutdown().await?;

    Ok(())
}
