use std::{sync::Arc, time::Instant};

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    patreon::client::PatreonProxyClient,
    service::reconciler::{Reconciler, SyncSettings},
};

/// Starts the entitlement sync scheduler
///
/// Runs a reconciliation every `frequency`. A tick that fires while the previous run is still
/// in progress is skipped, so at most one run is active at a time. Run failures are logged and
/// retried on the next tick.
///
/// # Arguments
/// - `db`: Database connection
/// - `client`: Patreon proxy client
/// - `settings`: Settings every run reads
/// - `frequency`: Interval between ticks
///
/// # Returns
/// - `Ok(JobScheduler)` - The started scheduler, to be shut down on exit
/// - `Err(AppError::SchedulerErr)` - The job could not be created or the scheduler started
pub async fn start_scheduler(
    db: DatabaseConnection,
    client: PatreonProxyClient,
    settings: SyncSettings,
    frequency: std::time::Duration,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let settings = Arc::new(settings);
    let running = Arc::new(Mutex::new(()));

    let job = Job::new_repeated_async(frequency, move |_uuid, _lock| {
        let db = db.clone();
        let client = client.clone();
        let settings = settings.clone();
        let running = running.clone();

        Box::pin(async move {
            let Ok(_guard) = running.try_lock() else {
                tracing::warn!("Previous entitlement sync still running, skipping tick");
                return;
            };

            let started = Instant::now();
            match Reconciler::new(&db, &client, &settings).run().await {
                Ok(summary) => tracing::info!(
                    duration_ms = started.elapsed().as_millis() as u64,
                    removed = summary.removed,
                    "Finished entitlement sync"
                ),
                Err(e) => tracing::error!(
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Error syncing entitlements: {}",
                    e
                ),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(?frequency, "Entitlement sync scheduler started");

    Ok(scheduler)
}
