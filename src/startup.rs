use std::time::Duration;

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{
    config::Config,
    error::{config::ConfigError, AppError},
};

/// Timeout applied to every request made to the Patreon proxy.
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Starts the Sentry client when a DSN is configured.
///
/// The returned guard flushes pending events when dropped, so it must live until shutdown.
///
/// # Arguments
/// - `config` - Application configuration containing the optional DSN
///
/// # Returns
/// - `Some(ClientInitGuard)` - Sentry is enabled
/// - `None` - No DSN configured
pub fn init_sentry(config: &Config) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.clone()?;

    Some(sentry::init(sentry::ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        ..Default::default()
    }))
}

/// Installs the global tracing subscriber.
///
/// `LOG_LEVEL` accepts any `EnvFilter` directive, e.g. `info` or `patreon_sync=debug`. When a
/// Sentry DSN is configured, error events are also reported to Sentry and lower levels are kept
/// as breadcrumbs.
///
/// # Arguments
/// - `config` - Application configuration containing the log level and format
///
/// # Returns
/// - `Ok(())` - Subscriber installed
/// - `Err(AppError::ConfigErr)` - The log level is not a valid filter directive
pub fn init_tracing(config: &Config) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| ConfigError::InvalidEnvVar {
        name: "LOG_LEVEL".to_string(),
        reason: e.to_string(),
    })?;

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    let sentry_layer = config.sentry_dsn.as_ref().map(|_| sentry_tracing::layer());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(sentry_layer)
        .with(filter)
        .init();

    Ok(())
}

/// Connects to the Postgres database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then runs
/// all pending SeaORM migrations so the entitlement tables are up-to-date before the first run.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by every Patreon proxy request.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Client with the per-request timeout applied
/// - `Err(AppError::ReqwestErr)` - The TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()?;

    Ok(client)
}
