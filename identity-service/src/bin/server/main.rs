use std::sync::Arc;

use auth::Authenticator;
use auth::CredentialHasher;
use identity_service::account::ports::AuthenticationUsecase;
use identity_service::config::Config;
use identity_service::domain::account::service::AuthenticationService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryAccountDirectory;
use identity_service::outbound::repositories::PostgresAccountDirectory;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.url.is_some(),
        token_ttl_hours = config.token.ttl_hours,
        "Configuration loaded"
    );

    let token_config = config.token_config()?;
    let credential_hasher = CredentialHasher::with_params(config.hashing_params())?;
    let authenticator = Arc::new(Authenticator::with_hasher(&token_config, credential_hasher));

    let authentication: Arc<dyn AuthenticationUsecase> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let directory = Arc::new(PostgresAccountDirectory::new(pg_pool));
            Arc::new(AuthenticationService::new(
                directory,
                Arc::clone(&authenticator),
            ))
        }
        None => {
            tracing::warn!("No database configured; accounts are kept in memory only");
            let directory = Arc::new(InMemoryAccountDirectory::new());
            Arc::new(AuthenticationService::new(
                directory,
                Arc::clone(&authenticator),
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authentication, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
