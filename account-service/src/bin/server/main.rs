use std::sync::Arc;

use account_service::config::Config;
use account_service::config::StorageBackend;
use account_service::domain::authentication::ports::AuthServicePort;
use account_service::domain::authentication::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        app_name = %config.app.name,
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        jwt_algorithm = %config.jwt.algorithm,
        access_token_expire_minutes = config.jwt.access_token_expire_minutes,
        refresh_token_expire_days = config.jwt.refresh_token_expire_days,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::with_settings(
        config.jwt.secret.as_bytes(),
        config.jwt.token_settings()?,
    )?);

    let auth_service: Arc<dyn AuthServicePort> = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(AuthService::new(user_repository, authenticator))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory user store; accounts are lost on restart");
            let user_repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(AuthService::new(user_repository, authenticator))
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

    let http_application = create_router(auth_service, config.app.name);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
