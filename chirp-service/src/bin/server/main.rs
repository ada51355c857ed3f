use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use chirp_service::config::Config;
use chirp_service::domain::auth::service::AuthService;
use chirp_service::domain::chirp::service::ChirpService;
use chirp_service::domain::user::service::UserService;
use chirp_service::inbound::http::router::create_router;
use chirp_service::inbound::http::router::AppState;
use chirp_service::outbound::repositories::PostgresChirpRepository;
use chirp_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirp_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirp-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // The database URL may embed credentials and the JWT secret is never logged
    tracing::info!(
        http_port = config.server.http_port,
        static_dir = %config.server.static_dir,
        platform = %config.platform,
        argon2_memory_kib = config.password.memory_kib,
        argon2_iterations = config.password.iterations,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_work_factor(config.password.work_factor())?
        .with_max_password_bytes(config.password.max_password_bytes);
    let jwt_handler = JwtHandler::new(config.jwt.secret.as_bytes())?;
    let authenticator = Arc::new(Authenticator::new(password_hasher.clone(), jwt_handler));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool));

    let state = AppState::new(
        Arc::new(UserService::new(Arc::clone(&user_repository), password_hasher)),
        Arc::new(ChirpService::new(chirp_repository)),
        Arc::new(AuthService::new(user_repository, authenticator)),
        config.platform.clone(),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.static_dir);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
