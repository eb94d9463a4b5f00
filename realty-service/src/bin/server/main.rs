use std::sync::Arc;

use auth::Authenticator;
use clap::Parser;
use realty_service::cli::Cli;
use realty_service::cli::Command;
use realty_service::config::Config;
use realty_service::domain::user::models::EmailAddress;
use realty_service::domain::user::models::UserRole;
use realty_service::domain::user::ports::AuthServicePort;
use realty_service::domain::user::service::AuthService;
use realty_service::inbound::http::router::create_router;
use realty_service::outbound::repositories::InMemoryUserRepository;
use realty_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Logs go to stderr so `product-key` output can be piped
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "realty_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let authenticator = Arc::new(Authenticator::new(config.auth_settings())?);

    match cli.command() {
        Command::ProductKey { email, role } => print_product_key(&authenticator, email, role),
        Command::Serve => serve(config, authenticator).await,
    }
}

fn print_product_key(
    authenticator: &Authenticator,
    email: String,
    role: UserRole,
) -> Result<(), anyhow::Error> {
    let email = EmailAddress::new(email)?;
    let key = authenticator.generate_product_key(email.as_str(), role.as_str())?;

    println!("{}", key);
    Ok(())
}

async fn serve(config: Config, authenticator: Arc<Authenticator>) -> Result<(), anyhow::Error> {
    tracing::info!(
        service = "realty-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.is_some(),
        token_lifetime_hours = config.jwt.expiration_hours,
        product_key_requires_admin = config.product_key.require_admin,
        "Configuration loaded"
    );

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(AuthService::new(repository, authenticator))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(AuthService::new(repository, authenticator))
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

    let http_application = create_router(auth_service, config.product_key.require_admin);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
