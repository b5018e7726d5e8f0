use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trove::{
    api::routes::create_router,
    auth::AuthService,
    cli::Cli,
    db::DatabaseProvider,
    utils::Config,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config =
        Config::from_env().map_err(|e| anyhow::anyhow!("Bad configuration: {}", e))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let provider = match cli.database {
        Some(path) => DatabaseProvider::SQLite { path },
        None => DatabaseProvider::from_env(),
    };
    let db = provider
        .create_client()
        .await
        .map_err(|e| anyhow::anyhow!("Storage unavailable: {}", e))?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.hash_time_cost,
    )
    .map_err(|e| anyhow::anyhow!("Bad auth configuration: {}", e))?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        db: Arc::from(db),
        auth_service: Arc::new(auth_service),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", trove::api::ApiDoc::openapi()),
        )
    };

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
