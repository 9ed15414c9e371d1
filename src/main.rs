//! Cinegraph backend entry point
//!
//! Loads configuration, builds the GraphQL schema over the TMDB client,
//! and serves it at /graphql.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinegraph::config::Config;
use cinegraph::services::TmdbClient;
use cinegraph::{AppState, graphql, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first; a missing TMDB credential refuses startup
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinegraph=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting Cinegraph gateway");
    tracing::info!("Configuration loaded");

    let tmdb = Arc::new(TmdbClient::new(&config)?);
    let schema = graphql::build_schema(tmdb);
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        schema,
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
