use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use contactserver::api_router::build_router;
use contactserver::config::AppConfig;
use contactserver::contacts::store::PgContactRepository;
use contactserver::image::ImageService;
use contactserver::shared::state::AppState;
use contactserver::shared::utils::{create_conn, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    if config.uses_default_secret() {
        warn!("running with the default JWT secret; set CONTACTSERVER_AUTH__JWT_SECRET");
    }

    let pool = create_conn(&config.database.url)?;
    run_migrations(&pool).map_err(|e| anyhow::anyhow!("migrations failed: {e}"))?;

    std::fs::create_dir_all(&config.uploads.dir)?;

    let state = Arc::new(AppState::new(
        Arc::new(PgContactRepository::new(pool)),
        ImageService::new(config.uploads.dir.clone()),
        config.clone(),
    ));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("contactserver listening on {addr}");
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
