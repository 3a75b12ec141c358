use anyhow::Result;

use bhutan_tours::{app, config, db, logging, services::RedisCache};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting Bhutan tours backend"
    );

    let pool = db::create_pool(&settings).await?;

    let cache = RedisCache::new(&settings.redis_url, settings.redis_cache_ttl_seconds).await?;

    let state = app::AppState::new(pool, settings.clone(), cache);
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
