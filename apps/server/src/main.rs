#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::{sync::Arc, time::Duration};

use eventlift_api::{
    construct_router,
    retry::RetryPolicy,
    state::{State, StateConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting EventLift API Service");

    let config = config::Config::from_env()?;

    let state = State::connect(
        &config.database_url,
        StateConfig {
            identity_base_url: config.identity_base_url.clone(),
            session_ttl: Duration::from_secs(config.session_cache_ttl_secs),
            retry: RetryPolicy {
                max_attempts: config.retry_max_attempts,
                initial_delay: Duration::from_millis(config.retry_initial_delay_ms),
            },
        },
    )
    .await?;

    let app = construct_router(Arc::new(state));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
