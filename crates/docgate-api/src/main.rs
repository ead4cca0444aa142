mod api_doc;
mod constants;
mod error;
mod handlers;
mod http_metrics;
mod setup;
mod state;
mod telemetry;

use docgate_core::Config;

// Use mimalloc as the global allocator, especially for musl-based container builds.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;
    let (_state, router) = crate::setup::initialize_app(config.clone())?;
    crate::setup::server::start_server(&config, router).await?;
    Ok(())
}
