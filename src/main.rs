use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use lectern_backend::core::config::Settings;
use lectern_backend::core::logging;
use lectern_backend::server::router::router;
use lectern_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("Failed to load settings")?;
    logging::init(&settings.log_dir);

    let bind_addr = format!("127.0.0.1:{}", settings.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let state = AppState::new(settings);
    let app: Router = router(state);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
