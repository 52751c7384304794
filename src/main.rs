use anyhow::Result;
use show_tracker::state::AppState;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_state = AppState::from_env()?;
    show_tracker::serve(app_state).await?;
    Ok(())
}
