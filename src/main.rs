use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use race_schedule::clock::SystemClock;
use race_schedule::schedule::{RefreshTask, ScheduleBoard, ScheduleClient, REFRESH_PERIOD};
use race_schedule::server::{router, AppState};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    // Config
    let races_url = env::var("RACES_URL").expect("RACES_URL must be set");
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let client = ScheduleClient::new(races_url);

    // Seed the board before serving so the first render is never empty when
    // the snapshot fetch succeeded; on failure, start with an empty
    // collection rather than refusing to boot.
    let snapshot_client = client.clone();
    let initial = match tokio::task::spawn_blocking(move || snapshot_client.fetch()).await {
        Ok(Ok(races)) => {
            info!(count = races.len(), "Seeded initial race snapshot");
            races
        }
        Ok(Err(e)) => {
            error!(error = %e, "Initial snapshot fetch failed; starting empty");
            Vec::new()
        }
        Err(e) => {
            error!(error = %e, "Initial snapshot task failed; starting empty");
            Vec::new()
        }
    };
    let board = ScheduleBoard::seeded(initial);

    // Keep the handle alive for the life of the server; dropping it stops
    // the refresh loop.
    let _refresh = RefreshTask::spawn(board.clone(), client, REFRESH_PERIOD);

    let state = AppState::new(board, Arc::new(SystemClock));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "race-schedule listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
