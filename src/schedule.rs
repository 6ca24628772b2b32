use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, instrument};

use crate::model::race::Race;

/// How often the board refetches the upstream race list.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(30);

/// Client for the upstream races endpoint.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    url: String,
}

impl ScheduleClient {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    /// Fetch the current race list from the upstream endpoint.
    ///
    /// Blocking; callers on the async runtime wrap this in `spawn_blocking`.
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    pub fn fetch(&self) -> Result<Vec<Race>, String> {
        let response_result = {
            let _span = info_span!("races_fetch", url = %self.url).entered();
            ureq::get(&self.url).call()
        };
        match response_result {
            Ok(response) => {
                let status = response.status().as_u16();
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => {
                        if !(200..300).contains(&status) {
                            error!(status, "Races endpoint returned non-success status");
                            return Err(format!("Races endpoint returned status {}", status));
                        }
                        parse_races(&body)
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read races response body");
                        Err(format!("Failed to read races response body: {}", e))
                    }
                }
            }
            Err(e) => {
                error!(error = %e, url = %self.url, "Races request failed");
                Err(format!("Races request failed: {}", e))
            }
        }
    }
}

/// Deserialize a JSON array of races (no network).
pub fn parse_races(body: &str) -> Result<Vec<Race>, String> {
    match serde_json::from_str::<Vec<Race>>(body) {
        Ok(races) => Ok(races),
        Err(e) => {
            error!(error = %e, "Failed to deserialize races payload");
            Err(format!("Failed to deserialize races payload: {}", e))
        }
    }
}

/// The single held race collection visible to the render layer.
///
/// Seeded once with a startup snapshot, then wholesale-replaced by each
/// successful refresh. Failed refreshes leave the previous collection in
/// place (stale-but-available), so the view never regresses to empty.
#[derive(Debug, Clone)]
pub struct ScheduleBoard {
    races: Arc<RwLock<Vec<Race>>>,
}

impl ScheduleBoard {
    /// Seed the board with the initial snapshot so the first render is never
    /// empty when the snapshot succeeded.
    pub fn seeded(initial: Vec<Race>) -> Self {
        Self {
            races: Arc::new(RwLock::new(initial)),
        }
    }

    /// Clone out the currently held collection.
    pub async fn snapshot(&self) -> Vec<Race> {
        self.races.read().await.clone()
    }

    /// Apply one refresh outcome: replace the whole collection on success,
    /// keep the previous one on failure. Errors are logged and discarded
    /// here; nothing downstream of the board ever sees them.
    pub async fn apply(&self, fetched: Result<Vec<Race>, String>) {
        match fetched {
            Ok(races) => {
                let count = races.len();
                *self.races.write().await = races;
                info!(count, "Replaced race collection from refresh");
            }
            Err(e) => {
                error!(error = %e, "Refresh failed; keeping previous race collection");
            }
        }
    }
}

/// Handle to the background refresh loop. Dropping it aborts the loop so no
/// refresh can write into the board after the owning view is torn down.
#[derive(Debug)]
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Spawn the periodic refresh: one fetch immediately, then one per
    /// `period`. No backoff and no retry beyond the next scheduled tick.
    ///
    /// If a fetch outlives the period the next tick still fires, and the
    /// last response to arrive wins. That overlap is accepted behavior,
    /// not guarded against.
    pub fn spawn(board: ScheduleBoard, client: ScheduleClient, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let client = client.clone();
                let fetched = match tokio::task::spawn_blocking(move || client.fetch()).await {
                    Ok(result) => result,
                    Err(e) => Err(format!("Refresh task join error: {}", e)),
                };
                board.apply(fetched).await;
            }
        });
        Self { handle }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
