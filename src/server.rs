use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
    Json,
};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::info;

use crate::clock::Clock;
use crate::model::race::Race;
use crate::render::render_page;
use crate::schedule::ScheduleBoard;

/// Shared application state: the held race collection and the time source.
#[derive(Clone)]
pub struct AppState {
    pub board: ScheduleBoard,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(board: ScheduleBoard, clock: Arc<dyn Clock>) -> Self {
        Self { board, clock }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(schedule_page))
        .route("/api/races", get(races_json))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Viewer timezone as an IANA name, e.g. "America/New_York".
    pub tz: Option<String>,
}

/// Resolve the viewer timezone, falling back to UTC when the parameter is
/// missing or not a known IANA name. Never an error to the viewer.
pub fn resolve_tz(query: &PageQuery) -> Tz {
    query
        .tz
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}

/// GET / - the rendered schedule table, localized per the `tz` query param.
async fn schedule_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let tz = resolve_tz(&query);
    let races = state.board.snapshot().await;
    let now = state.clock.now_utc();
    info!(tz = %tz, count = races.len(), "Rendering schedule page");
    Html(render_page(&races, tz, now))
}

/// GET /api/races - the currently held collection, as the upstream shape.
async fn races_json(State(state): State<AppState>) -> Json<Vec<Race>> {
    Json(state.board.snapshot().await)
}
