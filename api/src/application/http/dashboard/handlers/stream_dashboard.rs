use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, stream};
use nutriscale_core::domain::dashboard::{
    live::LiveDashboard, ports::DashboardService, view::DashboardView,
};

use crate::application::http::server::{
    api_entities::api_error::{ApiError, ApiErrorResponse},
    app_state::AppState,
};

pub const DASHBOARD_EVENT: &str = "dashboard";
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

#[utoipa::path(
    get,
    path = "/stream",
    tag = "dashboard",
    summary = "Live dashboard",
    description = "Server-sent events named `dashboard`, one per change of the nutrition record, the scale weight or the record's freshness. The first event carries the initial view.",
    responses(
        (status = 200, content_type = "text/event-stream", body = DashboardView),
        (status = 500, body = ApiErrorResponse),
    ),
)]
pub async fn stream_dashboard(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let live = state.service.watch_dashboard().map_err(ApiError::from)?;
    tracing::debug!("Dashboard stream opened");

    Ok(Sse::new(dashboard_events(live)).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL)))
}

/// Initial view, then one event per update until both subscriptions end.
/// Dropping the stream drops the subscriptions with it.
fn dashboard_events(live: LiveDashboard) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold((live, true), |(mut live, first)| async move {
        let view: DashboardView = if first {
            live.view()
        } else {
            live.next_update().await?
        };

        let event = Event::default().event(DASHBOARD_EVENT).json_data(&view);
        Some((event, (live, false)))
    })
}
