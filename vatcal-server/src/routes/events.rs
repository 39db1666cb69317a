//! Event listing endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use vatcal_core::Region;
use vatcal_core::api::EventsResponse;
use vatcal_core::feed::EventFeed;

use crate::routes::EventsError;
use crate::state::AppState;

pub fn router<F: EventFeed + 'static>() -> Router<AppState<F>> {
    Router::new().route("/api/events", get(list_events::<F>))
}

#[derive(Deserialize)]
pub struct EventsQuery {
    pub region: Option<String>,
}

/// GET /api/events?region={all|EMEA} - Events for a region, from cache when fresh
async fn list_events<F: EventFeed>(
    State(state): State<AppState<F>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, EventsError> {
    let region = Region::parse_or(query.region.as_deref(), state.default_region);

    let snapshot = state
        .cache
        .get_events(region)
        .await
        .map_err(|e| EventsError::new(region, e))?;

    Ok(Json(snapshot.into()))
}
