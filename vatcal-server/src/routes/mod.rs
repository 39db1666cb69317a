pub mod events;
pub mod regions;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use vatcal_core::api::{EventsResponse, NO_DATA_MESSAGE};
use vatcal_core::feed::EventFeed;
use vatcal_core::{Region, VatcalError};

use crate::state::AppState;

pub fn router<F: EventFeed + 'static>() -> Router<AppState<F>> {
    Router::new()
        .merge(events::router())
        .merge(regions::router())
}

/// A request for `region` that could not be served.
pub struct EventsError {
    region: Region,
    error: VatcalError,
}

impl EventsError {
    pub fn new(region: Region, error: VatcalError) -> Self {
        EventsError { region, error }
    }
}

impl IntoResponse for EventsError {
    fn into_response(self) -> Response {
        let message = match self.error {
            VatcalError::NoDataAvailable(_) => NO_DATA_MESSAGE.to_string(),
            other => other.to_string(),
        };
        let body = Json(EventsResponse::failure(self.region, message));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
