//! Region listing endpoint

use axum::{Json, Router, routing::get};

use vatcal_core::Region;
use vatcal_core::api::RegionInfo;
use vatcal_core::feed::EventFeed;

use crate::state::AppState;

pub fn router<F: EventFeed + 'static>() -> Router<AppState<F>> {
    Router::new().route("/api/regions", get(list_regions))
}

/// GET /api/regions - Regions a client may ask for
async fn list_regions() -> Json<Vec<RegionInfo>> {
    Json(Region::ALL.into_iter().map(RegionInfo::from).collect())
}
