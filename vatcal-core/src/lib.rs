//! Core types for vatcal.
//!
//! This crate provides everything shared by the event server and the terminal client:
//! - `Event` and `RawEvent` for VATSIM network events
//! - `cache` for the per-region event cache with merge/retention
//! - `layout` and `view` for placing events on a calendar grid
//! - `api` for the JSON types exchanged over HTTP

pub mod api;
pub mod cache;
pub mod constants;
pub mod error;
pub mod event;
pub mod feed;
pub mod layout;
pub mod region;
pub mod view;

// Re-export the common types at crate root for convenience
pub use error::{VatcalError, VatcalResult};
pub use event::{Event, RawEvent, Route};
pub use region::Region;
pub use view::ViewMode;
