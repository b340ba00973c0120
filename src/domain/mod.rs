//! Domain types for the statistics-agency public site.
//!
//! This module provides:
//! - Trade dataset rows and their JSON serialization
//! - Period-over-period delta computation for indicator cards
//! - Static gallery event data served to the front end

pub mod delta;
pub mod gallery;
pub mod trade;

pub use delta::{compute_delta, Delta, DeltaSign, DeltaUnit};
pub use gallery::{gallery_events, GalleryEvent, GalleryPhoto};
pub use trade::TradeRow;
