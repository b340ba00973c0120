//! Pure matching and enrichment logic for the trade-data route.

pub mod enrich;
pub mod matcher;

pub use enrich::{enrich_rows, DOWNLOAD_URL_PLACEHOLDER};
pub use matcher::{normalize, normalize_keys, KeyMatcher, NormalizedKey, SubstringMatcher};
