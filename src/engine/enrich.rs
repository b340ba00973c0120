use crate::domain::TradeRow;
use crate::engine::matcher::{normalize, KeyMatcher, NormalizedKey};

/// Placeholder download URL attached to matched rows. Clients exchange
/// the row's `downloadKey` for a real URL via the presign route.
pub const DOWNLOAD_URL_PLACEHOLDER: &str = "#";

/// Attaches download keys to dataset rows by matching program names
/// against the storage listing.
///
/// Row order and count are preserved. Rows with an empty or
/// whitespace-only program name pass through unchanged, as do rows
/// with no matching key.
pub fn enrich_rows(
    rows: Vec<TradeRow>,
    keys: &[NormalizedKey],
    matcher: &dyn KeyMatcher,
) -> Vec<TradeRow> {
    rows.into_iter()
        .map(|row| enrich_row(row, keys, matcher))
        .collect()
}

fn enrich_row(mut row: TradeRow, keys: &[NormalizedKey], matcher: &dyn KeyMatcher) -> TradeRow {
    if normalize(&row.program).is_empty() {
        return row;
    }
    if let Some(hit) = matcher.match_key(&row.program, keys) {
        row.download_key = Some(hit.original.clone());
        row.download_url = Some(DOWNLOAD_URL_PLACEHOLDER.to_string());
    }
    row
}
