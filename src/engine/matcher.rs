//! Normalized substring matching between program names and object keys.
//!
//! Object keys in the storage bucket are named by hand, so casing and
//! spacing drift from the dataset's program names. Matching happens on
//! a normalized form of both sides: lowercase, with runs of whitespace
//! collapsed to single spaces and ends trimmed.

/// Lowercases and collapses all whitespace runs to single spaces.
pub fn normalize(s: &str) -> String {
    let lower = s.to_lowercase();
    lower.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// An object key paired with its precomputed normalized form.
///
/// Normalizing once per key keeps enrichment linear in rows rather
/// than recomputing per row-key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKey {
    pub original: String,
    pub normalized: String,
}

impl NormalizedKey {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let normalized = normalize(&original);
        NormalizedKey {
            original,
            normalized,
        }
    }
}

/// Precomputes normalized forms for a listing of object keys.
pub fn normalize_keys(keys: impl IntoIterator<Item = String>) -> Vec<NormalizedKey> {
    keys.into_iter().map(NormalizedKey::new).collect()
}

/// Strategy for picking the storage object that backs a dataset row.
pub trait KeyMatcher: Send + Sync {
    /// Returns the first candidate that matches `program`, or None.
    fn match_key<'a>(
        &self,
        program: &str,
        candidates: &'a [NormalizedKey],
    ) -> Option<&'a NormalizedKey>;
}

/// Matches when the normalized program name appears as a substring of
/// the normalized object key. First match in listing order wins.
#[derive(Debug, Clone, Default)]
pub struct SubstringMatcher;

impl KeyMatcher for SubstringMatcher {
    fn match_key<'a>(
        &self,
        program: &str,
        candidates: &'a [NormalizedKey],
    ) -> Option<&'a NormalizedKey> {
        let needle = normalize(program);
        if needle.is_empty() {
            return None;
        }
        candidates.iter().find(|key| key.normalized.contains(&needle))
    }
}
