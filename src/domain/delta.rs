use serde::{Deserialize, Serialize};

/// Unit applied to a formatted delta string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaUnit {
    /// Percentage points, rendered with a trailing " pp".
    Pp,
    /// Percent, rendered with a trailing "%".
    Percent,
    /// No suffix.
    Raw,
}

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaSign {
    Up,
    Down,
    Flat,
}

/// A computed period-over-period change for an indicator card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delta {
    /// Raw difference, current minus previous. None when either input
    /// is missing or non-finite.
    pub delta: Option<f64>,
    pub sign: DeltaSign,
    /// Display string, e.g. "+0.4 pp" or "\u{2212}1.2%". Empty when
    /// delta is None.
    pub formatted: String,
}

/// Computes the change between two indicator readings.
///
/// Missing or non-finite inputs yield a flat delta with an empty
/// formatted string so indicator cards can render an em-dash instead
/// of a bogus number. Negative deltas are formatted with a true minus
/// sign (U+2212), not an ASCII hyphen.
pub fn compute_delta(current: Option<f64>, previous: Option<f64>, unit: DeltaUnit) -> Delta {
    let (current, previous) = match (current, previous) {
        (Some(c), Some(p)) if c.is_finite() && p.is_finite() => (c, p),
        _ => {
            return Delta {
                delta: None,
                sign: DeltaSign::Flat,
                formatted: String::new(),
            }
        }
    };

    let delta = current - previous;
    let sign = if delta > 0.0 {
        DeltaSign::Up
    } else if delta < 0.0 {
        DeltaSign::Down
    } else {
        DeltaSign::Flat
    };

    let prefix = match sign {
        DeltaSign::Up => "+",
        DeltaSign::Down => "\u{2212}",
        DeltaSign::Flat => "",
    };
    let suffix = match unit {
        DeltaUnit::Pp => " pp",
        DeltaUnit::Percent => "%",
        DeltaUnit::Raw => "",
    };
    let formatted = format!("{}{:.1}{}", prefix, delta.abs(), suffix);

    Delta {
        delta: Some(delta),
        sign,
        formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number_deltas() {
        let d = compute_delta(Some(5.0), Some(3.0), DeltaUnit::Percent);
        assert_eq!(d.delta, Some(2.0));
        assert_eq!(d.sign, DeltaSign::Up);
        assert_eq!(d.formatted, "+2.0%");

        let d = compute_delta(Some(3.0), Some(5.0), DeltaUnit::Pp);
        assert_eq!(d.delta, Some(-2.0));
        assert_eq!(d.sign, DeltaSign::Down);
        assert_eq!(d.formatted, "\u{2212}2.0 pp");
    }

    #[test]
    fn test_positive_delta_pp() {
        let d = compute_delta(Some(12.9), Some(12.5), DeltaUnit::Pp);
        assert_eq!(d.sign, DeltaSign::Up);
        assert_eq!(d.formatted, "+0.4 pp");
        assert!((d.delta.unwrap() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_negative_delta_percent_uses_minus_sign() {
        let d = compute_delta(Some(3.1), Some(4.3), DeltaUnit::Percent);
        assert_eq!(d.sign, DeltaSign::Down);
        assert_eq!(d.formatted, "\u{2212}1.2%");
    }

    #[test]
    fn test_zero_delta_is_flat() {
        let d = compute_delta(Some(7.0), Some(7.0), DeltaUnit::Raw);
        assert_eq!(d.sign, DeltaSign::Flat);
        assert_eq!(d.formatted, "0.0");
        assert_eq!(d.delta, Some(0.0));
    }

    #[test]
    fn test_missing_input_yields_empty() {
        let d = compute_delta(None, Some(4.3), DeltaUnit::Pp);
        assert_eq!(d.delta, None);
        assert_eq!(d.sign, DeltaSign::Flat);
        assert_eq!(d.formatted, "");
    }

    #[test]
    fn test_non_finite_input_yields_empty() {
        let d = compute_delta(Some(f64::NAN), Some(1.0), DeltaUnit::Raw);
        assert_eq!(d.delta, None);
        assert_eq!(d.formatted, "");

        let d = compute_delta(Some(1.0), Some(f64::INFINITY), DeltaUnit::Raw);
        assert_eq!(d.delta, None);
        assert_eq!(d.sign, DeltaSign::Flat);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        let d = compute_delta(Some(2.0), Some(1.85), DeltaUnit::Percent);
        assert_eq!(d.formatted, "+0.1%");
    }

    #[test]
    fn test_sign_serializes_lowercase() {
        let d = compute_delta(Some(2.0), Some(1.0), DeltaUnit::Raw);
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value["sign"], "up");
    }
}
