//! Year-window filtering.
//!
//! A filter keeps anything whose date interval overlaps the window, even
//! partially. Dates that cannot be parsed are never hidden.

use serde::Serialize;

use crate::era::{DateSpan, Era, EraDefault};

/// Whether `date_str` overlaps the `[min_year, max_year]` window.
///
/// No bounds means no filter, and unparseable dates always pass.
pub fn is_within_date_range(date_str: &str, min_year: Option<i32>, max_year: Option<i32>) -> bool {
    YearFilter::new(min_year, max_year).admits_str(date_str)
}

/// An optional `[min_year, max_year]` window of signed years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
}

impl YearFilter {
    pub fn new(min_year: Option<i32>, max_year: Option<i32>) -> Self {
        YearFilter { min_year, max_year }
    }

    pub fn is_active(&self) -> bool {
        self.min_year.is_some() || self.max_year.is_some()
    }

    /// Overlap test against an already parsed span.
    pub fn admits(&self, span: Option<DateSpan>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(span) = span else {
            return true;
        };
        let lo = self.min_year.unwrap_or(i32::MIN);
        let hi = self.max_year.unwrap_or(i32::MAX);
        span.start.max(lo) <= span.end.min(hi)
    }

    pub fn admits_str(&self, date_str: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        self.admits(DateSpan::parse(date_str, EraDefault::Ad))
    }

    // ── URL query parameters ─────────────────────────────────────────

    /// Read `minYear`/`maxYear` (unsigned) and `minEra`/`maxEra` ("BC"/"AD",
    /// AD when absent) from query pairs. Unknown keys and unparseable values
    /// are ignored.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (mut min_mag, mut max_mag) = (None, None);
        let (mut min_era, mut max_era) = (Era::Ad, Era::Ad);

        for (key, value) in pairs {
            match key {
                "minYear" => min_mag = value.trim().parse::<u32>().ok(),
                "maxYear" => max_mag = value.trim().parse::<u32>().ok(),
                "minEra" => min_era = value.parse().unwrap_or(min_era),
                "maxEra" => max_era = value.parse().unwrap_or(max_era),
                _ => {}
            }
        }

        let signed = |mag: Option<u32>, era: Era| {
            mag.and_then(|m| i32::try_from(m).ok())
                .map(|m| era.signed(m))
        };
        YearFilter {
            min_year: signed(min_mag, min_era),
            max_year: signed(max_mag, max_era),
        }
    }

    /// Parse a raw query string such as `minYear=6&minEra=BC&maxYear=60`.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        Self::from_query_pairs(
            query
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|p| p.split_once('=').unwrap_or((p, ""))),
        )
    }

    /// Inverse of [`YearFilter::from_query_pairs`]; inactive bounds are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(y) = self.min_year {
            pairs.push(("minYear", y.unsigned_abs().to_string()));
            pairs.push(("minEra", Era::of_year(y).to_string()));
        }
        if let Some(y) = self.max_year {
            pairs.push(("maxYear", y.unsigned_abs().to_string()));
            pairs.push(("maxEra", Era::of_year(y).to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter_always_includes() {
        for d in ["4004-2348 BC", "6 BC-60 AD", "2025", "", "unknown", "???"] {
            assert!(is_within_date_range(d, None, None), "{d}");
        }
    }

    #[test]
    fn test_unparseable_is_fail_open() {
        assert!(is_within_date_range("unknown", Some(0), Some(100)));
        assert!(is_within_date_range("", Some(-100), None));
    }

    #[test]
    fn test_partial_overlap_passes() {
        // Period straddles the lower bound
        assert!(is_within_date_range("4 BC-60 AD", Some(50), Some(200)));
        // Period straddles the upper bound
        assert!(is_within_date_range("430-6 BC", Some(-1000), Some(-100)));
    }

    #[test]
    fn test_disjoint_is_excluded() {
        assert!(!is_within_date_range("4004-2348 BC", Some(-1000), None));
        assert!(!is_within_date_range("60-100 AD", None, Some(59)));
        assert!(!is_within_date_range("6 BC", Some(-5), Some(5)));
    }

    #[test]
    fn test_trailing_note_is_still_dated() {
        assert!(!is_within_date_range("1446 BC (traditional)", Some(0), None));
        assert!(is_within_date_range("1446 BC (traditional)", Some(-1446), Some(-1406)));
    }

    #[test]
    fn test_single_bound_uses_infinity() {
        assert!(is_within_date_range("2025", Some(2000), None));
        assert!(is_within_date_range("4004-2348 BC", None, Some(-4004)));
        assert!(!is_within_date_range("4004-2348 BC", None, Some(-4005)));
    }

    #[test]
    fn test_from_query_pairs() {
        let f = YearFilter::from_query_pairs([
            ("minYear", "6"),
            ("minEra", "BC"),
            ("maxYear", "60"),
            ("page", "2"),
        ]);
        assert_eq!(f, YearFilter::new(Some(-6), Some(60)));
    }

    #[test]
    fn test_from_query_ignores_garbage() {
        let f = YearFilter::from_query("?minYear=abc&maxYear=100&maxEra=XX");
        assert_eq!(f, YearFilter::new(None, Some(100)));
        assert!(!YearFilter::from_query("").is_active());
    }

    #[test]
    fn test_query_round_trip() {
        let f = YearFilter::new(Some(-430), Some(60));
        let pairs = f.to_query_pairs();
        let back = YearFilter::from_query_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        assert_eq!(back, f);
    }
}
