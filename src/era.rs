//! BC/AD year parsing.
//!
//! Dates in the data files are free text written by hand ("6 BC", "~30 AD",
//! "4004-2348 BC", "4 BC-60 AD", "2025"). Every consumer in the crate goes
//! through this module, so a date string means the same year everywhere.
//!
//! Convention: BC years are negative, AD years are non-negative. There is no
//! year zero handling and no month/day resolution.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ── Patterns ─────────────────────────────────────────────────────────

// First (optionally signed) digit run of a single date.
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").unwrap());

// Single date or two-sided range, each side with an optional era marker:
//   4004-2348 BC | 6 BC-60 AD | 30-60 AD | ~6 BC | 2025 | c. 1000 BC
// A trailing note after whitespace or punctuation is ignored:
//   1446 BC (traditional) | 2091 BC, approx.
// Leading text is not.
static RE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        (?:~|c\.|ca\.|circa)?\s*
        (?P<start>\d+)\s*(?P<start_era>BC|AD)?
        (?:
            \s*[-–—]\s*
            (?:~|c\.|ca\.|circa)?\s*
            (?P<end>\d+)\s*(?P<end_era>BC|AD)?
        )?
        (?:\s*[,;(\[].*|\s+\D.*)?
        \s*$",
    )
    .unwrap()
});

// ── Era ──────────────────────────────────────────────────────────────

/// Calendar era of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Era {
    Bc,
    Ad,
}

impl Era {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bc => "BC",
            Self::Ad => "AD",
        }
    }

    /// Era marker anywhere in `s`. "BC" is checked first, so a cross-era
    /// string like "4 BC-60 AD" reports `Bc`.
    pub fn detect(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        if upper.contains("BC") {
            Some(Self::Bc)
        } else if upper.contains("AD") {
            Some(Self::Ad)
        } else {
            None
        }
    }

    /// Signed year for a magnitude written in this era. Saturates at
    /// `i32::MAX` years either side.
    pub fn signed(&self, magnitude: i32) -> i32 {
        match self {
            Self::Bc => -magnitude.saturating_abs(),
            Self::Ad => magnitude.saturating_abs(),
        }
    }

    /// Era of a signed year.
    pub fn of_year(year: i32) -> Self {
        if year < 0 { Self::Bc } else { Self::Ad }
    }
}

impl FromStr for Era {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BC" | "BCE" => Ok(Self::Bc),
            "AD" | "CE" => Ok(Self::Ad),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Era default for unmarked numbers ─────────────────────────────────

/// How a number without a BC/AD marker is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraDefault {
    /// Bare numbers are AD.
    Ad,
    /// Bare numbers above 1000 are BC, the rest AD. Used for period
    /// assignment, where most unmarked years in the data are ancient.
    Magnitude,
}

impl EraDefault {
    fn resolve(&self, magnitude: i32) -> i32 {
        match self {
            Self::Ad => magnitude,
            Self::Magnitude if magnitude > 1000 => -magnitude,
            Self::Magnitude => magnitude,
        }
    }
}

fn strip_approx(input: &str) -> &str {
    let s = input.trim();
    s.strip_prefix('~').unwrap_or(s).trim_start()
}

// ── Single dates ─────────────────────────────────────────────────────

/// Parse a single date into a signed year, bare numbers read as AD.
///
/// "6 BC" → -6, "~30 AD" → 30, "-6" → -6, "2025" → 2025, "unknown" → None.
pub fn parse_date(input: &str) -> Option<i32> {
    parse_year_with(input, EraDefault::Ad)
}

/// Parse a single date, reading unmarked numbers with `default`.
///
/// An explicitly signed bare integer ("-6") is taken as written under
/// either policy. A magnitude that does not fit in `i32` is `None`.
pub fn parse_year_with(input: &str, default: EraDefault) -> Option<i32> {
    let s = strip_approx(input);
    let run: i32 = RE_DIGITS.find(s)?.as_str().parse().ok()?;
    let era = Era::detect(s);

    if era.is_none()
        && let Ok(year) = s.parse::<i32>()
        && year < 0
    {
        return Some(year);
    }
    let magnitude = i32::try_from(run.unsigned_abs()).ok()?;
    Some(match era {
        Some(era) => era.signed(magnitude),
        None => default.resolve(magnitude),
    })
}

// ── Ranges ───────────────────────────────────────────────────────────

/// Parse a date or date range into `(start, end)` signed years, bare
/// numbers read as AD.
///
/// The pair comes back in written order and is not sorted: "4004-2348 BC"
/// gives `(-4004, -2348)`, "6 BC-60 AD" gives `(-6, 60)`, a single date
/// gives the same year twice. `None` when the text is not a date.
pub fn parse_date_range(input: &str) -> Option<(i32, i32)> {
    parse_range_with(input, EraDefault::Ad)
}

/// Like [`parse_date_range`], reading unmarked numbers with `default`.
///
/// A side with its own marker uses it; an unmarked start takes the end's
/// marker ("430-6 BC"); anything still unmarked falls back to `default`.
pub fn parse_range_with(input: &str, default: EraDefault) -> Option<(i32, i32)> {
    let caps = RE_RANGE.captures(input.trim())?;

    let start: i32 = caps.name("start")?.as_str().parse().ok()?;
    let start_era = caps.name("start_era").and_then(|m| m.as_str().parse::<Era>().ok());

    let Some(end) = caps.name("end") else {
        let year = match start_era {
            Some(era) => era.signed(start),
            None => default.resolve(start),
        };
        return Some((year, year));
    };

    let end: i32 = end.as_str().parse().ok()?;
    let end_era = caps.name("end_era").and_then(|m| m.as_str().parse::<Era>().ok());

    let start_year = match start_era.or(end_era) {
        Some(era) => era.signed(start),
        None => default.resolve(start),
    };
    let end_year = match end_era {
        Some(era) => era.signed(end),
        None => default.resolve(end),
    };
    Some((start_year, end_year))
}

// ── Structured span ──────────────────────────────────────────────────

/// Which eras a span touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    BcOnly,
    AdOnly,
    BcToAd,
}

/// A closed interval of signed years, always with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub kind: SpanKind,
    pub start: i32,
    pub end: i32,
}

impl DateSpan {
    /// Build a span from two years in any order.
    pub fn new(a: i32, b: i32) -> Self {
        let (start, end) = (a.min(b), a.max(b));
        let kind = if end < 0 {
            SpanKind::BcOnly
        } else if start >= 0 {
            SpanKind::AdOnly
        } else {
            SpanKind::BcToAd
        };
        DateSpan { kind, start, end }
    }

    pub fn year(year: i32) -> Self {
        Self::new(year, year)
    }

    /// Parse date-range text with the given policy for unmarked numbers.
    pub fn parse(input: &str, default: EraDefault) -> Option<Self> {
        parse_range_with(input, default).map(|(a, b)| Self::new(a, b))
    }

    /// Inclusive on both ends.
    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start.max(other.start) <= self.end.min(other.end)
    }

    /// Number of years between start and end.
    pub fn width(&self) -> u32 {
        self.end.abs_diff(self.start)
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            return f.write_str(&format_year(self.start));
        }
        match self.kind {
            SpanKind::BcOnly => write!(f, "{}-{} BC", -self.start, -self.end),
            SpanKind::AdOnly => write!(f, "{}-{} AD", self.start, self.end),
            SpanKind::BcToAd => write!(f, "{} BC-{} AD", -self.start, self.end),
        }
    }
}

/// Render a signed year: -6 → "6 BC", 30 → "30 AD".
pub fn format_year(year: i32) -> String {
    let era = Era::of_year(year);
    format!("{} {}", year.unsigned_abs(), era)
}
