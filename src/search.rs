//! Free-text search over persons, events, regions and periods.
//!
//! Matches are scored on a fixed ladder (exact, prefix, substring, fuzzy
//! subsequence), each field keeps its best tier, and results are ranked per
//! entity kind.

use serde::Serialize;
use timeline_types::{BiblicalEvent, BiblicalPerson, BiblicalRegion, TimelinePeriod};

use crate::range::YearFilter;

/// Results kept per entity kind.
pub const MAX_RESULTS_PER_CATEGORY: usize = 8;

const SPECIFICITY_BONUS: u32 = 10;

// ── Relevance ────────────────────────────────────────────────────────

/// How a search term matched a text, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Exact,
    Prefix,
    Substring,
    /// Every character of the term appears in order, not necessarily adjacent.
    Fuzzy,
}

impl MatchTier {
    /// Both arguments must already be lower-cased.
    pub fn classify(text: &str, term: &str) -> Option<Self> {
        if text == term {
            Some(Self::Exact)
        } else if text.starts_with(term) {
            Some(Self::Prefix)
        } else if text.contains(term) {
            Some(Self::Substring)
        } else if is_subsequence(term, text) {
            Some(Self::Fuzzy)
        } else {
            None
        }
    }

    pub fn points(&self, is_main_field: bool) -> u32 {
        let main = match self {
            Self::Exact => 100,
            Self::Prefix => 80,
            Self::Substring => 60,
            Self::Fuzzy => 20,
        };
        if is_main_field { main } else { main / 2 }
    }
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle.chars().all(|c| hay.any(|h| h == c))
}

/// Score how well `search_term` matches `text`, ignoring case.
///
/// Short texts get a bonus so "Moses" outranks a long description that
/// happens to mention Moses.
pub fn calculate_relevance(text: &str, search_term: &str, is_main_field: bool) -> u32 {
    if text.is_empty() || search_term.is_empty() {
        return 0;
    }
    let text = text.to_lowercase();
    let term = search_term.to_lowercase();

    let Some(tier) = MatchTier::classify(&text, &term) else {
        return 0;
    };
    let mut score = tier.points(is_main_field);
    if text.chars().count() < term.chars().count() * 3 {
        score += SPECIFICITY_BONUS;
    }
    score
}

fn best_score<'f>(term: &str, main: &str, secondary: impl IntoIterator<Item = &'f str>) -> u32 {
    secondary
        .into_iter()
        .map(|text| calculate_relevance(text, term, false))
        .fold(calculate_relevance(main, term, true), u32::max)
}

// ── Search ───────────────────────────────────────────────────────────

/// Ranked matches per entity kind, at most [`MAX_RESULTS_PER_CATEGORY`] each.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults<'a> {
    pub persons: Vec<&'a BiblicalPerson>,
    pub events: Vec<&'a BiblicalEvent>,
    pub regions: Vec<&'a BiblicalRegion>,
    pub periods: Vec<&'a TimelinePeriod>,
}

impl SearchResults<'_> {
    pub fn total(&self) -> usize {
        self.persons.len() + self.events.len() + self.regions.len() + self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Score, date-filter, rank and truncate one entity kind.
fn rank<'a, T>(
    items: &'a [T],
    filter: &YearFilter,
    score: impl Fn(&T) -> u32,
    date: impl Fn(&T) -> Option<&str>,
) -> Vec<&'a T> {
    let mut scored: Vec<(u32, &T)> = items
        .iter()
        .map(|item| (score(item), item))
        .filter(|(s, item)| *s > 0 && filter.admits_str(date(*item).unwrap_or_default()))
        .collect();
    // Stable: equal scores keep input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(MAX_RESULTS_PER_CATEGORY);
    scored.into_iter().map(|(_, item)| item).collect()
}

/// Search every entity kind for `term`, optionally limited to a year window.
///
/// Fields searched: persons by name and alternate names; events by name,
/// description and location; regions by name, description and location;
/// periods by name and description. Only the name counts as the main field.
pub fn perform_search<'a>(
    term: &str,
    persons: &'a [BiblicalPerson],
    events: &'a [BiblicalEvent],
    regions: &'a [BiblicalRegion],
    periods: &'a [TimelinePeriod],
    min_year: Option<i32>,
    max_year: Option<i32>,
) -> SearchResults<'a> {
    let term = term.trim();
    if term.is_empty() {
        return SearchResults::default();
    }
    let filter = YearFilter::new(min_year, max_year);

    SearchResults {
        persons: rank(
            persons,
            &filter,
            |p| best_score(term, &p.name, p.names.iter().map(String::as_str)),
            |p| p.birth_date.as_deref(),
        ),
        events: rank(
            events,
            &filter,
            |e| best_score(term, &e.name, [e.description.as_str(), e.location.as_str()]),
            |e| Some(e.date.as_str()),
        ),
        regions: rank(
            regions,
            &filter,
            |r| {
                best_score(
                    term,
                    &r.name,
                    [r.description.as_deref(), r.location.as_deref()]
                        .into_iter()
                        .flatten(),
                )
            },
            |r| Some(r.estimated_dates.as_str()),
        ),
        periods: rank(
            periods,
            &filter,
            |p| best_score(term, &p.name, [p.description.as_str()]),
            |p| Some(p.date_range.as_str()),
        ),
    }
}
