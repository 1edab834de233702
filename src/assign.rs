//! Assigning events, people and regions to timeline periods.
//!
//! An event belongs to at most one period: of all periods whose interval
//! contains the event's year (both ends inclusive), the narrowest one wins,
//! and equal widths keep the period listed first. Adjacent periods share a
//! boundary year, so a year like 60 AD is claimed by the shorter of the two.
//!
//! Unmarked years here are read with [`EraDefault::Magnitude`]: in this data
//! a bare "1446" is an ancient date far more often than a medieval one.

use serde::Serialize;
use timeline_types::{BiblicalEvent, BiblicalPerson, BiblicalRegion, TimelinePeriod};

use crate::era::{DateSpan, EraDefault, parse_year_with};

/// Era policy used for everything period-related.
pub const ASSIGNMENT_ERA_DEFAULT: EraDefault = EraDefault::Magnitude;

pub fn event_year(event: &BiblicalEvent) -> Option<i32> {
    parse_year_with(&event.date, ASSIGNMENT_ERA_DEFAULT)
}

pub fn period_span(period: &TimelinePeriod) -> Option<DateSpan> {
    DateSpan::parse(&period.date_range, ASSIGNMENT_ERA_DEFAULT)
}

pub fn region_span(region: &BiblicalRegion) -> Option<DateSpan> {
    DateSpan::parse(&region.estimated_dates, ASSIGNMENT_ERA_DEFAULT)
}

/// Birth to death. A single known date stands for both ends.
pub fn person_lifespan(person: &BiblicalPerson) -> Option<DateSpan> {
    let year = |d: &Option<String>| {
        d.as_deref()
            .and_then(|s| parse_year_with(s, ASSIGNMENT_ERA_DEFAULT))
    };
    match (year(&person.birth_date), year(&person.death_date)) {
        (Some(b), Some(d)) => Some(DateSpan::new(b, d)),
        (Some(y), None) | (None, Some(y)) => Some(DateSpan::year(y)),
        (None, None) => None,
    }
}

/// Pick the candidate with the narrowest span containing `year`.
/// Ties keep the first candidate seen.
pub fn narrowest_enclosing<T>(
    year: i32,
    candidates: impl IntoIterator<Item = (T, DateSpan)>,
) -> Option<T> {
    let mut best: Option<(T, u32)> = None;
    for (item, span) in candidates {
        if !span.contains(year) {
            continue;
        }
        let width = span.width();
        if best.as_ref().is_none_or(|(_, w)| width < *w) {
            best = Some((item, width));
        }
    }
    best.map(|(item, _)| item)
}

/// The single period an event belongs to, if any.
pub fn get_event_period<'p>(
    event: &BiblicalEvent,
    periods: &'p [TimelinePeriod],
) -> Option<&'p TimelinePeriod> {
    let year = event_year(event)?;
    narrowest_enclosing(
        year,
        periods.iter().filter_map(|p| period_span(p).map(|s| (p, s))),
    )
}

// ── Grouping ─────────────────────────────────────────────────────────

/// Events of one period, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodGroup<'a> {
    pub period: &'a TimelinePeriod,
    pub events: Vec<&'a BiblicalEvent>,
}

/// Events grouped per period slug. Every period has an entry, in period
/// order, even when no event landed in it.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PeriodGroups<'a> {
    groups: Vec<PeriodGroup<'a>>,
}

impl<'a> PeriodGroups<'a> {
    /// Events of the period with `slug`; `None` when no such period exists.
    pub fn get(&self, slug: &str) -> Option<&[&'a BiblicalEvent]> {
        self.groups
            .iter()
            .find(|g| g.period.slug == slug)
            .map(|g| g.events.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeriodGroup<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of events that landed in some period.
    pub fn assigned_count(&self) -> usize {
        self.groups.iter().map(|g| g.events.len()).sum()
    }
}

/// Group events by period; unmatched events appear in no group.
pub fn group_events_by_period<'a>(
    events: &'a [BiblicalEvent],
    periods: &'a [TimelinePeriod],
) -> PeriodGroups<'a> {
    let dated: Vec<(&TimelinePeriod, Option<DateSpan>)> =
        periods.iter().map(|p| (p, period_span(p))).collect();
    group_with_spans(events, &dated)
}

/// Grouping over periods whose spans were parsed beforehand.
pub(crate) fn group_with_spans<'a>(
    events: impl IntoIterator<Item = &'a BiblicalEvent>,
    periods: &[(&'a TimelinePeriod, Option<DateSpan>)],
) -> PeriodGroups<'a> {
    let mut groups: Vec<PeriodGroup<'a>> = periods
        .iter()
        .map(|&(period, _)| PeriodGroup {
            period,
            events: Vec::new(),
        })
        .collect();

    for event in events {
        let Some(year) = event_year(event) else {
            continue;
        };
        let slot = narrowest_enclosing(
            year,
            periods
                .iter()
                .enumerate()
                .filter_map(|(i, (_, span))| span.map(|s| (i, s))),
        );
        if let Some(i) = slot {
            groups[i].events.push(event);
        }
    }

    PeriodGroups { groups }
}

// ── People and regions ───────────────────────────────────────────────

/// Persons whose lifespan overlaps `span`. Persons with no usable date are
/// left out.
pub fn people_in_period<'a>(persons: &'a [BiblicalPerson], span: &DateSpan) -> Vec<&'a BiblicalPerson> {
    persons
        .iter()
        .filter(|p| person_lifespan(p).is_some_and(|life| life.overlaps(span)))
        .collect()
}

/// Regions whose estimated dates overlap `span`.
pub fn regions_in_period<'a>(regions: &'a [BiblicalRegion], span: &DateSpan) -> Vec<&'a BiblicalRegion> {
    regions
        .iter()
        .filter(|r| region_span(r).is_some_and(|s| s.overlaps(span)))
        .collect()
}
