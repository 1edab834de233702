//! Read-only data context for the timeline.
//!
//! Built once at startup from loaded data and the period table, then passed
//! by reference to whatever needs it. Period and region date text is parsed
//! here, once; views below work on the parsed spans.

use std::collections::HashMap;

use serde::Serialize;
use timeline_types::{BiblicalEvent, BiblicalPerson, BiblicalRegion, EntityKind, TimelinePeriod};
use tracing::warn;

use crate::assign::{self, PeriodGroups};
use crate::era::DateSpan;
use crate::loader::TimelineData;
use crate::range::YearFilter;
use crate::search::{self, SearchResults};

/// A period together with its parsed date range.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatedPeriod<'a> {
    #[serde(flatten)]
    pub period: &'a TimelinePeriod,
    pub span: Option<DateSpan>,
}

/// A region together with its parsed estimated dates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatedRegion<'a> {
    #[serde(flatten)]
    pub region: &'a BiblicalRegion,
    pub span: Option<DateSpan>,
}

/// Resolved family links of one person. Unknown ids are left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Family<'a> {
    pub parents: Vec<&'a BiblicalPerson>,
    pub spouses: Vec<&'a BiblicalPerson>,
    /// Persons listing this person among their parents.
    pub children: Vec<&'a BiblicalPerson>,
}

pub struct TimelineRepository {
    persons: Vec<BiblicalPerson>,
    events: Vec<BiblicalEvent>,
    regions: Vec<BiblicalRegion>,
    region_spans: Vec<Option<DateSpan>>,
    periods: Vec<TimelinePeriod>,
    period_spans: Vec<Option<DateSpan>>,
    person_index: HashMap<String, usize>,
    event_index: HashMap<String, usize>,
    region_index: HashMap<String, usize>,
}

impl TimelineRepository {
    pub fn new(data: TimelineData, periods: Vec<TimelinePeriod>) -> Self {
        let TimelineData {
            persons,
            events,
            regions,
        } = data;

        let region_spans = regions.iter().map(assign::region_span).collect();
        let period_spans = periods.iter().map(assign::period_span).collect();

        let repo = TimelineRepository {
            person_index: index_by(&persons, |p| &p.id),
            event_index: index_by(&events, |e| &e.id),
            region_index: index_by(&regions, |r| &r.id),
            persons,
            events,
            regions,
            region_spans,
            periods,
            period_spans,
        };
        repo.report_problems();
        repo
    }

    /// Log dangling references and dates that will never match anything.
    fn report_problems(&self) {
        for (period, span) in self.periods.iter().zip(&self.period_spans) {
            if span.is_none() {
                warn!(period = %period.slug, date_range = %period.date_range, "unparseable period range");
            }
        }
        for (region, span) in self.regions.iter().zip(&self.region_spans) {
            if span.is_none() {
                warn!(region = %region.id, estimated_dates = %region.estimated_dates, "unparseable region dates");
            }
            self.warn_unknown_persons(EntityKind::Region, &region.id, &region.notable_people);
        }
        for event in &self.events {
            if assign::event_year(event).is_none() {
                warn!(event = %event.id, date = %event.date, "unparseable event date");
            }
            self.warn_unknown_persons(EntityKind::Event, &event.id, &event.participants);
        }
        for person in &self.persons {
            self.warn_unknown_persons(EntityKind::Person, &person.id, &person.parents);
            self.warn_unknown_persons(EntityKind::Person, &person.id, &person.spouses);
        }
    }

    fn warn_unknown_persons(&self, kind: EntityKind, owner: &str, ids: &[String]) {
        for id in ids {
            if !self.person_index.contains_key(id) {
                warn!(%kind, owner, person = %id, "reference to unknown person");
            }
        }
    }

    // ── Collections ──────────────────────────────────────────────────

    pub fn persons(&self) -> &[BiblicalPerson] {
        &self.persons
    }

    pub fn events(&self) -> &[BiblicalEvent] {
        &self.events
    }

    pub fn regions(&self) -> &[BiblicalRegion] {
        &self.regions
    }

    pub fn periods(&self) -> &[TimelinePeriod] {
        &self.periods
    }

    pub fn dated_periods(&self) -> impl Iterator<Item = DatedPeriod<'_>> {
        self.periods
            .iter()
            .zip(&self.period_spans)
            .map(|(period, span)| DatedPeriod { period, span: *span })
    }

    pub fn dated_regions(&self) -> impl Iterator<Item = DatedRegion<'_>> {
        self.regions
            .iter()
            .zip(&self.region_spans)
            .map(|(region, span)| DatedRegion { region, span: *span })
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn person(&self, id: &str) -> Option<&BiblicalPerson> {
        self.person_index.get(id).map(|&i| &self.persons[i])
    }

    pub fn event(&self, id: &str) -> Option<&BiblicalEvent> {
        self.event_index.get(id).map(|&i| &self.events[i])
    }

    pub fn region(&self, id: &str) -> Option<&BiblicalRegion> {
        self.region_index.get(id).map(|&i| &self.regions[i])
    }

    pub fn period(&self, slug: &str) -> Option<DatedPeriod<'_>> {
        self.dated_periods().find(|d| d.period.slug == slug)
    }

    // ── Cross navigation ─────────────────────────────────────────────

    pub fn events_for_person(&self, id: &str) -> Vec<&BiblicalEvent> {
        self.events
            .iter()
            .filter(|e| e.participants.iter().any(|p| p == id))
            .collect()
    }

    pub fn regions_for_person(&self, id: &str) -> Vec<&BiblicalRegion> {
        self.regions
            .iter()
            .filter(|r| r.notable_people.iter().any(|p| p == id))
            .collect()
    }

    pub fn family(&self, id: &str) -> Option<Family<'_>> {
        let person = self.person(id)?;
        let resolve = |ids: &[String]| {
            ids.iter()
                .filter_map(|i| self.person(i))
                .collect::<Vec<_>>()
        };
        Some(Family {
            parents: resolve(&person.parents),
            spouses: resolve(&person.spouses),
            children: self
                .persons
                .iter()
                .filter(|p| p.parents.iter().any(|parent| parent == id))
                .collect(),
        })
    }

    // ── Period views ─────────────────────────────────────────────────

    fn period_refs(&self) -> Vec<(&TimelinePeriod, Option<DateSpan>)> {
        self.periods.iter().zip(self.period_spans.iter().copied()).collect()
    }

    /// The period an event belongs to, using the narrowest enclosing span.
    pub fn period_for_event(&self, event: &BiblicalEvent) -> Option<&TimelinePeriod> {
        self.period_for_year(assign::event_year(event)?)
    }

    pub fn period_for_year(&self, year: i32) -> Option<&TimelinePeriod> {
        assign::narrowest_enclosing(
            year,
            self.dated_periods()
                .filter_map(|d| d.span.map(|s| (d.period, s))),
        )
    }

    pub fn events_by_period(&self) -> PeriodGroups<'_> {
        assign::group_with_spans(&self.events, &self.period_refs())
    }

    /// Events assigned to the period `slug`; `None` for an unknown slug.
    pub fn period_events(&self, slug: &str) -> Option<Vec<&BiblicalEvent>> {
        self.period(slug)?;
        let groups = self.events_by_period();
        groups.get(slug).map(<[_]>::to_vec)
    }

    /// Persons whose lifespan overlaps the period `slug`.
    pub fn period_people(&self, slug: &str) -> Option<Vec<&BiblicalPerson>> {
        let dated = self.period(slug)?;
        Some(match dated.span {
            Some(span) => assign::people_in_period(&self.persons, &span),
            None => Vec::new(),
        })
    }

    /// Regions whose estimated dates overlap the period `slug`.
    pub fn period_regions(&self, slug: &str) -> Option<Vec<&BiblicalRegion>> {
        let span = self.period(slug)?.span;
        Some(
            self.dated_regions()
                .filter(|r| matches!((r.span, span), (Some(a), Some(b)) if a.overlaps(&b)))
                .map(|r| r.region)
                .collect(),
        )
    }

    // ── Search ───────────────────────────────────────────────────────

    pub fn search(&self, term: &str, filter: &YearFilter) -> SearchResults<'_> {
        search::perform_search(
            term,
            &self.persons,
            &self.events,
            &self.regions,
            &self.periods,
            filter.min_year,
            filter.max_year,
        )
    }
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (key(item).clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periods::timeline_periods;

    fn person(id: &str, birth: Option<&str>, death: Option<&str>, parents: &[&str]) -> BiblicalPerson {
        BiblicalPerson {
            id: id.to_string(),
            name: id.to_string(),
            names: vec![],
            description: None,
            birth_date: birth.map(str::to_string),
            death_date: death.map(str::to_string),
            birth_place: None,
            death_place: None,
            parents: parents.iter().map(|s| s.to_string()).collect(),
            spouses: vec![],
            references: vec![],
        }
    }

    fn event(id: &str, date: &str, participants: &[&str]) -> BiblicalEvent {
        BiblicalEvent {
            id: id.to_string(),
            name: id.to_string(),
            date: date.to_string(),
            location: String::new(),
            description: String::new(),
            participants: participants.iter().map(|s| s.to_string()).collect(),
            references: vec![],
        }
    }

    fn region(id: &str, dates: &str, people: &[&str]) -> BiblicalRegion {
        BiblicalRegion {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            location: None,
            estimated_dates: dates.to_string(),
            notable_people: people.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn repo() -> TimelineRepository {
        let mut sarah = person("sarah", Some("2156 BC"), Some("2029 BC"), &[]);
        sarah.spouses = vec!["abraham".into()];
        let data = TimelineData {
            persons: vec![
                person("abraham", Some("2166 BC"), Some("1991 BC"), &[]),
                sarah,
                person("isaac", Some("2066 BC"), Some("1886 BC"), &["abraham", "sarah"]),
                person("jesus", Some("~6 BC"), Some("~30 AD"), &[]),
                person("paul", Some("5 AD"), Some("~67 AD"), &["ghost"]),
            ],
            events: vec![
                event("nativity", "6 BC", &["jesus"]),
                event("crucifixion", "~30 AD", &["jesus"]),
                event("jerusalem-council", "49 AD", &["paul"]),
                event("rome", "60 AD", &["paul"]),
                event("binding", "2050 BC", &["abraham", "isaac"]),
            ],
            regions: vec![
                region("canaan", "2091-1406 BC", &["abraham", "isaac"]),
                region("galilee", "4 BC-70 AD", &["jesus"]),
                region("nowhere", "unknown", &[]),
            ],
        };
        TimelineRepository::new(data, timeline_periods())
    }

    #[test]
    fn test_lookups() {
        let repo = repo();
        assert_eq!(repo.person("isaac").map(|p| p.id.as_str()), Some("isaac"));
        assert!(repo.person("ghost").is_none());
        assert!(repo.event("rome").is_some());
        assert!(repo.region("galilee").is_some());
        let nt = repo.period("new-testament-era").unwrap();
        assert_eq!(nt.span, Some(DateSpan::new(-4, 60)));
        assert!(repo.period("nope").is_none());
    }

    #[test]
    fn test_period_for_event_matches_free_function() {
        let repo = repo();
        for e in repo.events() {
            assert_eq!(
                repo.period_for_event(e).map(|p| &p.slug),
                assign::get_event_period(e, repo.periods()).map(|p| &p.slug),
                "{}",
                e.id
            );
        }
        let nativity = repo.event("nativity").unwrap();
        assert_eq!(
            repo.period_for_event(nativity).map(|p| p.name.as_str()),
            Some("Intertestamental Period")
        );
    }

    #[test]
    fn test_period_events() {
        let repo = repo();
        let ids = |slug: &str| -> Vec<String> {
            repo.period_events(slug)
                .unwrap()
                .iter()
                .map(|e| e.id.clone())
                .collect()
        };
        assert_eq!(ids("new-testament-era"), vec!["crucifixion", "jerusalem-council"]);
        assert_eq!(ids("apostolic-age"), vec!["rome"]);
        assert_eq!(ids("patriarchal-period"), vec!["binding"]);
        assert!(ids("babylonian-exile").is_empty());
        assert!(repo.period_events("nope").is_none());
        assert_eq!(repo.events_by_period().assigned_count(), 5);
    }

    #[test]
    fn test_period_people_and_regions() {
        let repo = repo();
        let people: Vec<&str> = repo
            .period_people("patriarchal-period")
            .unwrap()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(people, vec!["abraham", "sarah", "isaac"]);

        let regions: Vec<&str> = repo
            .period_regions("new-testament-era")
            .unwrap()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(regions, vec!["galilee"]);
        assert!(repo.period_regions("nope").is_none());
    }

    #[test]
    fn test_family() {
        let repo = repo();
        let family = repo.family("abraham").unwrap();
        assert!(family.parents.is_empty());
        let children: Vec<&str> = family.children.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(children, vec!["isaac"]);

        let family = repo.family("isaac").unwrap();
        assert_eq!(family.parents.len(), 2);

        let family = repo.family("sarah").unwrap();
        assert_eq!(family.spouses[0].id, "abraham");

        // Unknown parent ids are skipped
        assert!(repo.family("paul").unwrap().parents.is_empty());
        assert!(repo.family("ghost").is_none());
    }

    #[test]
    fn test_cross_navigation() {
        let repo = repo();
        let events: Vec<&str> = repo
            .events_for_person("jesus")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(events, vec!["nativity", "crucifixion"]);
        let regions: Vec<&str> = repo
            .regions_for_person("isaac")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(regions, vec!["canaan"]);
    }

    #[test]
    fn test_search_with_filter() {
        let repo = repo();
        let all = repo.search("a", &YearFilter::default());
        assert!(!all.persons.is_empty());

        let results = repo.search("paul", &YearFilter::new(Some(0), None));
        assert_eq!(results.persons.len(), 1);
        let results = repo.search("abraham", &YearFilter::new(Some(0), None));
        assert!(results.persons.is_empty());
    }

    #[test]
    fn test_bundled_data() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let data = crate::loader::load_dir(&root).unwrap();
        let repo = TimelineRepository::new(data, timeline_periods());

        // Every bundled event carries a date that lands in some period
        assert_eq!(repo.events_by_period().assigned_count(), repo.events().len());

        // Search limited to an event's own period still finds it
        for event in repo.events() {
            let slug = &repo.period_for_event(event).unwrap().slug;
            let span = repo.period(slug).unwrap().span.unwrap();
            let filter = YearFilter::new(Some(span.start), Some(span.end));
            assert!(filter.admits_str(&event.date), "{}", event.id);
            let found = repo.search(&event.name, &filter);
            assert!(found.events.iter().any(|e| e.id == event.id), "{}", event.id);
        }

        let results = repo.search("moses", &YearFilter::default());
        assert_eq!(results.persons[0].id, "moses");

        // Equal scores keep file order
        let results = repo.search("jerusalem", &YearFilter::default());
        assert_eq!(results.events[0].id, "fall-of-jerusalem");
    }

    #[test]
    fn test_bare_year_reads_as_bc_for_assignment_only() {
        let data = TimelineData {
            events: vec![event("law", "1445", &[])],
            ..TimelineData::default()
        };
        let repo = TimelineRepository::new(data, timeline_periods());
        let law = repo.event("law").unwrap();
        assert_eq!(
            repo.period_for_event(law).map(|p| p.slug.as_str()),
            Some("exodus-and-wilderness-wanderings")
        );
        // The year filter reads the same bare text as AD
        let exodus = YearFilter::new(Some(-1446), Some(-1406));
        assert!(repo.search("law", &exodus).events.is_empty());
        assert_eq!(repo.search("law", &YearFilter::new(Some(1445), None)).events.len(), 1);
    }

    #[test]
    fn test_dated_regions_keep_unparseable() {
        let repo = repo();
        let nowhere = repo.dated_regions().find(|r| r.region.id == "nowhere").unwrap();
        assert!(nowhere.span.is_none());
    }
}
