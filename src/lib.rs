//! Biblical timeline core: era-aware date parsing, year-range filtering,
//! period assignment and relevance search over persons, events, regions
//! and periods.

pub mod assign;
pub mod era;
pub mod error;
pub mod loader;
pub mod logging;
pub mod periods;
pub mod range;
pub mod repository;
pub mod search;

pub use assign::{get_event_period, group_events_by_period};
pub use era::{DateSpan, Era, EraDefault, SpanKind, parse_date, parse_date_range};
pub use range::{YearFilter, is_within_date_range};
pub use repository::TimelineRepository;
pub use search::{SearchResults, calculate_relevance, perform_search};
pub use timeline_types::{
    BiblicalEvent, BiblicalPerson, BiblicalRegion, EntityKind, TimelinePeriod,
};
