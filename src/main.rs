use std::path::PathBuf;
use std::process;

use bible_timeline::assign::{self, ASSIGNMENT_ERA_DEFAULT};
use bible_timeline::era::{self, DateSpan, EraDefault};
use bible_timeline::error::{CliError, Result};
use bible_timeline::repository::{DatedPeriod, Family};
use bible_timeline::{
    BiblicalEvent, BiblicalPerson, BiblicalRegion, EntityKind, TimelinePeriod,
    TimelineRepository, YearFilter, loader, logging, periods,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "bible_timeline",
    about = "Biblical timeline: date parsing, period assignment and search"
)]
struct Cli {
    /// Directory holding persons, events and regions data files
    #[arg(long, global = true, env = "BIBLE_TIMELINE_DATA", default_value = "data")]
    data: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search persons, events, regions and periods
    Search {
        /// Search term, e.g. "abraham", "red sea"
        term: Vec<String>,
        /// Earliest year, e.g. "2000 BC"
        #[arg(long)]
        from: Option<String>,
        /// Latest year, e.g. "30 AD"
        #[arg(long)]
        to: Option<String>,
    },
    /// Print the period table with event counts
    Periods,
    /// Show one period with its events, people and regions
    Period {
        /// Period slug, e.g. "united-monarchy"
        slug: String,
    },
    /// Show how a date string is read and which period it falls in
    Date {
        /// Date text, e.g. "~1446 BC", "4 BC-60 AD"
        text: Vec<String>,
    },
    /// Show one person with family, events and regions
    Person {
        /// Person id, e.g. "abraham"
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let data = loader::load_dir(&cli.data)?;
    let repo = TimelineRepository::new(data, periods::timeline_periods());

    match cli.command {
        Some(Command::Search { term, from, to }) => run_search(&repo, &term.join(" "), from, to),
        Some(Command::Periods) | None => {
            run_periods(&repo);
            Ok(())
        }
        Some(Command::Period { slug }) => run_period(&repo, &slug),
        Some(Command::Date { text }) => run_date(&repo, &text.join(" ")),
        Some(Command::Person { id }) => run_person(&repo, &id),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn parse_bound(flag: &str, text: Option<String>) -> Result<Option<i32>> {
    text.map(|t| {
        era::parse_date(&t)
            .ok_or_else(|| CliError::InvalidInput(format!("--{flag}: cannot read `{t}` as a year")))
    })
    .transpose()
}

// ═══════════════════════════════════════════════════════════════════════
//  SEARCH
// ═══════════════════════════════════════════════════════════════════════

fn run_search(
    repo: &TimelineRepository,
    term: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let filter = YearFilter::new(parse_bound("from", from)?, parse_bound("to", to)?);
    let results = repo.search(term, &filter);
    debug!(term, total = results.total(), active_filter = filter.is_active(), "search done");
    print_json(&results)
}

// ═══════════════════════════════════════════════════════════════════════
//  PERIODS
// ═══════════════════════════════════════════════════════════════════════

/// One line per period: index, name, range, event count and slug.
fn run_periods(repo: &TimelineRepository) {
    let groups = repo.events_by_period();
    let width = repo.periods().iter().map(|p| p.name.len()).max().unwrap_or(0);

    for (i, group) in groups.iter().enumerate() {
        let p = group.period;
        println!(
            "{:>2}. {:<width$}  {:<14}  {:>3} events  [{}]",
            i + 1,
            p.name,
            p.date_range,
            group.events.len(),
            p.slug,
        );
    }

    let total = repo.events().len();
    eprintln!(
        "\nTotal: {} of {} events assigned to a period",
        groups.assigned_count(),
        total
    );
}

#[derive(Serialize)]
struct PeriodReport<'a> {
    #[serde(flatten)]
    period: DatedPeriod<'a>,
    events: Vec<&'a BiblicalEvent>,
    people: Vec<&'a BiblicalPerson>,
    regions: Vec<&'a BiblicalRegion>,
}

fn run_period(repo: &TimelineRepository, slug: &str) -> Result<()> {
    let not_found = || CliError::NotFound {
        kind: EntityKind::Period,
        id: slug.to_string(),
    };
    let period = repo.period(slug).ok_or_else(not_found)?;
    let report = PeriodReport {
        period,
        events: repo.period_events(slug).ok_or_else(not_found)?,
        people: repo.period_people(slug).ok_or_else(not_found)?,
        regions: repo.period_regions(slug).ok_or_else(not_found)?,
    };
    print_json(&report)
}

// ═══════════════════════════════════════════════════════════════════════
//  DATE
// ═══════════════════════════════════════════════════════════════════════

/// How one piece of date text reads under each policy.
#[derive(Serialize)]
struct DateReport<'a> {
    input: &'a str,
    /// Single year, bare numbers as AD.
    year: Option<i32>,
    /// Range endpoints in written order, bare numbers as AD.
    range: Option<(i32, i32)>,
    span: Option<DateSpan>,
    /// Year as period assignment reads it.
    assignment_year: Option<i32>,
    period: Option<&'a TimelinePeriod>,
}

fn run_date(repo: &TimelineRepository, text: &str) -> Result<()> {
    let assignment_year = era::parse_year_with(text, ASSIGNMENT_ERA_DEFAULT);
    let report = DateReport {
        input: text,
        year: era::parse_date(text),
        range: era::parse_date_range(text),
        span: DateSpan::parse(text, EraDefault::Ad),
        assignment_year,
        period: assignment_year.and_then(|y| repo.period_for_year(y)),
    };
    print_json(&report)
}

// ═══════════════════════════════════════════════════════════════════════
//  PERSON
// ═══════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct PersonReport<'a> {
    #[serde(flatten)]
    person: &'a BiblicalPerson,
    lifespan: Option<DateSpan>,
    family: Family<'a>,
    events: Vec<&'a BiblicalEvent>,
    regions: Vec<&'a BiblicalRegion>,
}

fn run_person(repo: &TimelineRepository, id: &str) -> Result<()> {
    let not_found = || CliError::NotFound {
        kind: EntityKind::Person,
        id: id.to_string(),
    };
    let person = repo.person(id).ok_or_else(not_found)?;
    let report = PersonReport {
        person,
        lifespan: assign::person_lifespan(person),
        family: repo.family(id).ok_or_else(not_found)?,
        events: repo.events_for_person(id),
        regions: repo.regions_for_person(id),
    };
    print_json(&report)
}
