//! Static table of the timeline's historical periods.
//!
//! Twenty hand-authored periods from Creation to the present, in
//! chronological order. Adjacent periods share exactly one boundary year
//! where history runs continuously (New Testament Era ends 60 AD, Apostolic
//! Age starts 60 AD); period assignment resolves those shared years.

use timeline_types::TimelinePeriod;

// ── Period entry ─────────────────────────────────────────────────────

/// One row of the period table.
pub struct PeriodEntry {
    pub name: &'static str,
    pub date_range: &'static str,
    pub description: &'static str,
    pub primary_books: &'static [&'static str],
}

impl PeriodEntry {
    pub fn to_period(&self, color_index: u8) -> TimelinePeriod {
        TimelinePeriod {
            name: self.name.to_string(),
            slug: slugify(self.name),
            date_range: self.date_range.to_string(),
            description: self.description.to_string(),
            color_index,
            primary_books: self.primary_books.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Master list of periods, oldest first.
pub static TIMELINE_PERIODS: &[PeriodEntry] = &[
    PeriodEntry {
        name: "Creation and Early World",
        date_range: "4004-2348 BC",
        description: "From the creation account through the generations before the Flood.",
        primary_books: &["Genesis"],
    },
    PeriodEntry {
        name: "The Flood and Table of Nations",
        date_range: "2348-2091 BC",
        description: "The Flood, Noah's descendants, the Tower of Babel and the spread of the nations.",
        primary_books: &["Genesis"],
    },
    PeriodEntry {
        name: "Patriarchal Period",
        date_range: "2091-1876 BC",
        description: "Abraham's call, Isaac, Jacob and the twelve sons of Israel.",
        primary_books: &["Genesis", "Job"],
    },
    PeriodEntry {
        name: "Egyptian Sojourn",
        date_range: "1876-1446 BC",
        description: "Israel's settlement in Egypt under Joseph and the later years of bondage.",
        primary_books: &["Genesis", "Exodus"],
    },
    PeriodEntry {
        name: "Exodus and Wilderness Wanderings",
        date_range: "1446-1406 BC",
        description: "Moses leads Israel out of Egypt; the covenant at Sinai and forty years in the wilderness.",
        primary_books: &["Exodus", "Leviticus", "Numbers", "Deuteronomy"],
    },
    PeriodEntry {
        name: "Conquest of Canaan",
        date_range: "1406-1375 BC",
        description: "Joshua leads the tribes into the land and divides the inheritance.",
        primary_books: &["Joshua"],
    },
    PeriodEntry {
        name: "Period of the Judges",
        date_range: "1375-1050 BC",
        description: "Cycles of apostasy and deliverance under the judges, ending with Samuel.",
        primary_books: &["Judges", "Ruth", "1 Samuel"],
    },
    PeriodEntry {
        name: "United Monarchy",
        date_range: "1050-930 BC",
        description: "The reigns of Saul, David and Solomon over a single kingdom.",
        primary_books: &["1 Samuel", "2 Samuel", "1 Kings", "1 Chronicles", "Psalms", "Proverbs"],
    },
    PeriodEntry {
        name: "Divided Kingdom",
        date_range: "930-722 BC",
        description: "Israel in the north and Judah in the south until the fall of Samaria.",
        primary_books: &["1 Kings", "2 Kings", "2 Chronicles", "Amos", "Hosea", "Isaiah"],
    },
    PeriodEntry {
        name: "Judah Alone",
        date_range: "722-586 BC",
        description: "The southern kingdom survives Assyria until Jerusalem falls to Babylon.",
        primary_books: &["2 Kings", "2 Chronicles", "Jeremiah", "Micah", "Habakkuk"],
    },
    PeriodEntry {
        name: "Babylonian Exile",
        date_range: "586-538 BC",
        description: "Judah in captivity in Babylon.",
        primary_books: &["Ezekiel", "Daniel", "Lamentations"],
    },
    PeriodEntry {
        name: "Return and Restoration",
        date_range: "538-430 BC",
        description: "Return under Cyrus, the rebuilt temple and the walls of Jerusalem.",
        primary_books: &["Ezra", "Nehemiah", "Esther", "Haggai", "Zechariah", "Malachi"],
    },
    PeriodEntry {
        name: "Intertestamental Period",
        date_range: "430-6 BC",
        description: "Persian, Greek, Hasmonean and early Roman rule between the testaments.",
        primary_books: &[],
    },
    PeriodEntry {
        name: "New Testament Era",
        date_range: "4 BC-60 AD",
        description: "The life of Jesus and the first generation of the church.",
        primary_books: &["Matthew", "Mark", "Luke", "John", "Acts"],
    },
    PeriodEntry {
        name: "Apostolic Age",
        date_range: "60-100 AD",
        description: "The later ministry of the apostles and the close of the New Testament writings.",
        primary_books: &["Acts", "Romans", "Hebrews", "1 Peter", "Revelation"],
    },
    PeriodEntry {
        name: "Early Church",
        date_range: "100-313 AD",
        description: "The church fathers and the era of persecution until the Edict of Milan.",
        primary_books: &[],
    },
    PeriodEntry {
        name: "Imperial Church",
        date_range: "313-590 AD",
        description: "The ecumenical councils and the church within the Roman empire.",
        primary_books: &[],
    },
    PeriodEntry {
        name: "Medieval Church",
        date_range: "590-1517 AD",
        description: "From Gregory the Great to the eve of the Reformation.",
        primary_books: &[],
    },
    PeriodEntry {
        name: "Reformation and Modern Missions",
        date_range: "1517-1900 AD",
        description: "The Reformation, the translation of the Bible into common languages and worldwide missions.",
        primary_books: &[],
    },
    PeriodEntry {
        name: "Contemporary Era",
        date_range: "1900-2025 AD",
        description: "The twentieth and twenty-first centuries.",
        primary_books: &[],
    },
];

/// Materialize the period table, assigning color indices in order.
pub fn timeline_periods() -> Vec<TimelinePeriod> {
    TIMELINE_PERIODS
        .iter()
        .enumerate()
        .map(|(i, e)| e.to_period(i as u8))
        .collect()
}

/// "New Testament Era" → "new-testament-era".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::{DateSpan, EraDefault};

    #[test]
    fn test_table_has_twenty_periods() {
        assert_eq!(TIMELINE_PERIODS.len(), 20);
        let periods = timeline_periods();
        assert_eq!(periods[0].date_range, "4004-2348 BC");
        assert_eq!(periods[19].name, "Contemporary Era");
        assert_eq!(periods[19].color_index, 19);
    }

    #[test]
    fn test_every_range_parses_and_is_chronological() {
        let spans: Vec<DateSpan> = TIMELINE_PERIODS
            .iter()
            .map(|e| DateSpan::parse(e.date_range, EraDefault::Magnitude).unwrap())
            .collect();
        assert_eq!(spans[0].start, -4004);
        assert_eq!(spans[19].end, 2025);
        for pair in spans.windows(2) {
            assert!(pair[0].start < pair[1].start, "{:?}", pair);
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<String> = timeline_periods().into_iter().map(|p| p.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 20);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("New Testament Era"), "new-testament-era");
        assert_eq!(slugify("The Flood and Table of Nations"), "the-flood-and-table-of-nations");
        assert_eq!(slugify("  Judah -- Alone! "), "judah-alone");
    }
}
