use serde::{Deserialize, Serialize};

// ── Person ───────────────────────────────────────────────────────────────

/// A person as authored in the data files.
///
/// Dates are kept as the free text the author wrote ("c. 1526 BC", "~30 AD");
/// the core parses them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiblicalPerson {
    pub id: String,
    pub name: String,
    /// Alternate names (Abram for Abraham, Saul for Paul, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

// ── Event ────────────────────────────────────────────────────────────────

/// A single dated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiblicalEvent {
    pub id: String,
    pub name: String,
    /// Single date, e.g. "6 BC" or "~30 AD".
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Person ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

// ── Region ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiblicalRegion {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Date range text, e.g. "1406-586 BC".
    #[serde(default)]
    pub estimated_dates: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notable_people: Vec<String>,
}

// ── Period ───────────────────────────────────────────────────────────────

/// A named historical period of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePeriod {
    pub name: String,
    pub slug: String,
    #[serde(alias = "dateRange")]
    pub date_range: String,
    pub description: String,
    #[serde(alias = "colorIndex")]
    pub color_index: u8,
    #[serde(default, alias = "primaryBooks")]
    pub primary_books: Vec<String>,
}

// ── Entity kind ──────────────────────────────────────────────────────────

/// The four browsable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Event,
    Region,
    Period,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Event => "event",
            Self::Region => "region",
            Self::Period => "period",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
