use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use timeline_types::{BiblicalEvent, BiblicalPerson, BiblicalRegion, EntityKind};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LoadError;

/// Everything read from the data directory.
#[derive(Debug, Default)]
pub struct TimelineData {
    pub persons: Vec<BiblicalPerson>,
    pub events: Vec<BiblicalEvent>,
    pub regions: Vec<BiblicalRegion>,
}

/// A data file holds either a list of records or a single record.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(doc: OneOrMany<T>) -> Self {
        match doc {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

/// Load every data file under `root`.
///
/// Expected layout (either form, or both):
///   {root}/persons.yaml              list of persons
///   {root}/events/{anything}.yaml    one event or a list of events
///
/// `people` is accepted for `persons`, and `.yml`/`.json` for `.yaml`.
/// Files are read in path order, so record order is stable across runs.
pub fn load_dir(root: &Path) -> Result<TimelineData, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::MissingDir(root.to_path_buf()));
    }

    let mut data = TimelineData::default();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(kind) = classify(root, path) else {
            debug!(path = %path.display(), "skipping non-data file");
            continue;
        };

        match kind {
            EntityKind::Person => data.persons.extend(load_file::<BiblicalPerson>(path)?),
            EntityKind::Event => data.events.extend(load_file::<BiblicalEvent>(path)?),
            EntityKind::Region => data.regions.extend(load_file::<BiblicalRegion>(path)?),
            EntityKind::Period => continue,
        }
        debug!(path = %path.display(), %kind, "loaded data file");
    }

    check_unique(EntityKind::Person, data.persons.iter().map(|p| p.id.as_str()))?;
    check_unique(EntityKind::Event, data.events.iter().map(|e| e.id.as_str()))?;
    check_unique(EntityKind::Region, data.regions.iter().map(|r| r.id.as_str()))?;

    info!(
        root = %root.display(),
        persons = data.persons.len(),
        events = data.events.len(),
        regions = data.regions.len(),
        "loaded timeline data"
    );
    Ok(data)
}

/// Parse one YAML or JSON file into records.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let doc: OneOrMany<T> = if has_extension(path, &["json"]) {
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(doc.into())
}

/// Decide which entity kind a file holds, from its stem or its directory.
fn classify(root: &Path, path: &Path) -> Option<EntityKind> {
    if !has_extension(path, &["yaml", "yml", "json"]) {
        return None;
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if let Some(kind) = kind_from_name(stem) {
        return Some(kind);
    }
    let parent = path.parent()?;
    if parent == root {
        return None;
    }
    kind_from_name(parent.file_name()?.to_str()?)
}

fn kind_from_name(name: &str) -> Option<EntityKind> {
    match name.to_ascii_lowercase().as_str() {
        "persons" | "people" => Some(EntityKind::Person),
        "events" => Some(EntityKind::Event),
        "regions" => Some(EntityKind::Region),
        _ => None,
    }
}

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn check_unique<'a>(kind: EntityKind, ids: impl Iterator<Item = &'a str>) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LoadError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    const PERSONS_YAML: &str = r#"
- id: abraham
  name: Abraham
  names: [Abram]
  birth_date: "2166 BC"
  death_date: "1991 BC"
- id: isaac
  name: Isaac
  birth_date: "2066 BC"
  parents: [abraham]
"#;

    #[test]
    fn test_load_dir_reads_lists_and_single_records() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "persons.yaml", PERSONS_YAML);
        write(
            dir.path(),
            "events/call.yml",
            "id: call\nname: Call of Abram\ndate: \"2091 BC\"\nlocation: Haran\nparticipants: [abraham]\n",
        );
        write(
            dir.path(),
            "regions.json",
            r#"[{"id": "canaan", "name": "Canaan", "estimated_dates": "2091-1406 BC"}]"#,
        );
        write(dir.path(), "README.md", "# not data");

        let data = load_dir(dir.path()).unwrap();
        assert_eq!(data.persons.len(), 2);
        assert_eq!(data.persons[0].names, vec!["Abram".to_string()]);
        assert_eq!(data.persons[1].parents, vec!["abraham".to_string()]);
        assert_eq!(data.events.len(), 1);
        assert_eq!(data.events[0].participants, vec!["abraham".to_string()]);
        assert_eq!(data.regions[0].estimated_dates, "2091-1406 BC");
    }

    #[test]
    fn test_load_dir_people_alias_and_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "people/b.yaml", "id: b\nname: B\n");
        write(dir.path(), "people/a.yaml", "id: a\nname: A\n");
        let data = load_dir(dir.path()).unwrap();
        let ids: Vec<&str> = data.persons.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_load_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, LoadError::MissingDir(_)));
    }

    #[test]
    fn test_load_dir_duplicate_id() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "persons.yaml", PERSONS_YAML);
        write(dir.path(), "people/again.yaml", "id: isaac\nname: Isaac\n");
        let err = load_dir(dir.path()).unwrap_err();
        match err {
            LoadError::DuplicateId { kind, id } => {
                assert_eq!(kind, EntityKind::Person);
                assert_eq!(id, "isaac");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_file_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "events.yaml", "- id: [unclosed\n");
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Yaml { .. }));
        assert!(err.to_string().contains("events.yaml"));
    }

    #[test]
    fn test_classify() {
        let root = Path::new("/data");
        assert_eq!(classify(root, Path::new("/data/events.yaml")), Some(EntityKind::Event));
        assert_eq!(classify(root, Path::new("/data/regions/x.json")), Some(EntityKind::Region));
        assert_eq!(classify(root, Path::new("/data/other.yaml")), None);
        assert_eq!(classify(root, Path::new("/data/events.txt")), None);
    }
}
