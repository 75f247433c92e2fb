//! # Catalog Loading
//!
//! Reads course content from a TOML or JSON file into a [`Catalog`].
//! This is the only place content is parsed; the core just receives the
//! finished catalog.
//!
//! The file mirrors how content is authored: an ordered course list, then
//! theory and exercises keyed by course id and level.
//!
//! ```toml
//! [[courses]]
//! id = "geo"
//! name = "Geography"
//!
//! [theory.geo]
//! basic = "Every country has a capital."
//!
//! [[exercises.geo.basic]]
//! question = "Capital of France?"
//! answer = "Paris|Lutecia"
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::core::content::{Catalog, Course, Exercise};
use crate::core::matcher::AnswerType;
use crate::core::navigation::DifficultyLevel;

/// Catalog compiled into the binary, used when no file is configured.
const BUILTIN_CATALOG: &str = include_str!("../content/catalog.toml");

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    DuplicateCourse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog I/O error: {e}"),
            CatalogError::Toml(e) => write!(f, "catalog TOML error: {e}"),
            CatalogError::Json(e) => write!(f, "catalog JSON error: {e}"),
            CatalogError::DuplicateCourse(id) => write!(f, "duplicate course id: {id}"),
        }
    }
}

impl std::error::Error for CatalogError {}

// ============================================================================
// File format
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    theory: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    exercises: HashMap<String, HashMap<String, Vec<ExerciseEntry>>>,
}

#[derive(Debug, Deserialize)]
struct ExerciseEntry {
    question: String,
    answer: AnswerValue,
    #[serde(rename = "type", default)]
    answer_type: AnswerType,
}

/// Answers may be written as bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<AnswerValue> for String {
    fn from(value: AnswerValue) -> Self {
        match value {
            AnswerValue::Text(s) => s,
            AnswerValue::Integer(n) => n.to_string(),
            AnswerValue::Float(x) => x.to_string(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse the built-in catalog.
pub fn builtin() -> Result<Catalog, CatalogError> {
    from_toml_str(BUILTIN_CATALOG)
}

/// Load a catalog file. `.json` files are parsed as JSON, everything else as TOML.
pub fn load_file(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path).map_err(CatalogError::Io)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let catalog = if is_json {
        from_json_str(&contents)?
    } else {
        from_toml_str(&contents)?
    };
    info!(
        "Loaded catalog from {} ({} courses)",
        path.display(),
        catalog.courses.len()
    );
    Ok(catalog)
}

pub fn from_toml_str(contents: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(contents).map_err(CatalogError::Toml)?;
    build(file)
}

pub fn from_json_str(contents: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(contents).map_err(CatalogError::Json)?;
    build(file)
}

fn build(file: CatalogFile) -> Result<Catalog, CatalogError> {
    let mut seen = HashSet::new();
    for course in &file.courses {
        if !seen.insert(course.id.as_str()) {
            return Err(CatalogError::DuplicateCourse(course.id.clone()));
        }
        if course.is_external && course.url.is_none() {
            warn!("External course {} has no url", course.id);
        }
    }
    for id in file.theory.keys().chain(file.exercises.keys()) {
        if !seen.contains(id.as_str()) {
            warn!("Content for unknown course {} will never be shown", id);
        }
    }

    let theory = file
        .theory
        .into_iter()
        .map(|(course_id, levels)| {
            let levels = keyed_by_level(&course_id, levels);
            (course_id, levels)
        })
        .collect();

    let exercises = file
        .exercises
        .into_iter()
        .map(|(course_id, levels)| {
            let levels = keyed_by_level(&course_id, levels)
                .into_iter()
                .map(|(level, entries)| {
                    let set = entries
                        .into_iter()
                        .map(|entry| Exercise {
                            question: entry.question,
                            answer: entry.answer.into(),
                            answer_type: entry.answer_type,
                        })
                        .collect();
                    (level, set)
                })
                .collect();
            (course_id, levels)
        })
        .collect();

    Ok(Catalog {
        courses: file.courses,
        theory,
        exercises,
    })
}

/// Converts string level keys, skipping (and logging) ones we don't know.
fn keyed_by_level<T>(course_id: &str, raw: HashMap<String, T>) -> HashMap<DifficultyLevel, T> {
    raw.into_iter()
        .filter_map(|(key, value)| match key.parse::<DifficultyLevel>() {
            Ok(level) => Some((level, value)),
            Err(e) => {
                warn!("Skipping content for {}: {}", course_id, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::ContentRepository;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin().unwrap();
        assert!(!catalog.courses.is_empty());
        assert!(catalog.courses.iter().any(|c| c.is_external));
        for course in catalog.courses.iter().filter(|c| !c.is_external) {
            assert!(
                catalog.theory(&course.id, DifficultyLevel::Basic).is_some(),
                "{} has no basic theory",
                course.id
            );
        }
    }

    #[test]
    fn test_toml_catalog() {
        let toml_str = r#"
[[courses]]
id = "geo"
name = "Geography"
icon = "🌍"

[[courses]]
id = "games"
name = "Mini games"
is_external = true
url = "https://example.org"

[theory.geo]
basic = "Capitals."
intermedio = "Rivers."

[[exercises.geo.basic]]
question = "Capital of France?"
answer = "Paris|Lutecia"

[[exercises.geo.basic]]
question = "Continents?"
answer = 7
type = "number"

[[exercises.geo.basic]]
question = "Pi?"
answer = 3.1416
type = "numeric"
"#;
        let catalog = from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.courses.len(), 2);
        assert_eq!(catalog.courses[0].id, "geo");
        assert_eq!(catalog.courses[1].external_url(), Some("https://example.org"));
        assert_eq!(catalog.theory("geo", DifficultyLevel::Intermediate), Some("Rivers."));

        let set = catalog.exercises("geo", DifficultyLevel::Basic).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set[0].answer_type, AnswerType::Text);
        assert_eq!(set[1].answer, "7");
        assert_eq!(set[1].answer_type, AnswerType::Numeric);
        assert_eq!(set[2].answer, "3.1416");
    }

    #[test]
    fn test_json_catalog_with_camel_case_and_spanish_keys() {
        let json = r#"{
            "courses": [
                {"id": "math", "name": "Math", "description": "Numbers", "icon": "🧮"},
                {"id": "play", "name": "Play", "isExternal": true, "url": "https://play.test"}
            ],
            "theory": {"math": {"basico": "Addition."}},
            "exercises": {"math": {"basico": [
                {"question": "2+2?", "answer": 4, "type": "number"},
                {"question": "Name of +?", "answer": "plus|sum"}
            ]}}
        }"#;
        let catalog = from_json_str(json).unwrap();
        assert!(catalog.courses[1].is_external);
        assert_eq!(catalog.theory("math", DifficultyLevel::Basic), Some("Addition."));
        let set = catalog.exercises("math", DifficultyLevel::Basic).unwrap();
        assert_eq!(set[0].answer, "4");
        assert_eq!(set[1].answer, "plus|sum");
    }

    #[test]
    fn test_unknown_level_is_skipped() {
        let toml_str = r#"
[[courses]]
id = "geo"
name = "Geography"

[theory.geo]
basic = "ok"
expert = "ignored"
"#;
        let catalog = from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.theory["geo"].len(), 1);
    }

    #[test]
    fn test_duplicate_course_ids_rejected() {
        let toml_str = r#"
[[courses]]
id = "geo"
name = "Geography"

[[courses]]
id = "geo"
name = "Geology"
"#;
        let err = from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourse(ref id) if id == "geo"));
        assert_eq!(err.to_string(), "duplicate course id: geo");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = from_toml_str("").unwrap();
        assert!(catalog.courses.is_empty());
    }
}
