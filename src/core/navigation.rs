//! # Navigation State
//!
//! Which course, difficulty level, and section the session is looking at.
//!
//! ```text
//!                 select_course(c)
//!   (none, basic, theory)  ──────────▶  (c, basic, theory)
//!            ▲                             │   ▲
//!            │ return_home()               │   │ select_level(l) / select_section(s)
//!            └─────────────────────────────┘───┘
//! ```
//!
//! Every transition is total. Level and section changes without a course are
//! ignored, and leaving or switching a course always resets the sub-selection.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::content::Course;

/// Difficulty tier. Scopes both theory and exercises.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DifficultyLevel {
    #[serde(rename = "basic")]
    #[default]
    Basic,
    #[serde(rename = "intermediate")]
    Intermediate,
    #[serde(rename = "advanced")]
    Advanced,
}

impl DifficultyLevel {
    /// All levels in presentation order.
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Basic,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DifficultyLevel::Basic => "Basic",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognised level key in content files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty level: {}", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for DifficultyLevel {
    type Err = UnknownLevel;

    /// Accepts the English keys and the Spanish ones older catalogs use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "basico" | "básico" => Ok(DifficultyLevel::Basic),
            "intermediate" | "intermedio" => Ok(DifficultyLevel::Intermediate),
            "advanced" | "avanzado" => Ok(DifficultyLevel::Advanced),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// Theory vs exercises toggle within a course.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[serde(rename = "theory")]
    #[default]
    Theory,
    #[serde(rename = "exercises")]
    Exercises,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Theory, Section::Exercises];

    pub fn label(self) -> &'static str {
        match self {
            Section::Theory => "Theory",
            Section::Exercises => "Exercises",
        }
    }

    /// The other section.
    pub fn toggled(self) -> Section {
        match self {
            Section::Theory => Section::Exercises,
            Section::Exercises => Section::Theory,
        }
    }
}

/// Derived view of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentView<'a> {
    CourseList,
    CourseDetail {
        course: &'a Course,
        level: DifficultyLevel,
        section: Section,
    },
}

/// The session's single navigation state.
///
/// Fields are private: the four transitions below are the only writers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    course: Option<Course>,
    level: DifficultyLevel,
    section: Section,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn level(&self) -> DifficultyLevel {
        self.level
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Enter a course at the default level and section, from any state.
    pub fn select_course(&mut self, course: Course) {
        debug!("Navigation: select course {}", course.id);
        self.course = Some(course);
        self.level = DifficultyLevel::default();
        self.section = Section::default();
    }

    /// Back to the course list, resetting level and section.
    pub fn return_home(&mut self) {
        debug!("Navigation: return home");
        self.course = None;
        self.level = DifficultyLevel::default();
        self.section = Section::default();
    }

    /// Changes the level only. Returns false (and does nothing) without a course.
    pub fn select_level(&mut self, level: DifficultyLevel) -> bool {
        if self.course.is_none() {
            debug!("Navigation: ignoring level {} with no course selected", level);
            return false;
        }
        self.level = level;
        true
    }

    /// Changes the section only. Returns false (and does nothing) without a course.
    pub fn select_section(&mut self, section: Section) -> bool {
        if self.course.is_none() {
            debug!(
                "Navigation: ignoring section {} with no course selected",
                section.label()
            );
            return false;
        }
        self.section = section;
        true
    }

    pub fn current_view(&self) -> CurrentView<'_> {
        match &self.course {
            None => CurrentView::CourseList,
            Some(course) => CurrentView::CourseDetail {
                course,
                level: self.level,
                section: self.section,
            },
        }
    }
}
