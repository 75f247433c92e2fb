//! # Course Content
//!
//! Courses, theory, and exercise sets, plus the resolver that looks them up
//! for a `(course, level, section)` selection.
//!
//! The content itself is read-only and injected at startup through the
//! `ContentRepository` trait. `Catalog` is the in-memory implementation the
//! `catalog` loader produces.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::matcher::AnswerType;
use crate::core::navigation::{CurrentView, DifficultyLevel, NavigationState, Section};

/// A top-level subject. External courses are links, not browsable content.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, alias = "isExternal")]
    pub is_external: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl Course {
    /// The link to follow instead of opening the course, if it is external.
    pub fn external_url(&self) -> Option<&str> {
        if self.is_external {
            self.url.as_deref()
        } else {
            None
        }
    }
}

/// A single short-answer or numeric question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub question: String,
    /// Canonical answer; text answers may list alternatives separated by `|`.
    pub answer: String,
    #[serde(rename = "type", default)]
    pub answer_type: AnswerType,
}

/// Read-only source of course content.
pub trait ContentRepository {
    /// All courses, in display order.
    fn courses(&self) -> &[Course];

    fn theory(&self, course_id: &str, level: DifficultyLevel) -> Option<&str>;

    fn exercises(&self, course_id: &str, level: DifficultyLevel) -> Option<&[Exercise]>;

    fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses().iter().find(|c| c.id == course_id)
    }
}

/// In-memory content keyed the way content files are: course, then level.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub theory: HashMap<String, HashMap<DifficultyLevel, String>>,
    pub exercises: HashMap<String, HashMap<DifficultyLevel, Vec<Exercise>>>,
}

impl ContentRepository for Catalog {
    fn courses(&self) -> &[Course] {
        &self.courses
    }

    fn theory(&self, course_id: &str, level: DifficultyLevel) -> Option<&str> {
        self.theory
            .get(course_id)
            .and_then(|levels| levels.get(&level))
            .map(String::as_str)
    }

    fn exercises(&self, course_id: &str, level: DifficultyLevel) -> Option<&[Exercise]> {
        self.exercises
            .get(course_id)
            .and_then(|levels| levels.get(&level))
            .map(Vec::as_slice)
    }
}

/// Content resolved for the current view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedContent<'a> {
    /// The course list.
    Catalog(&'a [Course]),
    /// Theory text; `None` means nothing has been written for this level yet.
    Theory(Option<&'a str>),
    /// Exercise set, possibly empty.
    Exercises(&'a [Exercise]),
}

/// Lookups against a repository. Never fails; missing content resolves to
/// `None` or an empty set.
pub struct ContentResolver<'a> {
    repository: &'a dyn ContentRepository,
}

impl<'a> ContentResolver<'a> {
    pub fn new(repository: &'a dyn ContentRepository) -> Self {
        Self { repository }
    }

    pub fn resolve_theory(&self, course_id: &str, level: DifficultyLevel) -> Option<&'a str> {
        self.repository.theory(course_id, level)
    }

    pub fn resolve_exercises(&self, course_id: &str, level: DifficultyLevel) -> &'a [Exercise] {
        self.repository.exercises(course_id, level).unwrap_or(&[])
    }

    /// Resolves whatever the navigation state currently shows.
    pub fn resolve(&self, state: &NavigationState) -> ResolvedContent<'a> {
        match state.current_view() {
            CurrentView::CourseList => ResolvedContent::Catalog(self.repository.courses()),
            CurrentView::CourseDetail {
                course,
                level,
                section,
            } => {
                debug!("Resolving {} for {} ({})", section.label(), course.id, level);
                match section {
                    Section::Theory => {
                        ResolvedContent::Theory(self.resolve_theory(&course.id, level))
                    }
                    Section::Exercises => {
                        ResolvedContent::Exercises(self.resolve_exercises(&course.id, level))
                    }
                }
            }
        }
    }
}
