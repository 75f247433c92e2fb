//! # Actions
//!
//! Everything that can happen in Campus becomes an `Action`.
//! User opens a course? That's `Action::SelectCourse(id)`.
//! User presses "verify"? That's `Action::SubmitAnswers(answers)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` for the adapter to carry out.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply actions, then assert on `app.view()`.

use log::{debug, info, warn};

use crate::core::grader::grade;
use crate::core::navigation::{DifficultyLevel, Section};
use crate::core::state::{App, WELCOME_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open a course by id.
    SelectCourse(String),
    SelectLevel(DifficultyLevel),
    SelectSection(Section),
    /// Verify the exercise form. Answers are aligned with the exercise set.
    SubmitAnswers(Vec<String>),
    ReturnHome,
    Quit,
}

/// What the adapter should do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The selected course lives elsewhere; show or open this link.
    OpenExternal(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::SelectCourse(id) => {
            let Some(course) = app.repository.course(&id).cloned() else {
                debug!("Ignoring unknown course id {}", id);
                return Effect::None;
            };
            // External courses are links only and never entered.
            if course.is_external {
                let Some(url) = course.external_url() else {
                    warn!("External course {} has no link", course.id);
                    app.status_message = format!("{}: link unavailable", course.name);
                    return Effect::None;
                };
                info!("Course {} is external: {}", course.id, url);
                app.status_message = format!("{} opens externally: {}", course.name, url);
                return Effect::OpenExternal(url.to_string());
            }
            info!("Selected course {}", course.id);
            app.status_message = format!("{} {}", course.icon, course.name)
                .trim()
                .to_string();
            app.navigation.select_course(course);
            app.last_grading = None;
        }
        // Re-selecting the active tab keeps the page, grading included.
        Action::SelectLevel(level) => {
            let changed = app.navigation.level() != level;
            if app.navigation.select_level(level) {
                app.status_message = format!("Level: {}", level);
                if changed {
                    app.last_grading = None;
                }
            }
        }
        Action::SelectSection(section) => {
            let changed = app.navigation.section() != section;
            if app.navigation.select_section(section) {
                app.status_message = section.label().to_string();
                if changed {
                    app.last_grading = None;
                }
            }
        }
        Action::SubmitAnswers(answers) => submit_answers(app, &answers),
        Action::ReturnHome => {
            app.navigation.return_home();
            app.last_grading = None;
            app.status_message = WELCOME_MESSAGE.to_string();
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}

fn submit_answers(app: &mut App, answers: &[String]) {
    let Some(course) = app.navigation.course() else {
        debug!("Ignoring submission with no course selected");
        return;
    };
    if app.navigation.section() != Section::Exercises {
        debug!("Ignoring submission outside the exercises section");
        return;
    }

    let level = app.navigation.level();
    let exercises = app.resolver().resolve_exercises(&course.id, level);
    if exercises.is_empty() {
        app.last_grading = None;
        app.status_message = String::from("No exercises available for this level yet");
        return;
    }

    let result = grade(exercises, answers);
    info!(
        "Graded {} ({}): {} of {} correct",
        course.id, level, result.correct_count, result.total_count
    );
    app.status_message = if result.is_perfect() {
        String::from("Perfect score!")
    } else {
        format!("{} of {} correct", result.correct_count, result.total_count)
    };
    app.last_grading = Some(result);
}
