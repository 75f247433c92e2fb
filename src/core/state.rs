//! # Application State
//!
//! Core session state for Campus. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── repository: Arc<dyn ContentRepository>  // injected, read-only content
//! ├── navigation: NavigationState             // course / level / section
//! ├── last_grading: Option<GradingResult>     // latest verification, if any
//! └── status_message: String                  // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::core::content::{ContentRepository, ContentResolver};
use crate::core::grader::GradingResult;
use crate::core::navigation::NavigationState;
use crate::core::view::{ViewDescriptor, project};

pub const WELCOME_MESSAGE: &str = "Pick a course and start growing";

pub struct App {
    pub repository: Arc<dyn ContentRepository>,
    pub navigation: NavigationState,
    /// Replaced wholesale on every verification, cleared on navigation.
    pub last_grading: Option<GradingResult>,
    pub status_message: String,
}

impl App {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self {
            repository,
            navigation: NavigationState::new(),
            last_grading: None,
            status_message: String::from(WELCOME_MESSAGE),
        }
    }

    pub fn resolver(&self) -> ContentResolver<'_> {
        ContentResolver::new(self.repository.as_ref())
    }

    /// Resolve content for the current state and project it for rendering.
    pub fn view(&self) -> ViewDescriptor {
        let content = self.resolver().resolve(&self.navigation);
        project(&self.navigation, &content, self.last_grading.as_ref())
    }
}
