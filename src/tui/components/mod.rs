//! # TUI Components
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and render it:
//! - `TitleBar`: breadcrumb and status line
//! - `TabStrip`: level and section selectors
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent state struct lives in `TuiState` and handles events; a
//! transient wrapper borrows it each frame to render:
//! - `CourseListState` / `CourseList`: the home screen
//! - `TheoryViewState` / `TheoryView`: scrollable Markdown theory
//! - `ExerciseFormState` / `ExerciseForm`: answer fields, feedback, score
//! - `AnswerField`: one line of editable text, owned by the form
//!
//! Each file holds the component's state, events, rendering, and tests.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs
//! ├── tabs.rs
//! ├── course_list.rs
//! ├── theory_view.rs
//! ├── exercise_form.rs
//! └── answer_field.rs
//! ```

pub mod answer_field;
pub mod course_list;
pub mod exercise_form;
pub mod tabs;
pub mod theory_view;
mod title_bar;

pub use course_list::{CourseList, CourseListEvent, CourseListState};
pub use exercise_form::{ExerciseForm, ExerciseFormState, FormEvent};
pub use tabs::TabStrip;
pub use theory_view::{TheoryView, TheoryViewState};
pub use title_bar::TitleBar;
