//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the
//! `ViewDescriptor` the core projects, and translates keyboard events into
//! `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps until input arrives and only redraws
//! after events. All pending events are drained before the next frame, and
//! each one is routed against the view as it stands after the previous one.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::content::Catalog;
use crate::core::navigation::{DifficultyLevel, Section};
use crate::core::state::App;
use crate::core::view::{CourseDetailView, DetailBody, ViewDescriptor};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CourseListEvent, CourseListState, ExerciseFormState, FormEvent, TheoryViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// Identifies the page on screen. Presentation state is reset when it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageKey {
    course_id: String,
    level: Option<DifficultyLevel>,
    section: Option<Section>,
}

impl PageKey {
    fn of(view: &ViewDescriptor) -> Option<Self> {
        match view {
            ViewDescriptor::CourseList(_) => None,
            ViewDescriptor::CourseDetail(detail) => Some(Self {
                course_id: detail.header.id.clone(),
                level: detail.active_level(),
                section: detail.active_section(),
            }),
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub course_list: CourseListState,
    pub theory: TheoryViewState,
    pub exercise_form: ExerciseFormState,
    page: Option<PageKey>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            course_list: CourseListState::new(),
            theory: TheoryViewState::new(),
            exercise_form: ExerciseFormState::default(),
            page: None,
        }
    }

    /// Bring component state in line with the view about to be shown.
    ///
    /// Moving to another course, level, or section scrolls theory back to the
    /// top and hands the exercise form fresh, empty fields. Verifying keeps
    /// the page, so typed answers stay next to their feedback.
    pub fn sync(&mut self, view: &ViewDescriptor) {
        if let ViewDescriptor::CourseList(list) = view {
            self.course_list.set_len(list.cards.len());
        }

        let page = PageKey::of(view);
        if page == self.page {
            return;
        }
        debug!("Page changed: {:?} -> {:?}", self.page, page);
        let exercise_count = match view {
            ViewDescriptor::CourseDetail(CourseDetailView {
                body: DetailBody::Exercises(sheet),
                ..
            }) => sheet.items.len(),
            _ => 0,
        };
        self.theory = TheoryViewState::new();
        self.exercise_form.reset(exercise_count);
        self.page = page;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBar
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady bar cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(catalog: Catalog) -> std::io::Result<()> {
    let mut app = App::new(Arc::new(catalog));
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let result = {
        let _terminal_mode_guard = match TerminalModeGuard::new() {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!("Could not enable terminal modes: {}", e);
                None
            }
        };
        event_loop(&mut terminal, &mut app, &mut tui)
    };
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App, tui: &mut TuiState) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            let view = app.view();
            tui.sync(&view);
            terminal.draw(|f| ui::draw_ui(f, &view, &app.status_message, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            let view = app.view();
            tui.sync(&view);
            let Some(action) = action_for(&event, &view, tui) else {
                continue;
            };
            match update(app, action) {
                Effect::Quit => {
                    info!("Quitting");
                    return Ok(());
                }
                Effect::OpenExternal(url) => {
                    // The status bar already shows the link
                    info!("External course requested: {}", url);
                }
                Effect::None => {}
            }
        }
    }
}

/// Route one event against the view on screen, returning the core action it
/// triggers, if any. Component-local effects (cursor moves, typing,
/// scrolling) happen here as a side effect on `tui`.
fn action_for(event: &TuiEvent, view: &ViewDescriptor, tui: &mut TuiState) -> Option<Action> {
    // ForceQuit (Ctrl+C) always quits
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match view {
        ViewDescriptor::CourseList(list) => match tui.course_list.handle_event(event)? {
            CourseListEvent::Open(index) => list
                .cards
                .get(index)
                .map(|card| Action::SelectCourse(card.id.clone())),
            CourseListEvent::Quit => Some(Action::Quit),
        },
        ViewDescriptor::CourseDetail(detail) => detail_action(event, detail, tui),
    }
}

fn detail_action(event: &TuiEvent, detail: &CourseDetailView, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Escape => return Some(Action::ReturnHome),
        TuiEvent::Tab | TuiEvent::BackTab => {
            return detail
                .active_section()
                .map(|section| Action::SelectSection(section.toggled()));
        }
        TuiEvent::LevelKey(n) => return level_for_key(*n).map(Action::SelectLevel),
        _ => {}
    }

    match &detail.body {
        DetailBody::Exercises(_) => match tui.exercise_form.handle_event(event)? {
            FormEvent::Submit(answers) => Some(Action::SubmitAnswers(answers)),
        },
        DetailBody::Theory(_) | DetailBody::TheoryUnavailable | DetailBody::NoExercises => {
            // Digits only pick levels where nothing is being typed
            if let TuiEvent::InputChar(c) = event
                && let Some(digit) = c.to_digit(10)
            {
                return level_for_key(digit as u8).map(Action::SelectLevel);
            }
            tui.theory.handle_event(event);
            None
        }
    }
}

/// 1-based key number to level.
fn level_for_key(n: u8) -> Option<DifficultyLevel> {
    let index = usize::from(n).checked_sub(1)?;
    DifficultyLevel::ALL.get(index).copied()
}
