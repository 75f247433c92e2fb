//! # TitleBar Component
//!
//! Single-line bar at the top: where the learner is, plus the latest status
//! message from the core.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("Geography › Basic › Exercises".into(), app.status_message.clone());
//! title_bar.render(frame, area);
//! ```
//!
//! The text degrades in this order:
//!
//! 1. **Location and status**: `"Campus › Geography › Basic | 2 of 3 correct"`
//! 2. **Location only**: `"Campus › Geography › Basic"`
//! 3. **Status only**: `"Campus | Pick a course and start growing"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Breadcrumb for the current screen, empty on the course list.
    pub location: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(location: String, status_message: String) -> Self {
        Self {
            location,
            status_message,
        }
    }

    fn heading(&self) -> String {
        if self.location.is_empty() {
            "Campus".to_string()
        } else {
            format!("Campus › {}", self.location)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.heading(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
