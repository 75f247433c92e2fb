//! # Theory View Component
//!
//! Scrollable Markdown page for one course level. When the level has no
//! theory yet, a centered placeholder is shown instead.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

pub const THEORY_PLACEHOLDER: &str = "Theory for this level is not available yet.";

/// Scroll position for the theory page. Reset whenever the page changes.
#[derive(Default)]
pub struct TheoryViewState {
    pub scroll_state: ScrollViewState,
    /// Measured during the last render.
    pub content_height: u16,
    pub viewport_height: u16,
}

impl TheoryViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the offset within the content measured on the last frame.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for TheoryViewState {
    type Event = (); // scrolling is internal

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll_state.scroll_to_top(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct TheoryView<'a> {
    state: &'a mut TheoryViewState,
    text: Option<&'a str>,
}

impl<'a> TheoryView<'a> {
    pub fn new(state: &'a mut TheoryViewState, text: Option<&'a str>) -> Self {
        Self { state, text }
    }
}

impl Component for TheoryView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(text) = self.text else {
            let placeholder = Paragraph::new(THEORY_PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, area);
            return;
        };

        // -1 for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let page = Paragraph::new(markdown::render(text, Color::White)).wrap(Wrap { trim: false });
        let height = u16::try_from(page.line_count(content_width)).unwrap_or(u16::MAX);

        self.state.content_height = height;
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(page, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut TheoryViewState, text: Option<&str>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| TheoryView::new(state, text).render(f, f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_renders_markdown_page() {
        let mut state = TheoryViewState::new();
        let text = draw(
            &mut state,
            Some("# Capitals\n\nEvery country has a capital city."),
            50,
            6,
        );
        assert!(text.contains("Capitals"));
        assert!(text.contains("Every country has a capital city."));
        assert_eq!(state.content_height, 3);
    }

    #[test]
    fn test_missing_theory_shows_placeholder() {
        let mut state = TheoryViewState::new();
        let text = draw(&mut state, None, 60, 3);
        assert!(text.contains(THEORY_PLACEHOLDER));
    }

    #[test]
    fn test_scroll_stays_within_content() {
        let page = (1..=20)
            .map(|i| format!("Line {i}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let mut state = TheoryViewState::new();
        draw(&mut state, Some(&page), 30, 5);
        assert!(state.content_height > 5);

        for _ in 0..100 {
            state.handle_event(&TuiEvent::ScrollDown);
        }
        let max_y = state.content_height - state.viewport_height;
        assert_eq!(state.scroll_state.offset().y, max_y);

        state.handle_event(&TuiEvent::CursorHome);
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_scrolled_page_shows_later_lines() {
        let page = (1..=20)
            .map(|i| format!("Line {i}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let mut state = TheoryViewState::new();
        draw(&mut state, Some(&page), 30, 5);
        for _ in 0..100 {
            state.handle_event(&TuiEvent::ScrollDown);
        }
        let text = draw(&mut state, Some(&page), 30, 5);
        assert!(text.contains("Line 20"));
        assert!(!text.contains("Line 1 "));
    }
}
