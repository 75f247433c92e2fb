//! # Course List Component
//!
//! The home screen: one card per course, in catalog order.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CourseListState` lives in `TuiState` so the highlighted card survives
//!   a trip into a course and back
//! - `CourseList` is created each frame with borrowed state and the cards

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::view::CourseCard;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the course list.
#[derive(Debug, Default)]
pub struct CourseListState {
    pub selected: usize,
    pub list_state: ListState,
    len: usize,
}

impl CourseListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside a list of `len` cards.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

/// Events emitted by the course list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseListEvent {
    /// Open the card at this index.
    Open(usize),
    Quit,
}

impl EventHandler for CourseListState {
    type Event = CourseListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CourseListEvent> {
        match event {
            TuiEvent::CursorUp => {
                if self.len > 0 {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if self.len > 0 {
                    self.selected = (self.selected + 1).min(self.len - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorHome => {
                if self.len > 0 {
                    self.selected = 0;
                    self.list_state.select(Some(0));
                }
                None
            }
            TuiEvent::CursorEnd => {
                if self.len > 0 {
                    self.selected = self.len - 1;
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit if self.len > 0 => Some(CourseListEvent::Open(self.selected)),
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(CourseListEvent::Quit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the course list.
pub struct CourseList<'a> {
    state: &'a mut CourseListState,
    cards: &'a [CourseCard],
}

impl<'a> CourseList<'a> {
    pub fn new(state: &'a mut CourseListState, cards: &'a [CourseCard]) -> Self {
        Self { state, cards }
    }
}

impl Component for CourseList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Courses ")
            .padding(Padding::horizontal(1));

        if self.cards.is_empty() {
            let empty = Paragraph::new("No courses in this catalog.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // borders + padding
        let inner_width = area.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let selected = i == self.state.selected;
                let name_style = if selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                };

                let mut title = if card.icon.is_empty() {
                    card.name.clone()
                } else {
                    format!("{} {}", card.icon, card.name)
                };
                if card.is_external {
                    title.push_str(" ↗");
                }

                let description = truncate_to_width(&card.description, inner_width.saturating_sub(3));
                ListItem::new(vec![
                    Line::from(Span::styled(truncate_to_width(&title, inner_width), name_style)),
                    Line::from(Span::styled(
                        format!("   {description}"),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::default(),
                ])
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Cut `s` to at most `max_width` display columns, ending in "…" when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, course};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn cards() -> Vec<CourseCard> {
        let mut games = course("games");
        games.is_external = true;
        games.url = Some("https://example.org/games".to_string());
        let mut arcade = course("arcade");
        arcade.is_external = true;
        [course("geo"), course("math"), games, arcade]
            .iter()
            .map(CourseCard::from)
            .collect()
    }

    fn state_for(len: usize) -> CourseListState {
        let mut state = CourseListState::new();
        state.set_len(len);
        state
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut state = state_for(3);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 2);
        assert_eq!(state.list_state.selected(), Some(2));
        state.handle_event(&TuiEvent::CursorHome);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_enter_opens_selected_card() {
        let mut state = state_for(3);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(CourseListEvent::Open(1))
        );
    }

    #[test]
    fn test_enter_on_empty_list_does_nothing() {
        let mut state = state_for(0);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_q_and_escape_quit() {
        let mut state = state_for(3);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('q')),
            Some(CourseListEvent::Quit)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(CourseListEvent::Quit)
        );
    }

    #[test]
    fn test_shrinking_list_clamps_selection() {
        let mut state = state_for(3);
        state.handle_event(&TuiEvent::CursorEnd);
        state.set_len(1);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_renders_cards_and_external_marker() {
        let cards = cards();
        let mut state = state_for(cards.len());
        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
        terminal
            .draw(|f| CourseList::new(&mut state, &cards).render(f, f.area()))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Courses"));
        assert!(text.contains("GEO"));
        assert!(text.contains("About math"));
        assert!(text.contains("GAMES ↗"));
        assert!(text.contains("ARCADE ↗"));
    }

    #[test]
    fn test_renders_empty_catalog_message() {
        let mut state = state_for(0);
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|f| CourseList::new(&mut state, &[]).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("No courses"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Geography", 20), "Geography");
        assert_eq!(truncate_to_width("Geography", 5), "Geog…");
        assert_eq!(truncate_to_width("Geography", 0), "");
    }
}
