//! One-line tab strip for the level and section selectors.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use unicode_width::UnicodeWidthStr;

use crate::core::view::Tab;
use crate::tui::component::Component;

pub struct TabStrip<'a, T> {
    pub caption: &'a str,
    pub tabs: &'a [Tab<T>],
    /// Key hints shown before each label, e.g. `["F1", "F2", "F3"]`.
    pub hints: &'a [&'a str],
}

impl<'a, T> TabStrip<'a, T> {
    pub fn new(caption: &'a str, tabs: &'a [Tab<T>], hints: &'a [&'a str]) -> Self {
        Self {
            caption,
            tabs,
            hints,
        }
    }
}

impl<T> Component for TabStrip<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| match self.hints.get(i) {
                Some(hint) => Line::from(vec![
                    Span::styled(format!("{hint} "), Style::default().fg(Color::DarkGray)),
                    Span::raw(tab.label),
                ]),
                None => Line::from(tab.label),
            })
            .collect();

        let caption = format!("{}:", self.caption);
        let [caption_area, tabs_area] = Layout::horizontal([
            Constraint::Length(caption.width() as u16),
            Constraint::Min(0),
        ])
        .areas(area);
        frame.render_widget(
            Span::styled(caption, Style::default().add_modifier(Modifier::BOLD)),
            caption_area,
        );

        let selected = self.tabs.iter().position(|t| t.active);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│");
        frame.render_widget(tabs, tabs_area);
    }
}
