//! # Exercise Form Component
//!
//! The exercises section: every question with its answer field, per-item
//! feedback once the sheet has been verified, and a score summary at the end.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ExerciseFormState` lives in `TuiState` and owns the typed answers.
//!   It is reset whenever course, level, or section changes, so answers
//!   survive a verification but not navigation.
//! - `ExerciseForm` is created each frame from the core's `ExerciseSheet`.
//!
//! ```text
//! 1. Capital of France?
//! ╭ Answer ───────────────╮
//! │paris                  │
//! ╰───────────────────────╯
//! ✔ Correct!
//! ```

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::matcher::AnswerType;
use crate::core::view::{ExerciseSheet, Feedback, ScoreSummary};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::answer_field::AnswerField;
use crate::tui::event::TuiEvent;

const ANSWER_BOX_HEIGHT: u16 = 3;

pub struct ExerciseFormState {
    pub fields: Vec<AnswerField>,
    pub focused: usize,
    pub scroll_state: ScrollViewState,
    /// Scroll so the focused field is visible on the next render. Cleared
    /// by manual scrolling.
    follow_focus: bool,
}

impl Default for ExerciseFormState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ExerciseFormState {
    pub fn new(count: usize) -> Self {
        Self {
            fields: vec![AnswerField::new(); count],
            focused: 0,
            scroll_state: ScrollViewState::default(),
            follow_focus: true,
        }
    }

    /// Fresh, empty fields for a sheet of `count` exercises.
    pub fn reset(&mut self, count: usize) {
        *self = Self::new(count);
    }

    /// Typed answers, aligned with the exercise set.
    pub fn answers(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.value().to_string()).collect()
    }

    fn focused_field(&mut self) -> Option<&mut AnswerField> {
        self.fields.get_mut(self.focused)
    }
}

/// Events emitted by the exercise form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Verify these answers.
    Submit(Vec<String>),
}

impl EventHandler for ExerciseFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Submit => return Some(FormEvent::Submit(self.answers())),
            TuiEvent::CursorUp => {
                self.focused = self.focused.saturating_sub(1);
                self.follow_focus = true;
            }
            TuiEvent::CursorDown => {
                if !self.fields.is_empty() {
                    self.focused = (self.focused + 1).min(self.fields.len() - 1);
                }
                self.follow_focus = true;
            }
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.follow_focus = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.follow_focus = false;
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.follow_focus = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.follow_focus = false;
            }
            other => {
                if self.focused_field()?.handle_event(other).is_some() {
                    self.follow_focus = true;
                }
            }
        }
        None
    }
}

pub struct ExerciseForm<'a> {
    state: &'a mut ExerciseFormState,
    sheet: &'a ExerciseSheet,
}

impl<'a> ExerciseForm<'a> {
    pub fn new(state: &'a mut ExerciseFormState, sheet: &'a ExerciseSheet) -> Self {
        Self { state, sheet }
    }
}

/// Where one exercise sits on the scroll canvas.
struct ItemLayout {
    top: u16,
    question_height: u16,
}

impl ItemLayout {
    fn answer_top(&self) -> u16 {
        self.top + self.question_height
    }
}

impl Component for ExerciseForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar
        let answer_width = content_width.min(48);

        // 1. Measure
        let questions: Vec<Paragraph> = self
            .sheet
            .items
            .iter()
            .map(|item| {
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        format!("{}. ", item.number),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        item.question.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]))
                .wrap(Wrap { trim: true })
            })
            .collect();

        let mut layouts = Vec::with_capacity(questions.len());
        let mut y: u16 = 0;
        for (question, item) in questions.iter().zip(&self.sheet.items) {
            let question_height = u16::try_from(question.line_count(content_width)).unwrap_or(1);
            let feedback_height = u16::from(item.feedback.is_some());
            // +1 blank line between items
            let height = question_height + ANSWER_BOX_HEIGHT + feedback_height + 1;
            layouts.push(ItemLayout {
                top: y,
                question_height,
            });
            y = y.saturating_add(height);
        }
        let summary_top = y;
        let canvas_height = match self.sheet.summary {
            Some(summary) => y.saturating_add(summary_height(summary)),
            None => y,
        };

        // 2. Keep the focused field on screen
        if self.state.focused >= layouts.len() {
            self.state.focused = layouts.len().saturating_sub(1);
        }
        let offset = self.state.scroll_state.offset();
        if let Some(focused) = layouts.get(self.state.focused)
            && self.state.follow_focus
        {
            let box_top = focused.answer_top();
            let box_bottom = box_top + ANSWER_BOX_HEIGHT;
            let new_y = if focused.top < offset.y {
                Some(focused.top)
            } else if box_bottom > offset.y + area.height {
                Some(box_bottom.saturating_sub(area.height))
            } else {
                None
            };
            if let Some(y) = new_y {
                self.state.scroll_state.set_offset(Position { x: 0, y });
            }
        }
        let max_y = canvas_height.saturating_sub(area.height);
        if self.state.scroll_state.offset().y > max_y {
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }

        // 3. Draw onto the canvas
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut cursor = None;
        for (i, ((question, item), layout)) in questions
            .into_iter()
            .zip(&self.sheet.items)
            .zip(&layouts)
            .enumerate()
        {
            scroll_view.render_widget(
                question,
                Rect::new(0, layout.top, content_width, layout.question_height),
            );

            let focused = i == self.state.focused;
            let field = self.state.fields.get(i).cloned().unwrap_or_default();
            let box_rect = Rect::new(0, layout.answer_top(), answer_width, ANSWER_BOX_HEIGHT);
            let block = answer_block(item.answer_type, item.feedback.as_ref(), focused);
            let inner_width = block.inner(box_rect).width;
            let (shown, column) = field.visible(inner_width);
            scroll_view.render_widget(Paragraph::new(shown).block(block), box_rect);
            if focused {
                cursor = Some((1 + column, layout.answer_top() + 1));
            }

            if let Some(feedback) = &item.feedback {
                let feedback_y = layout.answer_top() + ANSWER_BOX_HEIGHT;
                scroll_view.render_widget(
                    feedback_line(feedback),
                    Rect::new(0, feedback_y, content_width, 1),
                );
            }
        }

        if let Some(summary) = self.sheet.summary {
            let rect = Rect::new(0, summary_top, answer_width, summary_height(summary));
            scroll_view.render_widget(summary_widget(summary), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 4. Terminal cursor, if the focused field is in view
        if let Some((x, y)) = cursor {
            let offset_y = self.state.scroll_state.offset().y;
            if y >= offset_y && y - offset_y < area.height && x < area.width {
                frame.set_cursor_position(Position {
                    x: area.x + x,
                    y: area.y + (y - offset_y),
                });
            }
        }
    }
}

fn answer_block(answer_type: AnswerType, feedback: Option<&Feedback>, focused: bool) -> Block<'static> {
    let border_color = match (feedback, focused) {
        (_, true) => Color::Cyan,
        (Some(Feedback::Correct), false) => Color::Green,
        (Some(Feedback::Incorrect { .. }), false) => Color::Red,
        (None, false) => Color::DarkGray,
    };
    let title = match answer_type {
        AnswerType::Text => " Answer ",
        AnswerType::Numeric => " Number ",
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(title)
}

pub fn feedback_text(feedback: &Feedback) -> String {
    match feedback {
        Feedback::Correct => "✔ Correct!".to_string(),
        Feedback::Incorrect { correct_answer } => {
            format!("✘ Incorrect. The correct answer is: {correct_answer}")
        }
    }
}

fn feedback_line(feedback: &Feedback) -> Line<'static> {
    let color = match feedback {
        Feedback::Correct => Color::Green,
        Feedback::Incorrect { .. } => Color::Red,
    };
    Line::from(Span::styled(feedback_text(feedback), Style::default().fg(color)))
}

fn summary_height(summary: ScoreSummary) -> u16 {
    // borders + score line, plus the celebration line
    if summary.perfect { 4 } else { 3 }
}

fn summary_widget(summary: ScoreSummary) -> Paragraph<'static> {
    let color = if summary.perfect {
        Color::Green
    } else {
        Color::Yellow
    };
    let mut lines = vec![Line::from(format!(
        "{} of {} correct",
        summary.correct, summary.total
    ))];
    if summary.perfect {
        lines.push(Line::from(Span::styled(
            "🎉 Perfect score! Every answer is right.",
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    Paragraph::new(lines).style(Style::default().fg(color)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(" Score "),
    )
}
