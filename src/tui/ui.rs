use crate::core::view::{CourseDetailView, DetailBody, ViewDescriptor};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CourseList, ExerciseForm, TabStrip, TheoryView, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

pub const NO_EXERCISES_PLACEHOLDER: &str = "No exercises available for this level yet.";

const LEVEL_HINTS: [&str; 3] = ["F1", "F2", "F3"];

pub fn draw_ui(frame: &mut Frame, view: &ViewDescriptor, status_message: &str, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(location(view), status_message.to_string());
    title_bar.render(frame, title_area);

    match view {
        ViewDescriptor::CourseList(list) => {
            CourseList::new(&mut tui.course_list, &list.cards).render(frame, main_area);
        }
        ViewDescriptor::CourseDetail(detail) => draw_course_detail(frame, main_area, detail, tui),
    }

    let help = Paragraph::new(help_text(view)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

fn draw_course_detail(frame: &mut Frame, area: Rect, detail: &CourseDetailView, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [header_area, levels_area, sections_area, _, body_area] =
        Layout::vertical([Length(3), Length(1), Length(1), Length(1), Min(0)]).areas(area);

    let header = &detail.header;
    let title = if header.icon.is_empty() {
        format!(" {} ", header.name)
    } else {
        format!(" {} {} ", header.icon, header.name)
    };
    let header_block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(header.description.as_str())
            .style(Style::default().fg(Color::Gray))
            .block(header_block),
        header_area,
    );

    TabStrip::new("Level", &detail.levels, &LEVEL_HINTS).render(frame, levels_area);
    TabStrip::new("Section", &detail.sections, &[]).render(frame, sections_area);

    match &detail.body {
        DetailBody::Theory(text) => {
            TheoryView::new(&mut tui.theory, Some(text)).render(frame, body_area);
        }
        DetailBody::TheoryUnavailable => {
            TheoryView::new(&mut tui.theory, None).render(frame, body_area);
        }
        DetailBody::Exercises(sheet) => {
            ExerciseForm::new(&mut tui.exercise_form, sheet).render(frame, body_area);
        }
        DetailBody::NoExercises => draw_placeholder(frame, body_area, NO_EXERCISES_PLACEHOLDER),
    }
}

fn draw_placeholder(frame: &mut Frame, area: Rect, message: &str) {
    let placeholder = Paragraph::new(Line::from(message))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(placeholder, area);
}

/// Breadcrumb for the title bar.
pub fn location(view: &ViewDescriptor) -> String {
    match view {
        ViewDescriptor::CourseList(_) => String::new(),
        ViewDescriptor::CourseDetail(detail) => {
            let mut parts = vec![detail.header.name.clone()];
            if let Some(level) = detail.active_level() {
                parts.push(level.label().to_string());
            }
            if let Some(section) = detail.active_section() {
                parts.push(section.label().to_string());
            }
            parts.join(" › ")
        }
    }
}

pub fn help_text(view: &ViewDescriptor) -> &'static str {
    match view {
        ViewDescriptor::CourseList(_) => " ↑↓ Move  Enter Open  q Quit ",
        ViewDescriptor::CourseDetail(detail) => match detail.body {
            DetailBody::Theory(_) | DetailBody::TheoryUnavailable => {
                " 1-3/F1-F3 Level  Tab Exercises  ↑↓ Scroll  Esc Courses "
            }
            DetailBody::Exercises(_) => {
                " F1-F3 Level  Tab Theory  ↑↓ Field  Enter Verify  Esc Courses "
            }
            DetailBody::NoExercises => " 1-3/F1-F3 Level  Tab Theory  Esc Courses ",
        },
    }
}
