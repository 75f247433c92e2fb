//! # View Projection
//!
//! Turns navigation state, resolved content, and the last grading result into
//! a `ViewDescriptor`: plain data describing what to show. Adapters render the
//! descriptor however they like; the core never touches a widget.
//!
//! ```text
//! ViewDescriptor
//! ├── CourseList { cards }
//! └── CourseDetail
//!     ├── header: CourseCard
//!     ├── levels: [Tab<DifficultyLevel>; 3]
//!     ├── sections: [Tab<Section>; 2]
//!     └── body: Theory(text) | TheoryUnavailable | Exercises(sheet) | NoExercises
//! ```

use crate::core::content::{Course, Exercise, ResolvedContent};
use crate::core::grader::{GradingResult, Verdict};
use crate::core::matcher::AnswerType;
use crate::core::navigation::{CurrentView, DifficultyLevel, NavigationState, Section};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewDescriptor {
    CourseList(CourseListView),
    CourseDetail(CourseDetailView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseListView {
    pub cards: Vec<CourseCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Courses that are only a link elsewhere; never opened in place.
    pub is_external: bool,
    /// The link, when the catalog provides one.
    pub external_url: Option<String>,
}

impl From<&Course> for CourseCard {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            name: course.name.clone(),
            description: course.description.clone(),
            icon: course.icon.clone(),
            is_external: course.is_external,
            external_url: course.external_url().map(str::to_string),
        }
    }
}

/// One tab in a tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab<T> {
    pub value: T,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetailView {
    pub header: CourseCard,
    pub levels: Vec<Tab<DifficultyLevel>>,
    pub sections: Vec<Tab<Section>>,
    pub body: DetailBody,
}

impl CourseDetailView {
    pub fn active_level(&self) -> Option<DifficultyLevel> {
        self.levels.iter().find(|t| t.active).map(|t| t.value)
    }

    pub fn active_section(&self) -> Option<Section> {
        self.sections.iter().find(|t| t.active).map(|t| t.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    Theory(String),
    /// No theory written for this level yet.
    TheoryUnavailable,
    Exercises(ExerciseSheet),
    /// No exercises for this level yet.
    NoExercises,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSheet {
    pub items: Vec<ExerciseItem>,
    /// Present once the sheet has been verified.
    pub summary: Option<ScoreSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseItem {
    /// 1-based position for display.
    pub number: usize,
    pub question: String,
    pub answer_type: AnswerType,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_answer: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
    pub perfect: bool,
}

/// Builds the descriptor for the current state.
///
/// A grading result whose size does not match the resolved exercise set is
/// ignored rather than partially applied.
pub fn project(
    state: &NavigationState,
    content: &ResolvedContent<'_>,
    grading: Option<&GradingResult>,
) -> ViewDescriptor {
    let (course, level, section) = match state.current_view() {
        CurrentView::CourseList => {
            let cards = match content {
                ResolvedContent::Catalog(courses) => courses.iter().map(CourseCard::from).collect(),
                _ => Vec::new(),
            };
            return ViewDescriptor::CourseList(CourseListView { cards });
        }
        CurrentView::CourseDetail {
            course,
            level,
            section,
        } => (course, level, section),
    };

    let levels = DifficultyLevel::ALL
        .iter()
        .map(|&value| Tab {
            value,
            label: value.label(),
            active: value == level,
        })
        .collect();
    let sections = Section::ALL
        .iter()
        .map(|&value| Tab {
            value,
            label: value.label(),
            active: value == section,
        })
        .collect();

    let body = match (section, content) {
        (Section::Theory, ResolvedContent::Theory(Some(text))) => {
            DetailBody::Theory((*text).to_string())
        }
        (Section::Exercises, ResolvedContent::Exercises(set)) if !set.is_empty() => {
            DetailBody::Exercises(exercise_sheet(set, grading))
        }
        (Section::Exercises, _) => DetailBody::NoExercises,
        (Section::Theory, _) => DetailBody::TheoryUnavailable,
    };

    ViewDescriptor::CourseDetail(CourseDetailView {
        header: CourseCard::from(course),
        levels,
        sections,
        body,
    })
}

fn exercise_sheet(set: &[Exercise], grading: Option<&GradingResult>) -> ExerciseSheet {
    let grading = grading.filter(|g| g.total_count == set.len());

    let items = set
        .iter()
        .enumerate()
        .map(|(index, exercise)| ExerciseItem {
            number: index + 1,
            question: exercise.question.clone(),
            answer_type: exercise.answer_type,
            feedback: grading.and_then(|g| g.outcome(index)).map(|outcome| {
                if outcome.is_correct {
                    Feedback::Correct
                } else {
                    Feedback::Incorrect {
                        correct_answer: outcome.canonical_display_answer.clone(),
                    }
                }
            }),
        })
        .collect();

    let summary = grading
        .filter(|g| g.verdict() != Verdict::NoExercises)
        .map(|g| ScoreSummary {
            correct: g.correct_count,
            total: g.total_count,
            perfect: g.is_perfect(),
        });

    ExerciseSheet { items, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::ContentResolver;
    use crate::core::grader::grade;
    use crate::test_support::test_catalog;

    fn detail(view: ViewDescriptor) -> CourseDetailView {
        match view {
            ViewDescriptor::CourseDetail(d) => d,
            other => panic!("expected course detail, got {other:?}"),
        }
    }

    #[test]
    fn test_course_list_projects_all_cards() {
        let catalog = test_catalog();
        let nav = NavigationState::new();
        let content = ContentResolver::new(&catalog).resolve(&nav);
        match project(&nav, &content, None) {
            ViewDescriptor::CourseList(list) => {
                assert_eq!(list.cards.len(), 3);
                assert_eq!(list.cards[0].name, "Geography");
                assert!(!list.cards[0].is_external);
                assert_eq!(list.cards[0].external_url, None);
                assert!(list.cards[2].is_external);
                assert_eq!(
                    list.cards[2].external_url.as_deref(),
                    Some("https://example.org/games")
                );
            }
            other => panic!("expected course list, got {other:?}"),
        }
    }

    #[test]
    fn test_theory_view_marks_active_tabs() {
        let catalog = test_catalog();
        let mut nav = NavigationState::new();
        nav.select_course(catalog.courses[0].clone());
        let content = ContentResolver::new(&catalog).resolve(&nav);
        let view = detail(project(&nav, &content, None));

        assert_eq!(view.header.id, "geo");
        assert_eq!(view.active_level(), Some(DifficultyLevel::Basic));
        assert_eq!(view.active_section(), Some(Section::Theory));
        assert_eq!(view.levels.iter().filter(|t| t.active).count(), 1);
        assert_eq!(view.levels[2].label, "Advanced");
        assert!(matches!(view.body, DetailBody::Theory(ref t) if t.contains("capital")));
    }

    #[test]
    fn test_absent_theory_is_placeholder() {
        let catalog = test_catalog();
        let mut nav = NavigationState::new();
        nav.select_course(catalog.courses[1].clone());
        let content = ContentResolver::new(&catalog).resolve(&nav);
        let view = detail(project(&nav, &content, None));
        assert_eq!(view.body, DetailBody::TheoryUnavailable);
    }

    #[test]
    fn test_empty_exercises_project_as_unavailable() {
        let catalog = test_catalog();
        let mut nav = NavigationState::new();
        nav.select_course(catalog.courses[0].clone());
        nav.select_section(Section::Exercises);
        nav.select_level(DifficultyLevel::Advanced);
        let content = ContentResolver::new(&catalog).resolve(&nav);
        let view = detail(project(&nav, &content, None));
        assert_eq!(view.body, DetailBody::NoExercises);
    }

    #[test]
    fn test_ungraded_sheet_has_no_feedback() {
        let catalog = test_catalog();
        let mut nav = NavigationState::new();
        nav.select_course(catalog.courses[0].clone());
        nav.select_section(Section::Exercises);
        let content = ContentResolver::new(&catalog).resolve(&nav);
        let DetailBody::Exercises(sheet) = detail(project(&nav, &content, None)).body else {
            panic!("expected exercises");
        };
        assert_eq!(sheet.items.len(), 3);
        assert_eq!(sheet.items[0].number, 1);
        assert_eq!(sheet.items[2].answer_type, AnswerType::Numeric);
        assert!(sheet.items.iter().all(|i| i.feedback.is_none()));
        assert!(sheet.summary.is_none());
    }

    #[test]
    fn test_graded_sheet_shows_feedback_and_summary() {
        let catalog = test_catalog();
        let mut nav = NavigationState::new();
        nav.select_course(catalog.courses[0].clone());
        nav.select_section(Section::Exercises);
        let resolver = ContentResolver::new(&catalog);
        let content = resolver.resolve(&nav);
        let set = resolver.resolve_exercises("geo", DifficultyLevel::Basic);
        let result = grade(set, &["Lutecia", "Osaka", "7"]);

        let DetailBody::Exercises(sheet) = detail(project(&nav, &content, Some(&result))).body
        else {
            panic!("expected exercises");
        };
        assert_eq!(sheet.items[0].feedback, Some(Feedback::Correct));
        assert_eq!(
            sheet.items[1].feedback,
            Some(Feedback::Incorrect {
                correct_answer: "Tokyo".to_string()
            })
        );
        assert_eq!(
            sheet.summary,
            Some(ScoreSummary {
                correct: 2,
                total: 3,
                perfect: false
            })
        );
    }

    #[test]
    fn test_mismatched_grading_is_ignored() {
        let catalog = test_catalog();
        let mut nav = NavigationState::new();
        nav.select_course(catalog.courses[0].clone());
        nav.select_section(Section::Exercises);
        let content = ContentResolver::new(&catalog).resolve(&nav);
        let stale = grade(
            ContentResolver::new(&catalog).resolve_exercises("math", DifficultyLevel::Intermediate),
            &["3.1416"],
        );
        let DetailBody::Exercises(sheet) = detail(project(&nav, &content, Some(&stale))).body
        else {
            panic!("expected exercises");
        };
        assert!(sheet.summary.is_none());
        assert!(sheet.items.iter().all(|i| i.feedback.is_none()));
    }
}
