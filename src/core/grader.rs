//! # Exercise Grading
//!
//! Grades a whole exercise set against the answers typed into the form.
//! Answers are aligned by index; a missing answer counts as an empty string.
//!
//! Each call produces a fresh `GradingResult`. Nothing is merged with earlier
//! attempts: re-verifying replaces the previous outcome entirely.

use crate::core::content::Exercise;
use crate::core::matcher::{first_alternative, matches};

/// Outcome for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseOutcome {
    pub user_answer: String,
    pub is_correct: bool,
    /// The first canonical alternative, shown when the answer was wrong.
    pub canonical_display_answer: String,
}

/// How a graded set should be summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing to grade. Shown as "not available", not "0 of 0".
    NoExercises,
    Partial,
    Perfect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradingResult {
    pub outcomes: Vec<ExerciseOutcome>,
    pub correct_count: usize,
    pub total_count: usize,
}

impl GradingResult {
    pub fn is_perfect(&self) -> bool {
        self.total_count > 0 && self.correct_count == self.total_count
    }

    pub fn verdict(&self) -> Verdict {
        if self.total_count == 0 {
            Verdict::NoExercises
        } else if self.is_perfect() {
            Verdict::Perfect
        } else {
            Verdict::Partial
        }
    }

    /// Outcome for the exercise at `index`, if it was graded.
    pub fn outcome(&self, index: usize) -> Option<&ExerciseOutcome> {
        self.outcomes.get(index)
    }
}

/// Grades `exercises` against `user_answers`.
///
/// Extra answers beyond the set are ignored. An empty set yields a 0/0
/// result whose verdict is `Verdict::NoExercises`.
pub fn grade<S: AsRef<str>>(exercises: &[Exercise], user_answers: &[S]) -> GradingResult {
    let outcomes: Vec<ExerciseOutcome> = exercises
        .iter()
        .enumerate()
        .map(|(index, exercise)| {
            let user_answer = user_answers.get(index).map(|a| a.as_ref()).unwrap_or("");
            ExerciseOutcome {
                user_answer: user_answer.to_string(),
                is_correct: matches(user_answer, &exercise.answer, exercise.answer_type),
                canonical_display_answer: first_alternative(&exercise.answer).to_string(),
            }
        })
        .collect();

    let correct_count = outcomes.iter().filter(|o| o.is_correct).count();
    GradingResult {
        correct_count,
        total_count: exercises.len(),
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matcher::AnswerType;
    use crate::test_support::exercise;

    fn geography() -> Vec<Exercise> {
        vec![
            exercise("Capital of France?", "Paris|Lutecia", AnswerType::Text),
            exercise("Capital of Japan?", "Tokyo", AnswerType::Text),
            exercise("How many continents?", "7", AnswerType::Numeric),
        ]
    }

    #[test]
    fn test_two_of_three() {
        let result = grade(&geography(), &["paris", "Kyoto", "7"]);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.total_count, 3);
        assert!(!result.is_perfect());
        assert_eq!(result.verdict(), Verdict::Partial);
        assert!(!result.outcomes[1].is_correct);
        assert_eq!(result.outcomes[1].user_answer, "Kyoto");
    }

    #[test]
    fn test_three_of_three_is_perfect() {
        let result = grade(&geography(), &["Lutecia.", "tokyo", "7.0004"]);
        assert_eq!(result.correct_count, 3);
        assert!(result.is_perfect());
        assert_eq!(result.verdict(), Verdict::Perfect);
    }

    #[test]
    fn test_wrong_answer_shows_first_alternative_only() {
        let result = grade(&geography(), &["Lyon"]);
        let outcome = result.outcome(0).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.canonical_display_answer, "Paris");
    }

    #[test]
    fn test_missing_answers_count_as_empty() {
        let result = grade(&geography(), &["Paris"]);
        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.outcomes[2].user_answer, "");
        assert!(!result.outcomes[2].is_correct);
        assert_eq!(result.correct_count, 1);
    }

    #[test]
    fn test_extra_answers_are_ignored() {
        let result = grade(&geography(), &["Paris", "Tokyo", "7", "surplus"]);
        assert_eq!(result.total_count, 3);
        assert_eq!(result.outcomes.len(), 3);
        assert!(result.is_perfect());
    }

    #[test]
    fn test_empty_set_is_zero_of_zero() {
        let answers: [&str; 0] = [];
        let result = grade(&[], &answers);
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.total_count, 0);
        assert!(!result.is_perfect());
        assert_eq!(result.verdict(), Verdict::NoExercises);
    }

    #[test]
    fn test_regrading_replaces_outcome() {
        let set = geography();
        let first = grade(&set, &["x", "y", "z"]);
        let second = grade(&set, &["Paris", "Tokyo", "7"]);
        assert_eq!(first.correct_count, 0);
        assert_eq!(second.correct_count, 3);
        assert!(second.outcomes.iter().all(|o| o.is_correct));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let answers = vec!["Paris".to_string(), String::new()];
        let result = grade(&geography(), &answers);
        assert_eq!(result.correct_count, 1);
    }
}
