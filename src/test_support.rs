//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::content::{Catalog, Course, Exercise};
use crate::core::matcher::AnswerType;
use crate::core::navigation::DifficultyLevel;
use crate::core::state::App;

/// A plain internal course with the given id.
pub fn course(id: &str) -> Course {
    Course {
        id: id.to_string(),
        name: id.to_uppercase(),
        description: format!("About {id}"),
        icon: String::new(),
        is_external: false,
        url: None,
    }
}

pub fn exercise(question: &str, answer: &str, answer_type: AnswerType) -> Exercise {
    Exercise {
        question: question.to_string(),
        answer: answer.to_string(),
        answer_type,
    }
}

/// Three courses: `geo` (basic theory + 3 exercises), `math` (intermediate
/// exercises only), and `games` (external link).
pub fn test_catalog() -> Catalog {
    let geo = Course {
        id: "geo".to_string(),
        name: "Geography".to_string(),
        description: "Countries and capitals".to_string(),
        icon: "🌍".to_string(),
        is_external: false,
        url: None,
    };
    let math = Course {
        id: "math".to_string(),
        name: "Mathematics".to_string(),
        description: "Numbers".to_string(),
        icon: "🧮".to_string(),
        is_external: false,
        url: None,
    };
    let games = Course {
        id: "games".to_string(),
        name: "Mini games".to_string(),
        description: "Play and learn".to_string(),
        icon: "🎮".to_string(),
        is_external: true,
        url: Some("https://example.org/games".to_string()),
    };

    let mut theory = HashMap::new();
    theory.insert(
        "geo".to_string(),
        HashMap::from([(
            DifficultyLevel::Basic,
            "# Capitals\n\nEvery country has a capital city.".to_string(),
        )]),
    );

    let mut exercises = HashMap::new();
    exercises.insert(
        "geo".to_string(),
        HashMap::from([(
            DifficultyLevel::Basic,
            vec![
                exercise("Capital of France?", "Paris|Lutecia", AnswerType::Text),
                exercise("Capital of Japan?", "Tokyo", AnswerType::Text),
                exercise("How many continents are there?", "7", AnswerType::Numeric),
            ],
        )]),
    );
    exercises.insert(
        "math".to_string(),
        HashMap::from([(
            DifficultyLevel::Intermediate,
            vec![exercise("Pi to four decimals?", "3.1416", AnswerType::Numeric)],
        )]),
    );

    Catalog {
        courses: vec![geo, math, games],
        theory,
        exercises,
    }
}

/// Creates a test App over `test_catalog()`.
pub fn test_app() -> App {
    App::new(Arc::new(test_catalog()))
}

/// Rows of a rendered test buffer, joined with newlines.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width.max(1))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
