//! # Answer Matching
//!
//! Compares a submitted answer against an exercise's canonical answer.
//!
//! ```text
//! numeric:  parse both  →  |user - canonical| < NUMERIC_TOLERANCE
//! text:     normalize both  →  split canonical on '|'  →  any alternative == user
//! ```
//!
//! Everything here is pure. Malformed input is a non-match, never an error.

use serde::{Deserialize, Serialize};

/// Absolute tolerance for numeric answers.
pub const NUMERIC_TOLERANCE: f64 = 0.001;

/// Separator between accepted alternatives in a canonical text answer.
pub const ALTERNATIVE_SEPARATOR: char = '|';

/// Characters removed from text answers before comparison.
const STRIPPED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', '\'', '"'];

/// How a submitted answer is compared with the canonical one.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnswerType {
    #[serde(rename = "text")]
    #[default]
    Text,
    #[serde(rename = "numeric", alias = "number")]
    Numeric,
}

/// Returns true if `user_answer` is accepted for `canonical_answer`.
pub fn matches(user_answer: &str, canonical_answer: &str, answer_type: AnswerType) -> bool {
    match answer_type {
        AnswerType::Numeric => numbers_match(user_answer, canonical_answer),
        AnswerType::Text => {
            let user = normalize(user_answer);
            normalize(canonical_answer)
                .split(ALTERNATIVE_SEPARATOR)
                .map(str::trim)
                .any(|alternative| alternative == user)
        }
    }
}

/// Lowercase, strip basic punctuation, trim.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(STRIPPED_PUNCTUATION, "")
        .trim()
        .to_string()
}

/// The answer shown as "the" correct one: everything before the first `|`.
pub fn first_alternative(canonical_answer: &str) -> &str {
    canonical_answer
        .split(ALTERNATIVE_SEPARATOR)
        .next()
        .unwrap_or(canonical_answer)
}

fn numbers_match(user_answer: &str, canonical_answer: &str) -> bool {
    let user = parse_leading_float(user_answer);
    let canonical = parse_leading_float(canonical_answer);
    // NaN on either side makes this false.
    (user - canonical).abs() < NUMERIC_TOLERANCE
}

/// Parses the longest leading decimal literal, ignoring leading whitespace
/// and any trailing text. Returns NaN when there is no literal at all.
pub fn parse_leading_float(input: &str) -> f64 {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts if at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
