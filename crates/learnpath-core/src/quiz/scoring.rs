//! Overall and per-category scoring of a finished quiz.
//!
//! Unanswered questions count as incorrect. Category tallies keep the order
//! in which each category first appears in the question sequence; the final
//! counts do not depend on that order.

use serde::Serialize;
use std::collections::HashMap;

use super::answers::AnswerRecord;
use super::question::{QuestionBank, QuizQuestion};
use crate::error::ValidationError;

/// Correct/total counts for one category. `correct <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTally {
    pub correct: u32,
    pub total: u32,
}

impl CategoryTally {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Accuracy as a percentage (0.0-100.0). Zero for an empty tally.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

/// Category tallies in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTallies {
    entries: Vec<(String, CategoryTally)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CategoryTallies {
    fn record(&mut self, category: &str, correct: bool) {
        let slot = match self.index.get(category) {
            Some(&i) => i,
            None => {
                self.entries.push((category.to_string(), CategoryTally::default()));
                self.index.insert(category.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.record(correct);
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTally> {
        self.index.get(category).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryTally)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSheet {
    /// Overall score, 0-100.
    pub score: u8,
    pub correct: u32,
    pub question_count: u32,
    pub tallies: CategoryTallies,
}

/// Score `answers` against `questions`.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyCollection`] when `questions` is empty,
/// since the overall percentage is undefined, and
/// [`ValidationError::OutOfBounds`] for an answer to a question that does
/// not exist.
pub fn score(questions: &[QuizQuestion], answers: &AnswerRecord) -> Result<ScoreSheet, ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::EmptyCollection("questions to score".into()));
    }
    if let Some((index, _)) = answers.iter().find(|(index, _)| *index >= questions.len()) {
        return Err(ValidationError::OutOfBounds {
            collection: "questions".into(),
            index,
            len: questions.len(),
        });
    }
    Ok(tally(questions, answers))
}

impl QuestionBank {
    /// Score `answers` against this bank.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfBounds`] for an answer past the last
    /// question.
    pub fn score(&self, answers: &AnswerRecord) -> Result<ScoreSheet, ValidationError> {
        score(self.questions(), answers)
    }
}

// Callers guarantee `questions` is non-empty and every answer index is in range.
pub(super) fn tally(questions: &[QuizQuestion], answers: &AnswerRecord) -> ScoreSheet {
    let mut correct = 0u32;
    let mut tallies = CategoryTallies::default();

    for (index, question) in questions.iter().enumerate() {
        let matched = question.is_correct(answers.get(index));
        if matched {
            correct += 1;
        }
        tallies.record(question.category(), matched);
    }

    let question_count = questions.len() as u32;
    ScoreSheet {
        score: rounded_percentage(correct, question_count),
        correct,
        question_count,
        tallies,
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
pub(crate) fn rounded_percentage(part: u32, whole: u32) -> u8 {
    debug_assert!(whole > 0 && part <= whole);
    let part = part as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, category: &str) -> QuizQuestion {
        QuizQuestion::new(id, category, "p", vec!["right".into(), "wrong".into()], "right").unwrap()
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = score(&[], &AnswerRecord::new()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyCollection(_)));
    }

    #[test]
    fn answer_past_last_question_is_rejected() {
        let questions = vec![question("1", "A"), question("2", "B")];
        let answers: AnswerRecord = [(0, "right"), (2, "right")].into_iter().collect();
        let err = score(&questions, &answers).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfBounds {
                collection: "questions".into(),
                index: 2,
                len: 2
            }
        );
    }

    #[test]
    fn unanswered_questions_count_against_category() {
        let questions = vec![question("1", "A"), question("2", "A"), question("3", "B")];
        let answers: AnswerRecord = [(0, "right")].into_iter().collect();

        let sheet = score(&questions, &answers).unwrap();
        assert_eq!(sheet.correct, 1);
        assert_eq!(sheet.question_count, 3);
        assert_eq!(sheet.score, 33);
        assert_eq!(sheet.tallies.get("A"), Some(&CategoryTally { correct: 1, total: 2 }));
        assert_eq!(sheet.tallies.get("B"), Some(&CategoryTally { correct: 0, total: 1 }));
    }

    #[test]
    fn tallies_keep_first_seen_order() {
        let questions = vec![question("1", "B"), question("2", "A"), question("3", "B")];
        let sheet = score(&questions, &AnswerRecord::new()).unwrap();
        let order: Vec<&str> = sheet.tallies.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(rounded_percentage(2, 5), 40);
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(1, 8), 13); // 12.5
        assert_eq!(rounded_percentage(0, 7), 0);
        assert_eq!(rounded_percentage(7, 7), 100);
    }

    #[test]
    fn tally_percentage() {
        let t = CategoryTally { correct: 3, total: 4 };
        assert!((t.percentage() - 75.0).abs() < f64::EPSILON);
        assert_eq!(CategoryTally::default().percentage(), 0.0);
    }
}
