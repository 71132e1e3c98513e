//! Quiz result and the scoring pipeline that produces it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::answers::AnswerRecord;
use super::classify::{classify, Thresholds};
use super::question::{QuestionBank, QuizQuestion};
use super::recommend::compose;
use super::scoring::{score, tally, ScoreSheet};
use crate::error::{CoreError, ValidationError};

/// Outcome of a completed diagnostic quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// Overall score, 0-100.
    pub score: u8,
    pub weak_areas: Vec<String>,
    pub strong_areas: Vec<String>,
    pub recommendations: Vec<String>,
}

impl QuizResult {
    fn from_sheet(sheet: &ScoreSheet, thresholds: &Thresholds) -> Self {
        let areas = classify(&sheet.tallies, thresholds);
        let recommendations = compose(&areas);
        tracing::info!(
            score = sheet.score,
            correct = sheet.correct,
            questions = sheet.question_count,
            weak = areas.weak.len(),
            strong = areas.strong.len(),
            "quiz evaluated"
        );
        Self {
            score: sheet.score,
            weak_areas: areas.weak,
            strong_areas: areas.strong,
            recommendations,
        }
    }

    pub fn is_weak(&self, category: &str) -> bool {
        self.weak_areas.iter().any(|c| c == category)
    }

    pub fn is_strong(&self, category: &str) -> bool {
        self.strong_areas.iter().any(|c| c == category)
    }

    /// Read a result previously written as JSON.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Score, classify and compose recommendations in one step.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyCollection`] if `questions` is empty and
/// [`ValidationError::OutOfBounds`] if an answer has no matching question.
pub fn evaluate(
    questions: &[QuizQuestion],
    answers: &AnswerRecord,
    thresholds: &Thresholds,
) -> Result<QuizResult, ValidationError> {
    let sheet = score(questions, answers)?;
    Ok(QuizResult::from_sheet(&sheet, thresholds))
}

impl QuestionBank {
    /// Evaluate `answers` against this bank.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfBounds`] if an answer has no matching
    /// question.
    pub fn evaluate(
        &self,
        answers: &AnswerRecord,
        thresholds: &Thresholds,
    ) -> Result<QuizResult, ValidationError> {
        evaluate(self.questions(), answers, thresholds)
    }

    /// Evaluate answers recorded by a session, which only ever indexes
    /// questions of this bank.
    pub(super) fn evaluate_recorded(
        &self,
        answers: &AnswerRecord,
        thresholds: &Thresholds,
    ) -> QuizResult {
        QuizResult::from_sheet(&tally(self.questions(), answers), thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str, category: &str) -> QuizQuestion {
        QuizQuestion::new(id, category, "prompt", vec!["yes".into(), "no".into()], "yes").unwrap()
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let result = QuizResult {
            score: 40,
            weak_areas: vec!["A".into()],
            strong_areas: vec![],
            recommendations: vec!["Focus on strengthening: A".into()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["weakAreas"][0], "A");
        assert!(json["strongAreas"].as_array().unwrap().is_empty());
        assert_eq!(json["score"], 40);
    }

    #[test]
    fn band_between_thresholds_yields_no_recommendation() {
        // 7/10 correct in a single category: 70%
        let questions: Vec<QuizQuestion> = (0..10).map(|i| q(&i.to_string(), "Mid")).collect();
        let answers: AnswerRecord = (0..7).map(|i| (i, "yes")).collect();
        let result = evaluate(&questions, &answers, &Thresholds::default()).unwrap();
        assert_eq!(result.score, 70);
        assert!(result.weak_areas.is_empty());
        assert!(result.strong_areas.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn custom_thresholds_change_classification() {
        let questions = vec![q("1", "A"), q("2", "A")];
        let answers: AnswerRecord = [(0, "yes")].into_iter().collect();
        let strict = Thresholds::new(60, 80).unwrap();
        let lenient = Thresholds::new(40, 50).unwrap();
        assert!(evaluate(&questions, &answers, &strict).unwrap().is_weak("A"));
        assert!(evaluate(&questions, &answers, &lenient).unwrap().is_strong("A"));
    }

    #[test]
    fn answers_outside_the_bank_fail_evaluation() {
        let questions = vec![q("1", "A")];
        let answers: AnswerRecord = [(0, "yes"), (3, "yes")].into_iter().collect();
        let err = evaluate(&questions, &answers, &Thresholds::default()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { index: 3, len: 1, .. }));

        let bank = QuestionBank::new(questions).unwrap();
        assert!(bank.evaluate(&answers, &Thresholds::default()).is_err());
    }

    #[test]
    fn bank_evaluate_matches_free_function() {
        let bank = QuestionBank::diagnostic();
        let answers: AnswerRecord = bank
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| (i, q.correct_answer().to_string()))
            .collect();
        let thresholds = Thresholds::default();
        assert_eq!(
            bank.evaluate(&answers, &thresholds).unwrap(),
            evaluate(bank.questions(), &answers, &thresholds).unwrap()
        );
    }
}
