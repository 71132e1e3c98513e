//! Diagnostic quiz session controller.
//!
//! The session is a small state machine driven by the caller:
//!
//! ```text
//! InProgress -> (next on last question) -> Complete
//! InProgress -> (skip) -> Aborted
//! ```
//!
//! Scoring happens synchronously inside the final `go_next()`. Once a
//! session is Complete or Aborted every mutating call returns
//! [`SessionError::NotInProgress`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = QuizSession::new(QuestionBank::diagnostic());
//! session.select_answer("useState")?;
//! session.go_next()?; // Some(QuizEvent::Advanced { .. })
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::AnswerRecord;
use super::classify::Thresholds;
use super::question::{QuestionBank, QuizQuestion};
use super::result::QuizResult;
use crate::error::{SessionError, ValidationError};
use crate::events::QuizEvent;

/// Unique identifier for a quiz session.
pub type SessionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    InProgress,
    Complete,
    Aborted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct QuizSession {
    id: SessionId,
    bank: QuestionBank,
    thresholds: Thresholds,
    state: SessionState,
    current_index: usize,
    answers: AnswerRecord,
    /// Option currently highlighted for `current_index`; empty when none.
    selected: String,
    started_at: DateTime<Utc>,
    #[serde(default)]
    finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    result: Option<QuizResult>,
}

/// Wire form of a session, checked before it becomes a [`QuizSession`].
#[derive(Deserialize)]
struct RawSession {
    id: SessionId,
    bank: QuestionBank,
    thresholds: Thresholds,
    state: SessionState,
    current_index: usize,
    answers: AnswerRecord,
    selected: String,
    started_at: DateTime<Utc>,
    #[serde(default)]
    finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    result: Option<QuizResult>,
}

impl TryFrom<RawSession> for QuizSession {
    type Error = ValidationError;

    fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
        let len = raw.bank.len();
        let out_of_bounds = |index| ValidationError::OutOfBounds {
            collection: "question bank".into(),
            index,
            len,
        };

        if raw.current_index >= len {
            return Err(out_of_bounds(raw.current_index));
        }
        if let Some((index, _)) = raw.answers.iter().find(|(index, _)| *index >= len) {
            return Err(out_of_bounds(index));
        }
        let current = &raw.bank.questions()[raw.current_index];
        if !raw.selected.is_empty() && !current.has_option(&raw.selected) {
            return Err(ValidationError::InvalidValue {
                field: "selected".into(),
                message: format!("'{}' is not an option of the current question", raw.selected),
            });
        }
        match (raw.state, raw.result.is_some()) {
            (SessionState::Complete, false) => {
                return Err(ValidationError::InvalidValue {
                    field: "result".into(),
                    message: "a complete session must carry its result".into(),
                })
            }
            (SessionState::InProgress | SessionState::Aborted, true) => {
                return Err(ValidationError::InvalidValue {
                    field: "result".into(),
                    message: "only a complete session can carry a result".into(),
                })
            }
            _ => {}
        }

        Ok(Self {
            id: raw.id,
            bank: raw.bank,
            thresholds: raw.thresholds,
            state: raw.state,
            current_index: raw.current_index,
            answers: raw.answers,
            selected: raw.selected,
            started_at: raw.started_at,
            finished_at: raw.finished_at,
            result: raw.result,
        })
    }
}

impl QuizSession {
    /// Start a session over `bank` using the default 60/80 thresholds.
    pub fn new(bank: QuestionBank) -> Self {
        Self::with_thresholds(bank, Thresholds::default())
    }

    pub fn with_thresholds(bank: QuestionBank, thresholds: Thresholds) -> Self {
        let session = Self {
            id: uuid::Uuid::new_v4().to_string(),
            bank,
            thresholds,
            state: SessionState::InProgress,
            current_index: 0,
            answers: AnswerRecord::new(),
            selected: String::new(),
            started_at: Utc::now(),
            finished_at: None,
            result: None,
        };
        tracing::debug!(session = %session.id, questions = session.bank.len(), "quiz session started");
        session
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != SessionState::InProgress
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuizQuestion {
        // current_index never leaves 0..bank.len(), deserialized sessions included
        &self.bank.questions()[self.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.bank.len()
    }

    /// Currently selected option, or `""` when nothing is selected.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains(index)
    }

    /// Position through the quiz, 0.0-100.0, counting the current question.
    pub fn progress_pct(&self) -> f64 {
        (self.current_index + 1) as f64 / self.bank.len() as f64 * 100.0
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<QuizResult> {
        self.result
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn snapshot(&self) -> QuizEvent {
        QuizEvent::StateSnapshot {
            session_id: self.id.clone(),
            state: self.state,
            current_index: self.current_index,
            question_count: self.bank.len(),
            answered: self.answers.len(),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Record `option` for the current question and make it the selection.
    ///
    /// # Errors
    ///
    /// Fails if the session is finished or `option` is not one of the
    /// current question's options.
    pub fn select_answer(&mut self, option: &str) -> Result<Option<QuizEvent>, SessionError> {
        self.ensure_in_progress()?;
        let question = self.current_question();
        if !question.has_option(option) {
            return Err(SessionError::UnknownOption {
                question_id: question.id().to_string(),
                option: option.to_string(),
            });
        }

        let previous = self.answers.record(self.current_index, option);
        self.selected = option.to_string();
        if previous.as_deref() == Some(option) {
            return Ok(None);
        }
        tracing::debug!(index = self.current_index, option, "answer selected");
        Ok(Some(QuizEvent::AnswerSelected {
            index: self.current_index,
            option: option.to_string(),
            previous,
            at: Utc::now(),
        }))
    }

    /// Move to the next question, or score the quiz on the last one.
    ///
    /// Does nothing while no option is selected for the current question.
    pub fn go_next(&mut self) -> Result<Option<QuizEvent>, SessionError> {
        self.ensure_in_progress()?;
        if self.selected.is_empty() {
            return Ok(None);
        }
        self.answers.record(self.current_index, self.selected.clone());

        if self.is_last_question() {
            return Ok(Some(self.complete()));
        }

        let from = self.current_index;
        self.current_index += 1;
        self.restore_selection();
        tracing::debug!(from, to = self.current_index, "advanced");
        Ok(Some(QuizEvent::Advanced {
            from,
            to: self.current_index,
            at: Utc::now(),
        }))
    }

    /// Move back one question, restoring its recorded answer.
    pub fn go_previous(&mut self) -> Result<Option<QuizEvent>, SessionError> {
        self.ensure_in_progress()?;
        if self.current_index == 0 {
            return Ok(None);
        }
        let from = self.current_index;
        self.current_index -= 1;
        self.restore_selection();
        tracing::debug!(from, to = self.current_index, "went back");
        Ok(Some(QuizEvent::Retreated {
            from,
            to: self.current_index,
            at: Utc::now(),
        }))
    }

    /// Abandon the quiz. All answers are discarded and no result is produced.
    pub fn skip(&mut self) -> Result<Option<QuizEvent>, SessionError> {
        self.ensure_in_progress()?;
        let answered = self.answers.len();
        self.answers.clear();
        self.selected.clear();
        self.state = SessionState::Aborted;
        let now = Utc::now();
        self.finished_at = Some(now);
        tracing::debug!(session = %self.id, answered, "quiz skipped");
        Ok(Some(QuizEvent::Aborted { answered, at: now }))
    }

    // ── Internals ────────────────────────────────────────────────────

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        if self.state == SessionState::InProgress {
            Ok(())
        } else {
            Err(SessionError::NotInProgress)
        }
    }

    fn restore_selection(&mut self) {
        self.selected = self
            .answers
            .get(self.current_index)
            .unwrap_or_default()
            .to_string();
    }

    fn complete(&mut self) -> QuizEvent {
        let result = self.bank.evaluate_recorded(&self.answers, &self.thresholds);
        let now = Utc::now();
        self.state = SessionState::Complete;
        self.finished_at = Some(now);
        let event = QuizEvent::Completed {
            score: result.score,
            weak_areas: result.weak_areas.clone(),
            strong_areas: result.strong_areas.clone(),
            at: now,
        };
        self.result = Some(result);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> QuestionBank {
        let q = |id: &str, cat: &str| {
            QuizQuestion::new(id, cat, "prompt", vec!["a".into(), "b".into()], "a").unwrap()
        };
        QuestionBank::new(vec![q("1", "A"), q("2", "A"), q("3", "B")]).unwrap()
    }

    #[test]
    fn next_without_selection_is_noop() {
        let mut s = QuizSession::new(bank());
        assert_eq!(s.go_next().unwrap(), None);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn select_then_next_advances_and_clears_selection() {
        let mut s = QuizSession::new(bank());
        assert!(s.select_answer("a").unwrap().is_some());
        assert!(matches!(
            s.go_next().unwrap(),
            Some(QuizEvent::Advanced { from: 0, to: 1, .. })
        ));
        assert_eq!(s.selected(), "");
        assert!(s.is_answered(0));
        assert!(!s.is_answered(1));
    }

    #[test]
    fn previous_restores_recorded_answer() {
        let mut s = QuizSession::new(bank());
        s.select_answer("b").unwrap();
        s.go_next().unwrap();
        s.go_previous().unwrap();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.selected(), "b");
    }

    #[test]
    fn previous_at_first_question_is_noop() {
        let mut s = QuizSession::new(bank());
        assert_eq!(s.go_previous().unwrap(), None);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn previous_onto_unanswered_question_clears_selection() {
        let mut s = QuizSession::new(bank());
        s.select_answer("a").unwrap();
        s.go_next().unwrap();
        s.select_answer("a").unwrap();
        s.go_next().unwrap();
        // index 2 never answered; go back to 1 then forward again
        s.go_previous().unwrap();
        assert_eq!(s.selected(), "a");
        s.go_next().unwrap();
        assert_eq!(s.current_index(), 2);
        assert_eq!(s.selected(), "");
    }

    #[test]
    fn changing_answer_overwrites_entry() {
        let mut s = QuizSession::new(bank());
        s.select_answer("a").unwrap();
        let event = s.select_answer("b").unwrap();
        assert!(matches!(
            event,
            Some(QuizEvent::AnswerSelected { ref previous, .. }) if previous.as_deref() == Some("a")
        ));
        assert_eq!(s.answers().get(0), Some("b"));
        assert_eq!(s.answers().len(), 1);
    }

    #[test]
    fn reselecting_same_option_emits_nothing() {
        let mut s = QuizSession::new(bank());
        s.select_answer("a").unwrap();
        assert_eq!(s.select_answer("a").unwrap(), None);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut s = QuizSession::new(bank());
        let err = s.select_answer("z").unwrap_err();
        assert!(matches!(err, SessionError::UnknownOption { .. }));
        assert!(s.answers().is_empty());
    }

    #[test]
    fn next_on_last_question_scores_including_final_answer() {
        let mut s = QuizSession::new(bank());
        for _ in 0..3 {
            s.select_answer("a").unwrap();
            s.go_next().unwrap();
        }
        assert_eq!(s.state(), SessionState::Complete);
        let result = s.result().unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.strong_areas, vec!["A".to_string(), "B".to_string()]);
        assert!(s.finished_at().is_some());
    }

    #[test]
    fn completed_session_rejects_further_input() {
        let mut s = QuizSession::new(bank());
        for _ in 0..3 {
            s.select_answer("b").unwrap();
            s.go_next().unwrap();
        }
        assert_eq!(s.go_next(), Err(SessionError::NotInProgress));
        assert_eq!(s.go_previous(), Err(SessionError::NotInProgress));
        assert_eq!(s.select_answer("a"), Err(SessionError::NotInProgress));
        assert_eq!(s.skip(), Err(SessionError::NotInProgress));
        assert_eq!(s.result().unwrap().score, 0);
    }

    #[test]
    fn skip_discards_everything() {
        let mut s = QuizSession::new(bank());
        s.select_answer("a").unwrap();
        s.go_next().unwrap();
        let event = s.skip().unwrap();
        assert!(matches!(event, Some(QuizEvent::Aborted { answered: 1, .. })));
        assert_eq!(s.state(), SessionState::Aborted);
        assert!(s.answers().is_empty());
        assert!(s.into_result().is_none());
    }

    #[test]
    fn progress_counts_current_question() {
        let mut s = QuizSession::new(bank());
        assert!((s.progress_pct() - 100.0 / 3.0).abs() < 1e-9);
        s.select_answer("a").unwrap();
        s.go_next().unwrap();
        s.select_answer("a").unwrap();
        s.go_next().unwrap();
        assert!((s.progress_pct() - 100.0).abs() < 1e-9);
        assert!(s.is_last_question());
    }

    #[test]
    fn session_survives_json_roundtrip_mid_quiz() {
        let mut s = QuizSession::new(bank());
        s.select_answer("b").unwrap();
        s.go_next().unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let restored: QuizSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.current_index(), 1);
        assert_eq!(restored.answers().get(0), Some("b"));
        assert_eq!(restored.id(), s.id());
    }

    #[test]
    fn deserializing_rejects_index_past_last_question() {
        let s = QuizSession::new(bank());
        let mut value = serde_json::to_value(&s).unwrap();
        value["current_index"] = serde_json::json!(99);
        let err = serde_json::from_value::<QuizSession>(value).unwrap_err();
        assert!(err.to_string().contains("Index 99 out of bounds for question bank (length: 3)"));

        let mut value = serde_json::to_value(&s).unwrap();
        value["answers"] = serde_json::json!({"5": "a"});
        assert!(serde_json::from_value::<QuizSession>(value).is_err());
    }

    #[test]
    fn deserializing_rejects_state_result_mismatch() {
        let mut s = QuizSession::new(bank());
        let mut value = serde_json::to_value(&s).unwrap();
        value["state"] = serde_json::json!("complete");
        let err = serde_json::from_value::<QuizSession>(value).unwrap_err();
        assert!(err.to_string().contains("must carry its result"));

        for _ in 0..3 {
            s.select_answer("a").unwrap();
            s.go_next().unwrap();
        }
        let mut value = serde_json::to_value(&s).unwrap();
        value["state"] = serde_json::json!("inprogress");
        assert!(serde_json::from_value::<QuizSession>(value).is_err());

        let finished: QuizSession = serde_json::from_value(serde_json::to_value(&s).unwrap()).unwrap();
        assert_eq!(finished.result().unwrap().score, 100);
    }

    #[test]
    fn deserializing_rejects_selection_outside_current_question() {
        let s = QuizSession::new(bank());
        let mut value = serde_json::to_value(&s).unwrap();
        value["selected"] = serde_json::json!("zzz");
        assert!(serde_json::from_value::<QuizSession>(value).is_err());
    }
}
