use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::SessionState;

/// Every quiz session transition produces an Event.
/// Front ends render from them; the CLI logs them in verbose mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuizEvent {
    AnswerSelected {
        index: usize,
        option: String,
        /// Option previously recorded for this index, if it was changed.
        previous: Option<String>,
        at: DateTime<Utc>,
    },
    Advanced {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    Retreated {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    /// Next was pressed on the last question and the quiz was scored.
    Completed {
        score: u8,
        weak_areas: Vec<String>,
        strong_areas: Vec<String>,
        at: DateTime<Utc>,
    },
    /// The learner skipped the quiz; answers were discarded.
    Aborted {
        answered: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        session_id: String,
        state: SessionState,
        current_index: usize,
        question_count: usize,
        answered: usize,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
