//! Diagnostic quiz: questions, session controller, scoring pipeline.
//!
//! The pipeline is `scoring` -> `classify` -> `recommend`, wrapped by
//! [`evaluate`] and driven by [`QuizSession`] when a learner takes the quiz
//! interactively.

mod answers;
mod classify;
mod question;
mod recommend;
mod result;
mod scoring;
mod session;

pub use answers::AnswerRecord;
pub use classify::{classify, Area, AreaClassification, Thresholds};
pub use question::{QuestionBank, QuizQuestion};
pub use recommend::{compose, STRONG_PREFIX, WEAK_PREFIX};
pub use result::{evaluate, QuizResult};
pub(crate) use scoring::rounded_percentage;
pub use scoring::{score, CategoryTallies, CategoryTally, ScoreSheet};
pub use session::{QuizSession, SessionId, SessionState};
