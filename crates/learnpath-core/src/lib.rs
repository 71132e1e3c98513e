//! # learnpath Core Library
//!
//! This library provides the core logic behind the learnpath diagnostic quiz:
//! it collects a learner's answers, scores them per category, classifies weak
//! and strong areas, writes recommendations and personalizes the learning
//! roadmap. The `learnpath` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Quiz Session**: a caller-driven state machine over a question bank
//! - **Scoring pipeline**: scorer -> area classifier -> recommendation composer
//! - **Roadmap**: reorders and annotates learning steps from a quiz result
//! - **Course catalog**: price and category filters over the course list
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`QuizSession`]: Quiz navigation and completion
//! - [`evaluate`]: One-shot scoring of an answer record
//! - [`Roadmap`]: Personalized learning path
//! - [`CourseCatalog`]: Course listing and filters
//! - [`Config`]: Application configuration management

pub mod course;
pub mod error;
pub mod events;
pub mod quiz;
pub mod roadmap;
pub mod storage;

pub use course::{Course, CourseCatalog, Difficulty, PriceFilter};
pub use error::{ConfigError, CoreError, SessionError, ValidationError};
pub use events::QuizEvent;
pub use quiz::{
    evaluate, AnswerRecord, AreaClassification, CategoryTally, QuestionBank, QuizQuestion,
    QuizResult, QuizSession, ScoreSheet, SessionState, Thresholds,
};
pub use roadmap::{Roadmap, RoadmapItem, RoadmapStatus};
pub use storage::Config;
