//! Quiz questions and question banks.
//!
//! Questions are validated on construction and on deserialization, so a
//! `QuizQuestion` held anywhere in the crate always has a non-empty, unique
//! option list that contains its correct answer. A `QuestionBank` is never
//! empty, which is what lets the scorer divide by the question count.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{CoreError, ValidationError};

/// A single multiple-choice diagnostic question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawQuestion")]
pub struct QuizQuestion {
    id: String,
    category: String,
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

/// Unvalidated wire form of a question.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    id: String,
    category: String,
    #[serde(alias = "question")]
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl TryFrom<RawQuestion> for QuizQuestion {
    type Error = ValidationError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        QuizQuestion::new(
            raw.id,
            raw.category,
            raw.prompt,
            raw.options,
            raw.correct_answer,
        )
    }
}

impl QuizQuestion {
    /// Build a question, checking that the options are non-empty and unique
    /// and that `correct_answer` is one of them.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let category = category.into();
        let correct_answer = correct_answer.into();

        if id.trim().is_empty() {
            return Err(invalid("id", "question id must not be empty"));
        }
        if category.trim().is_empty() {
            return Err(invalid("category", format!("question '{id}' has no category")));
        }
        if options.is_empty() {
            return Err(ValidationError::EmptyCollection(format!(
                "options of question '{id}'"
            )));
        }

        let mut seen = HashSet::new();
        for option in &options {
            if option.is_empty() {
                return Err(invalid("options", format!("question '{id}' has an empty option")));
            }
            if !seen.insert(option.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: format!("options of question '{id}'"),
                    value: option.clone(),
                });
            }
        }

        if !seen.contains(correct_answer.as_str()) {
            return Err(invalid(
                "correct_answer",
                format!("'{correct_answer}' is not an option of question '{id}'"),
            ));
        }

        Ok(Self {
            id,
            category,
            prompt: prompt.into(),
            options,
            correct_answer,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether `answer` matches the correct option. `None` never matches.
    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        answer == Some(self.correct_answer.as_str())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

/// An ordered, non-empty sequence of questions with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<QuizQuestion>", into = "Vec<QuizQuestion>")]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl TryFrom<Vec<QuizQuestion>> for QuestionBank {
    type Error = ValidationError;

    fn try_from(questions: Vec<QuizQuestion>) -> Result<Self, Self::Error> {
        QuestionBank::new(questions)
    }
}

impl From<QuestionBank> for Vec<QuizQuestion> {
    fn from(bank: QuestionBank) -> Self {
        bank.questions
    }
}

#[derive(Serialize)]
struct BankFileRef<'a> {
    questions: &'a [QuizQuestion],
}

impl QuestionBank {
    /// Create a bank from an ordered list of questions.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or two questions share an id.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::EmptyCollection("question bank".into()));
        }
        let mut ids = HashSet::new();
        for q in &questions {
            if !ids.insert(q.id()) {
                return Err(ValidationError::Duplicate {
                    field: "question ids".into(),
                    value: q.id().to_string(),
                });
            }
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .map(|q| q.category())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Parse a bank from JSON (array or `{ "questions": [...] }`).
    ///
    /// The layout is picked from the top-level shape before the questions
    /// are decoded, so a bad question reports its own validation error.
    pub fn from_json_str(content: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let questions = match value {
            serde_json::Value::Array(list) => serde_json::Value::Array(list),
            serde_json::Value::Object(mut table) => {
                table.remove("questions").ok_or_else(missing_questions)?
            }
            _ => return Err(missing_questions().into()),
        };
        Ok(serde_json::from_value(questions)?)
    }

    /// Parse a bank from TOML (`[[questions]]` tables).
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let mut table: toml::Table = toml::from_str(content)?;
        let questions = table.remove("questions").ok_or_else(missing_questions)?;
        Ok(questions.try_into::<QuestionBank>()?)
    }

    /// Load a bank from disk. Files ending in `.toml` are parsed as TOML,
    /// everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        let bank = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        tracing::debug!(path = %path.display(), questions = bank.len(), "loaded question bank");
        Ok(bank)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(&BankFileRef {
            questions: &self.questions,
        })?)
    }

    /// The built-in diagnostic quiz shown to new students.
    pub fn diagnostic() -> Self {
        let q = |id: &str, category: &str, prompt: &str, options: &[&str], correct: &str| {
            QuizQuestion {
                id: id.to_string(),
                category: category.to_string(),
                prompt: prompt.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_answer: correct.to_string(),
            }
        };

        Self {
            questions: vec![
                q(
                    "react-1",
                    "React",
                    "Which hook is used to hold local component state?",
                    &["useEffect", "useState", "useMemo", "useRef"],
                    "useState",
                ),
                q(
                    "react-2",
                    "React",
                    "What must every element rendered from a list have?",
                    &["A unique key prop", "An id attribute", "A ref", "A className"],
                    "A unique key prop",
                ),
                q(
                    "js-1",
                    "JavaScript",
                    "What does `typeof null` evaluate to?",
                    &["\"null\"", "\"undefined\"", "\"object\"", "\"number\""],
                    "\"object\"",
                ),
                q(
                    "js-2",
                    "JavaScript",
                    "Which keyword declares a block-scoped variable that cannot be reassigned?",
                    &["var", "let", "const", "static"],
                    "const",
                ),
                q(
                    "ds-1",
                    "Data Structures",
                    "Which structure gives O(1) average lookup by key?",
                    &["Linked list", "Hash map", "Binary heap", "Sorted array"],
                    "Hash map",
                ),
                q(
                    "ds-2",
                    "Data Structures",
                    "Which structure follows last-in, first-out order?",
                    &["Queue", "Stack", "Deque", "Tree"],
                    "Stack",
                ),
                q(
                    "algo-1",
                    "Algorithms",
                    "What is the worst-case time complexity of binary search?",
                    &["O(1)", "O(log n)", "O(n)", "O(n log n)"],
                    "O(log n)",
                ),
                q(
                    "algo-2",
                    "Algorithms",
                    "Which sorting algorithm is stable and O(n log n) in the worst case?",
                    &["Quicksort", "Heapsort", "Merge sort", "Selection sort"],
                    "Merge sort",
                ),
                q(
                    "py-1",
                    "Python",
                    "Which library is commonly used for tabular data analysis?",
                    &["NumPy", "pandas", "Flask", "pytest"],
                    "pandas",
                ),
                q(
                    "ml-1",
                    "Machine Learning",
                    "Predicting a house price from its features is an example of:",
                    &["Classification", "Regression", "Clustering", "Dimensionality reduction"],
                    "Regression",
                ),
            ],
        }
    }
}

fn missing_questions() -> ValidationError {
    ValidationError::InvalidValue {
        field: "questions".into(),
        message: "expected a list of questions or a table with a `questions` list".into(),
    }
}
