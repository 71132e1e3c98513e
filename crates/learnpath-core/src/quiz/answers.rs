use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selected option per question index (0-based).
///
/// Recording an answer for an index that already has one overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    answers: BTreeMap<usize, String>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` for `index`, returning the previous selection if any.
    pub fn record(&mut self, index: usize, option: impl Into<String>) -> Option<String> {
        self.answers.insert(index, option.into())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.answers.iter().map(|(i, a)| (*i, a.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for AnswerRecord {
    fn from_iter<I: IntoIterator<Item = (usize, S)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (index, option) in iter {
            record.record(index, option);
        }
        record
    }
}
