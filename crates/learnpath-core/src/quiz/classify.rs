//! Weak/strong area classification.
//!
//! A category is weak when its accuracy is strictly below `weak_below` and
//! strong when it is at or above `strong_at`. Accuracy between the two gets
//! no classification. `weak_below <= strong_at` keeps the two sets disjoint.

use serde::{Deserialize, Serialize};

use super::scoring::{CategoryTallies, CategoryTally};
use crate::error::ValidationError;

/// Classification bands in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    weak_below: u8,
    strong_at: u8,
}

#[derive(Deserialize)]
struct RawThresholds {
    weak_below: u8,
    strong_at: u8,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = ValidationError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Thresholds::new(raw.weak_below, raw.strong_at)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            weak_below: Self::DEFAULT_WEAK_BELOW,
            strong_at: Self::DEFAULT_STRONG_AT,
        }
    }
}

impl Thresholds {
    pub const DEFAULT_WEAK_BELOW: u8 = 60;
    pub const DEFAULT_STRONG_AT: u8 = 80;

    /// # Errors
    ///
    /// Returns an error if either bound exceeds 100 or `weak_below > strong_at`.
    pub fn new(weak_below: u8, strong_at: u8) -> Result<Self, ValidationError> {
        if weak_below > 100 || strong_at > 100 {
            return Err(ValidationError::InvalidValue {
                field: "thresholds".into(),
                message: format!("thresholds must be within 0-100 (got {weak_below}/{strong_at})"),
            });
        }
        if weak_below > strong_at {
            return Err(ValidationError::InvalidValue {
                field: "thresholds".into(),
                message: format!(
                    "weak_below ({weak_below}) must not exceed strong_at ({strong_at})"
                ),
            });
        }
        Ok(Self { weak_below, strong_at })
    }

    pub fn weak_below(&self) -> u8 {
        self.weak_below
    }

    pub fn strong_at(&self) -> u8 {
        self.strong_at
    }

    /// Classify a single tally. Empty tallies are never classified.
    pub fn classify(&self, tally: &CategoryTally) -> Option<Area> {
        if tally.total == 0 {
            return None;
        }
        // Compare correct/total against p/100 without floating point.
        let scaled = tally.correct as u64 * 100;
        let total = tally.total as u64;
        if scaled < self.weak_below as u64 * total {
            Some(Area::Weak)
        } else if scaled >= self.strong_at as u64 * total {
            Some(Area::Strong)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Weak,
    Strong,
}

/// Weak and strong categories, each in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AreaClassification {
    pub weak: Vec<String>,
    pub strong: Vec<String>,
}

pub fn classify(tallies: &CategoryTallies, thresholds: &Thresholds) -> AreaClassification {
    let mut out = AreaClassification::default();
    for (category, tally) in tallies.iter() {
        match thresholds.classify(tally) {
            Some(Area::Weak) => out.weak.push(category.to_string()),
            Some(Area::Strong) => out.strong.push(category.to_string()),
            None => {}
        }
    }
    out
}
