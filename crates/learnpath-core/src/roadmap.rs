//! Personalized learning roadmap.
//!
//! A roadmap is an ordered list of learning steps. Diagnostic quiz results
//! reorder and annotate it: steps covering weak areas move to the front of
//! the remaining work, and upcoming steps covering strong areas are skipped.

use serde::{Deserialize, Serialize};

use crate::quiz::{rounded_percentage, QuizResult};

pub const WEAK_AREA_REASON: &str = "Weak area identified in diagnostic quiz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapStatus {
    Completed,
    Current,
    Upcoming,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: RoadmapStatus,
    /// Why the step is where it is on the path.
    #[serde(default)]
    pub reason: Option<String>,
    pub course_id: String,
    /// Quiz category this step trains, if any.
    #[serde(default)]
    pub topic: Option<String>,
    /// Completion of the step, 0-100.
    #[serde(default)]
    pub progress: u8,
    pub estimated_time: String,
}

impl RoadmapItem {
    fn has_topic_in(&self, areas: &[String]) -> bool {
        self.topic
            .as_deref()
            .map(|t| areas.iter().any(|a| a == t))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    pub items: Vec<RoadmapItem>,
}

impl Roadmap {
    pub fn new(items: Vec<RoadmapItem>) -> Self {
        Self { items }
    }

    /// Completed steps as a share of all non-skipped steps, 0-100.
    /// A roadmap with nothing left to do but skipped steps reports 0.
    pub fn overall_progress(&self) -> u8 {
        let active = self
            .items
            .iter()
            .filter(|i| i.status != RoadmapStatus::Skipped)
            .count() as u32;
        if active == 0 {
            return 0;
        }
        let completed = self
            .items
            .iter()
            .filter(|i| i.status == RoadmapStatus::Completed)
            .count() as u32;
        rounded_percentage(completed, active)
    }

    pub fn current_item(&self) -> Option<&RoadmapItem> {
        self.items.iter().find(|i| i.status == RoadmapStatus::Current)
    }

    /// Apply a diagnostic result to the roadmap.
    ///
    /// Completed steps stay first. Unfinished steps on a weak topic come next
    /// and are annotated with [`WEAK_AREA_REASON`]; a skipped step on a weak
    /// topic is put back to upcoming. Upcoming steps on a strong
    /// topic are marked skipped. If no step is current afterwards, the first
    /// upcoming step becomes current. Relative order is otherwise kept.
    pub fn personalize(&self, result: &QuizResult) -> Roadmap {
        let mut items: Vec<RoadmapItem> = self.items.clone();

        for item in &mut items {
            if item.status == RoadmapStatus::Completed {
                continue;
            }
            if item.has_topic_in(&result.weak_areas) {
                if item.status == RoadmapStatus::Skipped {
                    item.status = RoadmapStatus::Upcoming;
                }
                item.reason = Some(WEAK_AREA_REASON.to_string());
            } else if item.status == RoadmapStatus::Upcoming && item.has_topic_in(&result.strong_areas) {
                item.status = RoadmapStatus::Skipped;
                item.reason = Some(format!(
                    "You already have strong {} skills",
                    item.topic.as_deref().unwrap_or_default()
                ));
            }
        }

        // Stable: ties keep their original relative order.
        items.sort_by_key(|item| match item.status {
            RoadmapStatus::Completed => 0,
            _ if item.has_topic_in(&result.weak_areas) => 1,
            _ => 2,
        });

        if !items.iter().any(|i| i.status == RoadmapStatus::Current) {
            if let Some(next) = items.iter_mut().find(|i| i.status == RoadmapStatus::Upcoming) {
                next.status = RoadmapStatus::Current;
            }
        }

        tracing::debug!(
            items = items.len(),
            weak = result.weak_areas.len(),
            strong = result.strong_areas.len(),
            "roadmap personalized"
        );
        Roadmap { items }
    }

    /// The built-in learning path offered to new students.
    pub fn sample() -> Self {
        let item = |id: &str,
                    title: &str,
                    description: &str,
                    status: RoadmapStatus,
                    reason: &str,
                    course_id: &str,
                    topic: &str,
                    progress: u8,
                    estimated_time: &str| RoadmapItem {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status,
            reason: Some(reason.to_string()),
            course_id: course_id.to_string(),
            topic: Some(topic.to_string()),
            progress,
            estimated_time: estimated_time.to_string(),
        };

        Roadmap::new(vec![
            item(
                "1",
                "Data Structures & Algorithms - Arrays & Strings",
                "Build strong foundation in fundamental data structures",
                RoadmapStatus::Completed,
                "Foundation needed for advanced topics",
                "3",
                "Data Structures",
                100,
                "2 weeks",
            ),
            item(
                "2",
                "Full Stack Web Development - React Fundamentals",
                "Learn component-based architecture and state management",
                RoadmapStatus::Current,
                "Core skill for modern front-end work",
                "2",
                "React",
                70,
                "1 week",
            ),
            item(
                "3",
                "Introduction to Machine Learning - Supervised Learning",
                "Understand regression and classification algorithms",
                RoadmapStatus::Upcoming,
                "Prerequisites completed, next logical step",
                "1",
                "Machine Learning",
                0,
                "3 weeks",
            ),
            item(
                "4",
                "Python for Data Science - Data Visualization",
                "Create insightful visualizations with Matplotlib and Seaborn",
                RoadmapStatus::Upcoming,
                "Complements ML course, builds practical skills",
                "6",
                "Python",
                0,
                "2 weeks",
            ),
            item(
                "5",
                "Algorithms - Sorting & Searching",
                "Master classic sorting, searching and complexity analysis",
                RoadmapStatus::Upcoming,
                "Needed for technical interviews",
                "3",
                "Algorithms",
                0,
                "2 weeks",
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(weak: &[&str], strong: &[&str]) -> QuizResult {
        QuizResult {
            score: 50,
            weak_areas: weak.iter().map(|s| s.to_string()).collect(),
            strong_areas: strong.iter().map(|s| s.to_string()).collect(),
            recommendations: vec![],
        }
    }

    fn ids(roadmap: &Roadmap) -> Vec<&str> {
        roadmap.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn overall_progress_ignores_skipped() {
        let mut roadmap = Roadmap::sample();
        assert_eq!(roadmap.overall_progress(), 20); // 1 of 5
        roadmap.items[4].status = RoadmapStatus::Skipped;
        assert_eq!(roadmap.overall_progress(), 25); // 1 of 4
    }

    #[test]
    fn overall_progress_all_skipped_is_zero() {
        let mut roadmap = Roadmap::sample();
        for item in &mut roadmap.items {
            item.status = RoadmapStatus::Skipped;
        }
        assert_eq!(roadmap.overall_progress(), 0);
        assert_eq!(Roadmap::default().overall_progress(), 0);
    }

    #[test]
    fn current_item_is_first_current() {
        assert_eq!(Roadmap::sample().current_item().unwrap().id, "2");
    }

    #[test]
    fn weak_topics_move_ahead_of_other_unfinished_steps() {
        let personalized = Roadmap::sample().personalize(&result(&["Algorithms"], &[]));
        assert_eq!(ids(&personalized), vec!["1", "5", "2", "3", "4"]);
        assert_eq!(personalized.items[1].reason.as_deref(), Some(WEAK_AREA_REASON));
        // the current step stays current
        assert_eq!(personalized.current_item().unwrap().id, "2");
    }

    #[test]
    fn strong_upcoming_topics_are_skipped() {
        let personalized = Roadmap::sample().personalize(&result(&[], &["Python", "Data Structures"]));
        let python = personalized.items.iter().find(|i| i.id == "4").unwrap();
        assert_eq!(python.status, RoadmapStatus::Skipped);
        assert_eq!(python.reason.as_deref(), Some("You already have strong Python skills"));
        // completed steps are never touched
        let ds = personalized.items.iter().find(|i| i.id == "1").unwrap();
        assert_eq!(ds.status, RoadmapStatus::Completed);
    }

    #[test]
    fn skipped_weak_topic_is_restored_to_upcoming() {
        let mut roadmap = Roadmap::sample();
        roadmap.items[3].status = RoadmapStatus::Skipped;
        let personalized = roadmap.personalize(&result(&["Python"], &[]));

        let python = &personalized.items[1];
        assert_eq!(python.id, "4");
        assert_eq!(python.status, RoadmapStatus::Upcoming);
        assert_eq!(python.reason.as_deref(), Some(WEAK_AREA_REASON));
        assert_eq!(personalized.current_item().unwrap().id, "2");
        // the restored step counts toward progress again
        assert_eq!(personalized.overall_progress(), 20);
    }

    #[test]
    fn strong_current_step_is_not_skipped() {
        let personalized = Roadmap::sample().personalize(&result(&[], &["React"]));
        assert_eq!(personalized.current_item().unwrap().id, "2");
    }

    #[test]
    fn first_upcoming_promoted_when_nothing_current() {
        let mut roadmap = Roadmap::sample();
        roadmap.items[1].status = RoadmapStatus::Completed;
        let personalized = roadmap.personalize(&result(&["Python"], &[]));
        assert_eq!(ids(&personalized), vec!["1", "2", "4", "3", "5"]);
        assert_eq!(personalized.current_item().unwrap().id, "4");
    }

    #[test]
    fn empty_result_leaves_roadmap_unchanged() {
        let roadmap = Roadmap::sample();
        assert_eq!(roadmap.personalize(&result(&[], &[])), roadmap);
    }
}
