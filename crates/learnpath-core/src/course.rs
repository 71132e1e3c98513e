//! Course catalog and the listing filters.
//!
//! A listing narrows the catalog by price (all, free only, paid only) and by
//! category. Both filters keep catalog order, and the category list is the
//! distinct categories in first-seen order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructor: String,
    /// Learner progress through the course, 0-100.
    #[serde(default)]
    pub progress: u8,
    pub duration: String,
    pub lessons: u32,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_students: Option<u32>,
    pub is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Price filter for a course listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceFilter {
    #[default]
    All,
    Free,
    Paid,
}

impl PriceFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceFilter::All => "all",
            PriceFilter::Free => "free",
            PriceFilter::Paid => "paid",
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            PriceFilter::All => true,
            PriceFilter::Free => course.is_free,
            PriceFilter::Paid => !course.is_free,
        }
    }
}

impl fmt::Display for PriceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(PriceFilter::All),
            "free" => Ok(PriceFilter::Free),
            "paid" => Ok(PriceFilter::Paid),
            _ => Err(ValidationError::InvalidValue {
                field: "price".into(),
                message: format!("'{s}' is not one of all, free, paid"),
            }),
        }
    }
}

/// An ordered list of courses with unique ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Course>", into = "Vec<Course>")]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl TryFrom<Vec<Course>> for CourseCatalog {
    type Error = ValidationError;

    fn try_from(courses: Vec<Course>) -> Result<Self, Self::Error> {
        Self::new(courses)
    }
}

impl From<CourseCatalog> for Vec<Course> {
    fn from(catalog: CourseCatalog) -> Self {
        catalog.courses
    }
}

impl CourseCatalog {
    /// # Errors
    ///
    /// Returns [`ValidationError::Duplicate`] if two courses share an id.
    pub fn new(courses: Vec<Course>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(course.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "course id".into(),
                    value: course.id.clone(),
                });
            }
        }
        Ok(Self { courses })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.courses
            .iter()
            .map(|c| c.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Courses passing both filters, in catalog order. `None` for the
    /// category keeps every category; otherwise the match is exact.
    pub fn filter(&self, price: PriceFilter, category: Option<&str>) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| price.matches(c))
            .filter(|c| category.map_or(true, |category| c.category == category))
            .collect()
    }

    /// Load a catalog from a JSON array of courses.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), courses = catalog.len(), "loaded course catalog");
        Ok(catalog)
    }

    /// The built-in course catalog.
    pub fn sample() -> Self {
        #[allow(clippy::too_many_arguments)]
        fn course(
            id: &str,
            title: &str,
            description: &str,
            instructor: &str,
            progress: u8,
            duration: &str,
            lessons: u32,
            category: &str,
            difficulty: Difficulty,
            tags: &[&str],
            enrolled_students: u32,
            price: Option<f64>,
        ) -> Course {
            Course {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                instructor: instructor.to_string(),
                progress,
                duration: duration.to_string(),
                lessons,
                category: category.to_string(),
                difficulty,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                enrolled_students: Some(enrolled_students),
                is_free: price.is_none(),
                price,
            }
        }

        Self {
            courses: vec![
                course(
                    "1",
                    "Introduction to Machine Learning",
                    "Learn the fundamentals of ML, including supervised and unsupervised learning, neural networks, and real-world applications.",
                    "Dr. Sarah Chen",
                    45,
                    "8 weeks",
                    24,
                    "AI & ML",
                    Difficulty::Intermediate,
                    &["Python", "TensorFlow", "Neural Networks"],
                    1243,
                    Some(89.99),
                ),
                course(
                    "2",
                    "Full Stack Web Development",
                    "Build modern web applications from scratch using React, Node.js, and PostgreSQL.",
                    "Michael Roberts",
                    70,
                    "12 weeks",
                    36,
                    "Web Development",
                    Difficulty::Intermediate,
                    &["React", "Node.js", "PostgreSQL"],
                    2891,
                    Some(129.99),
                ),
                course(
                    "3",
                    "Data Structures & Algorithms",
                    "Master essential DSA concepts for technical interviews and efficient problem solving.",
                    "Prof. James Liu",
                    30,
                    "10 weeks",
                    30,
                    "Computer Science",
                    Difficulty::Intermediate,
                    &["Python", "Algorithms", "Interview Prep"],
                    3456,
                    None,
                ),
                course(
                    "4",
                    "UI/UX Design Fundamentals",
                    "Learn design principles, user research, wireframing, and prototyping with industry tools.",
                    "Emily Turner",
                    0,
                    "6 weeks",
                    18,
                    "Design",
                    Difficulty::Beginner,
                    &["Figma", "User Research", "Prototyping"],
                    1876,
                    None,
                ),
                course(
                    "5",
                    "Cloud Computing with AWS",
                    "Deploy scalable applications using AWS services like EC2, S3, Lambda, and RDS.",
                    "David Kumar",
                    0,
                    "8 weeks",
                    20,
                    "Cloud & DevOps",
                    Difficulty::Advanced,
                    &["AWS", "DevOps", "Deployment"],
                    987,
                    Some(149.99),
                ),
                course(
                    "6",
                    "Python for Data Science",
                    "Analyze and visualize data using Python, Pandas, NumPy, and Matplotlib.",
                    "Dr. Lisa Wang",
                    15,
                    "7 weeks",
                    21,
                    "Data Science",
                    Difficulty::Beginner,
                    &["Python", "Pandas", "Data Analysis"],
                    2134,
                    None,
                ),
                course(
                    "7",
                    "Advanced React Patterns",
                    "Master advanced React patterns including render props, HOCs, compound components, and hooks patterns.",
                    "Sarah Johnson",
                    0,
                    "6 weeks",
                    18,
                    "Web Development",
                    Difficulty::Advanced,
                    &["React", "Hooks", "Design Patterns"],
                    876,
                    Some(99.99),
                ),
                course(
                    "8",
                    "Introduction to Programming",
                    "Start your coding journey with fundamental programming concepts using Python.",
                    "John Smith",
                    0,
                    "4 weeks",
                    12,
                    "Programming",
                    Difficulty::Beginner,
                    &["Python", "Basics", "Logic"],
                    5432,
                    None,
                ),
                course(
                    "9",
                    "Cybersecurity Essentials",
                    "Learn the fundamentals of cybersecurity, including network security, cryptography, and ethical hacking.",
                    "Dr. Marcus Lee",
                    0,
                    "10 weeks",
                    28,
                    "Security",
                    Difficulty::Intermediate,
                    &["Security", "Networking", "Ethical Hacking"],
                    1654,
                    Some(119.99),
                ),
                course(
                    "10",
                    "Mobile App Development with Flutter",
                    "Build beautiful cross-platform mobile apps using Flutter and Dart.",
                    "Amy Wilson",
                    0,
                    "9 weeks",
                    27,
                    "Mobile Development",
                    Difficulty::Intermediate,
                    &["Flutter", "Dart", "Mobile"],
                    2098,
                    Some(109.99),
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(courses: &[&Course]) -> Vec<String> {
        courses.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn price_filter_splits_free_and_paid() {
        let catalog = CourseCatalog::sample();
        assert_eq!(catalog.filter(PriceFilter::All, None).len(), 10);
        assert_eq!(ids(&catalog.filter(PriceFilter::Free, None)), vec!["3", "4", "6", "8"]);
        assert_eq!(
            ids(&catalog.filter(PriceFilter::Paid, None)),
            vec!["1", "2", "5", "7", "9", "10"]
        );
    }

    #[test]
    fn category_filter_is_exact_and_combines_with_price() {
        let catalog = CourseCatalog::sample();
        let web = catalog.filter(PriceFilter::All, Some("Web Development"));
        assert_eq!(ids(&web), vec!["2", "7"]);
        assert!(catalog.filter(PriceFilter::Free, Some("Web Development")).is_empty());
        assert!(catalog.filter(PriceFilter::All, Some("web development")).is_empty());
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let catalog = CourseCatalog::sample();
        let categories = catalog.categories();
        assert_eq!(categories.len(), 9);
        assert_eq!(categories[0], "AI & ML");
        assert_eq!(categories[1], "Web Development");
        assert_eq!(categories[8], "Mobile Development");
    }

    #[test]
    fn price_filter_parses_case_insensitively() {
        assert_eq!("paid".parse::<PriceFilter>().unwrap(), PriceFilter::Paid);
        assert_eq!("FREE".parse::<PriceFilter>().unwrap(), PriceFilter::Free);
        assert!(matches!(
            "cheap".parse::<PriceFilter>(),
            Err(ValidationError::InvalidValue { .. })
        ));
        assert_eq!(PriceFilter::default().to_string(), "all");
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let mut courses = CourseCatalog::sample().courses().to_vec();
        courses.push(courses[0].clone());
        assert!(matches!(
            CourseCatalog::new(courses),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn json_uses_camel_case_and_omits_missing_price() {
        let catalog = CourseCatalog::sample();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json[0]["isFree"], false);
        assert_eq!(json[0]["price"], 89.99);
        assert_eq!(json[0]["enrolledStudents"], 1243);
        assert!(json[2].get("price").is_none());
        assert_eq!(json[3]["difficulty"], "beginner");

        let parsed: CourseCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn load_reads_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.json");
        std::fs::write(
            &path,
            r#"[{"id": "a", "title": "Rust", "instructor": "Ferris", "duration": "1 week",
                 "lessons": 3, "category": "Systems", "difficulty": "advanced", "isFree": true}]"#,
        )
        .unwrap();
        let catalog = CourseCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().difficulty, Difficulty::Advanced);
        assert_eq!(catalog.get("a").unwrap().price, None);
    }
}
