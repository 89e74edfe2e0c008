// ── Course domain type ──

use serde::{Deserialize, Serialize};
use url::Url;

use super::course_id::CourseId;

/// A course as shown on a dashboard card and in the detail drawer.
///
/// Equality is identity: two `Course` values are equal when their ids
/// match, even if enrollment flags differ between snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub hours_required: Option<f64>,
    /// ISO 639-1 code (e.g. `"en"`, `"ja"`).
    pub primary_language: Option<String>,
    pub difficulty_level: Option<String>,
    pub has_certificate: bool,
    pub subtitles_available: bool,
    pub prerequisites: Option<String>,
    pub full_description: Option<String>,

    // ── Enrollment / progress flags ──
    pub edx_course_id: Option<String>,
    pub course_link: Option<Url>,
    pub in_learning_path: bool,
    pub user_requested_access: bool,
}

impl Course {
    /// A bare course with only an id and title; every flag unset.
    pub fn new(id: impl Into<CourseId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hours_required: None,
            primary_language: None,
            difficulty_level: None,
            has_certificate: false,
            subtitles_available: false,
            prerequisites: None,
            full_description: None,
            edx_course_id: None,
            course_link: None,
            in_learning_path: false,
            user_requested_access: false,
        }
    }

    /// The learner is enrolled and the course can be launched directly.
    pub fn is_launchable(&self) -> bool {
        self.edx_course_id.as_deref().is_some_and(|s| !s.is_empty()) && self.course_link.is_some()
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_id() {
        let a = Course::new(1, "Rust");
        let mut b = Course::new(1, "Rust (2nd edition)");
        b.user_requested_access = true;
        assert_eq!(a, b);
        assert_ne!(a, Course::new(2, "Rust"));
    }

    #[test]
    fn launchable_needs_both_id_and_link() {
        let mut course = Course::new(7, "Perception");
        course.edx_course_id = Some("course-v1:Dojo+P101".into());
        assert!(!course.is_launchable());

        course.course_link = Some(Url::parse("http://a").unwrap());
        assert!(course.is_launchable());

        course.edx_course_id = Some(String::new());
        assert!(!course.is_launchable());
    }
}
