// ── API-to-domain type conversions ──
//
// Bridges raw `dojo_api` response types into canonical `dojo_core::model`
// domain types. Blank strings become `None`, unparseable links are
// dropped, and `null` flags default to `false`.

use tracing::warn;
use url::Url;

use dojo_api::{CourseWire, EnterpriseCustomerWire, LearningPathWire, UserWire};

use crate::model::{AuthenticatedUser, Course, CourseId, EnterpriseCustomer, LearningPath};

// ── Helpers ────────────────────────────────────────────────────────

/// Trim a string, mapping blanks to `None`.
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Parse an optional URL string, logging and dropping invalid values.
fn parse_link(raw: Option<String>, field: &'static str) -> Option<Url> {
    let raw = non_blank(raw)?;
    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(field, value = %raw, error = %e, "ignoring unparseable link");
            None
        }
    }
}

// ── Conversions ────────────────────────────────────────────────────

impl From<CourseWire> for Course {
    fn from(w: CourseWire) -> Self {
        Self {
            id: CourseId::new(w.id),
            title: w.title,
            hours_required: w.hours_required.filter(|h| h.is_finite() && *h > 0.0),
            primary_language: non_blank(w.primary_language),
            difficulty_level: non_blank(w.difficulty_level),
            has_certificate: w.has_certificate.unwrap_or(false),
            subtitles_available: w.subtitles_available.unwrap_or(false),
            prerequisites: non_blank(w.prerequisites),
            full_description: non_blank(w.full_description),
            edx_course_id: non_blank(w.edx_course_id),
            course_link: parse_link(w.course_link, "course_link"),
            in_learning_path: w.in_learning_path.unwrap_or(false),
            user_requested_access: w.user_requested_access.unwrap_or(false),
        }
    }
}

impl From<LearningPathWire> for LearningPath {
    fn from(w: LearningPathWire) -> Self {
        let courses: Vec<Course> = w.courses.into_iter().map(Course::from).collect();
        let count = w
            .count
            .unwrap_or_else(|| u32::try_from(courses.len()).unwrap_or(u32::MAX));
        Self {
            name: non_blank(w.learning_path_name),
            kickoff_survey: parse_link(w.kickoff_survey, "kickoff_survey"),
            courses,
            count,
        }
    }
}

impl From<EnterpriseCustomerWire> for EnterpriseCustomer {
    fn from(w: EnterpriseCustomerWire) -> Self {
        Self {
            uuid: w.uuid,
            name: w.name,
            slug: w.slug,
            learner_portal_enabled: w.enable_learner_portal,
        }
    }
}

impl From<UserWire> for AuthenticatedUser {
    fn from(w: UserWire) -> Self {
        Self {
            username: w.username,
            name: non_blank(w.name),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: serde_json::Value) -> CourseWire {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn course_defaults_null_flags_to_false() {
        let course = Course::from(wire(json!({
            "id": 3,
            "title": "Safety Cases",
            "has_certificate": null,
            "in_learning_path": null
        })));
        assert_eq!(course.id, CourseId::new(3));
        assert!(!course.has_certificate);
        assert!(!course.in_learning_path);
        assert!(!course.user_requested_access);
    }

    #[test]
    fn course_blank_strings_become_none() {
        let course = Course::from(wire(json!({
            "id": 3,
            "title": "Safety Cases",
            "prerequisites": "   ",
            "edx_course_id": "",
            "course_link": "not a link"
        })));
        assert!(course.prerequisites.is_none());
        assert!(course.edx_course_id.is_none());
        assert!(course.course_link.is_none());
    }

    #[test]
    fn course_drops_nonsense_hours() {
        let course = Course::from(wire(json!({ "id": 1, "title": "x", "hours_required": 0.0 })));
        assert!(course.hours_required.is_none());
        let course = Course::from(wire(json!({ "id": 1, "title": "x", "hours_required": 6.0 })));
        assert_eq!(course.hours_required, Some(6.0));
    }

    #[test]
    fn learning_path_count_falls_back_to_course_len() {
        let path: LearningPathWire = serde_json::from_value(json!({
            "learning_path_name": "Foundations",
            "kickoff_survey": "https://survey.test/k",
            "courses": [{ "id": 1, "title": "a" }, { "id": 2, "title": "b" }]
        }))
        .unwrap();
        let path = LearningPath::from(path);
        assert_eq!(path.count, 2);
        assert_eq!(path.kickoff_survey.unwrap().as_str(), "https://survey.test/k");
    }
}
