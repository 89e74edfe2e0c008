// ── Learning path and session types ──

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::course::Course;

/// The learner's personalized, pre-assigned set of courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningPath {
    pub name: Option<String>,
    /// Survey every learner fills in before starting their path.
    pub kickoff_survey: Option<Url>,
    pub courses: Vec<Course>,
    /// Number of courses the backend reports as available for kick-off.
    pub count: u32,
}

/// Learning path metadata without the courses (those live in the store).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathInfo {
    pub name: Option<String>,
    pub kickoff_survey: Option<Url>,
    pub count: u32,
}

impl LearningPath {
    pub fn info(&self) -> LearningPathInfo {
        LearningPathInfo {
            name: self.name.clone(),
            kickoff_survey: self.kickoff_survey.clone(),
            count: self.count,
        }
    }
}

impl LearningPathInfo {
    /// `"1 course"` / `"3 courses"`.
    pub fn count_label(&self) -> String {
        if self.count == 1 {
            "1 course".into()
        } else {
            format!("{} courses", self.count)
        }
    }
}

/// The organisation whose learner portal is being browsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseCustomer {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub learner_portal_enabled: bool,
}

/// The user the configured token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub name: Option<String>,
}

impl AuthenticatedUser {
    /// First word of the full name, if one is known.
    pub fn first_name(&self) -> Option<&str> {
        self.name.as_deref()?.split_whitespace().next()
    }

    /// `"Welcome, Ada!"`, or `"Welcome!"` when no name is known.
    pub fn greeting(user: Option<&Self>) -> String {
        match user.and_then(Self::first_name) {
            Some(first) => format!("Welcome, {first}!"),
            None => "Welcome!".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_pluralizes() {
        let mut info = LearningPathInfo::default();
        assert_eq!(info.count_label(), "0 courses");
        info.count = 1;
        assert_eq!(info.count_label(), "1 course");
        info.count = 4;
        assert_eq!(info.count_label(), "4 courses");
    }

    #[test]
    fn greeting_uses_first_name() {
        let user = AuthenticatedUser {
            username: "ada".into(),
            name: Some("Ada Lovelace".into()),
        };
        assert_eq!(AuthenticatedUser::greeting(Some(&user)), "Welcome, Ada!");

        let anonymous = AuthenticatedUser {
            username: "ada".into(),
            name: Some("  ".into()),
        };
        assert_eq!(AuthenticatedUser::greeting(Some(&anonymous)), "Welcome!");
        assert_eq!(AuthenticatedUser::greeting(None), "Welcome!");
    }
}
