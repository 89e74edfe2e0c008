// ── Call-to-action resolution ──
//
// Every course card and the drawer show exactly one primary action,
// picked by a fixed priority over the course's enrollment flags.

use url::Url;

use crate::model::Course;

/// The primary action offered for a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallToAction {
    /// Enrolled: open the course.
    StartCourse { link: Url },
    /// In the learning path but not yet started: open the kickoff survey.
    /// `survey` is `None` when the learning path has no survey configured.
    StartSurvey { survey: Option<Url> },
    /// Access already requested: only an informational toast.
    AccessRequested,
    /// Offer a course request. `loading` while one is in flight.
    RequestAccess { loading: bool },
}

impl CallToAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StartCourse { .. } => "Start course",
            Self::StartSurvey { .. } => "Start learning survey",
            Self::AccessRequested => "Access requested",
            Self::RequestAccess { loading: false } => "Request access",
            Self::RequestAccess { loading: true } => "Requesting…",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::RequestAccess { loading: true })
    }
}

/// Pick the action for `course`. Pure; the same inputs always give the
/// same answer.
pub fn resolve_call_to_action(
    course: &Course,
    kickoff_survey: Option<&Url>,
    requesting: bool,
) -> CallToAction {
    if course.is_launchable() {
        if let Some(ref link) = course.course_link {
            return CallToAction::StartCourse { link: link.clone() };
        }
    }
    if course.in_learning_path {
        return CallToAction::StartSurvey {
            survey: kickoff_survey.cloned(),
        };
    }
    if course.user_requested_access {
        return CallToAction::AccessRequested;
    }
    CallToAction::RequestAccess {
        loading: requesting,
    }
}
