// Wire types for the learner-portal backend.
//
// These mirror the JSON exactly; `dojo-core` converts them into
// canonical domain types. Flags are `Option` because the backend sends
// `null` for unknown values on older course records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Django REST framework style paginated envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnterpriseCustomerWire {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub enable_learner_portal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWire {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseWire {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub hours_required: Option<f64>,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub has_certificate: Option<bool>,
    #[serde(default)]
    pub subtitles_available: Option<bool>,
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub edx_course_id: Option<String>,
    #[serde(default)]
    pub course_link: Option<String>,
    #[serde(default)]
    pub in_learning_path: Option<bool>,
    #[serde(default)]
    pub user_requested_access: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPathWire {
    #[serde(default)]
    pub learning_path_name: Option<String>,
    #[serde(default)]
    pub kickoff_survey: Option<String>,
    #[serde(default)]
    pub courses: Vec<CourseWire>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub courses_metadata: Vec<CourseWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRequestBody {
    pub course_id: u64,
}
