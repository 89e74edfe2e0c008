// Learning path, catalog, and course-request endpoints

use tracing::debug;
use uuid::Uuid;

use crate::client::DojoClient;
use crate::error::Error;
use crate::models::{CatalogResponse, CourseRequestBody, LearningPathWire};

impl DojoClient {
    /// The authenticated learner's personalized learning path.
    ///
    /// `GET /dojo/api/v1/learning-path/`
    pub async fn learning_path(&self) -> Result<LearningPathWire, Error> {
        let url = self.url("dojo/api/v1/learning-path/")?;
        debug!("fetching learning path");
        self.get(url).await
    }

    /// The enterprise course catalog.
    ///
    /// `GET /dojo/api/v1/enterprise/{uuid}/catalog/`
    pub async fn catalog(&self, enterprise: Uuid) -> Result<CatalogResponse, Error> {
        let url = self.url(&format!("dojo/api/v1/enterprise/{enterprise}/catalog/"))?;
        debug!(%enterprise, "fetching course catalog");
        self.get(url).await
    }

    /// Ask Dojo staff to provision access to a catalog course.
    ///
    /// `POST /dojo/api/v1/enterprise/{uuid}/course-requests/` with `{"course_id": N}`
    pub async fn request_course(&self, enterprise: Uuid, course_id: u64) -> Result<(), Error> {
        let url = self.url(&format!(
            "dojo/api/v1/enterprise/{enterprise}/course-requests/"
        ))?;
        debug!(%enterprise, course_id, "requesting course access");
        self.post_unit(url, &CourseRequestBody { course_id }).await
    }
}
