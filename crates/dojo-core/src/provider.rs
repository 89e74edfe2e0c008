// ── Course collection provider ──
//
// The seam between the dashboard controller and wherever courses come
// from. The controller only ever sees this trait; `CourseStore`
// implements it over the remote API, tests implement it in memory.

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::debug;
use uuid::Uuid;

use dojo_api::DojoClient;

use crate::catalog::{CatalogFilter, SortOption};
use crate::error::CoreError;
use crate::model::{Course, CourseId};

/// An ordered, immutable view of a collection.
pub type CourseSequence = Arc<Vec<Arc<Course>>>;

/// Supplies the two dashboard collections and the handles that mutate
/// the catalog view.
///
/// `apply_filter` and `apply_sort` are synchronous: the next call to
/// [`catalog()`](Self::catalog) observes the new criteria.
pub trait CourseProvider: Send + Sync {
    /// Learning path courses, in backend order.
    fn learning_path(&self) -> CourseSequence;

    /// Catalog courses after the active filter and sort are applied.
    fn catalog(&self) -> CourseSequence;

    fn filter(&self) -> CatalogFilter;

    fn apply_filter(&self, filter: CatalogFilter);

    fn sorting(&self) -> SortOption;

    fn apply_sort(&self, sort: SortOption);

    /// Ask for access to a course. Resolves once the backend has
    /// acknowledged or rejected the request.
    fn request_course(&self, id: CourseId) -> BoxFuture<'static, Result<(), CoreError>>;
}

/// Sends course-access requests somewhere.
pub trait CourseRequester: Send + Sync {
    fn request(&self, id: CourseId) -> BoxFuture<'static, Result<(), CoreError>>;
}

/// Course requests against the learner-portal API, scoped to one
/// enterprise customer.
#[derive(Debug, Clone)]
pub struct ApiRequester {
    client: DojoClient,
    enterprise: Uuid,
}

impl ApiRequester {
    pub fn new(client: DojoClient, enterprise: Uuid) -> Self {
        Self { client, enterprise }
    }
}

impl CourseRequester for ApiRequester {
    fn request(&self, id: CourseId) -> BoxFuture<'static, Result<(), CoreError>> {
        let client = self.client.clone();
        let enterprise = self.enterprise;
        async move {
            debug!(course = %id, %enterprise, "posting course request");
            client.request_course(enterprise, id.get()).await?;
            Ok(())
        }
        .boxed()
    }
}
