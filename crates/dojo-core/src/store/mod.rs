// ── Course store ──
//
// Holds the learning path and the catalog, the active catalog filter
// and sort, and the derived visible catalog. Cheaply cloneable; every
// clone sees the same data.

mod collection;

use std::collections::BTreeSet;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tracing::{debug, info};

use self::collection::CourseCollection;
use crate::catalog::{self, CatalogFilter, SortOption, filter};
use crate::error::CoreError;
use crate::model::{Course, CourseId, LearningPath, LearningPathInfo};
use crate::provider::{CourseProvider, CourseRequester, CourseSequence};

#[derive(Clone)]
pub struct CourseStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    learning_path: CourseCollection,
    catalog: CourseCollection,
    path_info: watch::Sender<LearningPathInfo>,
    filter: watch::Sender<CatalogFilter>,
    sorting: watch::Sender<SortOption>,
    /// Catalog after filter + sort, rebuilt on every catalog mutation.
    visible: watch::Sender<CourseSequence>,
    requester: Arc<dyn CourseRequester>,
}

impl CourseStore {
    pub fn new(requester: Arc<dyn CourseRequester>) -> Self {
        let (path_info, _) = watch::channel(LearningPathInfo::default());
        let (filter, _) = watch::channel(CatalogFilter::default());
        let (sorting, _) = watch::channel(SortOption::default());
        let (visible, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            inner: Arc::new(StoreInner {
                learning_path: CourseCollection::new(),
                catalog: CourseCollection::new(),
                path_info,
                filter,
                sorting,
                visible,
                requester,
            }),
        }
    }

    // ── Data refresh ─────────────────────────────────────────────────

    /// Replace the learning path wholesale.
    pub fn apply_learning_path(&self, path: LearningPath) {
        let info = path.info();
        debug!(courses = path.courses.len(), count = info.count, "applying learning path");
        self.inner.learning_path.replace_all(path.courses);
        self.inner.path_info.send_replace(info);
    }

    /// Replace the raw catalog wholesale and re-derive the visible view.
    pub fn apply_catalog(&self, courses: Vec<Course>) {
        debug!(courses = courses.len(), "applying catalog");
        self.inner.catalog.replace_all(courses);
        self.inner.rederive();
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn learning_path_info(&self) -> LearningPathInfo {
        self.inner.path_info.borrow().clone()
    }

    /// Catalog size before filtering.
    pub fn catalog_len(&self) -> usize {
        self.inner.catalog.len()
    }

    /// Look a course up in either collection; the catalog entry wins.
    pub fn course(&self, id: CourseId) -> Option<Arc<Course>> {
        self.inner
            .catalog
            .get(id)
            .or_else(|| self.inner.learning_path.get(id))
    }

    // ── Facets ───────────────────────────────────────────────────────

    /// Distinct language codes across the unfiltered catalog.
    pub fn available_languages(&self) -> Vec<String> {
        self.inner.facet(|c| c.primary_language.as_deref())
    }

    /// Distinct difficulty levels across the unfiltered catalog.
    pub fn available_difficulties(&self) -> Vec<String> {
        self.inner.facet(|c| c.difficulty_level.as_deref())
    }
}

impl StoreInner {
    fn facet(&self, field: impl Fn(&Course) -> Option<&str>) -> Vec<String> {
        let values: BTreeSet<String> = self
            .catalog
            .snapshot()
            .iter()
            .filter_map(|c| field(&**c).and_then(filter::normalize))
            .collect();
        values.into_iter().collect()
    }

    fn rederive(&self) {
        let raw = self.catalog.snapshot();
        let view = catalog::derive_view(&raw, &self.filter.borrow(), *self.sorting.borrow());
        self.visible.send_replace(Arc::new(view));
    }

    /// Flip `user_requested_access` wherever the course appears.
    fn mark_requested(&self, id: CourseId) {
        let in_catalog = self.catalog.update(id, |c| c.user_requested_access = true);
        let in_path = self
            .learning_path
            .update(id, |c| c.user_requested_access = true);
        if in_catalog {
            self.rederive();
        }
        debug!(course = %id, in_catalog, in_path, "marked course as requested");
    }
}

impl CourseProvider for CourseStore {
    fn learning_path(&self) -> CourseSequence {
        self.inner.learning_path.snapshot()
    }

    fn catalog(&self) -> CourseSequence {
        self.inner.visible.borrow().clone()
    }

    fn filter(&self) -> CatalogFilter {
        self.inner.filter.borrow().clone()
    }

    fn apply_filter(&self, filter: CatalogFilter) {
        debug!(?filter, "applying catalog filter");
        self.inner.filter.send_replace(filter);
        self.inner.rederive();
    }

    fn sorting(&self) -> SortOption {
        *self.inner.sorting.borrow()
    }

    fn apply_sort(&self, sort: SortOption) {
        debug!(%sort, "applying catalog sort");
        self.inner.sorting.send_replace(sort);
        self.inner.rederive();
    }

    fn request_course(&self, id: CourseId) -> BoxFuture<'static, Result<(), CoreError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            if !inner.catalog.contains(id) && !inner.learning_path.contains(id) {
                return Err(CoreError::CourseNotFound { id });
            }
            inner.requester.request(id).await?;
            inner.mark_requested(id);
            info!(course = %id, "course access requested");
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{StubRequester, catalog_course, ids};

    fn store(requester: &Arc<StubRequester>) -> CourseStore {
        let requester: Arc<dyn CourseRequester> = requester.clone();
        CourseStore::new(requester)
    }

    #[test]
    fn filter_and_sort_are_visible_immediately() {
        let s = store(&StubRequester::accepting());
        let mut a = catalog_course(1, "Zig");
        a.has_certificate = true;
        let b = catalog_course(2, "Ada");
        let mut c = catalog_course(3, "Go");
        c.has_certificate = true;
        s.apply_catalog(vec![a, b, c]);
        assert_eq!(ids(&s.catalog()), vec![1, 2, 3]);

        s.apply_sort(SortOption::TitleAsc);
        assert_eq!(ids(&s.catalog()), vec![2, 3, 1]);

        s.apply_filter(CatalogFilter::default().with_certificate_only(true));
        assert_eq!(ids(&s.catalog()), vec![3, 1]);
        assert_eq!(s.catalog_len(), 3);
        assert!(s.filter().certificate_only);
        assert_eq!(s.sorting(), SortOption::TitleAsc);
    }

    #[test]
    fn learning_path_replaces_info_and_courses() {
        let s = store(&StubRequester::accepting());
        s.apply_learning_path(LearningPath {
            name: Some("Robotics".into()),
            kickoff_survey: None,
            courses: vec![catalog_course(7, "Kinematics")],
            count: 1,
        });
        assert_eq!(s.learning_path_info().name.as_deref(), Some("Robotics"));
        assert_eq!(ids(&s.learning_path()), vec![7]);
    }

    #[test]
    fn facets_come_from_the_unfiltered_catalog() {
        let s = store(&StubRequester::accepting());
        let mut a = catalog_course(1, "A");
        a.primary_language = Some("ja".into());
        a.difficulty_level = Some("Advanced".into());
        let mut b = catalog_course(2, "B");
        b.primary_language = Some("EN".into());
        b.difficulty_level = Some("beginner".into());
        let mut c = catalog_course(3, "C");
        c.primary_language = Some("en".into());
        s.apply_catalog(vec![a, b, c]);
        s.apply_filter(CatalogFilter::default().with_language("ja"));

        assert_eq!(s.available_languages(), vec!["en", "ja"]);
        assert_eq!(s.available_difficulties(), vec!["advanced", "beginner"]);
    }

    #[tokio::test]
    async fn successful_request_marks_both_collections() {
        let requester = StubRequester::accepting();
        let s = store(&requester);
        s.apply_catalog(vec![catalog_course(4, "SLAM")]);
        s.apply_learning_path(LearningPath {
            courses: vec![catalog_course(4, "SLAM")],
            ..LearningPath::default()
        });

        s.request_course(CourseId::new(4)).await.unwrap();

        assert_eq!(requester.calls(), vec![CourseId::new(4)]);
        assert!(s.catalog()[0].user_requested_access);
        assert!(s.learning_path()[0].user_requested_access);
    }

    #[tokio::test]
    async fn failed_request_leaves_flags_alone() {
        let s = store(&StubRequester::rejecting());
        s.apply_catalog(vec![catalog_course(4, "SLAM")]);

        let err = s.request_course(CourseId::new(4)).await.unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
        assert!(!s.catalog()[0].user_requested_access);
    }

    #[tokio::test]
    async fn unknown_course_is_rejected_locally() {
        let requester = StubRequester::accepting();
        let s = store(&requester);
        let err = s.request_course(CourseId::new(99)).await.unwrap_err();
        assert!(matches!(err, CoreError::CourseNotFound { .. }));
        assert!(requester.calls().is_empty());
    }
}
