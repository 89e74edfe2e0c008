// ── Dashboard view-state controller ──
//
// Owns everything the dashboard derives from its collaborators: the
// active catalog page, the course shown in the drawer, and the state of
// the one course-access request that may be in flight. All operations
// are synchronous (`&mut self`) except the request itself, which is
// handed to the caller as a `PendingRequest` to run wherever it likes.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::catalog::{CatalogFilter, FilterChip, SortOption};
use crate::cta::{CallToAction, resolve_call_to_action};
use crate::details::{DetailRow, course_details};
use crate::error::CoreError;
use crate::location::{self, QuerySync, keys};
use crate::model::{Course, CourseId};
use crate::notify::{NotificationSink, Toast};
use crate::pagination;
use crate::provider::CourseProvider;

// ── Selection ────────────────────────────────────────────────────────

/// Which collection a course was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseSource {
    LearningPath,
    Catalog,
}

/// The course whose drawer is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveSelection {
    LearningPath(CourseId),
    Catalog(CourseId),
}

impl ActiveSelection {
    pub fn new(id: CourseId, source: CourseSource) -> Self {
        match source {
            CourseSource::LearningPath => Self::LearningPath(id),
            CourseSource::Catalog => Self::Catalog(id),
        }
    }

    pub fn id(self) -> CourseId {
        match self {
            Self::LearningPath(id) | Self::Catalog(id) => id,
        }
    }

    pub fn source(self) -> CourseSource {
        match self {
            Self::LearningPath(_) => CourseSource::LearningPath,
            Self::Catalog(_) => CourseSource::Catalog,
        }
    }
}

// ── Request state machine ────────────────────────────────────────────

/// Identifies one course request so late completions can be told apart
/// from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    Failure,
}

/// `Idle → Requesting → Settled`, and `Settled → Requesting` on the
/// next trigger. At most one request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Requesting {
        ticket: RequestTicket,
        course: CourseId,
    },
    Settled(RequestOutcome),
}

/// A course request that has been started but not yet awaited.
pub struct PendingRequest {
    ticket: RequestTicket,
    course: CourseId,
    future: BoxFuture<'static, Result<(), CoreError>>,
    cancel: CancellationToken,
}

/// The result of a [`PendingRequest`], to hand back to
/// [`DashboardController::settle_request`].
#[derive(Debug, Clone)]
pub struct RequestCompletion {
    pub ticket: RequestTicket,
    pub course: CourseId,
    pub result: Result<(), CoreError>,
}

impl PendingRequest {
    pub fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    pub fn course(&self) -> CourseId {
        self.course
    }

    /// Drive the request to completion. Resolves to `None` when the
    /// controller that issued it has been dropped in the meantime.
    pub async fn run(self) -> Option<RequestCompletion> {
        let Self {
            ticket,
            course,
            future,
            cancel,
        } = self;
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(%course, "dashboard gone; dropping course request completion");
                None
            }
            result = future => Some(RequestCompletion { ticket, course, result }),
        }
    }
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequest")
            .field("ticket", &self.ticket)
            .field("course", &self.course)
            .finish_non_exhaustive()
    }
}

/// The side effect a triggered call to action asks the caller to run.
#[derive(Debug)]
pub enum CtaEffect {
    /// Open this address in the system browser.
    Open(Url),
    /// Await this request, then pass the completion to `settle_request`.
    Request(PendingRequest),
}

// ── View ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CourseCard {
    pub course: Arc<Course>,
    pub cta: CallToAction,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct DrawerView {
    pub course: Arc<Course>,
    pub source: CourseSource,
    pub details: Vec<DetailRow>,
    pub cta: CallToAction,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub learning_path: Vec<CourseCard>,
    /// Cards on the current catalog page.
    pub catalog: Vec<CourseCard>,
    /// Catalog size after filtering, across all pages.
    pub catalog_total: usize,
    pub page: usize,
    /// 0 for an empty catalog.
    pub page_count: usize,
    pub page_size: usize,
    pub filter: CatalogFilter,
    pub filter_chips: Vec<FilterChip>,
    pub sort: SortOption,
    pub drawer: Option<DrawerView>,
    pub requesting: bool,
}

impl DashboardView {
    /// Pagination controls only appear with more than one page.
    pub fn show_pagination(&self) -> bool {
        self.page_count > 1
    }
}

// ── Controller ───────────────────────────────────────────────────────

pub struct DashboardController {
    provider: Arc<dyn CourseProvider>,
    location: Arc<dyn QuerySync>,
    notifications: Arc<dyn NotificationSink>,
    kickoff_survey: Option<Url>,
    page: usize,
    page_size: usize,
    selection: Option<ActiveSelection>,
    request: RequestState,
    next_ticket: u64,
    /// Cancelled on drop so in-flight requests stop reporting back.
    cancel: CancellationToken,
}

impl DashboardController {
    /// Build a controller and restore page, page size, filter and sort
    /// from the current location.
    pub fn new(
        provider: Arc<dyn CourseProvider>,
        location: Arc<dyn QuerySync>,
        notifications: Arc<dyn NotificationSink>,
        kickoff_survey: Option<Url>,
    ) -> Self {
        let mut controller = Self {
            provider,
            location,
            notifications,
            kickoff_survey,
            page: 1,
            page_size: location::DEFAULT_PAGE_SIZE,
            selection: None,
            request: RequestState::Idle,
            next_ticket: 0,
            cancel: CancellationToken::new(),
        };
        controller.restore_from_location();
        controller
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of catalog pages; 0 when the filtered catalog is empty.
    pub fn page_count(&self) -> usize {
        pagination::page_count(self.provider.catalog().len(), self.page_size)
    }

    pub fn selection(&self) -> Option<ActiveSelection> {
        self.selection
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.request, RequestState::Requesting { .. })
    }

    pub fn kickoff_survey(&self) -> Option<&Url> {
        self.kickoff_survey.as_ref()
    }

    pub fn set_kickoff_survey(&mut self, survey: Option<Url>) {
        self.kickoff_survey = survey;
    }

    pub fn filter(&self) -> CatalogFilter {
        self.provider.filter()
    }

    pub fn sorting(&self) -> SortOption {
        self.provider.sorting()
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Open the drawer for `id`. An id missing from `source` is kept
    /// but resolves to no active course.
    pub fn select_course(&mut self, id: CourseId, source: CourseSource) {
        debug!(course = %id, ?source, "course selected");
        self.selection = Some(ActiveSelection::new(id, source));
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            debug!("selection cleared");
        }
    }

    /// The selected course, looked up in the collection it was opened
    /// from.
    pub fn active_course(&self) -> Option<Arc<Course>> {
        let selection = self.selection?;
        let collection = match selection.source() {
            CourseSource::LearningPath => self.provider.learning_path(),
            CourseSource::Catalog => self.provider.catalog(),
        };
        collection.iter().find(|c| c.id == selection.id()).cloned()
    }

    // ── Pagination ───────────────────────────────────────────────────

    /// Go to page `requested`, clamped into the valid range, and record
    /// it in the location. Returns the page actually shown.
    pub fn set_page(&mut self, requested: i64) -> usize {
        let total = self.provider.catalog().len();
        let page = pagination::clamp_page(requested, total, self.page_size);
        if i64::try_from(page).ok() != Some(requested) {
            debug!(requested, page, "page request clamped");
        }
        self.page = page;
        self.location.write(keys::PAGE, &page.to_string());
        page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(i64::try_from(self.page).unwrap_or(i64::MAX).saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(i64::try_from(self.page).unwrap_or(i64::MAX).saturating_sub(1))
    }

    // ── Filter and sort ──────────────────────────────────────────────

    /// Replace the catalog filter. Resets to the first page and closes
    /// the drawer if its course was filtered out.
    pub fn apply_filter(&mut self, filter: CatalogFilter) {
        let mut changes = location::filter_to_params(&filter);
        self.provider.apply_filter(filter);
        self.page = 1;
        changes.push((keys::PAGE, Some("1".to_owned())));
        self.location.apply(&changes);
        self.drop_stale_selection();
    }

    pub fn remove_filter_chip(&mut self, chip: &FilterChip) {
        let next = self.provider.filter().without(chip);
        self.apply_filter(next);
    }

    pub fn clear_filters(&mut self) {
        self.apply_filter(CatalogFilter::default());
    }

    /// Change the catalog order. Resets to the first page.
    pub fn apply_sort(&mut self, sort: SortOption) {
        self.provider.apply_sort(sort);
        self.page = 1;
        self.location.apply(&[
            location::sort_to_param(sort),
            (keys::PAGE, Some("1".to_owned())),
        ]);
        self.drop_stale_selection();
    }

    // ── Call to action ───────────────────────────────────────────────

    /// The call to action for `course` given the current request state.
    pub fn call_to_action(&self, course: &Course) -> CallToAction {
        resolve_call_to_action(course, self.kickoff_survey.as_ref(), self.is_requesting())
    }

    /// Run the active course's call to action.
    ///
    /// Opening links and starting requests are returned as effects for
    /// the caller to carry out; toast-only actions happen here and
    /// return `None`.
    pub fn trigger_call_to_action(&mut self) -> Option<CtaEffect> {
        let course = self.active_course()?;
        match self.call_to_action(&course) {
            CallToAction::StartCourse { link } => {
                info!(course = %course.id, "starting course");
                Some(CtaEffect::Open(link))
            }
            CallToAction::StartSurvey { survey: Some(survey) } => {
                info!(course = %course.id, "opening kickoff survey");
                Some(CtaEffect::Open(survey))
            }
            CallToAction::StartSurvey { survey: None } => {
                warn!(course = %course.id, "learning path has no kickoff survey");
                None
            }
            CallToAction::AccessRequested => {
                self.notifications.notify(Toast::already_requested());
                None
            }
            CallToAction::RequestAccess { loading: true } => {
                debug!(course = %course.id, "request already in flight; ignoring trigger");
                None
            }
            CallToAction::RequestAccess { loading: false } => {
                Some(CtaEffect::Request(self.start_request(course.id)))
            }
        }
    }

    fn start_request(&mut self, course: CourseId) -> PendingRequest {
        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        self.request = RequestState::Requesting { ticket, course };
        debug!(%course, ticket = ticket.0, "course request started");
        PendingRequest {
            ticket,
            course,
            future: self.provider.request_course(course),
            cancel: self.cancel.clone(),
        }
    }

    /// Record the outcome of a request started by
    /// [`trigger_call_to_action`](Self::trigger_call_to_action).
    ///
    /// Emits exactly one toast for the current request. Completions for
    /// any other ticket are ignored.
    pub fn settle_request(&mut self, completion: RequestCompletion) {
        let RequestState::Requesting { ticket, .. } = self.request else {
            debug!(course = %completion.course, "no request in flight; ignoring completion");
            return;
        };
        if ticket != completion.ticket {
            debug!(course = %completion.course, "stale request completion ignored");
            return;
        }

        match completion.result {
            Ok(()) => {
                info!(course = %completion.course, "course request accepted");
                self.request = RequestState::Settled(RequestOutcome::Success);
                self.notifications.notify(Toast::request_sent());
            }
            Err(e) => {
                warn!(course = %completion.course, error = %e, "course request failed");
                self.request = RequestState::Settled(RequestOutcome::Failure);
                self.notifications.notify(Toast::request_failed());
            }
        }
    }

    // ── Re-derivation ────────────────────────────────────────────────

    /// Re-derive after the provider's data changed underneath: keep the
    /// page in range and close the drawer if its course disappeared.
    pub fn refresh(&mut self) {
        let total = self.provider.catalog().len();
        let page = pagination::clamp_page(
            i64::try_from(self.page).unwrap_or(i64::MAX),
            total,
            self.page_size,
        );
        if page != self.page {
            debug!(from = self.page, to = page, "page re-clamped after refresh");
            self.page = page;
            self.location.write(keys::PAGE, &page.to_string());
        }
        self.drop_stale_selection();
    }

    /// Re-read page, page size, filter and sort from the location, e.g.
    /// after back/forward navigation. An out-of-range page reads as 1.
    pub fn restore_from_location(&mut self) {
        let params = self.location.read(keys::ALL);
        let get = |key: &str| params.get(key).map(String::as_str);

        self.page_size = location::parse_page_size(get(keys::PAGE_SIZE));

        let filter = location::filter_from_params(&params);
        if filter != self.provider.filter() {
            self.provider.apply_filter(filter);
        }
        let sort = location::sort_from_params(&params);
        if sort != self.provider.sorting() {
            self.provider.apply_sort(sort);
        }

        let requested = location::parse_page(get(keys::PAGE));
        let last = pagination::last_page(self.provider.catalog().len(), self.page_size);
        self.page = if requested > last {
            debug!(requested, last, "restored page out of range");
            1
        } else {
            requested
        };
        self.drop_stale_selection();
    }

    /// Clear the selection when its course left its source collection.
    fn drop_stale_selection(&mut self) {
        if self.selection.is_some() && self.active_course().is_none() {
            debug!(selection = ?self.selection, "selected course no longer available");
            self.selection = None;
        }
    }

    // ── View ─────────────────────────────────────────────────────────

    pub fn view(&self) -> DashboardView {
        let selected = self.selection;
        let card = |course: &Arc<Course>, source: CourseSource| CourseCard {
            course: Arc::clone(course),
            cta: self.call_to_action(course),
            selected: selected == Some(ActiveSelection::new(course.id, source)),
        };

        let learning_path = self
            .provider
            .learning_path()
            .iter()
            .map(|c| card(c, CourseSource::LearningPath))
            .collect();

        let catalog = self.provider.catalog();
        let range = pagination::page_range(self.page, catalog.len(), self.page_size);
        let page_cards = catalog
            .get(range)
            .unwrap_or_default()
            .iter()
            .map(|c| card(c, CourseSource::Catalog))
            .collect();

        let drawer = selected.and_then(|selection| {
            let course = self.active_course()?;
            Some(DrawerView {
                details: course_details(&course),
                cta: self.call_to_action(&course),
                source: selection.source(),
                course,
            })
        });

        let filter = self.provider.filter();
        DashboardView {
            learning_path,
            catalog: page_cards,
            catalog_total: catalog.len(),
            page: self.page,
            page_count: pagination::page_count(catalog.len(), self.page_size),
            page_size: self.page_size,
            filter_chips: filter.active_chips(),
            filter,
            sort: self.provider.sorting(),
            drawer,
            requesting: self.is_requesting(),
        }
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
