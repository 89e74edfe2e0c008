//! View-state and data layer between `dojo-api` and the learner dashboard.
//!
//! - **[`Portal`]** — Session facade: [`connect()`](Portal::connect)
//!   resolves the enterprise customer, loads the learner, the learning
//!   path and the catalog, and [`refresh()`](Portal::refresh) reloads them.
//!
//! - **[`CourseStore`]** — Reactive storage for both collections, built
//!   on `CourseCollection` (`DashMap` + `tokio::sync::watch`). Implements
//!   [`CourseProvider`], the seam the dashboard reads courses through.
//!
//! - **[`DashboardController`]** — Derives the active catalog page, the
//!   drawer selection, and each course's call to action; runs the
//!   request-access state machine and emits [`Toast`]s.
//!
//! - **[`Location`]** — A navigable address whose query string carries
//!   page, filter and sort ([`QuerySync`]), with back/forward history and
//!   optional persistence across restarts.
//!
//! - **[`KeyValueStore`]** — Small client-side flag store used for the
//!   one-time onboarding walkthrough.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod cta;
pub mod dashboard;
pub mod details;
pub mod error;
pub mod kv;
pub mod location;
pub mod model;
pub mod notify;
pub mod pagination;
pub mod portal;
pub mod provider;
pub mod store;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{CatalogFilter, FilterChip, SortOption};
pub use config::{PortalConfig, TlsVerification};
pub use cta::{CallToAction, resolve_call_to_action};
pub use dashboard::{
    ActiveSelection, CourseCard, CourseSource, CtaEffect, DashboardController, DashboardView,
    DrawerView, PendingRequest, RequestCompletion, RequestOutcome, RequestState, RequestTicket,
};
pub use details::DetailRow;
pub use error::CoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use location::{Location, QuerySync};
pub use notify::{NotificationSink, Toast, ToastKind};
pub use portal::Portal;
pub use provider::{ApiRequester, CourseProvider, CourseRequester, CourseSequence};
pub use store::CourseStore;

pub use model::{
    AuthenticatedUser, Course, CourseId, EnterpriseCustomer, LearningPath, LearningPathInfo,
};
