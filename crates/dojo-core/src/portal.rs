// ── Learner portal session ──
//
// Lifecycle facade over the HTTP client and the course store: resolves
// the enterprise customer, loads the learner, the learning path and the
// catalog, and reloads them on demand.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use dojo_api::DojoClient;

use crate::config::PortalConfig;
use crate::error::CoreError;
use crate::model::{AuthenticatedUser, Course, EnterpriseCustomer, LearningPath, LearningPathInfo};
use crate::provider::{ApiRequester, CourseProvider};
use crate::store::CourseStore;

/// A connected learner portal. Cheaply cloneable.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: PortalConfig,
    client: DojoClient,
    enterprise: EnterpriseCustomer,
    user: Option<AuthenticatedUser>,
    store: CourseStore,
    /// Non-fatal problems met while connecting.
    warnings: Mutex<Vec<String>>,
}

impl Portal {
    /// Connect and perform the initial load.
    ///
    /// Fails when the enterprise customer is unknown or has no learner
    /// portal, or when either collection cannot be loaded. A missing
    /// user profile only records a warning.
    pub async fn connect(config: PortalConfig) -> Result<Self, CoreError> {
        let client = DojoClient::new(config.url.as_str(), &config.transport())?;
        let slug = config.enterprise_slug.clone();

        let enterprise = match client.enterprise_customer(&slug).await {
            Ok(Some(wire)) => EnterpriseCustomer::from(wire),
            Ok(None) => return Err(CoreError::EnterpriseNotFound { slug }),
            Err(e) if e.is_not_found() => return Err(CoreError::EnterpriseNotFound { slug }),
            Err(e) => return Err(e.into()),
        };
        if !enterprise.learner_portal_enabled {
            warn!(%slug, "enterprise customer has the learner portal disabled");
            return Err(CoreError::EnterpriseNotFound { slug });
        }
        debug!(uuid = %enterprise.uuid, name = %enterprise.name, "resolved enterprise customer");

        let mut warnings = Vec::new();
        let user = match client.current_user().await {
            Ok(wire) => Some(AuthenticatedUser::from(wire)),
            Err(e) => {
                let msg = format!("Could not load your profile: {e}");
                warn!("{msg}");
                warnings.push(msg);
                None
            }
        };

        let requester = ApiRequester::new(client.clone(), enterprise.uuid);
        let store = CourseStore::new(Arc::new(requester));

        let portal = Self {
            inner: Arc::new(PortalInner {
                config,
                client,
                enterprise,
                user,
                store,
                warnings: Mutex::new(warnings),
            }),
        };
        portal.refresh().await?;
        info!(enterprise = %portal.inner.enterprise.slug, "learner portal connected");
        Ok(portal)
    }

    /// Reload the learning path and the catalog concurrently.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let client = &self.inner.client;
        let (path, catalog) = tokio::try_join!(
            client.learning_path(),
            client.catalog(self.inner.enterprise.uuid),
        )?;

        let path = LearningPath::from(path);
        let catalog: Vec<Course> = catalog.courses_metadata.into_iter().map(Course::from).collect();
        debug!(
            learning_path = path.courses.len(),
            catalog = catalog.len(),
            "portal data loaded"
        );
        self.inner.store.apply_learning_path(path);
        self.inner.store.apply_catalog(catalog);
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    pub fn enterprise(&self) -> &EnterpriseCustomer {
        &self.inner.enterprise
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.inner.user.as_ref()
    }

    pub fn store(&self) -> &CourseStore {
        &self.inner.store
    }

    /// The store as a provider handle for a `DashboardController`.
    pub fn provider(&self) -> Arc<dyn CourseProvider> {
        Arc::new(self.inner.store.clone())
    }

    pub fn learning_path_info(&self) -> LearningPathInfo {
        self.inner.store.learning_path_info()
    }

    /// Drain warnings accumulated during connect.
    pub async fn take_warnings(&self) -> Vec<String> {
        std::mem::take(&mut *self.inner.warnings.lock().await)
    }
}

impl std::fmt::Debug for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("url", &self.inner.config.url.as_str())
            .field("enterprise", &self.inner.enterprise.slug)
            .finish_non_exhaustive()
    }
}
