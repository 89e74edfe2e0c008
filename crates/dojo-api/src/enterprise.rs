// Enterprise customer and user endpoints
//
// The enterprise customer is looked up by slug; its UUID scopes every
// catalog and course-request call.

use tracing::debug;

use crate::client::DojoClient;
use crate::error::Error;
use crate::models::{EnterpriseCustomerWire, Paginated, UserWire};

impl DojoClient {
    /// Look up an enterprise customer by slug.
    ///
    /// `GET /enterprise/api/v1/enterprise-customer/?slug={slug}`
    ///
    /// Returns `Ok(None)` when the slug matches no customer.
    pub async fn enterprise_customer(
        &self,
        slug: &str,
    ) -> Result<Option<EnterpriseCustomerWire>, Error> {
        let mut url = self.url("enterprise/api/v1/enterprise-customer/")?;
        url.query_pairs_mut().append_pair("slug", slug);
        debug!(slug, "fetching enterprise customer");
        let page: Paginated<EnterpriseCustomerWire> = self.get(url).await?;
        Ok(page.results.into_iter().find(|c| c.slug == slug))
    }

    /// The user the configured token belongs to.
    ///
    /// `GET /api/user/v1/me`
    pub async fn current_user(&self) -> Result<UserWire, Error> {
        let url = self.url("api/user/v1/me")?;
        debug!("fetching authenticated user");
        self.get(url).await
    }
}
