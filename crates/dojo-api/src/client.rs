// Learner-portal HTTP client
//
// Wraps `reqwest::Client` with base-URL joining and status/JSON handling.
// Endpoint groups (enterprise, courses) are implemented as inherent
// methods in separate files to keep this module focused on transport.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for the learner-portal backend.
///
/// All paths are resolved against the LMS base URL. Responses are
/// plain JSON bodies; non-2xx statuses are mapped to [`Error`] variants
/// before the caller sees them.
#[derive(Debug, Clone)]
pub struct DojoClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DojoClient {
    /// Create a client for `base_url` (e.g. `https://learn.example.com`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
        })
    }

    /// The LMS base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (no leading slash) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::parse_json(resp).await
    }

    /// POST a JSON body; the response body is ignored beyond its status.
    pub(crate) async fn post_unit(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::check_status(resp).await.map(|_| ())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_owned();
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Err(Error::Authentication {
                message: "token expired or invalid (HTTP 401)".into(),
            }),
            reqwest::StatusCode::FORBIDDEN => Err(Error::Authentication {
                message: "insufficient permissions (HTTP 403)".into(),
            }),
            reqwest::StatusCode::NOT_FOUND => Err(Error::NotFound { path }),
            _ => {
                let body = resp.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                Err(Error::Api {
                    status: status.as_u16(),
                    message: preview,
                })
            }
        }
    }

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            DojoClient::with_client(reqwest::Client::new(), "https://lms.test/sub").unwrap();
        assert_eq!(client.base_url().as_str(), "https://lms.test/sub/");
        assert_eq!(
            client.url("/dojo/api/v1/learning-path/").unwrap().as_str(),
            "https://lms.test/sub/dojo/api/v1/learning-path/"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = DojoClient::with_client(reqwest::Client::new(), "not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
