// ── Runtime connection configuration ──
//
// These types describe *how* to reach a learner portal. They carry the
// token and connection tuning, but never touch disk. The TUI builds a
// `PortalConfig` (usually via dojo-config) and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use dojo_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development stacks).
    DangerAcceptInvalid,
}

/// Configuration for one learner portal session.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// LMS base URL (e.g. `https://courses.dojo.example.com`).
    pub url: Url,
    /// Enterprise customer whose learner portal is browsed.
    pub enterprise_slug: String,
    /// JWT for the learner. Without one, only public endpoints answer.
    pub token: Option<SecretString>,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl PortalConfig {
    pub fn new(url: Url, enterprise_slug: impl Into<String>) -> Self {
        Self {
            url,
            enterprise_slug: enterprise_slug.into(),
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
            token: self.token.clone(),
        }
    }
}
