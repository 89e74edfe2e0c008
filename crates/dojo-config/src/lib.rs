//! Configuration for the Dojo learner dashboard.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), state
//! file locations, and translation to `dojo_core::PortalConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dojo_core::{PortalConfig, TlsVerification};

const KEYRING_SERVICE: &str = "dojo";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named portal profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Profile `name`, or the default profile when `name` is `None`.
    pub fn profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|p| (name, p))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Catalog cards per page when the location does not say otherwise.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Seconds a toast stays on screen.
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
            page_size: default_page_size(),
            toast_secs: default_toast_secs(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> usize {
    12
}
fn default_toast_secs() -> u64 {
    5
}

/// A named learner portal profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// LMS base URL (e.g., "https://courses.dojo.example.com").
    pub lms_url: String,

    /// Enterprise customer slug.
    pub enterprise_slug: String,

    /// JWT (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the JWT.
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "dojo", "dojo-learner")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for the persisted dashboard location and key-value flags.
pub fn state_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/state"),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_local_dir())
                .to_path_buf()
        },
    )
}

/// Persisted dashboard location for one profile.
pub fn location_path(profile_name: &str) -> PathBuf {
    state_dir().join(format!("{profile_name}.location"))
}

/// Key-value flag store shared by every profile.
pub fn kv_path() -> PathBuf {
    state_dir().join("flags.json")
}

fn dirs_fallback(sub: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(sub);
    p.push("dojo-learner");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// Environment keys use a double underscore between levels, e.g.
/// `DOJO_DEFAULTS__PAGE_SIZE=24`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DOJO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the JWT from the credential chain: the profile's env var,
/// then the system keyring, then plaintext config.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a token in the system keyring for `profile_name`.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })?;
    entry.set_password(token).map_err(|e| ConfigError::Validation {
        field: "keyring".into(),
        reason: e.to_string(),
    })
}

/// Build a `PortalConfig` from a profile and the global defaults.
pub fn profile_to_portal_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<PortalConfig, ConfigError> {
    let url: url::Url = profile.lms_url.parse().map_err(|_| ConfigError::Validation {
        field: "lms_url".into(),
        reason: format!("invalid URL: {}", profile.lms_url),
    })?;

    let slug = profile.enterprise_slug.trim();
    if slug.is_empty() {
        return Err(ConfigError::Validation {
            field: "enterprise_slug".into(),
            reason: "must not be empty".into(),
        });
    }

    let token = resolve_token(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = PortalConfig::new(url, slug);
    config.token = Some(token);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn profile() -> Profile {
        Profile {
            lms_url: "https://courses.dojo.example.com".into(),
            enterprise_slug: "acme".into(),
            token: Some("plain-jwt".into()),
            token_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }

    // Profile names unlikely to exist in any keyring.
    const NAME: &str = "dojo-config-test-6c1f";

    #[test]
    fn loads_profiles_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "work"

[defaults]
page_size = 24

[profiles.work]
lms_url = "https://courses.dojo.example.com"
enterprise_slug = "acme"
timeout = 10
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.page_size, 24);
        assert_eq!(cfg.defaults.timeout, 30);
        let (name, profile) = cfg.profile(None).unwrap();
        assert_eq!(name, "work");
        assert_eq!(profile.enterprise_slug, "acme");
        assert_eq!(profile.timeout, Some(10));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
        assert!(matches!(
            cfg.profile(Some("nope")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert("default".into(), profile());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"].lms_url, cfg.profiles["default"].lms_url);
    }

    #[test]
    fn token_falls_back_to_plaintext() {
        let mut p = profile();
        p.token_env = Some("DOJO_CONFIG_TEST_UNSET_TOKEN_VAR".into());
        let token = resolve_token(&p, NAME).unwrap();
        assert_eq!(token.expose_secret(), "plain-jwt");
    }

    #[test]
    fn missing_token_is_an_error() {
        let mut p = profile();
        p.token = None;
        assert!(matches!(
            resolve_token(&p, NAME),
            Err(ConfigError::NoCredentials { .. })
        ));
    }

    #[test]
    fn portal_config_from_profile() {
        let mut p = profile();
        p.ca_cert = Some("/etc/dojo/ca.pem".into());
        p.timeout = Some(7);
        let cfg = profile_to_portal_config(&p, NAME, &Defaults::default()).unwrap();

        assert_eq!(cfg.url.host_str(), Some("courses.dojo.example.com"));
        assert_eq!(cfg.enterprise_slug, "acme");
        assert_eq!(cfg.tls, TlsVerification::CustomCa("/etc/dojo/ca.pem".into()));
        assert_eq!(cfg.timeout, Duration::from_secs(7));
        assert!(cfg.token.is_some());
    }

    #[test]
    fn insecure_default_wins_over_ca_cert() {
        let mut p = profile();
        p.ca_cert = Some("/etc/dojo/ca.pem".into());
        let defaults = Defaults {
            insecure: true,
            ..Defaults::default()
        };
        let cfg = profile_to_portal_config(&p, NAME, &defaults).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn invalid_url_and_slug_are_rejected() {
        let mut p = profile();
        p.lms_url = "not a url".into();
        assert!(matches!(
            profile_to_portal_config(&p, NAME, &Defaults::default()),
            Err(ConfigError::Validation { ref field, .. }) if field == "lms_url"
        ));

        let mut p = profile();
        p.enterprise_slug = "  ".into();
        assert!(matches!(
            profile_to_portal_config(&p, NAME, &Defaults::default()),
            Err(ConfigError::Validation { ref field, .. }) if field == "enterprise_slug"
        ));
    }

    #[test]
    fn state_paths_share_a_directory() {
        assert_eq!(location_path("work").parent(), kv_path().parent());
    }
}
