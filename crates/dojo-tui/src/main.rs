//! `dojo-learner` — terminal dashboard for the Dojo learner portal.
//!
//! Built on [ratatui](https://ratatui.rs) over `dojo-core`'s
//! [`DashboardController`](dojo_core::DashboardController): the learning
//! path, a paginated and filterable course catalog, a detail drawer with
//! the course's call to action, and toast notifications.
//!
//! Logs are written to a file (default `/tmp/dojo-learner.log`) to avoid
//! corrupting the terminal UI. The dashboard's page, filter and sort are
//! kept in a location that survives restarts unless `--no-persist` is given.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use dojo_config::{Config, Profile};
use dojo_core::location::{self, keys};
use dojo_core::{FileStore, KeyValueStore, Location, MemoryStore, PortalConfig, QuerySync};

use crate::app::{App, AppSettings};

/// Terminal dashboard for browsing and requesting Dojo courses.
#[derive(Parser, Debug)]
#[command(name = "dojo-learner", version, about)]
struct Cli {
    /// Config profile (defaults to the config file's default profile)
    #[arg(short = 'p', long, env = "DOJO_PROFILE")]
    profile: Option<String>,

    /// LMS base URL (e.g., https://courses.dojo.example.com)
    #[arg(short = 'u', long, env = "DOJO_URL")]
    url: Option<String>,

    /// Enterprise customer slug
    #[arg(short = 'e', long, env = "DOJO_ENTERPRISE")]
    enterprise: Option<String>,

    /// Learner JWT
    #[arg(short = 't', long, env = "DOJO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/dojo-learner.log)
    #[arg(long, default_value = "/tmp/dojo-learner.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Start from a blank dashboard and keep nothing on exit
    #[arg(long)]
    no_persist: bool,

    /// Save --token to the system keyring for the profile, then exit
    #[arg(long, requires = "token")]
    save_token: bool,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "dojo_tui={log_level},dojo_core={log_level},dojo_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("dojo-learner.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Pick the profile and lay CLI flags over it.
///
/// Priority: CLI flags > profile > built-in defaults. With no matching
/// profile, `--url` and `--enterprise` alone are enough.
fn resolve_profile(cli: &Cli, cfg: &Config) -> Result<(String, Profile)> {
    let (name, mut profile) = match cfg.profile(cli.profile.as_deref()) {
        Ok((name, profile)) => (name.to_owned(), profile.clone()),
        Err(e) if cli.url.is_some() && cli.enterprise.is_some() => {
            info!(reason = %e, "no usable profile; using command-line settings");
            let name = cli
                .profile
                .clone()
                .or_else(|| cli.enterprise.clone())
                .unwrap_or_else(|| "default".into());
            (name, Profile::default())
        }
        Err(e) => {
            return Err(e)
                .wrap_err("pass --url and --enterprise, or add a profile to the config file");
        }
    };

    if let Some(ref url) = cli.url {
        profile.lms_url.clone_from(url);
    }
    if let Some(ref slug) = cli.enterprise {
        profile.enterprise_slug.clone_from(slug);
    }
    if let Some(ref token) = cli.token {
        profile.token = Some(token.clone());
        profile.token_env = None;
    }
    if cli.insecure {
        profile.insecure = Some(true);
    }
    Ok((name, profile))
}

fn build_portal_config(
    cli: &Cli,
    cfg: &Config,
    name: &str,
    profile: &Profile,
) -> Result<PortalConfig> {
    let mut portal = dojo_config::profile_to_portal_config(profile, name, &cfg.defaults)
        .wrap_err_with(|| format!("invalid settings for profile '{name}'"))?;
    // The keyring sits ahead of plaintext in the chain; an explicit flag wins over both.
    if let Some(ref token) = cli.token {
        portal.token = Some(SecretString::from(token.clone()));
    }
    Ok(portal)
}

/// The address whose query string carries the dashboard's view state.
fn dashboard_address(config: &PortalConfig) -> Url {
    let mut url = config.url.clone();
    url.set_path(&format!("/{}/", config.enterprise_slug));
    url.set_query(None);
    url.set_fragment(None);
    url
}

fn open_location(cli: &Cli, cfg: &Config, name: &str, portal: &PortalConfig) -> Location {
    let base = dashboard_address(portal);
    let location = if cli.no_persist {
        Location::new(base)
    } else {
        Location::restore(base, dojo_config::location_path(name))
    };
    // A configured page size applies until the location names one.
    if cfg.defaults.page_size != location::DEFAULT_PAGE_SIZE
        && location.read(&[keys::PAGE_SIZE]).is_empty()
    {
        location.write(keys::PAGE_SIZE, &cfg.defaults.page_size.to_string());
    }
    location
}

fn open_flags(cli: &Cli) -> Arc<dyn KeyValueStore> {
    if cli.no_persist {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(dojo_config::kv_path()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let cfg = dojo_config::load_config().wrap_err("failed to load config file")?;
    let (name, profile) = resolve_profile(&cli, &cfg)?;

    if cli.save_token {
        let token = cli.token.as_deref().unwrap_or_default();
        dojo_config::store_token(&name, token)?;
        println!("Token saved to the system keyring for profile '{name}'.");
        return Ok(());
    }

    let portal = build_portal_config(&cli, &cfg, &name, &profile)?;
    info!(
        profile = %name,
        url = %portal.url,
        enterprise = %portal.enterprise_slug,
        "starting dojo-learner"
    );

    let location = Arc::new(open_location(&cli, &cfg, &name, &portal));
    let settings = AppSettings {
        portal,
        location,
        flags: open_flags(&cli),
        toast_timeout: Duration::from_secs(cfg.defaults.toast_secs),
    };

    let mut app = App::new(settings);
    app.run().await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dojo-learner").chain(args.iter().copied())).unwrap()
    }

    fn config_with_work_profile() -> Config {
        let mut cfg = Config::default();
        cfg.default_profile = Some("work".into());
        cfg.profiles.insert(
            "work".into(),
            Profile {
                lms_url: "https://courses.dojo.example.com".into(),
                enterprise_slug: "acme".into(),
                token: Some("from-config".into()),
                token_env: Some("DOJO_TUI_TEST_UNSET_VAR".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_the_profile() {
        let cfg = config_with_work_profile();
        let args = cli(&["--enterprise", "globex", "--token", "from-flag", "--insecure"]);
        let (name, profile) = resolve_profile(&args, &cfg).unwrap();

        assert_eq!(name, "work");
        assert_eq!(profile.lms_url, "https://courses.dojo.example.com");
        assert_eq!(profile.enterprise_slug, "globex");
        assert_eq!(profile.token.as_deref(), Some("from-flag"));
        assert_eq!(profile.token_env, None);
        assert_eq!(profile.insecure, Some(true));
    }

    #[test]
    fn flags_alone_are_enough_without_a_profile() {
        let args = cli(&["--url", "https://lms.example.com", "--enterprise", "acme"]);
        let (name, profile) = resolve_profile(&args, &Config::default()).unwrap();
        assert_eq!(name, "acme");
        assert_eq!(profile.lms_url, "https://lms.example.com");
    }

    #[test]
    fn missing_profile_without_flags_is_an_error() {
        let args = cli(&["--profile", "nope"]);
        assert!(resolve_profile(&args, &config_with_work_profile()).is_err());
    }

    #[test]
    fn dashboard_address_is_scoped_to_the_enterprise() {
        let portal = PortalConfig::new(
            Url::parse("https://courses.dojo.example.com/learn?x=1").unwrap(),
            "acme",
        );
        assert_eq!(
            dashboard_address(&portal).as_str(),
            "https://courses.dojo.example.com/acme/"
        );
    }

    #[test]
    fn configured_page_size_seeds_a_fresh_location() {
        let mut cfg = config_with_work_profile();
        cfg.defaults.page_size = 24;
        let args = cli(&["--no-persist"]);
        let portal = PortalConfig::new(Url::parse("https://lms.example.com").unwrap(), "acme");

        let location = open_location(&args, &cfg, "work", &portal);
        let params = location.read(&[keys::PAGE_SIZE]);
        assert_eq!(params.get(keys::PAGE_SIZE).map(String::as_str), Some("24"));
    }
}
