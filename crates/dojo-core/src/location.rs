// ── Query/URL synchronization ──
//
// The dashboard's page, filter and sort live in the query string of a
// navigable address, so a reload or a back/forward step restores the
// same view. `Location` keeps that address plus a history stack, and
// optionally mirrors the current address to a state file.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::{CatalogFilter, SortOption};

/// Read/write access to named query parameters.
///
/// Writes through [`write`](Self::write) and [`remove`](Self::remove)
/// each create one navigation entry; [`apply`](Self::apply) batches
/// several changes into a single entry.
pub trait QuerySync: Send + Sync {
    /// Current values of `keys`; absent keys are left out of the map.
    fn read(&self, keys: &[&str]) -> HashMap<String, String>;

    fn write(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// Set (`Some`) or remove (`None`) several parameters at once.
    fn apply(&self, changes: &[(&str, Option<String>)]) {
        for (key, value) in changes {
            match value {
                Some(v) => self.write(key, v),
                None => self.remove(key),
            }
        }
    }
}

// ── Parameter names and parsing ─────────────────────────────────────

pub mod keys {
    pub const PAGE: &str = "page";
    pub const PAGE_SIZE: &str = "page_size";
    pub const SEARCH: &str = "q";
    pub const LANGUAGES: &str = "lang";
    pub const DIFFICULTY: &str = "level";
    pub const CERTIFICATE: &str = "cert";
    pub const SUBTITLES: &str = "subs";
    pub const MAX_HOURS: &str = "max_hours";
    pub const SORT: &str = "sort";

    /// Every parameter that describes the catalog view.
    pub const ALL: &[&str] = &[
        PAGE,
        PAGE_SIZE,
        SEARCH,
        LANGUAGES,
        DIFFICULTY,
        CERTIFICATE,
        SUBTITLES,
        MAX_HOURS,
        SORT,
    ];
}

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 100;

/// Requested page; absent, non-numeric or zero reads as 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Page size; absent, non-numeric or zero reads as the default, and
/// anything above [`MAX_PAGE_SIZE`] is capped.
pub fn parse_page_size(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|s| *s >= 1)
        .map_or(DEFAULT_PAGE_SIZE, |s| s.min(MAX_PAGE_SIZE))
}

fn split_list(raw: Option<&String>) -> impl Iterator<Item = &str> {
    raw.map(String::as_str)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn is_on(raw: Option<&String>) -> bool {
    matches!(raw.map(|v| v.trim()), Some("1" | "true" | "yes"))
}

/// Rebuild a filter from query parameters. Unknown or malformed values
/// are ignored.
pub fn filter_from_params(params: &HashMap<String, String>) -> CatalogFilter {
    let mut filter = CatalogFilter::default();
    if let Some(q) = params.get(keys::SEARCH) {
        filter = filter.with_search(q);
    }
    for code in split_list(params.get(keys::LANGUAGES)) {
        filter = filter.with_language(code);
    }
    for level in split_list(params.get(keys::DIFFICULTY)) {
        filter = filter.with_difficulty(level);
    }
    filter
        .with_certificate_only(is_on(params.get(keys::CERTIFICATE)))
        .with_subtitles_only(is_on(params.get(keys::SUBTITLES)))
        .with_max_hours(
            params
                .get(keys::MAX_HOURS)
                .and_then(|v| v.trim().parse::<u32>().ok()),
        )
}

/// Query changes that encode `filter`; inactive criteria are removed.
pub fn filter_to_params(filter: &CatalogFilter) -> Vec<(&'static str, Option<String>)> {
    let join = |set: &BTreeSet<String>| {
        (!set.is_empty()).then(|| set.iter().cloned().collect::<Vec<_>>().join(","))
    };
    vec![
        (keys::SEARCH, filter.search.clone()),
        (keys::LANGUAGES, join(&filter.languages)),
        (keys::DIFFICULTY, join(&filter.difficulty)),
        (keys::CERTIFICATE, filter.certificate_only.then(|| "1".to_owned())),
        (keys::SUBTITLES, filter.subtitles_only.then(|| "1".to_owned())),
        (keys::MAX_HOURS, filter.max_hours.map(|h| h.to_string())),
    ]
}

/// Sort option from query parameters; unknown values read as the default.
pub fn sort_from_params(params: &HashMap<String, String>) -> SortOption {
    params
        .get(keys::SORT)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_default()
}

/// The default sort is encoded by the parameter's absence.
pub fn sort_to_param(sort: SortOption) -> (&'static str, Option<String>) {
    let value = (sort != SortOption::default()).then(|| sort.to_string());
    (keys::SORT, value)
}

// ── Location ─────────────────────────────────────────────────────────

const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
struct History {
    entries: Vec<Url>,
    cursor: usize,
}

impl History {
    fn current(&self) -> &Url {
        // `entries` is never empty and `cursor` always indexes into it.
        &self.entries[self.cursor]
    }
}

/// A navigable address with a history stack.
pub struct Location {
    history: watch::Sender<History>,
    state_file: Option<PathBuf>,
}

impl Location {
    /// Start at `base` with an empty history.
    pub fn new(base: Url) -> Self {
        let (history, _) = watch::channel(History {
            entries: vec![base],
            cursor: 0,
        });
        Self {
            history,
            state_file: None,
        }
    }

    /// Start at the address saved in `state_file`, falling back to
    /// `base` when the file is missing or unreadable. Every later
    /// navigation is written back to the same file.
    ///
    /// Only the query string is restored; scheme, host and path always
    /// come from `base`.
    pub fn restore(base: Url, state_file: impl Into<PathBuf>) -> Self {
        let state_file = state_file.into();
        let mut start = base;
        if let Some(query) = read_saved_query(&state_file) {
            start.set_query(Some(&query).filter(|q| !q.is_empty()).map(String::as_str));
            debug!(path = %state_file.display(), "restored dashboard location");
        }
        let mut location = Self::new(start);
        location.state_file = Some(state_file);
        location
    }

    pub fn current(&self) -> Url {
        self.history.borrow().current().clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.borrow().cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let h = self.history.borrow();
        h.cursor + 1 < h.entries.len()
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let moved = self.history.send_if_modified(|h| {
            if h.cursor == 0 {
                return false;
            }
            h.cursor -= 1;
            true
        });
        if moved {
            self.persist();
        }
        moved
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let moved = self.history.send_if_modified(|h| {
            if h.cursor + 1 >= h.entries.len() {
                return false;
            }
            h.cursor += 1;
            true
        });
        if moved {
            self.persist();
        }
        moved
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Push a new entry built by editing the current query. No entry is
    /// created when the edit changes nothing. Forward history is dropped.
    fn navigate(&self, changes: &[(&str, Option<String>)]) {
        let changed = self.history.send_if_modified(|h| {
            let mut params: BTreeMap<String, String> = h
                .current()
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            let before = params.clone();
            for (key, value) in changes {
                match value {
                    Some(v) => {
                        params.insert((*key).to_owned(), v.clone());
                    }
                    None => {
                        params.remove(*key);
                    }
                }
            }
            if params == before {
                return false;
            }

            let mut next = h.current().clone();
            if params.is_empty() {
                next.set_query(None);
            } else {
                next.query_pairs_mut().clear().extend_pairs(params.iter());
            }
            h.entries.truncate(h.cursor + 1);
            h.entries.push(next);
            if h.entries.len() > HISTORY_LIMIT {
                h.entries.remove(0);
            }
            h.cursor = h.entries.len() - 1;
            true
        });
        if changed {
            debug!(url = %self.current(), "location changed");
            self.persist();
        }
    }

    fn persist(&self) {
        let Some(ref path) = self.state_file else {
            return;
        };
        let query = self.current().query().unwrap_or_default().to_owned();
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "cannot create state directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, query) {
            warn!(path = %path.display(), error = %e, "cannot persist dashboard location");
        }
    }
}

fn read_saved_query(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Some(raw.trim().trim_start_matches('?').to_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read saved dashboard location");
            None
        }
    }
}

impl QuerySync for Location {
    fn read(&self, keys: &[&str]) -> HashMap<String, String> {
        self.history
            .borrow()
            .current()
            .query_pairs()
            .filter(|(k, _)| keys.contains(&&**k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn write(&self, key: &str, value: &str) {
        self.navigate(&[(key, Some(value.to_owned()))]);
    }

    fn remove(&self, key: &str) {
        self.navigate(&[(key, None)]);
    }

    fn apply(&self, changes: &[(&str, Option<String>)]) {
        self.navigate(changes);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("dojo://dashboard/").unwrap()
    }

    #[test]
    fn page_parsing_falls_back_to_first_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some(" 4 ")), 4);
    }

    #[test]
    fn page_size_parsing_defaults_and_caps() {
        assert_eq!(parse_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some("0")), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some("many")), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some("24")), 24);
        assert_eq!(parse_page_size(Some("5000")), MAX_PAGE_SIZE);
    }

    #[test]
    fn filter_survives_the_query_string() {
        let filter = CatalogFilter::default()
            .with_search("path planning")
            .with_language("en")
            .with_language("ja")
            .with_difficulty("advanced")
            .with_certificate_only(true)
            .with_max_hours(Some(20));

        let loc = Location::new(base());
        loc.apply(&filter_to_params(&filter));
        let read = loc.read(keys::ALL);

        assert_eq!(read.get("lang").map(String::as_str), Some("en,ja"));
        assert_eq!(read.get("cert").map(String::as_str), Some("1"));
        assert!(!read.contains_key("subs"));
        assert_eq!(filter_from_params(&read), filter);
    }

    #[test]
    fn malformed_filter_values_are_ignored() {
        let mut params = HashMap::new();
        params.insert("max_hours".to_owned(), "lots".to_owned());
        params.insert("cert".to_owned(), "maybe".to_owned());
        params.insert("lang".to_owned(), ",, ,".to_owned());
        assert!(filter_from_params(&params).is_empty());
    }

    #[test]
    fn default_sort_is_not_written() {
        assert_eq!(sort_to_param(SortOption::Relevance), ("sort", None));
        assert_eq!(
            sort_to_param(SortOption::HoursDesc),
            ("sort", Some("-hours".to_owned()))
        );

        let mut params = HashMap::new();
        params.insert("sort".to_owned(), "bogus".to_owned());
        assert_eq!(sort_from_params(&params), SortOption::Relevance);
    }

    #[test]
    fn writes_create_history_entries() {
        let loc = Location::new(base());
        assert!(!loc.can_go_back());

        loc.write("page", "2");
        loc.write("page", "3");
        assert_eq!(loc.read(&["page"]).get("page").map(String::as_str), Some("3"));

        assert!(loc.back());
        assert_eq!(loc.read(&["page"]).get("page").map(String::as_str), Some("2"));
        assert!(loc.back());
        assert!(loc.read(&["page"]).is_empty());
        assert!(!loc.back());

        assert!(loc.forward());
        assert!(loc.can_go_forward());
        loc.write("sort", "title");
        assert!(!loc.can_go_forward(), "a new entry drops forward history");
    }

    #[test]
    fn no_op_writes_do_not_grow_history() {
        let loc = Location::new(base());
        loc.write("page", "2");
        loc.write("page", "2");
        loc.remove("q");
        assert!(loc.back());
        assert!(!loc.can_go_back());
    }

    #[test]
    fn batched_changes_are_one_entry() {
        let loc = Location::new(base());
        loc.apply(&[("page", Some("1".into())), ("q", Some("ros".into()))]);
        assert_eq!(loc.read(keys::ALL).len(), 2);
        assert!(loc.back());
        assert!(loc.read(keys::ALL).is_empty());
    }

    #[test]
    fn unrelated_keys_are_not_read() {
        let loc = Location::new(Url::parse("dojo://dashboard/?utm=x&page=2").unwrap());
        let read = loc.read(&["page"]);
        assert_eq!(read.len(), 1);
    }

    #[test]
    fn state_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("location");

        let first = Location::restore(base(), &path);
        first.apply(&[("page", Some("3".into())), ("sort", Some("title".into()))]);
        drop(first);

        let second = Location::restore(base(), &path);
        let read = second.read(keys::ALL);
        assert_eq!(parse_page(read.get("page").map(String::as_str)), 3);
        assert_eq!(sort_from_params(&read), SortOption::TitleAsc);
        assert_eq!(second.current().host_str(), Some("dashboard"));
    }

    #[test]
    fn missing_state_file_starts_at_base() {
        let dir = tempfile::tempdir().unwrap();
        let loc = Location::restore(base(), dir.path().join("absent"));
        assert_eq!(loc.current(), base());
    }
}
