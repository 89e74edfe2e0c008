// ── Catalog filter ──
//
// The criteria a learner narrows the catalog with. Facet values are
// stored normalized (trimmed, lower-case) so membership checks and
// query-string round trips are case-insensitive.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Course, language_label};

/// Active catalog filter. The default value matches every course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against title and description.
    pub search: Option<String>,
    /// Primary-language codes; empty means any language.
    pub languages: BTreeSet<String>,
    /// Difficulty levels; empty means any level.
    pub difficulty: BTreeSet<String>,
    pub certificate_only: bool,
    pub subtitles_only: bool,
    /// Upper bound on required hours. Courses with unknown hours are excluded.
    pub max_hours: Option<u32>,
}

/// One removable criterion, as shown in the active-filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChip {
    Search(String),
    Language(String),
    Difficulty(String),
    Certificate,
    Subtitles,
    MaxHours(u32),
}

pub(crate) fn normalize(raw: &str) -> Option<String> {
    let v = raw.trim().to_lowercase();
    (!v.is_empty()).then_some(v)
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn with_search(mut self, query: &str) -> Self {
        self.search = Some(query.trim().to_owned()).filter(|q| !q.is_empty());
        self
    }

    pub fn with_language(mut self, code: &str) -> Self {
        if let Some(code) = normalize(code) {
            self.languages.insert(code);
        }
        self
    }

    pub fn with_difficulty(mut self, level: &str) -> Self {
        if let Some(level) = normalize(level) {
            self.difficulty.insert(level);
        }
        self
    }

    pub fn with_certificate_only(mut self, on: bool) -> Self {
        self.certificate_only = on;
        self
    }

    pub fn with_subtitles_only(mut self, on: bool) -> Self {
        self.subtitles_only = on;
        self
    }

    pub fn with_max_hours(mut self, hours: Option<u32>) -> Self {
        self.max_hours = hours.filter(|h| *h > 0);
        self
    }

    // ── Matching ─────────────────────────────────────────────────────

    pub fn matches(&self, course: &Course) -> bool {
        if let Some(ref q) = self.search {
            let q = q.to_lowercase();
            let in_title = course.title.to_lowercase().contains(&q);
            let in_description = course
                .full_description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&q));
            if !in_title && !in_description {
                return false;
            }
        }

        if !self.languages.is_empty() {
            let lang = course.primary_language.as_deref().and_then(normalize);
            if !lang.is_some_and(|l| self.languages.contains(&l)) {
                return false;
            }
        }

        if !self.difficulty.is_empty() {
            let level = course.difficulty_level.as_deref().and_then(normalize);
            if !level.is_some_and(|l| self.difficulty.contains(&l)) {
                return false;
            }
        }

        if self.certificate_only && !course.has_certificate {
            return false;
        }
        if self.subtitles_only && !course.subtitles_available {
            return false;
        }

        if let Some(max) = self.max_hours {
            match course.hours_required {
                Some(h) if h <= f64::from(max) => {}
                _ => return false,
            }
        }

        true
    }

    // ── Active-filter bar ────────────────────────────────────────────

    /// One chip per active criterion, in a stable display order.
    pub fn active_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if let Some(ref q) = self.search {
            chips.push(FilterChip::Search(q.clone()));
        }
        chips.extend(self.languages.iter().cloned().map(FilterChip::Language));
        chips.extend(self.difficulty.iter().cloned().map(FilterChip::Difficulty));
        if self.certificate_only {
            chips.push(FilterChip::Certificate);
        }
        if self.subtitles_only {
            chips.push(FilterChip::Subtitles);
        }
        if let Some(h) = self.max_hours {
            chips.push(FilterChip::MaxHours(h));
        }
        chips
    }

    /// This filter with one criterion removed.
    pub fn without(&self, chip: &FilterChip) -> Self {
        let mut next = self.clone();
        match chip {
            FilterChip::Search(_) => next.search = None,
            FilterChip::Language(code) => {
                next.languages.remove(code);
            }
            FilterChip::Difficulty(level) => {
                next.difficulty.remove(level);
            }
            FilterChip::Certificate => next.certificate_only = false,
            FilterChip::Subtitles => next.subtitles_only = false,
            FilterChip::MaxHours(_) => next.max_hours = None,
        }
        next
    }
}

impl fmt::Display for FilterChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search(q) => write!(f, "\"{q}\""),
            Self::Language(code) => f.write_str(&language_label(code)),
            Self::Difficulty(level) => {
                let mut chars = level.chars();
                match chars.next() {
                    Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
                    None => Ok(()),
                }
            }
            Self::Certificate => f.write_str("Certificate"),
            Self::Subtitles => f.write_str("Subtitles"),
            Self::MaxHours(h) => write!(f, "≤ {h} hours"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64, title: &str) -> Course {
        Course::new(id, title)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = CatalogFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&course(1, "Anything")));
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let filter = CatalogFilter::default().with_search("  LIDAR ");
        let mut c = course(1, "Sensor fusion");
        assert!(!filter.matches(&c));
        c.full_description = Some("Covers lidar and radar".into());
        assert!(filter.matches(&c));
        assert!(filter.matches(&course(2, "Lidar basics")));
    }

    #[test]
    fn blank_search_is_no_search() {
        assert!(CatalogFilter::default().with_search("   ").is_empty());
    }

    #[test]
    fn language_facet_requires_a_known_language() {
        let filter = CatalogFilter::default().with_language("EN");
        let mut c = course(1, "x");
        assert!(!filter.matches(&c));
        c.primary_language = Some("en".into());
        assert!(filter.matches(&c));
        c.primary_language = Some("ja".into());
        assert!(!filter.matches(&c));
    }

    #[test]
    fn difficulty_facet_is_any_of() {
        let filter = CatalogFilter::default()
            .with_difficulty("Beginner")
            .with_difficulty("advanced");
        let mut c = course(1, "x");
        c.difficulty_level = Some("Advanced".into());
        assert!(filter.matches(&c));
        c.difficulty_level = Some("Intermediate".into());
        assert!(!filter.matches(&c));
    }

    #[test]
    fn flags_and_hours() {
        let filter = CatalogFilter::default()
            .with_certificate_only(true)
            .with_max_hours(Some(10));
        let mut c = course(1, "x");
        c.has_certificate = true;
        assert!(!filter.matches(&c), "unknown hours are excluded");
        c.hours_required = Some(10.0);
        assert!(filter.matches(&c));
        c.hours_required = Some(10.5);
        assert!(!filter.matches(&c));
    }

    #[test]
    fn chips_round_trip_through_without() {
        let filter = CatalogFilter::default()
            .with_search("rust")
            .with_language("en")
            .with_subtitles_only(true);
        let chips = filter.active_chips();
        assert_eq!(
            chips,
            vec![
                FilterChip::Search("rust".into()),
                FilterChip::Language("en".into()),
                FilterChip::Subtitles,
            ]
        );

        let cleared = chips.iter().fold(filter, |f, chip| f.without(chip));
        assert!(cleared.is_empty());
    }

    #[test]
    fn chip_labels() {
        assert_eq!(FilterChip::Language("ja".into()).to_string(), "Japanese");
        assert_eq!(FilterChip::Difficulty("beginner".into()).to_string(), "Beginner");
        assert_eq!(FilterChip::MaxHours(5).to_string(), "≤ 5 hours");
    }
}
