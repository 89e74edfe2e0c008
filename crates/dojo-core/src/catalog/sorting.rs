// ── Catalog sorting ──

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::model::Course;

/// How the catalog is ordered. The string form is the `sort` query value.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum SortOption {
    /// Backend order.
    #[default]
    #[strum(serialize = "relevance")]
    Relevance,
    #[strum(serialize = "title")]
    TitleAsc,
    #[strum(serialize = "-title")]
    TitleDesc,
    #[strum(serialize = "hours")]
    HoursAsc,
    #[strum(serialize = "-hours")]
    HoursDesc,
}

impl SortOption {
    /// Label for the sort selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::TitleAsc => "Title A–Z",
            Self::TitleDesc => "Title Z–A",
            Self::HoursAsc => "Shortest first",
            Self::HoursDesc => "Longest first",
        }
    }

    /// Next option in selector order (wraps around).
    pub fn next(self) -> Self {
        Self::iter()
            .cycle()
            .skip_while(|o| *o != self)
            .nth(1)
            .unwrap_or_default()
    }

    /// Stable in-place sort. Courses with unknown hours sort last in
    /// both hour directions.
    pub fn sort(self, courses: &mut [Arc<Course>]) {
        match self {
            Self::Relevance => {}
            Self::TitleAsc => courses.sort_by(|a, b| cmp_title(a, b)),
            Self::TitleDesc => courses.sort_by(|a, b| cmp_title(b, a)),
            Self::HoursAsc => courses.sort_by(|a, b| cmp_hours(a, b, false)),
            Self::HoursDesc => courses.sort_by(|a, b| cmp_hours(a, b, true)),
        }
    }
}

fn cmp_title(a: &Course, b: &Course) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

fn cmp_hours(a: &Course, b: &Course, descending: bool) -> Ordering {
    match (a.hours_required, b.hours_required) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn course(id: u64, title: &str, hours: Option<f64>) -> Arc<Course> {
        let mut c = Course::new(id, title);
        c.hours_required = hours;
        Arc::new(c)
    }

    fn ids(courses: &[Arc<Course>]) -> Vec<u64> {
        courses.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn query_names_round_trip() {
        for option in SortOption::iter() {
            let parsed: SortOption = option.to_string().parse().unwrap();
            assert_eq!(parsed, option);
        }
        assert!("sideways".parse::<SortOption>().is_err());
    }

    #[test]
    fn next_cycles_through_all_options() {
        let mut seen = vec![SortOption::Relevance];
        let mut current = SortOption::Relevance.next();
        while current != SortOption::Relevance {
            seen.push(current);
            current = current.next();
        }
        assert_eq!(seen.len(), SortOption::iter().count());
    }

    #[test]
    fn relevance_keeps_backend_order() {
        let mut courses = vec![course(2, "b", None), course(1, "a", None)];
        SortOption::Relevance.sort(&mut courses);
        assert_eq!(ids(&courses), vec![2, 1]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let mut courses = vec![
            course(1, "delta", None),
            course(2, "Alpha", None),
            course(3, "charlie", None),
        ];
        SortOption::TitleAsc.sort(&mut courses);
        assert_eq!(ids(&courses), vec![2, 3, 1]);
        SortOption::TitleDesc.sort(&mut courses);
        assert_eq!(ids(&courses), vec![1, 3, 2]);
    }

    #[test]
    fn unknown_hours_sort_last_both_ways() {
        let mut courses = vec![
            course(1, "a", None),
            course(2, "b", Some(8.0)),
            course(3, "c", Some(2.0)),
        ];
        SortOption::HoursAsc.sort(&mut courses);
        assert_eq!(ids(&courses), vec![3, 2, 1]);
        SortOption::HoursDesc.sort(&mut courses);
        assert_eq!(ids(&courses), vec![2, 3, 1]);
    }
}
