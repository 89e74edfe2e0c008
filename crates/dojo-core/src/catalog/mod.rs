// ── Catalog derivation ──
//
// The visible catalog is a pure function of the raw catalog, the active
// filter and the active sort option.

pub mod filter;
pub mod sorting;

use std::sync::Arc;

pub use filter::{CatalogFilter, FilterChip};
pub use sorting::SortOption;

use crate::model::Course;

/// Filter then sort `courses`, preserving backend order for ties.
pub fn derive_view(
    courses: &[Arc<Course>],
    filter: &CatalogFilter,
    sort: SortOption,
) -> Vec<Arc<Course>> {
    let mut visible: Vec<Arc<Course>> = courses
        .iter()
        .filter(|c| filter.matches(c))
        .cloned()
        .collect();
    sort.sort(&mut visible);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_applies_before_sort() {
        let mut a = Course::new(1, "Zeta");
        a.has_certificate = true;
        let b = Course::new(2, "Alpha");
        let mut c = Course::new(3, "Beta");
        c.has_certificate = true;
        let raw: Vec<Arc<Course>> = vec![Arc::new(a), Arc::new(b), Arc::new(c)];

        let filter = CatalogFilter::default().with_certificate_only(true);
        let view = derive_view(&raw, &filter, SortOption::TitleAsc);
        let ids: Vec<u64> = view.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
