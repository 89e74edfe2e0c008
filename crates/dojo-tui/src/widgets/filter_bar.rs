//! Active-filter chips above the catalog and the filter/sort sidebar.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use dojo_core::model::language_label;
use dojo_core::{CatalogFilter, FilterChip, SortOption};

use crate::theme;

/// Numbered chips (`1` removes the first). Empty when no filter is active.
pub fn chip_line(chips: &[FilterChip]) -> Line<'static> {
    let mut spans = Vec::with_capacity(chips.len() * 2 + 1);
    for (i, chip) in chips.iter().enumerate().take(9) {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {} {chip} ✕ ", i + 1), theme::chip()));
    }
    if chips.len() > 1 {
        spans.push(Span::styled("  x clear all", theme::key_hint()));
    }
    Line::from(spans)
}

fn joined(values: impl Iterator<Item = String>) -> String {
    let values: Vec<String> = values.collect();
    if values.is_empty() {
        "Any".into()
    } else {
        values.join(", ")
    }
}

fn setting(key: &'static str, label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {key} "), theme::key_hint_key()),
        Span::styled(format!("{label:<12}"), theme::key_hint()),
        Span::styled(value, Style::default().fg(theme::DIM_WHITE)),
    ])
}

fn on_off(on: bool) -> String {
    if on { "Only" } else { "Any" }.into()
}

/// Sidebar lines: one per filter facet, then the sort options.
pub fn sidebar_lines(filter: &CatalogFilter, sort: SortOption) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(" Filter", theme::title_style())),
        setting(
            "/",
            "Search",
            filter.search.clone().unwrap_or_else(|| "—".into()),
        ),
        setting(
            "l",
            "Language",
            joined(filter.languages.iter().map(|c| language_label(c).into_owned())),
        ),
        setting(
            "d",
            "Level",
            joined(
                filter
                    .difficulty
                    .iter()
                    .map(|d| FilterChip::Difficulty(d.clone()).to_string()),
            ),
        ),
        setting("c", "Certificate", on_off(filter.certificate_only)),
        setting("t", "Subtitles", on_off(filter.subtitles_only)),
        setting(
            "m",
            "Max hours",
            filter.max_hours.map_or_else(|| "Any".into(), |h| format!("≤ {h}")),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Sort", theme::title_style()),
            Span::styled("  s cycle", theme::key_hint()),
        ]),
    ];

    let mut option = SortOption::default();
    loop {
        let style = if option == sort {
            Style::default()
                .fg(theme::DOJO_INDIGO)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::table_row()
        };
        let marker = if option == sort { "●" } else { "○" };
        lines.push(Line::from(Span::styled(
            format!("   {marker} {}", option.label()),
            style,
        )));
        option = option.next();
        if option == SortOption::default() {
            break;
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn chips_are_numbered() {
        let chips = CatalogFilter::default()
            .with_language("en")
            .with_certificate_only(true)
            .active_chips();
        assert_eq!(
            text(&chip_line(&chips)),
            " 1 English ✕   2 Certificate ✕   x clear all"
        );
        assert_eq!(text(&chip_line(&[])), "");
    }

    #[test]
    fn sidebar_lists_every_sort_option_once() {
        let lines = sidebar_lines(&CatalogFilter::default(), SortOption::HoursAsc);
        let sort_lines: Vec<String> = lines.iter().skip(9).map(text).collect();
        assert_eq!(
            sort_lines,
            vec![
                "   ○ Relevance",
                "   ○ Title A–Z",
                "   ○ Title Z–A",
                "   ● Shortest first",
                "   ○ Longest first",
            ]
        );
    }

    #[test]
    fn sidebar_summarises_facets() {
        let filter = CatalogFilter::default()
            .with_language("ja")
            .with_difficulty("beginner")
            .with_max_hours(Some(5));
        let lines: Vec<String> = sidebar_lines(&filter, SortOption::default())
            .iter()
            .map(text)
            .collect();
        assert_eq!(lines[2], " l Language    Japanese");
        assert_eq!(lines[3], " d Level       Beginner");
        assert_eq!(lines[6], " m Max hours   ≤ 5");
    }
}
