//! Course cards as table rows: accent, title, hours, language, level and
//! the card's call to action.

use ratatui::layout::Constraint;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row, Table};

use dojo_core::CourseCard;
use dojo_core::model::language_label;

use crate::theme;

const EMPTY: &str = "—";

pub fn hours_label(hours: Option<f64>) -> String {
    match hours {
        Some(h) if h.fract().abs() < f64::EPSILON => format!("{h:.0} h"),
        Some(h) => format!("{h:.1} h"),
        None => EMPTY.into(),
    }
}

/// Text of each column for one card, accent excluded.
pub fn card_cells(card: &CourseCard) -> [String; 5] {
    let course = &card.course;
    [
        course.title.clone(),
        hours_label(course.hours_required),
        course
            .primary_language
            .as_deref()
            .map_or_else(|| EMPTY.into(), |code| language_label(code).into_owned()),
        course
            .difficulty_level
            .clone()
            .unwrap_or_else(|| EMPTY.into()),
        card.cta.label().into(),
    ]
}

pub fn course_table(cards: &[CourseCard]) -> Table<'static> {
    let header = Row::new(["", "Course", "Time", "Language", "Level", ""])
        .style(theme::table_header());

    let rows = cards.iter().map(|card| {
        let accent_color = theme::card_accent(card.course.id.bg_key());
        let accent = Span::styled("●", Style::default().fg(accent_color));
        let mut cells = vec![Cell::from(accent)];
        cells.extend(card_cells(card).into_iter().map(Cell::from));
        let row = Row::new(cells);
        if card.selected {
            row.style(theme::table_selected())
        } else {
            row.style(theme::table_row())
        }
    });

    Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Length(22),
        ],
    )
    .header(header)
    .row_highlight_style(theme::table_selected())
    .highlight_symbol("▸ ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use dojo_core::{CallToAction, Course};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cells_show_placeholders_for_missing_metadata() {
        let card = CourseCard {
            course: Arc::new(Course::new(3, "Sensor fusion")),
            cta: CallToAction::RequestAccess { loading: false },
            selected: false,
        };
        assert_eq!(
            card_cells(&card),
            [
                "Sensor fusion".to_owned(),
                "—".into(),
                "—".into(),
                "—".into(),
                "Request access".into(),
            ]
        );
    }

    #[test]
    fn cells_label_language_and_hours() {
        let mut course = Course::new(4, "Planning");
        course.hours_required = Some(2.5);
        course.primary_language = Some("ja".into());
        course.difficulty_level = Some("Advanced".into());
        let card = CourseCard {
            course: Arc::new(course),
            cta: CallToAction::AccessRequested,
            selected: true,
        };
        let cells = card_cells(&card);
        assert_eq!(cells[1], "2.5 h");
        assert_eq!(cells[2], "Japanese");
        assert_eq!(cells[3], "Advanced");
        assert_eq!(cells[4], "Access requested");
    }

    #[test]
    fn whole_hours_drop_the_decimal() {
        assert_eq!(hours_label(Some(4.0)), "4 h");
        assert_eq!(hours_label(None), "—");
    }
}
