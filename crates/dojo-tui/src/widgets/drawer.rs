//! Course detail drawer: title, description, detail rows, and the Close
//! and call-to-action buttons. The CTA button spins while a request runs.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use throbber_widgets_tui::{Throbber, ThrobberState};

use dojo_core::{CourseSource, DrawerView};

use crate::theme;

fn source_label(source: CourseSource) -> &'static str {
    match source {
        CourseSource::LearningPath => "My learning path",
        CourseSource::Catalog => "Course catalog",
    }
}

/// Label/value lines for the drawer body.
pub fn detail_lines(drawer: &DrawerView) -> Vec<Line<'static>> {
    let width = drawer
        .details
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);
    drawer
        .details
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(format!("{:<width$}  ", row.label), theme::key_hint()),
                Span::styled(row.value.clone(), Style::default().fg(theme::DIM_WHITE)),
            ])
        })
        .collect()
}

pub fn render_drawer(frame: &mut Frame, area: Rect, drawer: &DrawerView, throbber: &ThrobberState) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", source_label(drawer.source)))
        .title_style(theme::key_hint())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let details = detail_lines(drawer);
    let details_height = u16::try_from(details.len()).unwrap_or(u16::MAX);
    let layout = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(2),
        Constraint::Length(details_height.saturating_add(1)),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            drawer.course.title.clone(),
            theme::title_style(),
        )))
        .wrap(Wrap { trim: true }),
        layout[0],
    );

    let description = drawer
        .course
        .full_description
        .clone()
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(description)
            .style(Style::default().fg(theme::DIM_WHITE))
            .wrap(Wrap { trim: true }),
        layout[1],
    );

    frame.render_widget(Paragraph::new(details), layout[2]);

    let buttons = Layout::horizontal([
        Constraint::Length(11),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(layout[3]);
    frame.render_widget(
        Paragraph::new(Span::styled(" Esc Close ", theme::button_outline())),
        buttons[0],
    );

    if drawer.cta.is_loading() {
        let spinner = Throbber::default()
            .label(drawer.cta.label())
            .style(theme::button_primary())
            .throbber_style(theme::button_primary());
        frame.render_stateful_widget(spinner, buttons[2], &mut throbber.clone());
    } else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" Enter {} ", drawer.cta.label()),
                theme::button_primary(),
            )),
            buttons[2],
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use dojo_core::{CallToAction, Course, DetailRow};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn drawer(cta: CallToAction) -> DrawerView {
        let mut course = Course::new(9, "Motion planning");
        course.full_description = Some("Search-based and sampling planners.".into());
        DrawerView {
            course: Arc::new(course),
            source: CourseSource::Catalog,
            details: vec![
                DetailRow {
                    label: "Time investment",
                    value: "6 hours".into(),
                },
                DetailRow {
                    label: "Certificate",
                    value: "Available".into(),
                },
            ],
            cta,
        }
    }

    fn rendered(view: &DrawerView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|frame| render_drawer(frame, frame.area(), view, &ThrobberState::default()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|line| line.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn detail_labels_are_aligned() {
        let lines = detail_lines(&drawer(CallToAction::AccessRequested));
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        let second: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "Time investment  6 hours");
        assert_eq!(second, "Certificate      Available");
    }

    #[test]
    fn drawer_shows_course_and_buttons() {
        let screen = rendered(&drawer(CallToAction::RequestAccess { loading: false }));
        assert!(screen.contains("Motion planning"));
        assert!(screen.contains("Course catalog"));
        assert!(screen.contains("Esc Close"));
        assert!(screen.contains("Enter Request access"));
    }

    #[test]
    fn loading_button_swaps_to_throbber_label() {
        let screen = rendered(&drawer(CallToAction::RequestAccess { loading: true }));
        assert!(screen.contains("Requesting…"));
        assert!(!screen.contains("Enter Request access"));
    }
}
