//! Modal overlays drawn by the app on top of the dashboard: keyboard
//! help, the first-launch walkthrough, and toasts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use dojo_core::Toast;

use super::centered_rect;
use crate::theme;

const HELP_KEYS: &[(&str, &str)] = &[
    ("Tab", "Switch learning path / catalog"),
    ("j/k ↑/↓", "Move up / down"),
    ("Enter", "Open course / run its action"),
    ("Esc", "Close drawer or toast"),
    ("n/p ←/→", "Next / previous page"),
    ("[ ]", "Back / forward"),
    ("/", "Search catalog"),
    ("l d", "Cycle language / level"),
    ("c t", "Certificate / subtitles only"),
    ("m", "Cycle max hours"),
    ("1-9", "Remove filter chip"),
    ("x", "Clear filters"),
    ("s", "Cycle sort"),
    ("S", "Open kickoff survey"),
    ("r", "Refresh"),
    ("q", "Quit"),
];

fn modal(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub fn help_lines() -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = HELP_KEYS
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(*what, theme::key_hint()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "                     Esc or ? to close",
        theme::key_hint(),
    )));
    lines
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let lines = help_lines();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let inner = modal(frame, centered_rect(area, 52, height), "Keyboard Shortcuts");
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_walkthrough(frame: &mut Frame, area: Rect) {
    let inner = modal(frame, centered_rect(area, 62, 14), "Welcome to your dashboard");
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  My learning path holds the courses picked for you.",
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(Span::styled(
            "  Start with the learning survey, then open any course.",
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  The course catalog has everything else. Filter it, sort",
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(Span::styled(
            "  it, and request access to what interests you.",
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Tab ", theme::key_hint_key()),
            Span::styled("switch panels   ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("open   ", theme::key_hint()),
            Span::styled("? ", theme::key_hint_key()),
            Span::styled("all keys", theme::key_hint()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "                  Press any key to start",
            theme::key_hint(),
        )),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Toast in the bottom-right corner, above the status bar.
pub fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let (color, icon) = theme::toast(toast.kind);
    let width = 56u16.min(area.width.saturating_sub(2));
    let body_width = usize::from(width.saturating_sub(4)).max(1);
    let body_lines = toast.body.chars().count().div_ceil(body_width);
    let height = u16::try_from(body_lines)
        .unwrap_or(u16::MAX)
        .saturating_add(3)
        .min(area.height);

    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + area.height.saturating_sub(height + 1);
    let toast_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(format!("{} ", toast.title), theme::title_style()),
        ]))
        .title_bottom(Line::from(Span::styled(" Esc ", theme::key_hint())).right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    frame.render_widget(
        Paragraph::new(toast.body.clone())
            .style(Style::default().fg(theme::DIM_WHITE))
            .wrap(Wrap { trim: true }),
        inner,
    );
}
