//! Dojo palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use dojo_core::ToastKind;

// ── Core Palette ──────────────────────────────────────────────────────

pub const DOJO_INDIGO: Color = Color::Rgb(124, 106, 255); // #7c6aff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

/// Card accents, indexed by `CourseId::bg_key()`.
pub const CARD_ACCENTS: [Color; 10] = [
    DOJO_INDIGO,
    NEON_CYAN,
    CORAL,
    ELECTRIC_YELLOW,
    SUCCESS_GREEN,
    Color::Rgb(139, 233, 253), // #8be9fd
    Color::Rgb(255, 184, 108), // #ffb86c
    Color::Rgb(189, 147, 249), // #bd93f9
    Color::Rgb(98, 214, 183),  // #62d6b7
    Color::Rgb(255, 145, 145), // #ff9191
];

pub fn card_accent(bg_key: u8) -> Color {
    CARD_ACCENTS
        .get(usize::from(bg_key))
        .copied()
        .unwrap_or(DOJO_INDIGO)
}

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn subtitle_style() -> Style {
    Style::default().fg(DIM_WHITE).add_modifier(Modifier::ITALIC)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(DOJO_INDIGO)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Row under the cursor.
pub fn table_selected() -> Style {
    Style::default()
        .fg(DOJO_INDIGO)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Removable filter chip.
pub fn chip() -> Style {
    Style::default().fg(BG_DARK).bg(NEON_CYAN)
}

/// Primary call-to-action button.
pub fn button_primary() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(DOJO_INDIGO)
        .add_modifier(Modifier::BOLD)
}

/// Secondary button (e.g. Close).
pub fn button_outline() -> Style {
    Style::default().fg(DOJO_INDIGO)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Border colour and icon for a toast.
pub fn toast(kind: ToastKind) -> (Color, &'static str) {
    match kind {
        ToastKind::Success => (SUCCESS_GREEN, "✓"),
        ToastKind::Error => (ERROR_RED, "✗"),
        ToastKind::Info => (NEON_CYAN, "·"),
    }
}
