//! Palette and semantic styles for the board.

use ratatui::style::{Color, Modifier, Style};

use tripboard_core::PointType;

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const MUTED: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn border() -> Style {
    Style::default().fg(MUTED)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// The focused row.
pub fn selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active entry of the sort or filter bar.
pub fn tab_active() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

/// Sort or filter entry that cannot be picked.
pub fn tab_disabled() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::DIM)
}

pub fn price() -> Style {
    Style::default().fg(GREEN)
}

pub fn favorite() -> Style {
    Style::default().fg(YELLOW)
}

pub fn error() -> Style {
    Style::default().fg(RED)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Badge colour per point type.
pub fn point_type(point_type: PointType) -> Style {
    let color = match point_type {
        PointType::Taxi | PointType::Drive => YELLOW,
        PointType::Bus | PointType::Train | PointType::Ship => CYAN,
        PointType::Flight => ACCENT,
        PointType::CheckIn => GREEN,
        PointType::Sightseeing | PointType::Restaurant => CORAL,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
