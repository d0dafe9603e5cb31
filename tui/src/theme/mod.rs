//! Theme and Colors
//!
//! The pet dialog's palette. Gauges get one color each so mood, hunger and
//! experience read apart at a glance.

use ratatui::style::{Color, Modifier, Style};

use pet_core::NotifyLevel;

// ============================================================================
// Dialog Chrome
// ============================================================================

/// Dialog border and title - sea blue
pub const DIALOG_BORDER: Color = Color::Rgb(100, 180, 255);

/// Title fish accent
pub const FISH_ORANGE: Color = Color::Rgb(255, 160, 80);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Selected tab and focused input
pub const HIGHLIGHT: Color = Color::Rgb(255, 223, 128);

// ============================================================================
// Gauges
// ============================================================================

/// Mood gauge - warm pink
pub const MOOD_PINK: Color = Color::Rgb(255, 150, 180);

/// Hunger gauge - amber
pub const HUNGER_AMBER: Color = Color::Rgb(255, 190, 90);

/// Experience gauge - soft blue
pub const EXP_BLUE: Color = Color::Rgb(150, 180, 255);

// ============================================================================
// Notices
// ============================================================================

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Warning yellow
pub const WARNING_YELLOW: Color = Color::Rgb(255, 210, 90);

/// Cost badge
pub const COST_BADGE: Color = Color::Rgb(255, 127, 127);

/// Style for a toast of `level`
#[must_use]
pub fn notify_style(level: NotifyLevel) -> Style {
    let fg = match level {
        NotifyLevel::Info => DIALOG_BORDER,
        NotifyLevel::Success => SUCCESS_GREEN,
        NotifyLevel::Warning => WARNING_YELLOW,
        NotifyLevel::Error => ERROR_RED,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Style for a button that is `enabled`
#[must_use]
pub fn button_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Black).bg(DIALOG_BORDER)
    } else {
        Style::default().fg(DIM_GRAY)
    }
}
