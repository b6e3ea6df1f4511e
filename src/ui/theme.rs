//! Color theme constants.

use ratatui::style::Color;

pub const COLOR_BORDER: Color = Color::DarkGray;

pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

pub const COLOR_ACTIVE: Color = Color::LightGreen;

pub const COLOR_PENDING: Color = Color::Yellow;

pub const COLOR_ERROR: Color = Color::Red;

// ============================================================================
// Level Colors
// ============================================================================

pub const COLOR_LEVEL_DANGER: Color = Color::Red;

pub const COLOR_LEVEL_WARNING: Color = Color::Yellow;

pub const COLOR_LEVEL_INFO: Color = Color::Blue;

pub const COLOR_LEVEL_DEBUG: Color = Color::Gray;

pub const COLOR_LEVEL_OTHER: Color = Color::White;

/// Color for a card's display classification.
pub fn level_color(classification: &str) -> Color {
    match classification {
        "danger" => COLOR_LEVEL_DANGER,
        "warning" | "warn" => COLOR_LEVEL_WARNING,
        "info" => COLOR_LEVEL_INFO,
        "debug" => COLOR_LEVEL_DEBUG,
        _ => COLOR_LEVEL_OTHER,
    }
}

// ============================================================================
// Metric Series Colors
// ============================================================================

/// Series colors, assigned to tracked servers in order
pub const SERIES_PALETTE: [Color; 6] = [
    Color::Rgb(240, 58, 71),  // Camano
    Color::Rgb(22, 44, 81),   // Rosario
    Color::Rgb(181, 51, 191), // Monaco
    Color::Cyan,
    Color::LightGreen,
    Color::Yellow,
];

pub fn series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}
