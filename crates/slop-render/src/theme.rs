use crossterm::style::Color;

use slop_types::Severity;

/// Color theme for pretty output
pub struct Theme;

impl Theme {
    // Log level colors
    pub const LOG_INFO: Color = Color::Green;
    pub const LOG_WARN: Color = Color::Yellow;
    pub const LOG_ERROR: Color = Color::Red;

    /// Color for a level line; `None` prints it unstyled
    pub fn level_color(severity: Severity) -> Option<Color> {
        match severity {
            Severity::Error => Some(Self::LOG_ERROR),
            Severity::Warn => Some(Self::LOG_WARN),
            Severity::Info => Some(Self::LOG_INFO),
            Severity::Other => None,
        }
    }
}
