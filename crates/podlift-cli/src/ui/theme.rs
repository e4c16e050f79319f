//! UI theme - colors, icons, and formatting helpers.

use crossterm::style::Color;

/// Visual constants for podlift's status lines.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different line kinds
    pub colors: ColorScheme,
    /// Status icons
    pub icons: Icons,
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Stage transitions (download, link, merge, ...)
    pub stage: Color,
    /// Echoed external commands
    pub command: Color,
    /// Secondary details (sizes, counts, paths)
    pub secondary: Color,
    /// Final success line
    pub success: Color,
    /// Failure line
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            stage: Color::Cyan,
            command: Color::DarkGrey,
            secondary: Color::DarkGrey,
            success: Color::Green,
            error: Color::Red,
        }
    }
}

/// Status icons for different line kinds
#[derive(Debug, Clone)]
pub struct Icons {
    /// Stage in progress (●)
    pub active: &'static str,
    /// Success (✓)
    pub success: &'static str,
    /// Failure (✗)
    pub error: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            active: "●",
            success: "✓",
            error: "✗",
        }
    }
}

/// Format bytes for human-readable display
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else if kb >= 1024.0 {
        format!("{mb:.1} MB")
    } else if kb >= 1.0 {
        format!("{kb:.1} KB")
    } else {
        format!("{bytes} B")
    }
}
