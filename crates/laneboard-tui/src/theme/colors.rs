//! Catppuccin color palettes for the TUI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Lane accents, cycled per group row
    pub lanes: [Color; 3],

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            // Semantic
            success: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
            warning: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            error: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
            info: Color::Rgb(137, 180, 250),    // #89b4fa (blue)

            // Lane accents
            lanes: [
                Color::Rgb(250, 179, 135), // #fab387 (peach)
                Color::Rgb(137, 180, 250), // #89b4fa (blue)
                Color::Rgb(166, 227, 161), // #a6e3a1 (green)
            ],

            // Borders
            border: Color::Rgb(69, 71, 90), // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            // Backgrounds (inverted for light theme)
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(230, 233, 239), // #e6e9ef

            // Foregrounds
            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            // Accents
            primary: Color::Rgb(114, 135, 253),  // #7287fd (lavender)
            secondary: Color::Rgb(23, 146, 153), // #179299 (teal)

            // Semantic
            success: Color::Rgb(64, 160, 43),  // #40a02b (green)
            warning: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
            error: Color::Rgb(210, 15, 57),    // #d20f39 (red)
            info: Color::Rgb(30, 102, 245),    // #1e66f5 (blue)

            // Lane accents
            lanes: [
                Color::Rgb(254, 100, 11), // #fe640b (peach)
                Color::Rgb(30, 102, 245), // #1e66f5 (blue)
                Color::Rgb(64, 160, 43),  // #40a02b (green)
            ],

            // Borders
            border: Color::Rgb(188, 192, 204), // #bcc0cc
            border_focused: Color::Rgb(114, 135, 253), // #7287fd (lavender)
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,
            secondary: Color::Magenta,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,

            lanes: [Color::Yellow, Color::Cyan, Color::Green],

            border: Color::Gray,
            border_focused: Color::Cyan,
        }
    }

    /// Accent color for a group row, cycling through the lane palette.
    pub fn lane_accent(&self, index: usize) -> Color {
        self.lanes[index % self.lanes.len()]
    }
}
