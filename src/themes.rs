use ratatui::style::Color;

use crate::event::EventKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeName {
    Default,
    Monokai,
    Matrix,
}

impl ThemeName {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "monokai" => Some(Self::Monokai),
            "matrix" => Some(Self::Matrix),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Monokai => "monokai",
            Self::Matrix => "matrix",
        }
    }

    pub fn all_themes() -> &'static [ThemeName] {
        &[ThemeName::Default, ThemeName::Monokai, ThemeName::Matrix]
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // UI element colors
    pub header_fg: Color,
    pub header_bg: Color,
    pub border_normal: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_accent: Color,

    // Table colors
    pub table_header: Color,
    pub selected_row_background: Color,

    // Event kind colors
    pub kind_chat: Color,
    pub kind_command: Color,
    pub kind_timeout: Color,
    pub kind_ban: Color,
    pub kind_raid: Color,
    pub kind_redeem: Color,
    pub kind_system: Color,
}

impl Theme {
    pub fn new(theme_name: ThemeName) -> Self {
        match theme_name {
            ThemeName::Default => Self::default_theme(),
            ThemeName::Monokai => Self::monokai_theme(),
            ThemeName::Matrix => Self::matrix_theme(),
        }
    }

    pub fn kind_color(&self, kind: EventKind) -> Color {
        match kind {
            EventKind::Chat => self.kind_chat,
            EventKind::Command => self.kind_command,
            EventKind::Timeout => self.kind_timeout,
            EventKind::Ban => self.kind_ban,
            EventKind::Raid => self.kind_raid,
            EventKind::Redeem => self.kind_redeem,
            EventKind::System => self.kind_system,
        }
    }

    fn default_theme() -> Self {
        Self {
            // UI element colors
            header_fg: Color::Rgb(236, 240, 241), // Clouds white
            header_bg: Color::Rgb(0, 0, 0),
            border_normal: Color::Rgb(149, 165, 166), // Concrete gray
            border_focused: Color::Rgb(46, 204, 113), // Emerald green
            text_primary: Color::Rgb(236, 240, 241),  // Clouds white
            text_secondary: Color::Rgb(189, 195, 199), // Silver
            text_accent: Color::Rgb(46, 204, 113),    // Emerald green

            // Table colors
            table_header: Color::Rgb(52, 152, 219), // Dodger blue
            selected_row_background: Color::Rgb(44, 62, 80), // Wet asphalt

            // Event kind colors
            kind_chat: Color::Rgb(189, 195, 199),   // Silver
            kind_command: Color::Rgb(52, 152, 219), // Dodger blue
            kind_timeout: Color::Rgb(241, 196, 15), // Sun flower yellow
            kind_ban: Color::Rgb(231, 76, 60),      // Alizarin red
            kind_raid: Color::Rgb(155, 89, 182),    // Amethyst
            kind_redeem: Color::Rgb(26, 188, 156),  // Turquoise
            kind_system: Color::Rgb(149, 165, 166), // Concrete gray
        }
    }

    fn monokai_theme() -> Self {
        Self {
            // UI element colors
            header_fg: Color::Rgb(248, 248, 242), // Monokai foreground
            header_bg: Color::Rgb(39, 40, 34),    // Monokai background
            border_normal: Color::Rgb(117, 113, 94), // Monokai comment
            border_focused: Color::Rgb(166, 226, 46), // Monokai green
            text_primary: Color::Rgb(248, 248, 242), // Monokai foreground
            text_secondary: Color::Rgb(117, 113, 94), // Monokai comment
            text_accent: Color::Rgb(166, 226, 46), // Monokai green

            // Table colors
            table_header: Color::Rgb(102, 217, 239), // Monokai cyan
            selected_row_background: Color::Rgb(73, 72, 62), // Monokai selection

            // Event kind colors
            kind_chat: Color::Rgb(248, 248, 242),    // Monokai foreground
            kind_command: Color::Rgb(102, 217, 239), // Monokai cyan
            kind_timeout: Color::Rgb(230, 219, 116), // Monokai yellow
            kind_ban: Color::Rgb(249, 38, 114),      // Monokai pink
            kind_raid: Color::Rgb(174, 129, 255),    // Monokai purple
            kind_redeem: Color::Rgb(166, 226, 46),   // Monokai green
            kind_system: Color::Rgb(117, 113, 94),   // Monokai comment
        }
    }

    fn matrix_theme() -> Self {
        Self {
            // UI element colors
            header_fg: Color::Rgb(0, 255, 65), // Matrix bright green
            header_bg: Color::Rgb(0, 0, 0),
            border_normal: Color::Rgb(0, 143, 17), // Matrix dark green
            border_focused: Color::Rgb(0, 255, 65), // Matrix bright green
            text_primary: Color::Rgb(0, 255, 65),  // Matrix bright green
            text_secondary: Color::Rgb(0, 143, 17), // Matrix dark green
            text_accent: Color::Rgb(180, 255, 180), // Pale green

            // Table colors
            table_header: Color::Rgb(0, 255, 65), // Matrix bright green
            selected_row_background: Color::Rgb(0, 59, 0), // Deep green

            // Event kind colors
            kind_chat: Color::Rgb(0, 143, 17),      // Matrix dark green
            kind_command: Color::Rgb(0, 255, 65),   // Matrix bright green
            kind_timeout: Color::Rgb(180, 255, 180), // Pale green
            kind_ban: Color::Rgb(255, 255, 255),    // White
            kind_raid: Color::Rgb(0, 255, 65),      // Matrix bright green
            kind_redeem: Color::Rgb(180, 255, 180), // Pale green
            kind_system: Color::Rgb(0, 143, 17),    // Matrix dark green
        }
    }
}
