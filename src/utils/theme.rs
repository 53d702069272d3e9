use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// The persisted theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Terminal palette for one theme mode. Colors follow the Flexoki scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub accent: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub favorite: Color,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    fn light() -> Self {
        Self {
            background: Color::Rgb(0xFF, 0xFC, 0xF0),
            foreground: Color::Rgb(0x10, 0x0F, 0x0F),
            border: Color::Rgb(0xB7, 0xB5, 0xAC),
            accent: Color::Rgb(0x20, 0x5E, 0xA6),
            muted: Color::Rgb(0x6F, 0x6E, 0x69),
            selection_bg: Color::Rgb(0xCE, 0xCD, 0xC3),
            selection_fg: Color::Rgb(0x10, 0x0F, 0x0F),
            favorite: Color::Rgb(0xAF, 0x30, 0x29),
        }
    }

    fn dark() -> Self {
        Self {
            background: Color::Rgb(0x10, 0x0F, 0x0F),
            foreground: Color::Rgb(0xCE, 0xCD, 0xC3),
            border: Color::Rgb(0x57, 0x56, 0x53),
            accent: Color::Rgb(0x43, 0x85, 0xBE),
            muted: Color::Rgb(0x87, 0x85, 0x80),
            selection_bg: Color::Rgb(0x28, 0x27, 0x26),
            selection_fg: Color::Rgb(0xCE, 0xCD, 0xC3),
            favorite: Color::Rgb(0xD1, 0x4D, 0x41),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}
