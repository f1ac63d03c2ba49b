//! Color themes for the TUI
//!
//! Colors are addressed by role through [`ThemeAttr`], so widgets ask for
//! "the error color" rather than a palette entry. A custom theme can be
//! supplied as JSON next to the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::config::{FavreelConfig, TuiTheme};

/// Color roles a widget can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeAttr {
    Background,
    Surface,
    Border,
    Text,
    MutedText,
    Accent,
    Success,
    Warning,
    Error,
    Highlight,
}

/// A complete color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub muted_text: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        CATPPUCCIN_MOCHA
    }
}

impl Theme {
    /// Resolve a role to a concrete color
    pub fn color(&self, attr: ThemeAttr) -> Color {
        match attr {
            ThemeAttr::Background => self.background,
            ThemeAttr::Surface => self.surface,
            ThemeAttr::Border => self.border,
            ThemeAttr::Text => self.text,
            ThemeAttr::MutedText => self.muted_text,
            ThemeAttr::Accent => self.accent,
            ThemeAttr::Success => self.success,
            ThemeAttr::Warning => self.warning,
            ThemeAttr::Error => self.error,
            ThemeAttr::Highlight => self.highlight,
        }
    }
}

/// RGB color for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// User theme file (`custom-theme.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTheme {
    pub background: RgbColor,
    pub surface: RgbColor,
    pub border: RgbColor,
    pub text: RgbColor,
    pub muted_text: RgbColor,
    /// Titles, focused card border
    pub accent: RgbColor,
    pub success: RgbColor,
    /// Load-more and refresh indicators
    pub warning: RgbColor,
    /// Error placeholder, delete dialog
    pub error: RgbColor,
    /// Selected card background
    pub highlight: RgbColor,
}

impl CustomTheme {
    pub fn to_theme(&self) -> Theme {
        Theme {
            name: "Custom",
            background: self.background.to_color(),
            surface: self.surface.to_color(),
            border: self.border.to_color(),
            text: self.text.to_color(),
            muted_text: self.muted_text.to_color(),
            accent: self.accent.to_color(),
            success: self.success.to_color(),
            warning: self.warning.to_color(),
            error: self.error.to_color(),
            highlight: self.highlight.to_color(),
        }
    }

    pub fn file_path() -> Result<PathBuf> {
        FavreelConfig::config_dir().map(|d| d.join("custom-theme.json"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read custom theme from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse custom theme from {}", path.display()))
    }
}

/// Selectable theme variants, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    CatppuccinMocha,
    CatppuccinLatte,
    Dracula,
    Nord,
    Gruvbox,
    Custom,
}

impl ThemeVariant {
    /// Built-in theme for this variant; `Custom` uses `custom` when loaded
    pub fn theme(&self, custom: Option<Theme>) -> Theme {
        match self {
            Self::CatppuccinMocha => CATPPUCCIN_MOCHA,
            Self::CatppuccinLatte => CATPPUCCIN_LATTE,
            Self::Dracula => DRACULA,
            Self::Nord => NORD,
            Self::Gruvbox => GRUVBOX,
            Self::Custom => custom.unwrap_or(CATPPUCCIN_MOCHA),
        }
    }

    /// Next variant; `Custom` is skipped unless a custom theme is loaded
    pub fn next(&self, has_custom: bool) -> Self {
        match self {
            Self::CatppuccinMocha => Self::CatppuccinLatte,
            Self::CatppuccinLatte => Self::Dracula,
            Self::Dracula => Self::Nord,
            Self::Nord => Self::Gruvbox,
            Self::Gruvbox if has_custom => Self::Custom,
            Self::Gruvbox | Self::Custom => Self::CatppuccinMocha,
        }
    }

    pub fn from_config_theme(theme: TuiTheme) -> Self {
        match theme {
            TuiTheme::CatppuccinMocha => Self::CatppuccinMocha,
            TuiTheme::CatppuccinLatte => Self::CatppuccinLatte,
            TuiTheme::Dracula => Self::Dracula,
            TuiTheme::Nord => Self::Nord,
            TuiTheme::Gruvbox => Self::Gruvbox,
            TuiTheme::Custom => Self::Custom,
        }
    }
}

pub const CATPPUCCIN_MOCHA: Theme = Theme {
    name: "Catppuccin Mocha",
    background: Color::Rgb(30, 30, 46),
    surface: Color::Rgb(49, 50, 68),
    border: Color::Rgb(69, 71, 90),
    text: Color::Rgb(205, 214, 244),
    muted_text: Color::Rgb(166, 173, 200),
    accent: Color::Rgb(203, 166, 247),
    success: Color::Rgb(166, 227, 161),
    warning: Color::Rgb(249, 226, 175),
    error: Color::Rgb(243, 139, 168),
    highlight: Color::Rgb(137, 180, 250),
};

pub const CATPPUCCIN_LATTE: Theme = Theme {
    name: "Catppuccin Latte",
    background: Color::Rgb(239, 241, 245),
    surface: Color::Rgb(220, 224, 232),
    border: Color::Rgb(188, 192, 204),
    text: Color::Rgb(76, 79, 105),
    muted_text: Color::Rgb(108, 111, 133),
    accent: Color::Rgb(136, 57, 239),
    success: Color::Rgb(64, 160, 43),
    warning: Color::Rgb(223, 142, 29),
    error: Color::Rgb(210, 15, 57),
    highlight: Color::Rgb(30, 102, 245),
};

pub const DRACULA: Theme = Theme {
    name: "Dracula",
    background: Color::Rgb(40, 42, 54),
    surface: Color::Rgb(68, 71, 90),
    border: Color::Rgb(98, 114, 164),
    text: Color::Rgb(248, 248, 242),
    muted_text: Color::Rgb(189, 147, 249),
    accent: Color::Rgb(255, 121, 198),
    success: Color::Rgb(80, 250, 123),
    warning: Color::Rgb(241, 250, 140),
    error: Color::Rgb(255, 85, 85),
    highlight: Color::Rgb(139, 233, 253),
};

pub const NORD: Theme = Theme {
    name: "Nord",
    background: Color::Rgb(46, 52, 64),
    surface: Color::Rgb(59, 66, 82),
    border: Color::Rgb(76, 86, 106),
    text: Color::Rgb(236, 239, 244),
    muted_text: Color::Rgb(216, 222, 233),
    accent: Color::Rgb(180, 142, 173),
    success: Color::Rgb(163, 190, 140),
    warning: Color::Rgb(235, 203, 139),
    error: Color::Rgb(191, 97, 106),
    highlight: Color::Rgb(136, 192, 208),
};

pub const GRUVBOX: Theme = Theme {
    name: "Gruvbox",
    background: Color::Rgb(40, 40, 40),
    surface: Color::Rgb(60, 56, 54),
    border: Color::Rgb(80, 73, 69),
    text: Color::Rgb(235, 219, 178),
    muted_text: Color::Rgb(189, 174, 147),
    accent: Color::Rgb(211, 134, 155),
    success: Color::Rgb(184, 187, 38),
    warning: Color::Rgb(250, 189, 47),
    error: Color::Rgb(251, 73, 52),
    highlight: Color::Rgb(131, 165, 152),
};
