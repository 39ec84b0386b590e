//! Color palette with light and dark variants.
//!
//! Style functions read the active palette through [`current`], so switching
//! themes only needs a call to [`set_theme`] before the next redraw.

use std::sync::{LazyLock, RwLock};

use iced::Color;

/// Dashboard theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Colors used by the style functions.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    pub surface: Color,
    pub surface_elevated: Color,
    pub background: Color,
    pub backdrop: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    pub accent_blue: Color,
    pub accent_green: Color,
    pub accent_yellow: Color,
    pub accent_red: Color,
    pub accent_purple: Color,

    pub selected: Color,
    pub hover: Color,

    pub border_subtle: Color,
    pub border_medium: Color,

    pub shadow: Color,
    pub shadow_medium: Color,
}

impl Palette {
    /// Light palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::from_rgb(0.10, 0.46, 0.82), // Material blue 700
            primary_light: Color::from_rgb(0.26, 0.58, 0.92),
            primary_dark: Color::from_rgb(0.05, 0.33, 0.65),

            surface: Color::WHITE,
            surface_elevated: Color::WHITE,
            background: Color::from_rgb(0.96, 0.96, 0.97),
            backdrop: Color::from_rgba(0.0, 0.0, 0.0, 0.45),

            text_primary: Color::from_rgb(0.13, 0.13, 0.13),
            text_secondary: Color::from_rgb(0.42, 0.44, 0.48),
            text_muted: Color::from_rgb(0.62, 0.64, 0.68),
            text_on_primary: Color::WHITE,

            accent_blue: Color::from_rgb(0.01, 0.53, 0.82),
            accent_green: Color::from_rgb(0.18, 0.49, 0.20),
            accent_yellow: Color::from_rgb(0.93, 0.60, 0.0),
            accent_red: Color::from_rgb(0.83, 0.18, 0.18),
            accent_purple: Color::from_rgb(0.48, 0.12, 0.64),

            selected: Color::from_rgb(0.89, 0.95, 0.99),
            hover: Color::from_rgb(0.95, 0.96, 0.98),

            border_subtle: Color::from_rgb(0.90, 0.91, 0.93),
            border_medium: Color::from_rgb(0.80, 0.82, 0.85),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
            shadow_medium: Color::from_rgba(0.0, 0.0, 0.0, 0.14),
        }
    }

    /// Dark palette.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::from_rgb(0.56, 0.79, 0.98), // Material blue 200
            primary_light: Color::from_rgb(0.73, 0.87, 0.98),
            primary_dark: Color::from_rgb(0.39, 0.71, 0.96),

            surface: Color::from_rgb(0.12, 0.12, 0.13),
            surface_elevated: Color::from_rgb(0.16, 0.16, 0.18),
            background: Color::from_rgb(0.07, 0.07, 0.08),
            backdrop: Color::from_rgba(0.0, 0.0, 0.0, 0.65),

            text_primary: Color::from_rgb(0.93, 0.93, 0.94),
            text_secondary: Color::from_rgb(0.68, 0.70, 0.73),
            text_muted: Color::from_rgb(0.50, 0.52, 0.56),
            text_on_primary: Color::from_rgb(0.07, 0.07, 0.08),

            accent_blue: Color::from_rgb(0.31, 0.76, 0.97),
            accent_green: Color::from_rgb(0.51, 0.78, 0.52),
            accent_yellow: Color::from_rgb(1.0, 0.84, 0.31),
            accent_red: Color::from_rgb(0.94, 0.45, 0.45),
            accent_purple: Color::from_rgb(0.81, 0.58, 0.85),

            selected: Color::from_rgb(0.14, 0.22, 0.30),
            hover: Color::from_rgb(0.18, 0.18, 0.20),

            border_subtle: Color::from_rgb(0.22, 0.22, 0.25),
            border_medium: Color::from_rgb(0.32, 0.33, 0.36),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
            shadow_medium: Color::from_rgba(0.0, 0.0, 0.0, 0.40),
        }
    }

    /// Palette for a theme mode.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Chip color for a message type. Unknown types are muted.
    #[must_use]
    pub fn for_kind(&self, kind: &str) -> Color {
        match kind.to_ascii_uppercase().as_str() {
            "INFO" => self.accent_blue,
            "WARNING" | "WARN" => self.accent_yellow,
            "ERROR" => self.accent_red,
            "DEBUG" => self.accent_purple,
            "SUCCESS" => self.accent_green,
            _ => self.text_muted,
        }
    }
}

/// Active palette.
pub static CURRENT: LazyLock<RwLock<Palette>> = LazyLock::new(|| RwLock::new(Palette::light()));

/// Switches the active palette.
pub fn set_theme(mode: ThemeMode) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// Copy of the active palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT.read().map_or_else(|_| Palette::light(), |p| *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_kind_colors() {
        let p = Palette::light();
        assert_eq!(p.for_kind("error"), p.accent_red);
        assert_eq!(p.for_kind("WARNING"), p.accent_yellow);
        assert_eq!(p.for_kind("custom"), p.text_muted);
    }
}
