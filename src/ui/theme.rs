//! Light and dark palettes for the Pokédex
//!
//! Color palettes and style helpers for the TUI. The active palette is picked
//! from the document's `data-theme` attribute, so the theme toggle only ever
//! has to touch the document.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{Document, THEME_ATTRIBUTE};

// ═══════════════════════════════════════════════════════════════════════════
// THEME MODE
// ═══════════════════════════════════════════════════════════════════════════

/// Which palette is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Value written to the document attribute
    pub fn as_attr(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Anything other than "dark" reads as light
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    /// Icon on the toggle button: the mode you would switch to
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemeMode::Light => "☾",
            ThemeMode::Dark => "☀",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTE
// ═══════════════════════════════════════════════════════════════════════════

/// A full color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    /// Slightly raised background for cards and inputs
    pub surface: Color,
    /// Pokédex red
    pub primary: Color,
    /// Pikachu yellow
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        mode: ThemeMode::Light,
        background: Color::Rgb(0xf7, 0xf7, 0xfa),
        surface: Color::Rgb(0xff, 0xff, 0xff),
        primary: Color::Rgb(0xcc, 0x00, 0x00),
        secondary: Color::Rgb(0x8a, 0x6d, 0x00),
        accent: Color::Rgb(0x1d, 0x4e, 0x9e),
        text: Color::Rgb(0x1a, 0x1a, 0x24),
        dim: Color::Rgb(0x5f, 0x5f, 0x70),
        error: Color::Rgb(0xc6, 0x28, 0x28),
        success: Color::Rgb(0x1b, 0x7a, 0x2e),
        border: Color::Rgb(0xc0, 0xc0, 0xcc),
    };

    pub const DARK: Theme = Theme {
        mode: ThemeMode::Dark,
        background: Color::Rgb(0x12, 0x12, 0x1a),
        surface: Color::Rgb(0x1e, 0x1e, 0x2a),
        primary: Color::Rgb(0xff, 0x5c, 0x5c),
        secondary: Color::Rgb(0xff, 0xcb, 0x05),
        accent: Color::Rgb(0x5b, 0x9b, 0xe6),
        text: Color::Rgb(0xe8, 0xe8, 0xf0),
        dim: Color::Rgb(0x80, 0x80, 0x90),
        error: Color::Rgb(0xff, 0x55, 0x55),
        success: Color::Rgb(0x4c, 0xd9, 0x64),
        border: Color::Rgb(0x44, 0x44, 0x58),
    };

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LIGHT,
            ThemeMode::Dark => Self::DARK,
        }
    }

    /// Palette selected by the document's theme attribute
    pub fn from_document(doc: &Document) -> Self {
        Self::for_mode(ThemeMode::from_attr(doc.attribute(THEME_ATTRIBUTE)))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Card body
    pub fn card(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn brand(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Field labels ("Height:", "Weight:")
    pub fn label(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border of the active section or focused input
    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Inverted selection
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.surface)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Search button; loading swaps in the accent color
    pub fn button(&self, loading: bool) -> Style {
        let bg = if loading { self.accent } else { self.primary };
        Style::default()
            .fg(self.surface)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Keybinding hint style
    pub fn keybind(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.dim).bg(self.surface)
    }

    /// Badge for an elemental type
    pub fn type_badge(&self, type_name: &str) -> Style {
        let bg = type_color(type_name).unwrap_or(self.dim);
        let fg = match color_to_rgb(bg) {
            Some((r, g, b)) if relative_luminance(r, g, b) > 0.35 => Color::Rgb(0x10, 0x10, 0x10),
            _ => Color::Rgb(0xff, 0xff, 0xff),
        };
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
    }
}

/// Conventional badge colors per elemental type
pub fn type_color(type_name: &str) -> Option<Color> {
    let rgb = match type_name {
        "normal" => (0xa8, 0xa7, 0x7a),
        "fire" => (0xee, 0x81, 0x30),
        "water" => (0x63, 0x90, 0xf0),
        "electric" => (0xf7, 0xd0, 0x2c),
        "grass" => (0x7a, 0xc7, 0x4c),
        "ice" => (0x96, 0xd9, 0xd6),
        "fighting" => (0xc2, 0x2e, 0x28),
        "poison" => (0xa3, 0x3e, 0xa1),
        "ground" => (0xe2, 0xbf, 0x65),
        "flying" => (0xa9, 0x8f, 0xf3),
        "psychic" => (0xf9, 0x55, 0x87),
        "bug" => (0xa6, 0xb9, 0x1a),
        "rock" => (0xb6, 0xa1, 0x36),
        "ghost" => (0x73, 0x57, 0x97),
        "dragon" => (0x6f, 0x35, 0xfc),
        "dark" => (0x70, 0x57, 0x46),
        "steel" => (0xb7, 0xb7, 0xce),
        "fairy" => (0xd6, 0x85, 0xad),
        _ => return None,
    };
    Some(Color::Rgb(rgb.0, rgb.1, rgb.2))
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text (4.5:1)
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text (3:1)
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    fn palettes() -> [Theme; 2] {
        [Theme::LIGHT, Theme::DARK]
    }

    #[test]
    fn test_all_palette_colors_are_rgb() {
        for theme in palettes() {
            for color in [
                theme.background,
                theme.surface,
                theme.primary,
                theme.secondary,
                theme.accent,
                theme.text,
                theme.dim,
                theme.error,
                theme.success,
                theme.border,
            ] {
                assert!(color_to_rgb(color).is_some(), "{:?} in {:?}", color, theme.mode);
            }
        }
    }

    #[test]
    fn test_text_contrast_against_background() {
        for theme in palettes() {
            let ratio = contrast_ratio(rgb(theme.text), rgb(theme.background));
            assert!(
                meets_wcag_aa(rgb(theme.text), rgb(theme.background)),
                "{:?} text/background is {:.2}:1",
                theme.mode,
                ratio
            );
            assert!(meets_wcag_aa(rgb(theme.text), rgb(theme.surface)));
        }
    }

    #[test]
    fn test_signal_colors_readable_on_surface() {
        for theme in palettes() {
            let surface = rgb(theme.surface);
            for (name, color) in [
                ("primary", theme.primary),
                ("secondary", theme.secondary),
                ("accent", theme.accent),
                ("error", theme.error),
                ("success", theme.success),
                ("dim", theme.dim),
            ] {
                let ratio = contrast_ratio(rgb(color), surface);
                assert!(
                    meets_wcag_aa_large(rgb(color), surface),
                    "{:?} {} on surface is {:.2}:1",
                    theme.mode,
                    name,
                    ratio
                );
            }
        }
    }

    #[test]
    fn test_theme_mode_attr_round_trip() {
        assert_eq!(ThemeMode::from_attr(Some("dark")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_attr(Some("light")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_attr(Some("sepia")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_attr(None), ThemeMode::Light);
        assert_eq!(ThemeMode::from_dark(true).as_attr(), "dark");
        assert_eq!(ThemeMode::from_dark(false).as_attr(), "light");
    }

    #[test]
    fn test_from_document_follows_attribute() {
        let mut doc = Document::new();
        assert_eq!(Theme::from_document(&doc), Theme::LIGHT);

        doc.set_attribute(THEME_ATTRIBUTE, "dark");
        assert_eq!(Theme::from_document(&doc), Theme::DARK);
    }

    #[test]
    fn test_type_badges() {
        assert!(type_color("electric").is_some());
        assert!(type_color("shadow").is_none());

        // Light badge gets dark text, dark badge gets light text
        let electric = Theme::DARK.type_badge("electric");
        assert_eq!(electric.fg, Some(Color::Rgb(0x10, 0x10, 0x10)));
        let ghost = Theme::DARK.type_badge("ghost");
        assert_eq!(ghost.fg, Some(Color::Rgb(0xff, 0xff, 0xff)));

        // Unknown types fall back to the dim color
        assert_eq!(Theme::LIGHT.type_badge("???").bg, Some(Theme::LIGHT.dim));
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((100, 100, 100), (100, 100, 100));
        assert!((ratio - 1.0).abs() < 0.001);
    }
}
