//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// Brand accent used for primary buttons and the active chip underline.
const ACCENT: Color = Color::Rgb(255, 56, 92);

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Explorer header --
    pub search_button: Style,
    pub chip_normal: Style,
    pub chip_active: Style,

    // -- Listing cards --
    pub card_title: Style,
    pub card_meta: Style,
    pub card_price: Style,
    pub card_selected: Style,
    pub card_star: Style,
    pub image_band: Style,

    // -- Detail --
    pub detail_header: Style,
    pub detail_title: Style,
    pub detail_body: Style,
    pub detail_muted: Style,
    pub footer: Style,

    // -- Buttons --
    pub button_primary: Style,
    pub button_outline: Style,
    pub button_focused: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub status_error: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub loading: Style,
    pub help_heading: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            search_button: Style::default().fg(Color::White),
            chip_normal: Style::default().fg(Color::Gray),
            chip_active: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::Gray),
            card_price: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_star: Style::default().fg(Color::Yellow),
            image_band: Style::default().bg(Color::Rgb(48, 52, 60)).fg(Color::Gray),

            detail_header: Style::default().bg(Color::Black).fg(Color::White),
            detail_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default(),
            detail_muted: Style::default().fg(Color::DarkGray),
            footer: Style::default().bg(Color::Black).fg(Color::White),

            button_primary: Style::default()
                .bg(ACCENT)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            button_outline: Style::default().fg(Color::Gray),
            button_focused: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_error: Style::default().bg(Color::Red).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(ACCENT),
            loading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn light() -> Self {
        Self {
            search_button: Style::default().fg(Color::Black),
            chip_normal: Style::default().fg(Color::DarkGray),
            chip_active: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::DarkGray),
            card_price: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Gray).fg(Color::Black),
            card_star: Style::default().fg(Color::Magenta),
            image_band: Style::default()
                .bg(Color::Rgb(222, 222, 222))
                .fg(Color::DarkGray),

            detail_header: Style::default().bg(Color::White).fg(Color::Black),
            detail_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_muted: Style::default().fg(Color::DarkGray),
            footer: Style::default().bg(Color::White).fg(Color::Black),

            button_primary: Style::default()
                .bg(ACCENT)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            button_outline: Style::default().fg(Color::DarkGray),
            button_focused: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_error: Style::default().bg(Color::Red).fg(Color::White),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(ACCENT),
            loading: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 23] = [
    "search_button",
    "chip_normal",
    "chip_active",
    "card_title",
    "card_meta",
    "card_price",
    "card_selected",
    "card_star",
    "image_band",
    "detail_header",
    "detail_title",
    "detail_body",
    "detail_muted",
    "footer",
    "button_primary",
    "button_outline",
    "button_focused",
    "status_bar",
    "status_error",
    "panel_border",
    "panel_border_focused",
    "loading",
    "help_heading",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 23] = [
            p.search_button,
            p.chip_normal,
            p.chip_active,
            p.card_title,
            p.card_meta,
            p.card_price,
            p.card_selected,
            p.card_star,
            p.image_band,
            p.detail_header,
            p.detail_title,
            p.detail_body,
            p.detail_muted,
            p.footer,
            p.button_primary,
            p.button_outline,
            p.button_focused,
            p.status_bar,
            p.status_error,
            p.panel_border,
            p.panel_border_focused,
            p.loading,
            p.help_heading,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
