//! Stylesheet construction for branding and accessibility settings

use crate::brand::Brand;
use crate::llm::Role;
use serde::Deserialize;
use std::fmt::Write;

pub const OPEN_DYSLEXIC_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=OpenDyslexic&display=swap";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FontSize {
    #[default]
    Normal,
    Large,
}

impl FontSize {
    pub fn px(self) -> &'static str {
        match self {
            FontSize::Normal => "16px",
            FontSize::Large => "20px",
        }
    }
}

/// Reader-selected accessibility toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ThemeSettings {
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub dyslexia: bool,
}

impl ThemeSettings {
    pub fn font_family(self) -> &'static str {
        if self.dyslexia {
            "'OpenDyslexic', sans-serif"
        } else {
            "'Segoe UI', sans-serif"
        }
    }

    /// External font stylesheet the page must link, if any
    pub fn font_stylesheet(self) -> Option<&'static str> {
        self.dyslexia.then_some(OPEN_DYSLEXIC_STYLESHEET)
    }
}

/// Bubble colours and alignment for one transcript turn
pub fn turn_style(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Assistant => ("#33333a", "left"),
        Role::User | Role::System => ("#2a2a2f", "right"),
    }
}

/// Full stylesheet for the page: brand variables, dark base, accessibility
/// font settings and transcript bubbles.
pub fn stylesheet(brand: Brand, settings: ThemeSettings) -> String {
    let info = brand.info();
    let mut css = String::new();

    if let Some(href) = settings.font_stylesheet() {
        let _ = writeln!(css, "@import url('{href}');");
    }

    let _ = writeln!(
        css,
        ":root {{\n  --prl-primary: {};\n  --ow-bg: #1a1a1d;\n  --ow-sidebar: #202024;\n  --ow-text: #e0e0e0;\n}}",
        info.primary_color
    );
    let _ = writeln!(
        css,
        "html, body {{\n  font-family: {} !important;\n  font-size: {} !important;\n}}",
        settings.font_family(),
        settings.font_size.px()
    );

    for (class, role) in [("assistant", Role::Assistant), ("user", Role::User)] {
        let (background, align) = turn_style(role);
        let _ = writeln!(
            css,
            ".turn.{class} {{\n  background: {background};\n  color: var(--ow-text);\n  padding: 0.8rem;\n  margin-bottom: 0.5rem;\n  border-radius: 8px;\n  text-align: {align};\n}}"
        );
    }

    css
}
