//! Visual theme catalog.

use serde::{Deserialize, Serialize};

/// A visual theme the wizard can preview and the company stores a
/// snapshot of at completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub primary_color: &'static str,
    pub accent_color: &'static str,
}

/// The theme applied when an unrecognized id is submitted.
pub const DEFAULT_THEME_ID: &str = "classic";

pub const THEMES: &[Theme] = &[
    Theme {
        id: "classic",
        name: "Classic",
        primary_color: "#1f2937",
        accent_color: "#d4af37",
    },
    Theme {
        id: "rose",
        name: "Rose",
        primary_color: "#9f1239",
        accent_color: "#fda4af",
    },
    Theme {
        id: "ocean",
        name: "Ocean",
        primary_color: "#0e7490",
        accent_color: "#67e8f9",
    },
    Theme {
        id: "forest",
        name: "Forest",
        primary_color: "#166534",
        accent_color: "#86efac",
    },
];

impl Theme {
    pub fn find(id: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.id == id)
    }

    /// Resolve a theme id, falling back to the default theme when the
    /// id is unrecognized. Never fails.
    pub fn resolve_or_default(id: &str) -> &'static Theme {
        Self::find(id)
            .or_else(|| Self::find(DEFAULT_THEME_ID))
            .unwrap_or(&THEMES[0])
    }
}

/// Owned copy of a theme, persisted on the company profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSnapshot {
    pub id: String,
    pub name: String,
    pub primary_color: String,
    pub accent_color: String,
}

impl From<&Theme> for ThemeSnapshot {
    fn from(theme: &Theme) -> Self {
        Self {
            id: theme.id.to_string(),
            name: theme.name.to_string(),
            primary_color: theme.primary_color.to_string(),
            accent_color: theme.accent_color.to_string(),
        }
    }
}
