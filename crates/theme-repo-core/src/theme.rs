//! Theme summaries as served by `GET /themes`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of indexed accent colors in a palette.
pub const PALETTE_SIZE: usize = 16;

/// Number of swatches drawn per card row.
pub const SWATCHES_PER_ROW: usize = 8;

/// One theme as listed by the backend.
///
/// Colors are kept as the strings the backend sent (usually `#rrggbb`);
/// interpreting them is up to the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ThemeRecord", into = "ThemeRecord")]
pub struct ThemeSummary {
    pub name: String,
    pub palette: [String; PALETTE_SIZE],
    pub background: String,
    pub foreground: String,
    pub cursor: Option<String>,
    pub selection_background: Option<String>,
    pub selection_foreground: Option<String>,
}

impl ThemeSummary {
    /// Accent color at `index`, if it is in `0..16`.
    pub fn color(&self, index: usize) -> Option<&str> {
        self.palette.get(index).map(String::as_str)
    }

    pub fn palette(&self) -> &[String; PALETTE_SIZE] {
        &self.palette
    }

    /// The two swatch rows of a card: indices 0–7, then 8–15.
    pub fn swatch_rows(&self) -> [&[String]; 2] {
        let (first, second) = self.palette.split_at(SWATCHES_PER_ROW);
        [first, second]
    }

    /// Ordering used by the gallery: case-insensitive by name, byte order
    /// as the tie-break so the result is total.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Wire shape: a flat object with `color0`..`color15`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeRecord {
    name: String,
    color0: String,
    color1: String,
    color2: String,
    color3: String,
    color4: String,
    color5: String,
    color6: String,
    color7: String,
    color8: String,
    color9: String,
    color10: String,
    color11: String,
    color12: String,
    color13: String,
    color14: String,
    color15: String,
    background: String,
    foreground: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection_foreground: Option<String>,
}

impl From<ThemeRecord> for ThemeSummary {
    fn from(r: ThemeRecord) -> Self {
        Self {
            name: r.name,
            palette: [
                r.color0, r.color1, r.color2, r.color3, r.color4, r.color5, r.color6, r.color7,
                r.color8, r.color9, r.color10, r.color11, r.color12, r.color13, r.color14,
                r.color15,
            ],
            background: r.background,
            foreground: r.foreground,
            cursor: r.cursor,
            selection_background: r.selection_background,
            selection_foreground: r.selection_foreground,
        }
    }
}

impl From<ThemeSummary> for ThemeRecord {
    fn from(t: ThemeSummary) -> Self {
        let [color0, color1, color2, color3, color4, color5, color6, color7, color8, color9, color10, color11, color12, color13, color14, color15] =
            t.palette;
        Self {
            name: t.name,
            color0,
            color1,
            color2,
            color3,
            color4,
            color5,
            color6,
            color7,
            color8,
            color9,
            color10,
            color11,
            color12,
            color13,
            color14,
            color15,
            background: t.background,
            foreground: t.foreground,
            cursor: t.cursor,
            selection_background: t.selection_background,
            selection_foreground: t.selection_foreground,
        }
    }
}

/// Build a theme with a generated palette. Used by tests across the workspace.
#[doc(hidden)]
pub fn sample_theme(name: &str) -> ThemeSummary {
    ThemeSummary {
        name: name.to_string(),
        palette: std::array::from_fn(|i| format!("#{:02x}{:02x}{:02x}", i * 16, 255 - i * 16, i)),
        background: "#282a36".to_string(),
        foreground: "#f8f8f2".to_string(),
        cursor: None,
        selection_background: None,
        selection_foreground: None,
    }
}
