//! Color theme: maps cell colors to terminal colors, JSON-overridable
//!
//! The renderer only ever asks for already-resolved colors by symbolic id;
//! decoding and fallback live here.

use crate::cell::CellColor;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// RGB triples for each piece color, as stored in a theme file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ThemeFile {
    cyan: [u8; 3],
    yellow: [u8; 3],
    purple: [u8; 3],
    green: [u8; 3],
    red: [u8; 3],
    blue: [u8; 3],
    orange: [u8; 3],
    gray: [u8; 3],
    /// Ghost cells render darker than their piece color
    ghost_dim: [u8; 3],
}

impl Default for ThemeFile {
    fn default() -> Self {
        Self {
            cyan: [0, 240, 240],
            yellow: [240, 240, 0],
            purple: [160, 0, 240],
            green: [0, 240, 0],
            red: [240, 0, 0],
            blue: [0, 0, 240],
            orange: [255, 165, 0],
            gray: [128, 128, 128],
            ghost_dim: [90, 90, 90],
        }
    }
}

/// Resolved color lookup handed to the renderer
#[derive(Debug, Clone)]
pub struct Theme {
    cyan: Color,
    yellow: Color,
    purple: Color,
    green: Color,
    red: Color,
    blue: Color,
    orange: Color,
    gray: Color,
    ghost: Color,
}

impl Theme {
    /// Load a theme from a JSON file, falling back to the defaults if the
    /// file is missing or malformed
    pub fn load(path: &Path) -> Self {
        let file = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!("bad theme file {}: {err}", path.display());
                ThemeFile::default()
            }),
            Err(_) => ThemeFile::default(),
        };
        Self::from_file(file)
    }

    fn from_file(file: ThemeFile) -> Self {
        let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);
        Self {
            cyan: rgb(file.cyan),
            yellow: rgb(file.yellow),
            purple: rgb(file.purple),
            green: rgb(file.green),
            red: rgb(file.red),
            blue: rgb(file.blue),
            orange: rgb(file.orange),
            gray: rgb(file.gray),
            ghost: rgb(file.ghost_dim),
        }
    }

    /// Terminal color for a locked or falling cell
    pub fn cell_color(&self, color: CellColor) -> Color {
        match color {
            CellColor::Empty => Color::Reset,
            CellColor::Cyan => self.cyan,
            CellColor::Yellow => self.yellow,
            CellColor::Purple => self.purple,
            CellColor::Green => self.green,
            CellColor::Red => self.red,
            CellColor::Blue => self.blue,
            CellColor::Orange => self.orange,
            CellColor::Gray => self.gray,
        }
    }

    /// Terminal color for ghost-projection cells
    pub fn ghost_color(&self, _color: CellColor) -> Color {
        self.ghost
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_file(ThemeFile::default())
    }
}
