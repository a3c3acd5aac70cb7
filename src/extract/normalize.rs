//! Line text normalization.
//!
//! Two fixed stages:
//!
//! 1. Compatibility decomposition (NFKD), dropping every non-ASCII code
//!    point, collapsing whitespace runs and trimming.
//! 2. Removing bullet and dash glyphs, trimming and collapsing horizontal
//!    whitespace.
//!
//! Accented letters survive as their base letter ("é" → "e"); letters with
//! no ASCII decomposition disappear entirely.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalizes extracted line text to plain ASCII.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    whitespace: Regex,
    glyphs: Regex,
    horizontal: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            // \x1c-\x1f are separators that count as whitespace for line text.
            whitespace: Regex::new(r"[\s\x1c-\x1f]+").expect("valid whitespace pattern"),
            glyphs: Regex::new(r"[\u{2022}\u{25CF}\u{2013}\u{2014}\u{2023}*]")
                .expect("valid glyph pattern"),
            horizontal: Regex::new(r"[ \t]+").expect("valid horizontal whitespace pattern"),
        }
    }

    /// Run both stages. An empty return means the line carries no text.
    pub fn normalize(&self, text: &str) -> String {
        let ascii = self.to_ascii(text);
        self.strip_glyphs(&ascii)
    }

    /// Stage 1: NFKD, ASCII only, collapsed whitespace.
    pub fn to_ascii(&self, text: &str) -> String {
        let decomposed: String = text.nfkd().filter(char::is_ascii).collect();
        self.whitespace
            .replace_all(&decomposed, " ")
            .trim()
            .to_string()
    }

    /// Stage 2: bullet and dash glyph removal.
    pub fn strip_glyphs(&self, text: &str) -> String {
        let stripped = self.glyphs.replace_all(text, "");
        // Trim again after collapsing: removing a glyph can expose a new edge space.
        self.horizontal
            .replace_all(stripped.trim(), " ")
            .trim()
            .to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
