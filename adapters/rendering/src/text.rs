//! Fixed-advance glyph layout for HUD digits and the text box.

use glam::Vec2;

use crate::SpriteKey;

/// One character positioned in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// Character being drawn.
    pub symbol: char,
    /// Atlas sprite for the character.
    pub key: SpriteKey,
    /// Anchor point of the glyph.
    pub at: Vec2,
}

/// Places the glyphs of `line` left to right starting at `start`.
///
/// Blanks and unsupported symbols advance the pen without producing a glyph.
#[must_use]
pub fn layout_line(line: &str, start: Vec2, advance: f32) -> Vec<GlyphPlacement> {
    line.chars()
        .enumerate()
        .filter_map(|(index, symbol)| {
            SpriteKey::glyph(symbol).map(|key| GlyphPlacement {
                symbol,
                key,
                at: start + Vec2::new(index as f32 * advance, 0.0),
            })
        })
        .collect()
}

/// Greedily wraps words into lines of at most `columns` characters.
///
/// Words longer than a line are split.
#[must_use]
pub fn wrap_words(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(columns);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > columns && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
