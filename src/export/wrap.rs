//! Greedy line wrapping over measured text.
//!
//! Breaks free text into an ordered sequence of lines that each fit within a
//! maximum width. Breaks happen at whitespace; a single word wider than the
//! whole line is split hard mid-word rather than being allowed to overflow
//! the writable area.

use super::metrics::{self, Font};

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Whitespace is normalized: runs of spaces and newlines in the source
/// collapse to single separators. Empty or whitespace-only input produces no
/// lines.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let space_width = metrics::text_width(" ", font, size);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in text.split_whitespace() {
        for piece in split_oversized(word, font, size, max_width) {
            let piece_width = metrics::text_width(&piece, font, size);
            if current.is_empty() {
                current.push_str(&piece);
                current_width = piece_width;
            } else if current_width + space_width + piece_width <= max_width {
                current.push(' ');
                current.push_str(&piece);
                current_width += space_width + piece_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(&piece);
                current_width = piece_width;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split a word that cannot fit on a line of its own into chunks that can.
///
/// Words that fit come back as a single piece. The split is by character, so
/// a chunk is always non-empty as long as one character fits.
fn split_oversized(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    if metrics::text_width(word, font, size) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0.0f32;
    for c in word.chars() {
        let w = metrics::text_width(&c.to_string(), font, size);
        if !chunk.is_empty() && chunk_width + w > max_width {
            pieces.push(std::mem::take(&mut chunk));
            chunk_width = 0.0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        pieces.push(chunk);
    }
    pieces
}
