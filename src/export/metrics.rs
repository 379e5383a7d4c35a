//! Text measurement for the base-14 Helvetica family.
//!
//! The exporter never embeds fonts; it uses the PDF viewer's built-in
//! Helvetica with WinAnsiEncoding. Layout therefore needs the standard AFM
//! advance widths, expressed in thousandths of the em, to wrap lines and to
//! position right-aligned fields by measured width rather than a fixed
//! offset.

use serde::{Deserialize, Serialize};

/// Font face used by the exporter. Oblique shares Regular's metrics, which
/// is exact for the Helvetica AFMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    /// PostScript name written into the PDF font dictionary.
    pub fn postscript_name(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }

    /// Resource name inside content streams (`/F1 10 Tf`).
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }
}

/// Helvetica advance widths for ASCII 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Bullet marker used for highlight lists. 0x95 in WinAnsi.
pub const BULLET: char = '\u{2022}';

/// Advance width of a character in thousandths of the em.
///
/// Characters outside the table fall back to the digit width; with trusted
/// résumé content that only affects exotic symbols, and a slightly generous
/// estimate errs toward earlier wrapping, never overflow.
pub fn char_width_units(c: char, font: Font) -> u16 {
    let table: &[u16; 95] = match font {
        Font::Bold => &HELVETICA_BOLD,
        Font::Regular | Font::Oblique => &HELVETICA,
    };
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        return table[(code - 0x20) as usize];
    }
    match c {
        '\u{2022}' => 350,                                // bullet
        '\u{2013}' => 556,                                // en dash
        '\u{2014}' => 1000,                               // em dash
        '\u{2018}' | '\u{2019}' => quote_width(font),     // single quotes
        '\u{201C}' | '\u{201D}' => double_quote_width(font),
        _ => 556,
    }
}

fn quote_width(font: Font) -> u16 {
    match font {
        Font::Bold => 278,
        _ => 222,
    }
}

fn double_quote_width(font: Font) -> u16 {
    match font {
        Font::Bold => 500,
        _ => 333,
    }
}

/// Rendered width of a string at the given size, in points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width_units(c, font) as u32).sum();
    units as f32 * size / 1000.0
}

/// Encode text for a WinAnsi content stream string.
///
/// ASCII passes through; the Latin-1 range maps directly (WinAnsi agrees with
/// it above 0xA0, which covers accented résumé text); typographic punctuation
/// gets its WinAnsi slot; anything else degrades to `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            match code {
                0x20..=0x7E => code as u8,
                0xA0..=0xFF => code as u8,
                _ => match c {
                    '\u{2022}' => 0x95,
                    '\u{2013}' => 0x96,
                    '\u{2014}' => 0x97,
                    '\u{2018}' => 0x91,
                    '\u{2019}' => 0x92,
                    '\u{201C}' => 0x93,
                    '\u{201D}' => 0x94,
                    _ => b'?',
                },
            }
        })
        .collect()
}
