//! Printer column widths for mixed Latin/CJK text.
//!
//! A fixed-pitch printer line holds [`LINE_UNITS`] narrow columns at font size 1.
//! Wide characters (CJK, kana, Hangul, fullwidth forms, emoji) take two columns,
//! combining marks take none.

use crate::server::model::receipt::FontSize;

/// Columns on one line at font size 1.
pub(crate) const LINE_UNITS: usize = 46;

const COMBINING: &[(u32, u32)] = &[
    (0x0300, 0x036F),
    (0x1AB0, 0x1AFF),
    (0x1DC0, 0x1DFF),
    (0x20D0, 0x20FF),
    (0xFE20, 0xFE2F),
    // combining dakuten / handakuten
    (0x3099, 0x309A),
];

const SMALL_KANA: &[u32] = &[
    // ぁぃぅぇぉっゃゅょゎゕゖ
    0x3041, 0x3043, 0x3045, 0x3047, 0x3049, 0x3063, 0x3083, 0x3085, 0x3087, 0x308E, 0x3095, 0x3096,
    // ァィゥェォッャュョヮヵヶ
    0x30A1, 0x30A3, 0x30A5, 0x30A7, 0x30A9, 0x30C3, 0x30E3, 0x30E5, 0x30E7, 0x30EE, 0x30F5, 0x30F6,
];

const SMALL_KANA_EXT: (u32, u32) = (0x31F0, 0x31FF);

const WIDE: &[(u32, u32)] = &[
    (0x1100, 0x115F),   // Hangul Jamo
    (0x2E80, 0x303F),   // CJK radicals, Kangxi, symbols and punctuation
    (0x3040, 0x30FF),   // Hiragana, Katakana
    (0x3100, 0x31EF),   // Bopomofo, Hangul compatibility Jamo, Kanbun, strokes
    (0x3200, 0x4DBF),   // enclosed CJK, compatibility, extension A
    (0x4E00, 0x9FFF),   // CJK unified ideographs
    (0xA960, 0xA97F),   // Hangul Jamo extended A
    (0xAC00, 0xD7A3),   // Hangul syllables
    (0xF900, 0xFAFF),   // CJK compatibility ideographs
    (0xFE10, 0xFE19),   // vertical forms
    (0xFE30, 0xFE6F),   // CJK compatibility forms, small form variants
    (0xFF00, 0xFF60),   // fullwidth ASCII variants
    (0xFFE0, 0xFFE6),   // fullwidth signs
    (0x1F300, 0x1F64F), // pictographs, emoticons
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
    (0x20000, 0x3FFFD), // CJK extensions B and later
];

fn in_ranges(cp: u32, ranges: &[(u32, u32)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Columns taken by a single code point.
pub(crate) fn char_width(c: char) -> usize {
    let cp = c as u32;
    if in_ranges(cp, COMBINING) {
        0
    } else if SMALL_KANA.contains(&cp) || (SMALL_KANA_EXT.0..=SMALL_KANA_EXT.1).contains(&cp) {
        1
    } else if in_ranges(cp, WIDE) {
        2
    } else {
        1
    }
}

pub(crate) fn visual_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Units a line may hold at `font_size`.
pub(crate) fn capacity(font_size: FontSize) -> usize {
    LINE_UNITS / usize::from(font_size.multiplier())
}

/// Longest code-point prefix of `text` whose width fits in `max_units`.
pub(crate) fn clamp_by_visual_width(text: &str, max_units: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let w = char_width(c);
        if used + w > max_units {
            return &text[..idx];
        }
        used += w;
    }
    text
}
