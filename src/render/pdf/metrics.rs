//! Standard font metrics, line wrapping and WinAnsi text encoding.

use unicode_normalization::UnicodeNormalization;

use super::style::FontFace;

/// Glyph widths (1/1000 em) of Helvetica for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Glyph widths (1/1000 em) of Helvetica-Bold for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

fn glyph_width(c: char, face: FontFace) -> u16 {
    let table = match face {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    };
    match c {
        ' '..='~' => table[c as usize - 32],
        '\t' => table[0],
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in points.
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, face))).sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap to `max_width`.
///
/// Words wider than a full line are broken between characters. Always
/// returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let space = text_width(" ", face, size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = text_width(word, face, size);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + space + word_width
        };

        if needed <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
        } else {
            let mut pieces = break_word(word, face, size, max_width);
            let last = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            current_width = text_width(&last, face, size);
            current = last;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split a single word into chunks no wider than `max_width`.
pub fn break_word(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;

    for c in word.chars() {
        let w = f32::from(glyph_width(c, face)) * size / 1000.0;
        if width + w > max_width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            width = 0.0;
        }
        current.push(c);
        width += w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Encode text for a simple font with `WinAnsiEncoding`.
///
/// Text is NFC-normalized first; characters with no WinAnsi code become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc().map(win_ansi_byte).collect()
}

/// Count characters of `text` that [`encode_win_ansi`] replaces with `?`.
pub fn unencodable_count(text: &str) -> usize {
    text.nfc()
        .filter(|&c| c != '?' && win_ansi_byte(c) == b'?')
        .count()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\t' => b' ',
        '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Hi" = H(722) + i(222) at 10pt
        let w = text_width("Hi", FontFace::Regular, 10.0);
        assert!((w - 9.44).abs() < 0.001);
        assert!(text_width("Hi", FontFace::Bold, 10.0) > w);
        assert_eq!(text_width("", FontFace::Regular, 12.0), 0.0);
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let lines = wrap_text("short text", FontFace::Regular, 10.0, 500.0);
        assert_eq!(lines, vec!["short text"]);
    }

    #[test]
    fn test_wrap_multiple_lines() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let lines = wrap_text(text, FontFace::Regular, 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, FontFace::Regular, 10.0) <= 60.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let lines = wrap_text("aaaaaaaaaaaaaaaaaaaa", FontFace::Regular, 10.0, 30.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "aaaaaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", FontFace::Regular, 10.0, 100.0), vec![""]);
        assert_eq!(wrap_text("   ", FontFace::Regular, 10.0, 100.0), vec![""]);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("A(b)"), b"A(b)".to_vec());
        assert_eq!(encode_win_ansi("caf\u{00E9}"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("e\u{0301}"), vec![0xE9]);
        assert_eq!(encode_win_ansi("\u{2014}\u{20AC}"), vec![0x97, 0x80]);
        assert_eq!(encode_win_ansi("\u{4E2D}"), vec![b'?']);
    }

    #[test]
    fn test_unencodable_count() {
        assert_eq!(unencodable_count("Caf\u{e9} \u{2014} 5\u{20ac}?"), 0);
        assert_eq!(unencodable_count("\u{4f60}\u{597d} ok \u{2192}"), 3);
        // Combining accent composes to a WinAnsi character.
        assert_eq!(unencodable_count("e\u{0301}"), 0);
        assert_eq!(encode_win_ansi("\u{2192}"), vec![b'?']);
    }
}
