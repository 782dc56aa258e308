//! Text box line wrapping

use crate::config::TextConfig;

/// Pixel widths of rendered characters
pub trait TextMetrics: std::fmt::Debug {
    fn char_width(&self, ch: char) -> u32;
}

/// Monospaced metrics with a narrower space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics {
    pub glyph: u32,
    pub space: u32,
}

impl FixedMetrics {
    pub fn from_config(config: &TextConfig) -> Self {
        Self {
            glyph: config.glyph_width,
            space: config.space_width,
        }
    }
}

impl TextMetrics for FixedMetrics {
    fn char_width(&self, ch: char) -> u32 {
        if ch == ' ' { self.space } else { self.glyph }
    }
}

fn word_width(word: &str, metrics: &dyn TextMetrics) -> u32 {
    word.chars().map(|c| metrics.char_width(c)).sum()
}

/// Visual lines `text` occupies in a box `width` pixels wide
///
/// Words wrap greedily; a word wider than the box is split between
/// characters. Every `'\n'` starts a new line, so a trailing break counts as
/// an empty line.
pub fn line_count(text: &str, width: u32, metrics: &dyn TextMetrics) -> usize {
    let space = metrics.char_width(' ');
    text.split('\n')
        .map(|paragraph| {
            let mut lines = 1;
            let mut used = 0u32;
            for word in paragraph.split(' ') {
                let w = word_width(word, metrics);
                let needed = if used == 0 { w } else { used + space + w };
                if needed <= width {
                    used = needed;
                    continue;
                }
                if used > 0 {
                    lines += 1;
                    used = 0;
                }
                for ch in word.chars() {
                    let cw = metrics.char_width(ch);
                    if used + cw > width && used > 0 {
                        lines += 1;
                        used = 0;
                    }
                    used += cw;
                }
            }
            lines
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: FixedMetrics = FixedMetrics { glyph: 8, space: 4 };

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(line_count("Hello there", 248, &METRICS), 1);
        assert_eq!(line_count("", 248, &METRICS), 1);
    }

    #[test]
    fn explicit_breaks_count() {
        assert_eq!(line_count("a\nb\nc", 248, &METRICS), 3);
        assert_eq!(line_count("a\n", 248, &METRICS), 2);
    }

    #[test]
    fn words_wrap_greedily() {
        // each word is 5 * 8 = 40px; "aaaaa bbbbb" = 84px
        assert_eq!(line_count("aaaaa bbbbb", 84, &METRICS), 1);
        assert_eq!(line_count("aaaaa bbbbb", 83, &METRICS), 2);
        assert_eq!(line_count("aaaaa bbbbb ccccc", 84, &METRICS), 2);
    }

    #[test]
    fn long_word_is_split() {
        // 10 chars * 8px in a 32px box -> 4 chars per line
        assert_eq!(line_count("abcdefghij", 32, &METRICS), 3);
    }
}
