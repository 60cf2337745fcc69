//! Word wrapping for transcript text.
//!
//! The transcript is laid out block by block (text, then an optional chart),
//! so line counts must be known before rendering. Text is wrapped here and
//! then drawn with `Paragraph` without ratatui's own wrapping, which keeps
//! the computed heights and the rendered output in agreement.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Configuration for text wrapping behavior
#[derive(Debug, Clone, Copy)]
pub struct WrapConfig {
    /// Maximum display width of a line, in terminal columns
    pub width: usize,
}

impl WrapConfig {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

pub struct TextWrapper;

impl TextWrapper {
    /// Wrap `text` into display lines no wider than the configured width.
    ///
    /// Explicit newlines always start a new line, blank lines are kept, words
    /// break at spaces and words longer than a line are split by character.
    /// A zero width disables wrapping.
    pub fn wrap_lines(text: &str, config: &WrapConfig) -> Vec<String> {
        let mut out = Vec::new();
        for paragraph in text.split('\n') {
            let paragraph = paragraph.trim_end_matches('\r');
            if config.width == 0 || paragraph.width() <= config.width {
                out.push(paragraph.to_string());
                continue;
            }
            wrap_paragraph(paragraph, config.width, &mut out);
        }
        out
    }

    pub fn count_wrapped_lines(text: &str, config: &WrapConfig) -> usize {
        Self::wrap_lines(text, config).len()
    }
}

fn wrap_paragraph(paragraph: &str, width: usize, out: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_width = 0usize;

    for word in paragraph.split(' ') {
        let word_width = word.width();
        let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };

        if needed <= width {
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
            continue;
        }

        if !line.is_empty() {
            out.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if line_width + ch_width > width && !line.is_empty() {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(ch);
            line_width += ch_width;
        }
    }

    out.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, width: usize) -> Vec<String> {
        TextWrapper::wrap_lines(text, &WrapConfig::new(width))
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(wrap("hello world again", 11), vec!["hello world", "again"]);
    }

    #[test]
    fn keeps_blank_lines_and_explicit_breaks() {
        assert_eq!(wrap("Sales are up.\n\nMore", 40), vec!["Sales are up.", "", "More"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn trailing_newline_yields_trailing_empty_line() {
        assert_eq!(wrap("Intro\n", 10), vec!["Intro", ""]);
    }

    #[test]
    fn test_long_word_breaking() {
        let lines = wrap("superlongword", 5);
        assert_eq!(lines, vec!["super", "longw", "ord"]);
        assert!(lines.iter().all(|line| line.width() <= 5));
    }

    #[test]
    fn test_wrap_with_double_width_chars() {
        let lines = wrap("日本語", 4);
        assert_eq!(lines, vec!["日本", "語"]);
        assert!(lines.iter().all(|line| line.width() <= 4));
    }

    #[test]
    fn zero_width_disables_wrapping() {
        assert_eq!(wrap("a b c", 0), vec!["a b c"]);
    }

    #[test]
    fn count_matches_wrapped_lines() {
        let config = WrapConfig::new(8);
        let text = "one two three four\nfive";
        assert_eq!(
            TextWrapper::count_wrapped_lines(text, &config),
            TextWrapper::wrap_lines(text, &config).len()
        );
    }
}
