//! Grapheme width and visible width helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::ansi::strip_ansi;

const TAB_WIDTH: usize = 3;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    UnicodeWidthStr::width(grapheme)
}

pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }

    strip_ansi(input).graphemes(true).map(grapheme_width).sum()
}
