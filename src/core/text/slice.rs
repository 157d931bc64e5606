//! Width-aware truncation.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::ansi_sequence_len;
use super::width::{grapheme_width, visible_width};

const RESET: &str = "\x1b[0m";

/// Cuts `line` to at most `max_width` visible columns.
///
/// Escape sequences are kept. A wide grapheme that would straddle the limit is
/// dropped. When anything is cut, an SGR reset is appended so styling does not
/// bleed into the rest of the row.
pub fn truncate_to_width(line: &str, max_width: usize) -> String {
    if visible_width(line) <= max_width {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    let mut used = 0;
    let mut idx = 0;
    let mut text_start = 0;
    let mut full = false;

    let push_text = |text: &str, out: &mut String, used: &mut usize, full: &mut bool| {
        for grapheme in text.graphemes(true) {
            let cols = grapheme_width(grapheme);
            if *used + cols > max_width {
                *full = true;
                return;
            }
            out.push_str(grapheme);
            *used += cols;
        }
    };

    while idx < line.len() && !full {
        if let Some(len) = ansi_sequence_len(line, idx) {
            push_text(&line[text_start..idx], &mut out, &mut used, &mut full);
            if !full {
                out.push_str(&line[idx..idx + len]);
            }
            idx += len;
            text_start = idx;
            continue;
        }
        idx += line[idx..].chars().next().map_or(1, char::len_utf8);
    }
    if !full {
        push_text(&line[text_start..], &mut out, &mut used, &mut full);
    }

    out.push_str(RESET);
    out
}
