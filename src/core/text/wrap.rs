//! ANSI-aware word wrapping.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::ansi_sequence_len;
use super::width::grapheme_width;

enum Token<'a> {
    Ansi(&'a str),
    Grapheme(&'a str),
}

fn tokens(line: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut idx = 0;
    let mut text_start = 0;
    while idx < line.len() {
        if let Some(len) = ansi_sequence_len(line, idx) {
            out.extend(line[text_start..idx].graphemes(true).map(Token::Grapheme));
            out.push(Token::Ansi(&line[idx..idx + len]));
            idx += len;
            text_start = idx;
            continue;
        }
        idx += line[idx..].chars().next().map_or(1, char::len_utf8);
    }
    out.extend(line[text_start..].graphemes(true).map(Token::Grapheme));
    out
}

/// Wraps `text` to `width` columns.
///
/// Hard newlines are kept. Lines break after the last space that fits; words
/// longer than `width` are split. Escape sequences have zero width and stay in
/// place. A `width` of zero disables wrapping.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        let hard_line = hard_line.strip_suffix('\r').unwrap_or(hard_line);
        if width == 0 {
            lines.push(hard_line.to_string());
            continue;
        }
        wrap_line(hard_line, width, &mut lines);
    }
    lines
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;
    // Byte offset just past the last space in `current`, with the width up to it.
    let mut last_break: Option<(usize, usize)> = None;

    for token in tokens(line) {
        let grapheme = match token {
            Token::Ansi(code) => {
                current.push_str(code);
                continue;
            }
            Token::Grapheme(grapheme) => grapheme,
        };
        let grapheme_cols = grapheme_width(grapheme);

        while current_width > 0 && current_width + grapheme_cols > width {
            if grapheme == " " {
                break;
            }
            match last_break.take() {
                Some((offset, break_width)) => {
                    let rest = current.split_off(offset);
                    out.push(current.trim_end_matches(' ').to_string());
                    current = rest;
                    current_width -= break_width;
                }
                None => {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
            }
        }

        if grapheme == " " && current_width + grapheme_cols > width {
            out.push(current.trim_end_matches(' ').to_string());
            current.clear();
            current_width = 0;
            last_break = None;
            continue;
        }

        current.push_str(grapheme);
        current_width += grapheme_cols;
        if grapheme == " " {
            last_break = Some((current.len(), current_width));
        }
    }

    out.push(current);
}
