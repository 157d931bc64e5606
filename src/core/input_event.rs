//! Structured input events decoded from raw terminal chunks.

use crate::core::input::parse_key;

const ESC: char = '\x1b';
const PASTE_START: &str = "\x1b[200~";
const PASTE_END: &str = "\x1b[201~";

/// Input event delivered to components.
///
/// `raw` is the exact sequence received from the terminal. `key_id` is a
/// normalized identifier (see [`parse_key`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { raw: String, key_id: String },
    Text { text: String },
    Paste { text: String },
    Resize { columns: u16, rows: u16 },
    UnknownRaw { raw: String },
}

/// Splits raw stdin chunks into [`InputEvent`]s.
///
/// Escape sequences and bracketed pastes may arrive split across reads; the
/// decoder holds incomplete tails until the next chunk completes them.
#[derive(Debug, Default)]
pub struct InputDecoder {
    pending: String,
    paste: Option<String>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an incomplete sequence or paste is buffered.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty() || self.paste.is_some()
    }

    pub fn feed(&mut self, chunk: &str) -> Vec<InputEvent> {
        self.pending.push_str(chunk);
        let data = std::mem::take(&mut self.pending);
        let mut events = Vec::new();
        let mut rest = data.as_str();

        while !rest.is_empty() {
            if let Some(buffer) = self.paste.as_mut() {
                match rest.find(PASTE_END) {
                    Some(end) => {
                        buffer.push_str(&rest[..end]);
                        let text = self.paste.take().unwrap_or_default();
                        events.push(InputEvent::Paste { text });
                        rest = &rest[end + PASTE_END.len()..];
                    }
                    None => {
                        // Keep a possible partial end marker for the next chunk.
                        let keep = partial_suffix_len(rest, PASTE_END);
                        buffer.push_str(&rest[..rest.len() - keep]);
                        self.pending.push_str(&rest[rest.len() - keep..]);
                        rest = "";
                    }
                }
                continue;
            }

            if let Some(after) = rest.strip_prefix(PASTE_START) {
                self.paste = Some(String::new());
                rest = after;
                continue;
            }

            match next_token(rest) {
                Token::Incomplete => {
                    self.pending.push_str(rest);
                    rest = "";
                }
                Token::Sequence(len) => {
                    let raw = &rest[..len];
                    events.push(key_or_unknown(raw));
                    rest = &rest[len..];
                }
                Token::Text(len) => {
                    events.push(InputEvent::Text {
                        text: rest[..len].to_string(),
                    });
                    rest = &rest[len..];
                }
            }
        }

        events
    }
}

enum Token {
    Incomplete,
    Sequence(usize),
    Text(usize),
}

fn next_token(data: &str) -> Token {
    let mut chars = data.chars();
    let Some(first) = chars.next() else {
        return Token::Incomplete;
    };

    if first == ESC {
        let bytes = data.as_bytes();
        return match bytes.get(1) {
            None => Token::Sequence(1),
            Some(b'[') => {
                if PASTE_START.starts_with(data) {
                    return Token::Incomplete;
                }
                // Linux console function keys use a doubled bracket.
                let params_start = if bytes.get(2) == Some(&b'[') { 3 } else { 2 };
                match bytes[params_start.min(bytes.len())..]
                    .iter()
                    .position(|b| (0x40..=0x7e).contains(b))
                {
                    Some(offset) => Token::Sequence(params_start + offset + 1),
                    None => Token::Incomplete,
                }
            }
            Some(b'O') => {
                if bytes.len() < 3 {
                    Token::Incomplete
                } else {
                    Token::Sequence(2 + char_len_at(data, 2))
                }
            }
            Some(_) => Token::Sequence(1 + char_len_at(data, 1)),
        };
    }

    if first.is_control() {
        return Token::Sequence(first.len_utf8());
    }

    let len = data
        .char_indices()
        .find(|(_, ch)| ch.is_control())
        .map_or(data.len(), |(idx, _)| idx);
    Token::Text(len)
}

fn char_len_at(data: &str, idx: usize) -> usize {
    data[idx..].chars().next().map_or(0, char::len_utf8)
}

fn partial_suffix_len(data: &str, marker: &str) -> usize {
    (1..marker.len())
        .rev()
        .find(|&len| data.ends_with(&marker[..len]))
        .unwrap_or(0)
}

fn key_or_unknown(raw: &str) -> InputEvent {
    match parse_key(raw) {
        Some(key_id) => InputEvent::Key {
            raw: raw.to_string(),
            key_id,
        },
        None => InputEvent::UnknownRaw {
            raw: raw.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{InputDecoder, InputEvent};

    fn key(raw: &str, key_id: &str) -> InputEvent {
        InputEvent::Key {
            raw: raw.to_string(),
            key_id: key_id.to_string(),
        }
    }

    fn text(value: &str) -> InputEvent {
        InputEvent::Text {
            text: value.to_string(),
        }
    }

    #[test]
    fn printable_run_is_one_text_event() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.feed("hello wörld"), vec![text("hello wörld")]);
    }

    #[test]
    fn keys_split_text_runs() {
        let mut decoder = InputDecoder::new();
        assert_eq!(
            decoder.feed("hi\rthere\x1b[A"),
            vec![
                text("hi"),
                key("\r", "enter"),
                text("there"),
                key("\x1b[A", "up")
            ]
        );
    }

    #[test]
    fn lone_escape_is_escape_key() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.feed("\x1b"), vec![key("\x1b", "escape")]);
    }

    #[test]
    fn csi_split_across_chunks_is_reassembled() {
        let mut decoder = InputDecoder::new();
        assert!(decoder.feed("\x1b[5").is_empty());
        assert!(decoder.has_pending());
        assert_eq!(decoder.feed("~"), vec![key("\x1b[5~", "pageUp")]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn bracketed_paste_spans_chunks() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.feed("a\x1b[200~line one\n"), vec![text("a")]);
        assert!(decoder.feed("line two\x1b[20").is_empty());
        assert_eq!(
            decoder.feed("1~b"),
            vec![
                InputEvent::Paste {
                    text: "line one\nline two".to_string()
                },
                text("b"),
            ]
        );
    }

    #[test]
    fn unknown_sequences_are_reported_raw() {
        let mut decoder = InputDecoder::new();
        assert_eq!(
            decoder.feed("\x1b[99z"),
            vec![InputEvent::UnknownRaw {
                raw: "\x1b[99z".to_string()
            }]
        );
    }

    #[test]
    fn alt_letter_consumes_two_chars() {
        let mut decoder = InputDecoder::new();
        assert_eq!(
            decoder.feed("\x1bbx"),
            vec![key("\x1bb", "alt+left"), text("x")]
        );
    }
}
