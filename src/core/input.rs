//! Key parsing for legacy (VT/xterm) terminal sequences.
//!
//! Key ids are normalized strings such as `enter`, `ctrl+c`, `alt+left` or
//! `pageUp`. Modifiers are ordered `shift`, `ctrl`, `alt`.

const MOD_SHIFT: u8 = 1;
const MOD_ALT: u8 = 2;
const MOD_CTRL: u8 = 4;

fn legacy_sequence_key_id(data: &str) -> Option<&'static str> {
    match data {
        "\x1b" => Some("escape"),
        "\t" => Some("tab"),
        "\r" | "\n" | "\x1bOM" => Some("enter"),
        "\x7f" | "\x08" => Some("backspace"),
        "\x00" => Some("ctrl+space"),
        "\x1b[Z" => Some("shift+tab"),
        "\x1b[A" | "\x1bOA" => Some("up"),
        "\x1b[B" | "\x1bOB" => Some("down"),
        "\x1b[C" | "\x1bOC" => Some("right"),
        "\x1b[D" | "\x1bOD" => Some("left"),
        "\x1b[H" | "\x1bOH" | "\x1b[1~" | "\x1b[7~" => Some("home"),
        "\x1b[F" | "\x1bOF" | "\x1b[4~" | "\x1b[8~" => Some("end"),
        "\x1b[2~" => Some("insert"),
        "\x1b[3~" => Some("delete"),
        "\x1b[5~" | "\x1b[[5~" => Some("pageUp"),
        "\x1b[6~" | "\x1b[[6~" => Some("pageDown"),
        "\x1b\x7f" | "\x1b\x08" => Some("alt+backspace"),
        "\x1b\r" => Some("alt+enter"),
        "\x1bb" | "\x1bB" => Some("alt+left"),
        "\x1bf" | "\x1bF" => Some("alt+right"),
        _ => None,
    }
}

/// Parses xterm modified sequences like `ESC [ 1 ; 5 C` or `ESC [ 3 ; 2 ~`.
fn parse_modified_csi(data: &str) -> Option<String> {
    let body = data.strip_prefix("\x1b[")?;
    let final_char = body.chars().last()?;
    let params = &body[..body.len() - final_char.len_utf8()];
    let (code, modifier) = params.split_once(';')?;
    let modifier = modifier.parse::<u8>().ok()?.checked_sub(1)?;

    let key = match (code, final_char) {
        ("1", 'A') => "up",
        ("1", 'B') => "down",
        ("1", 'C') => "right",
        ("1", 'D') => "left",
        ("1", 'H') => "home",
        ("1", 'F') => "end",
        ("3", '~') => "delete",
        ("5", '~') => "pageUp",
        ("6", '~') => "pageDown",
        _ => return None,
    };

    let mut id = String::new();
    if modifier & MOD_SHIFT != 0 {
        id.push_str("shift+");
    }
    if modifier & MOD_CTRL != 0 {
        id.push_str("ctrl+");
    }
    if modifier & MOD_ALT != 0 {
        id.push_str("alt+");
    }
    id.push_str(key);
    Some(id)
}

/// Parse a single key chunk into a normalized key id.
///
/// Returns `None` for printable text and for sequences this parser does not know.
pub fn parse_key(data: &str) -> Option<String> {
    if let Some(key_id) = legacy_sequence_key_id(data) {
        return Some(key_id.to_string());
    }
    if let Some(key_id) = parse_modified_csi(data) {
        return Some(key_id);
    }

    let bytes = data.as_bytes();
    if bytes.len() == 1 {
        let code = bytes[0];
        if (1..=26).contains(&code) {
            return Some(format!("ctrl+{}", (code + 96) as char));
        }
    }
    if bytes.len() == 2 && bytes[0] == 0x1b {
        let code = bytes[1];
        if (1..=26).contains(&code) {
            return Some(format!("ctrl+alt+{}", (code + 96) as char));
        }
        if code.is_ascii_lowercase() {
            return Some(format!("alt+{}", code as char));
        }
    }

    None
}

/// Returns true when `data` is `key_id` (for example `matches_key("\x03", "ctrl+c")`).
pub fn matches_key(data: &str, key_id: &str) -> bool {
    parse_key(data).as_deref() == Some(key_id)
}
