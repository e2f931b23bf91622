//! Vim key notation parsing
//!
//! Turns binding strings like `"A"`, `"dd"`, `"<C-v>"` or `"<S-Home>"` into
//! keystroke sequences. This is the notation commands are registered under
//! and the notation the remapping config uses.

use std::fmt;

use super::types::{KeyCode, Keystroke, Modifiers};

/// Error raised while parsing Vim key notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// A `<...>` token was opened but never closed
    UnclosedBracket(String),
    /// An empty `<>` token
    EmptyBracket,
    /// Unknown key name inside `<...>`
    UnknownKey(String),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::UnclosedBracket(s) => write!(f, "Unclosed key token: <{}", s),
            NotationError::EmptyBracket => write!(f, "Empty key token: <>"),
            NotationError::UnknownKey(k) => write!(f, "Unknown key: {}", k),
        }
    }
}

impl std::error::Error for NotationError {}

/// Parse a Vim notation string into a keystroke sequence
///
/// Plain characters each become one keystroke (`"dd"` is two). Bracketed
/// tokens take optional `C-`/`S-`/`A-`/`M-` modifier prefixes and a key
/// name: `"<C-v>"`, `"<S-Home>"`, `"<BS>"`. `"<lt>"` is a literal `<`.
pub fn parse_keys(notation: &str) -> Result<Vec<Keystroke>, NotationError> {
    let mut keys = Vec::new();
    let mut chars = notation.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            keys.push(Keystroke::char(c));
            continue;
        }

        let mut token = String::new();
        let mut closed = false;
        for t in chars.by_ref() {
            if t == '>' {
                closed = true;
                break;
            }
            token.push(t);
        }
        if !closed {
            return Err(NotationError::UnclosedBracket(token));
        }
        keys.push(parse_bracketed(&token)?);
    }

    Ok(keys)
}

/// Render a keystroke sequence back to notation (inverse of [`parse_keys`])
pub fn display_keys(keys: &[Keystroke]) -> String {
    keys.iter().map(|k| k.to_string()).collect()
}

/// Parse the inside of a `<...>` token
fn parse_bracketed(token: &str) -> Result<Keystroke, NotationError> {
    if token.is_empty() {
        return Err(NotationError::EmptyBracket);
    }

    let mut mods = Modifiers::NONE;
    let mut rest = token;

    // Strip modifier prefixes; the remainder is the key name
    loop {
        let Some((prefix, tail)) = rest.split_once('-') else {
            break;
        };
        let modifier = match prefix {
            "C" | "c" => Modifiers::CTRL,
            "S" | "s" => Modifiers::SHIFT,
            "A" | "a" => Modifiers::ALT,
            "M" | "m" => Modifiers::META,
            _ => break,
        };
        // "<C->" style tokens have no key after the modifier
        if tail.is_empty() {
            return Err(NotationError::UnknownKey(token.to_string()));
        }
        mods = mods | modifier;
        rest = tail;
    }

    let key = parse_key_name(rest).ok_or_else(|| NotationError::UnknownKey(rest.to_string()))?;
    Ok(Keystroke::new(key, mods))
}

/// Parse a key name from inside a bracketed token
fn parse_key_name(name: &str) -> Option<KeyCode> {
    // Single characters pass through with case preserved ("<C-v>" vs "<C-V>")
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "bs" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "lt" => KeyCode::Char('<'),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "insert" => KeyCode::Insert,
        f if f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if (1..=12).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_char() {
        assert_eq!(parse_keys("A").unwrap(), vec![Keystroke::char('A')]);
    }

    #[test]
    fn test_parse_multikey_sequence() {
        assert_eq!(
            parse_keys("dd").unwrap(),
            vec![Keystroke::char('d'), Keystroke::char('d')]
        );
        assert_eq!(parse_keys("gg").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_ctrl_key() {
        assert_eq!(
            parse_keys("<C-v>").unwrap(),
            vec![Keystroke::char_with_mods('v', Modifiers::CTRL)]
        );
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(
            parse_keys("<Esc>").unwrap(),
            vec![Keystroke::key(KeyCode::Escape)]
        );
        assert_eq!(
            parse_keys("<BS>").unwrap(),
            vec![Keystroke::key(KeyCode::Backspace)]
        );
        assert_eq!(
            parse_keys("<S-Home>").unwrap(),
            vec![Keystroke::new(KeyCode::Home, Modifiers::SHIFT)]
        );
    }

    #[test]
    fn test_parse_mixed_sequence() {
        let keys = parse_keys("g<C-a>").unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], Keystroke::char('g'));
        assert_eq!(keys[1], Keystroke::char_with_mods('a', Modifiers::CTRL));
    }

    #[test]
    fn test_parse_case_sensitivity() {
        assert_ne!(parse_keys("a").unwrap(), parse_keys("A").unwrap());
        assert_ne!(parse_keys("<C-v>").unwrap(), parse_keys("<C-V>").unwrap());
    }

    #[test]
    fn test_parse_lt_and_space() {
        assert_eq!(parse_keys("<lt>").unwrap(), vec![Keystroke::char('<')]);
        assert_eq!(parse_keys("<Space>").unwrap(), vec![Keystroke::char(' ')]);
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(parse_keys("<F5>").unwrap(), vec![Keystroke::key(KeyCode::F(5))]);
        assert!(parse_keys("<F13>").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_keys("<C-"),
            Err(NotationError::UnclosedBracket(_))
        ));
        assert!(matches!(parse_keys("<>"), Err(NotationError::EmptyBracket)));
        assert!(matches!(
            parse_keys("<NoSuchKey>"),
            Err(NotationError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        for notation in ["A", "dd", "<C-v>", "<S-Home>", "<Esc>", "g<C-a>", "<Space>", "<lt>"] {
            let keys = parse_keys(notation).unwrap();
            assert_eq!(parse_keys(&display_keys(&keys)).unwrap(), keys);
        }
    }
}
