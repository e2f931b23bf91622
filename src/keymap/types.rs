//! Core types for the keymap system: Keystroke, Modifiers, KeyCode

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// Shift is only meaningful together with named keys (`<S-Home>`); printable
/// characters carry their case in [`KeyCode::Char`] directly, the way Vim
/// distinguishes `a` from `A`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    /// Check if alt is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    /// Check if meta is held
    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Vim notation prefixes, in the order Vim prints them
        if self.ctrl() {
            write!(f, "C-")?;
        }
        if self.shift() {
            write!(f, "S-")?;
        }
        if self.alt() {
            write!(f, "A-")?;
        }
        if self.meta() {
            write!(f, "M-")?;
        }
        Ok(())
    }
}

/// A key code representing a logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, case preserved (`a` and `A` are distinct keys)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F12
}

impl KeyCode {
    /// Vim notation name for named keys (the part inside `<...>`)
    pub fn notation_name(&self) -> Option<&'static str> {
        match self {
            KeyCode::Char(_) => None,
            KeyCode::Enter => Some("CR"),
            KeyCode::Escape => Some("Esc"),
            KeyCode::Tab => Some("Tab"),
            KeyCode::Backspace => Some("BS"),
            KeyCode::Delete => Some("Del"),
            KeyCode::Up => Some("Up"),
            KeyCode::Down => Some("Down"),
            KeyCode::Left => Some("Left"),
            KeyCode::Right => Some("Right"),
            KeyCode::Home => Some("Home"),
            KeyCode::End => Some("End"),
            KeyCode::PageUp => Some("PageUp"),
            KeyCode::PageDown => Some("PageDown"),
            KeyCode::Insert => Some("Insert"),
            KeyCode::F(_) => None,
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    /// Create a new keystroke
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// Create a keystroke for a printable character
    pub const fn char(c: char) -> Self {
        Self {
            key: KeyCode::Char(c),
            mods: Modifiers::NONE,
        }
    }

    /// Create a keystroke with a character and modifiers
    pub const fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self {
            key: KeyCode::Char(c),
            mods,
        }
    }
}

impl fmt::Display for Keystroke {
    /// Renders Vim notation: `a`, `<C-v>`, `<S-Home>`, `<Space>`, `<lt>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.key, self.mods.is_empty()) {
            (KeyCode::Char('<'), true) => write!(f, "<lt>"),
            (KeyCode::Char(' '), true) => write!(f, "<Space>"),
            (KeyCode::Char(c), true) => write!(f, "{}", c),
            (key, _) => {
                write!(f, "<{}", self.mods)?;
                match key {
                    KeyCode::Char(' ') => write!(f, "Space")?,
                    KeyCode::Char(c) => write!(f, "{}", c)?,
                    KeyCode::F(n) => write!(f, "F{}", n)?,
                    other => write!(f, "{}", other.notation_name().unwrap_or("?"))?,
                }
                write!(f, ">")
            }
        }
    }
}
