//! Keycode tables: key names and printable characters to HID codes.
//!
//! Three static tables live here, all compiled to `match` statements:
//!
//! - **name → key** ([`hid::HidKeyCode::from_name`]): `"enter"` → 0x28.
//! - **shifted character → base character** ([`shifted_base`]): `'!'` → `'1'`.
//! - **DuckyScript alias → name** ([`ducky::canonical_name`]): `ESCAPE` → `esc`.
//!
//! [`KeyMapper`] combines them into the two lookups the encoder needs.

pub mod ducky;
pub mod hid;
pub mod modifier;

pub use hid::HidKeyCode;
pub use modifier::Modifier;

use thiserror::Error;

/// Error type for key lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    /// The name (or character) has no entry in the keycode table.
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
}

/// Unified key mapper providing all lookup directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Resolves a lowercase key name to its [`HidKeyCode`].
    ///
    /// Returns `None` if the name is not in the table.  Modifier names
    /// (`"ctrl"`, `"shift"`, ...) are not keys; use [`KeyMapper::resolve_modifier`].
    pub fn resolve(name: &str) -> Option<HidKeyCode> {
        HidKeyCode::from_name(name)
    }

    /// Like [`KeyMapper::resolve`] but reports a miss as [`KeymapError::UnknownKey`].
    pub fn lookup(name: &str) -> Result<HidKeyCode, KeymapError> {
        Self::resolve(name).ok_or_else(|| KeymapError::UnknownKey(name.to_string()))
    }

    /// Resolves a modifier name to its bit.
    pub fn resolve_modifier(name: &str) -> Option<Modifier> {
        Modifier::from_name(name)
    }

    /// Resolves a typed character to the key that produces it on a US layout,
    /// plus the modifier that must be held.
    ///
    /// - `'A'`..=`'Z'` → the lowercase letter's key with Shift.
    /// - Shifted punctuation (`'!'`, `'@'`, `'{'`, ...) → the unshifted key with Shift.
    /// - `' '`, `'\t'`, `'\n'` → space, tab, enter.
    /// - Any other character with a direct table entry → that key, no modifier.
    ///
    /// Returns `None` for characters that cannot be typed (e.g. `'é'`).
    pub fn resolve_char(ch: char) -> Option<(HidKeyCode, Modifier)> {
        if ch.is_ascii_uppercase() {
            return direct_char(ch.to_ascii_lowercase()).map(|k| (k, Modifier::SHIFT));
        }
        if let Some(base) = shifted_base(ch) {
            return direct_char(base).map(|k| (k, Modifier::SHIFT));
        }
        direct_char(ch).map(|k| (k, Modifier::NONE))
    }
}

/// Returns the unshifted character that produces `ch` when Shift is held.
pub fn shifted_base(ch: char) -> Option<char> {
    let base = match ch {
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        ':' => ';',
        '"' => '\'',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        '~' => '`',
        _ => return None,
    };
    Some(base)
}

fn direct_char(ch: char) -> Option<HidKeyCode> {
    match ch {
        ' ' => Some(HidKeyCode::Space),
        '\t' => Some(HidKeyCode::Tab),
        '\n' => Some(HidKeyCode::Enter),
        _ => {
            let mut buf = [0u8; 4];
            HidKeyCode::from_name(ch.encode_utf8(&mut buf))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_returns_key_for_known_names() {
        assert_eq!(KeyMapper::resolve("enter"), Some(HidKeyCode::Enter));
        assert_eq!(KeyMapper::resolve("f5"), Some(HidKeyCode::F5));
        assert_eq!(KeyMapper::resolve("a"), Some(HidKeyCode::KeyA));
    }

    #[test]
    fn test_resolve_does_not_treat_modifiers_as_keys() {
        assert_eq!(KeyMapper::resolve("ctrl"), None);
        assert_eq!(KeyMapper::resolve_modifier("ctrl"), Some(Modifier::CTRL));
    }

    #[test]
    fn test_lookup_reports_unknown_key() {
        assert_eq!(
            KeyMapper::lookup("hyper"),
            Err(KeymapError::UnknownKey("hyper".to_string()))
        );
    }

    #[test]
    fn test_resolve_char_uppercase_sets_shift() {
        for upper in 'A'..='Z' {
            let lower = upper.to_ascii_lowercase();
            let expected = KeyMapper::resolve(&lower.to_string()).unwrap();
            assert_eq!(
                KeyMapper::resolve_char(upper),
                Some((expected, Modifier::SHIFT)),
                "{upper} should be shift+{lower}"
            );
        }
    }

    #[test]
    fn test_resolve_char_lowercase_has_no_modifier() {
        assert_eq!(
            KeyMapper::resolve_char('b'),
            Some((HidKeyCode::KeyB, Modifier::NONE))
        );
    }

    #[test]
    fn test_resolve_char_shift_map_uses_base_key() {
        let cases = [
            ('!', HidKeyCode::Digit1),
            ('@', HidKeyCode::Digit2),
            ('#', HidKeyCode::Digit3),
            (')', HidKeyCode::Digit0),
            ('_', HidKeyCode::Minus),
            ('+', HidKeyCode::Equal),
            ('{', HidKeyCode::BracketLeft),
            ('|', HidKeyCode::Backslash),
            (':', HidKeyCode::Semicolon),
            ('"', HidKeyCode::Quote),
            ('<', HidKeyCode::Comma),
            ('?', HidKeyCode::Slash),
            ('~', HidKeyCode::Backquote),
        ];
        for (ch, key) in cases {
            assert_eq!(
                KeyMapper::resolve_char(ch),
                Some((key, Modifier::SHIFT)),
                "{ch:?} should be shift+{key:?}"
            );
        }
    }

    #[test]
    fn test_resolve_char_whitespace() {
        assert_eq!(KeyMapper::resolve_char(' '), Some((HidKeyCode::Space, Modifier::NONE)));
        assert_eq!(KeyMapper::resolve_char('\t'), Some((HidKeyCode::Tab, Modifier::NONE)));
        assert_eq!(KeyMapper::resolve_char('\n'), Some((HidKeyCode::Enter, Modifier::NONE)));
    }

    #[test]
    fn test_resolve_char_unmapped_returns_none() {
        assert_eq!(KeyMapper::resolve_char('é'), None);
        assert_eq!(KeyMapper::resolve_char('\u{7f}'), None);
    }

    #[test]
    fn test_every_shifted_base_is_directly_typeable() {
        for ch in "!@#$%^&*()_+{}|:\"<>?~".chars() {
            let base = shifted_base(ch).expect("shift map entry");
            assert!(direct_char(base).is_some(), "base {base:?} of {ch:?} has no key");
        }
    }
}
