//! DuckyScript key-name aliases.
//!
//! Scripts spell keys the DuckyScript way (`GUI`, `ESCAPE`, `DOWNARROW`);
//! the keycode table uses short lowercase names (`gui`, `esc`, `down`).
//! Tokens without an alias are simply lowercased, so `a`, `F5` and `delete`
//! all work unchanged.

/// Maps a DuckyScript token to the canonical key or modifier name.
///
/// The lookup is case-insensitive.
pub fn canonical_name(token: &str) -> String {
    match alias(&token.to_ascii_uppercase()) {
        Some(name) => name.to_string(),
        None => token.to_lowercase(),
    }
}

fn alias(upper: &str) -> Option<&'static str> {
    let name = match upper {
        "GUI" | "WINDOWS" => "gui",
        "CTRL" | "CONTROL" => "ctrl",
        "SHIFT" => "shift",
        "ALT" => "alt",
        "ENTER" => "enter",
        "ESCAPE" | "ESC" => "esc",
        "TAB" => "tab",
        "SPACE" => "space",
        "BACKSPACE" => "backspace",
        "DELETE" => "delete",
        "HOME" => "home",
        "END" => "end",
        "PAGEUP" => "pageup",
        "PAGEDOWN" => "pagedown",
        "UP" | "UPARROW" => "up",
        "DOWN" | "DOWNARROW" => "down",
        "LEFT" | "LEFTARROW" => "left",
        "RIGHT" | "RIGHTARROW" => "right",
        "F1" => "f1",
        "F2" => "f2",
        "F3" => "f3",
        "F4" => "f4",
        "F5" => "f5",
        "F6" => "f6",
        "F7" => "f7",
        "F8" => "f8",
        "F9" => "f9",
        "F10" => "f10",
        "F11" => "f11",
        "F12" => "f12",
        "CAPSLOCK" => "caps",
        "PRINTSCREEN" => "print",
        "SCROLLLOCK" => "scroll",
        "PAUSE" | "BREAK" => "pause",
        "INSERT" => "insert",
        "MENU" | "APP" => "app",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{hid::HidKeyCode, modifier::Modifier};

    #[test]
    fn test_aliases_are_case_insensitive() {
        assert_eq!(canonical_name("GUI"), "gui");
        assert_eq!(canonical_name("windows"), "gui");
        assert_eq!(canonical_name("Escape"), "esc");
        assert_eq!(canonical_name("DownArrow"), "down");
    }

    #[test]
    fn test_unknown_token_falls_back_to_lowercase() {
        assert_eq!(canonical_name("A"), "a");
        assert_eq!(canonical_name("Right_Alt"), "right_alt");
        assert_eq!(canonical_name("XYZZY"), "xyzzy");
    }

    #[test]
    fn test_every_alias_target_exists_in_a_table() {
        let tokens = [
            "GUI", "WINDOWS", "CTRL", "CONTROL", "SHIFT", "ALT", "ENTER", "ESCAPE", "ESC", "TAB",
            "SPACE", "BACKSPACE", "DELETE", "HOME", "END", "PAGEUP", "PAGEDOWN", "UP", "UPARROW",
            "DOWN", "DOWNARROW", "LEFT", "LEFTARROW", "RIGHT", "RIGHTARROW", "F1", "F12",
            "CAPSLOCK", "PRINTSCREEN", "SCROLLLOCK", "PAUSE", "BREAK", "INSERT", "MENU", "APP",
        ];
        for token in tokens {
            let name = canonical_name(token);
            let known = HidKeyCode::from_name(&name).is_some() || Modifier::from_name(&name).is_some();
            assert!(known, "alias {token} -> {name} is not a known key or modifier");
        }
    }
}
