use glam::Vec2;

pub const BACKSPACE: char = '\u{8}';
pub const TAB: char = '\t';
pub const NEWLINE: char = '\n';

const ACCENTED: &str = "éèêëàâôûùç";
const PRINTABLE_WHITESPACE: &str = " \n\r\u{b}\u{c}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// Raw input delivered by the host between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    CursorMoved { position: Vec2 },
    MouseButton { button: MouseButton, pressed: bool, position: Vec2 },
    Character(char),
}

/// Carriage returns from the host keyboard layer become newlines.
pub fn normalize_typed(ch: char) -> char {
    if ch == '\r' {
        NEWLINE
    } else {
        ch
    }
}

/// Characters a text field may insert: printable ASCII plus a fixed set of
/// accented letters. Tabs are handled separately by the caller.
pub fn is_accepted_char(ch: char) -> bool {
    if ch == TAB {
        return false;
    }
    ch.is_ascii_graphic() || PRINTABLE_WHITESPACE.contains(ch) || ACCENTED.contains(ch)
}
