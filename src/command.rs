// Keyboard commands. Each key press becomes at most one `Command`.
use minifb::Key;

use crate::cursor::Mode;
use crate::types::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SetColor(Rgb),
    Thicker,
    Thinner,
    Mode(Mode),
    Clear,
    Save,
    Quit,
    Regenerate, // new paint-by-number board
    Finalize,   // commit the shape being stretched
}

impl Command {
    /// Mapped keys only. The main loop treats any other key as `Finalize`.
    pub fn from_key(key: Key) -> Option<Self> {
        let cmd = match key {
            Key::R => Self::SetColor(Rgb::RED),
            Key::G => Self::SetColor(Rgb::GREEN),
            Key::B => Self::SetColor(Rgb::BLUE),
            Key::Equal | Key::NumPadPlus => Self::Thicker,
            Key::Minus | Key::NumPadMinus => Self::Thinner,
            Key::L => Self::Mode(Mode::Line),
            Key::O => Self::Mode(Mode::Circle),
            Key::S => Self::Mode(Mode::Square),
            Key::E => Self::Mode(Mode::Ellipse),
            Key::C => Self::Clear,
            Key::W => Self::Save,
            Key::Q | Key::Escape => Self::Quit,
            Key::N => Self::Regenerate,
            Key::Space | Key::Enter => Self::Finalize,
            _ => return None,
        };
        Some(cmd)
    }

    /// Same as `from_key`, with the catch-all: unmapped keys release the shape.
    /// Bare modifiers are part of a chord (Shift+= is "+"), so they do nothing.
    pub fn from_key_or_finalize(key: Key) -> Option<Self> {
        if is_modifier(key) {
            return None;
        }
        Some(Self::from_key(key).unwrap_or(Self::Finalize))
    }
}

fn is_modifier(key: Key) -> bool {
    matches!(
        key,
        Key::LeftShift
            | Key::RightShift
            | Key::LeftCtrl
            | Key::RightCtrl
            | Key::LeftAlt
            | Key::RightAlt
            | Key::LeftSuper
            | Key::RightSuper
            | Key::CapsLock
            | Key::NumLock
            | Key::ScrollLock
    )
}
