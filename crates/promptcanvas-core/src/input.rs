//! Pointer and keyboard events, and keyboard shortcut resolution.

use crate::canvas::LayerMove;
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// Key name: a single character, or `Delete`, `Backspace`, `Escape`.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// True when keyboard focus is inside a text field.
    #[serde(default)]
    pub in_text_input: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            in_text_input: false,
        }
    }
}

/// Discrete editor actions reachable from the keyboard or toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum EditorAction {
    Undo,
    Redo,
    Delete,
    Copy,
    Paste,
    SelectAll,
    Cancel,
    ZoomIn,
    ZoomOut,
    SetTool(ToolKind),
    Layer(LayerMove),
}

/// Map a key press to an action.
///
/// Nothing resolves while focus is in a text input, so typing a prompt
/// never triggers tool switches.
pub fn resolve_key(press: &KeyPress) -> Option<EditorAction> {
    if press.in_text_input {
        return None;
    }

    let mods = press.modifiers;
    let key = press.key.as_str();

    if mods.command() {
        return match key.to_ascii_lowercase().as_str() {
            "z" if mods.shift => Some(EditorAction::Redo),
            "z" => Some(EditorAction::Undo),
            "y" => Some(EditorAction::Redo),
            "c" => Some(EditorAction::Copy),
            "v" => Some(EditorAction::Paste),
            "a" => Some(EditorAction::SelectAll),
            "+" | "=" => Some(EditorAction::ZoomIn),
            "-" => Some(EditorAction::ZoomOut),
            _ => None,
        };
    }

    match key {
        "Delete" | "Backspace" => Some(EditorAction::Delete),
        "Escape" => Some(EditorAction::Cancel),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !mods.alt => ToolKind::from_shortcut(c).map(EditorAction::SetTool),
                _ => None,
            }
        }
    }
}
