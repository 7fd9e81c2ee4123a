//! Keyboard shortcut registry and documentation.

use promptcanvas_core::{EditorAction, KeyPress, Modifiers, ToolKind, resolve_key};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub description: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, ctrl: bool, shift: bool, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl,
            shift,
            description: description.into(),
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key.as_str());
        parts.join("+")
    }

    /// The action this shortcut triggers in the editor.
    pub fn action(&self) -> Option<EditorAction> {
        let modifiers = Modifiers {
            ctrl: self.ctrl,
            shift: self.shift,
            ..Modifiers::NONE
        };
        resolve_key(&KeyPress::new(self.key.as_str(), modifiers))
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Every key binding the editor resolves.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts = vec![
            Shortcut::new("A", true, false, "Select all"),
            Shortcut::new("C", true, false, "Copy selected element"),
            Shortcut::new("V", true, false, "Paste"),
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("+", true, false, "Zoom in"),
            Shortcut::new("-", true, false, "Zoom out"),
            Shortcut::new("Delete", false, false, "Delete selection"),
            Shortcut::new("Backspace", false, false, "Delete selection"),
            Shortcut::new("Escape", false, false, "Cancel crop and clear selection"),
        ];
        shortcuts.extend(ToolKind::ALL.into_iter().map(|tool| {
            Shortcut::new(
                tool.shortcut().to_ascii_uppercase().to_string(),
                false,
                false,
                format!("{} tool", tool.label()),
            )
        }));
        shortcuts
    }

    /// Pointer gestures that change meaning with a modifier held.
    pub fn gestures() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Click", false, true, "Add to selection"),
            Shortcut::new("Drag", false, true, "Keep aspect ratio while resizing"),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!("\n=== Pointer ===");
        for shortcut in Self::gestures() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
