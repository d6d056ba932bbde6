// ── Keyboard input contracts ──
//
// The front end translates terminal events into `Key`s. Forms register
// an Escape listener while open; the coordinator asks the `KeySource`
// who is listening instead of reaching for a global event target.

use crate::model::PointId;

/// Backend-neutral key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Which form a listener belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorSlot {
    /// Edit form of an existing point.
    Point(PointId),
    /// The creation form.
    NewPoint,
}

pub trait KeySource: Send {
    /// Register `slot` for Escape. Registering twice is a no-op.
    fn listen(&mut self, slot: EditorSlot);

    fn unlisten(&mut self, slot: &EditorSlot);

    /// Current listeners, oldest first.
    fn listeners(&self) -> Vec<EditorSlot>;
}

/// Plain in-memory listener registry.
#[derive(Debug, Default)]
pub struct KeyListeners {
    slots: Vec<EditorSlot>,
}

impl KeySource for KeyListeners {
    fn listen(&mut self, slot: EditorSlot) {
        if !self.slots.contains(&slot) {
            self.slots.push(slot);
        }
    }

    fn unlisten(&mut self, slot: &EditorSlot) {
        self.slots.retain(|s| s != slot);
    }

    fn listeners(&self) -> Vec<EditorSlot> {
        self.slots.clone()
    }
}
