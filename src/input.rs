//! Player input handling
//!
//! The host feeds raw key events in, the simulation reads an [`InputState`]
//! snapshot once per frame. Nothing here knows about a windowing backend.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Logical actions the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Left, Action::Right, Action::Jump];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "Left",
            Action::Right => "Right",
            Action::Jump => "Jump",
        }
    }
}

/// Held state of every action for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Jump => self.jump = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
        }
    }

    /// Route a raw key event through the bindings.
    /// Returns the action it mapped to, if any.
    pub fn apply_key(&mut self, bindings: &KeyBindings, key: &str, held: bool) -> Option<Action> {
        let action = bindings.action_for(key)?;
        self.set(action, held);
        Some(action)
    }

    /// Replay `target` as key events through the first key bound to each action.
    ///
    /// Actions with no bound key are left as they were and returned.
    pub fn press_through(&mut self, bindings: &KeyBindings, target: InputState) -> Vec<Action> {
        let mut unbound = Vec::new();
        for action in Action::ALL {
            match bindings.keys_for(action).first() {
                Some(key) => {
                    self.apply_key(bindings, key, target.is_held(action));
                }
                None => unbound.push(action),
            }
        }
        unbound
    }
}

/// Key name (as reported by the host, e.g. `"ArrowLeft"`) to action map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("ArrowLeft", Action::Left);
        bindings.bind("KeyA", Action::Left);
        bindings.bind("ArrowRight", Action::Right);
        bindings.bind("KeyD", Action::Right);
        bindings.bind("Space", Action::Jump);
        bindings.bind("ArrowUp", Action::Jump);
        bindings.bind("KeyW", Action::Jump);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind a key, replacing any previous binding for it
    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        self.keys.insert(key.into(), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(key).copied()
    }

    /// All keys bound to an action, in sorted order
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

/// Input state shared with a host that delivers key events on another thread.
///
/// Each action is its own atomic flag, so a reader never sees a half-written
/// update of a single action. [`SharedInput::snapshot`] is taken once per frame.
#[derive(Debug, Default)]
pub struct SharedInput {
    left: AtomicBool,
    right: AtomicBool,
    jump: AtomicBool,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, action: Action) -> &AtomicBool {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Jump => &self.jump,
        }
    }

    pub fn set(&self, action: Action, held: bool) {
        self.flag(action).store(held, Ordering::Release);
    }

    pub fn apply_key(&self, bindings: &KeyBindings, key: &str, held: bool) -> Option<Action> {
        let action = bindings.action_for(key)?;
        self.set(action, held);
        Some(action)
    }

    pub fn snapshot(&self) -> InputState {
        InputState {
            left: self.left.load(Ordering::Acquire),
            right: self.right.load(Ordering::Acquire),
            jump: self.jump.load(Ordering::Acquire),
        }
    }
}
