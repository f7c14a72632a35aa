//! Input tracking with action-based lookup
//!
//! The host forwards raw window events to an [`InputHandler`]; controllers only
//! see the [`InputSource`] capability, which lets tests feed synthetic input.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Wheel units reported per scroll line (a browser's pixel delta for one notch).
pub const WHEEL_UNITS_PER_LINE: f32 = 100.0;

/// Game actions the controllers query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
}

/// Pointer travel reported by a single motion or wheel event.
///
/// Events are kept apart rather than summed, so limits applied per event
/// (pitch, zoom range) see the same sequence the device produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerDelta {
    /// Horizontal motion in raw device units
    pub dx: f32,
    /// Vertical motion in raw device units
    pub dy: f32,
    /// Wheel travel, positive when scrolling toward the user (zoom out)
    pub wheel: f32,
}

impl PointerDelta {
    /// Whether this event carries no travel at all
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && self.wheel == 0.0
    }
}

/// Live state of the keyboard and pointer
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Pressed state per physical key; keys never seen count as released
    pub keys: HashMap<KeyCode, bool>,
    /// Pointer events not yet consumed, oldest first
    pub pointer: Vec<PointerDelta>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a physical key is currently down
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Take the pending pointer events, leaving the queue empty
    pub fn take_pointer(&mut self) -> Vec<PointerDelta> {
        std::mem::take(&mut self.pointer)
    }

    /// Clear all input state (e.g. when the window loses focus)
    pub fn clear_all(&mut self) {
        self.keys.clear();
        self.pointer.clear();
    }
}

/// What the controllers need from an input device
pub trait InputSource {
    /// Whether any key bound to `action` is held
    fn is_pressed(&self, action: InputAction) -> bool;

    /// Drain the pointer events received since the previous call, in order
    fn poll_pointer_delta(&mut self) -> Vec<PointerDelta>;
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to all bound keys
    reverse: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings with nothing mapped
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Bind a key to an action, replacing the key's previous action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind(key);
        self.bindings.insert(key, action);
        self.reverse.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| *k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[KeyCode] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.state
                .keys
                .insert(key_code, element_state == ElementState::Pressed);
        }
    }

    /// Handle raw mouse movement (device units)
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.push_pointer(PointerDelta {
            dx: delta.0 as f32,
            dy: delta.1 as f32,
            wheel: 0.0,
        });
    }

    /// Handle scroll wheel
    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        // winit reports positive y when scrolling away from the user
        let wheel = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_UNITS_PER_LINE,
            MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
        };
        self.push_pointer(PointerDelta {
            wheel,
            ..Default::default()
        });
    }

    fn push_pointer(&mut self, delta: PointerDelta) {
        if !delta.is_zero() {
            self.state.pointer.push(delta);
        }
    }

    /// Drop held keys and pending pointer travel
    pub fn clear_all(&mut self) {
        self.state.clear_all();
    }
}

impl InputSource for InputHandler {
    fn is_pressed(&self, action: InputAction) -> bool {
        self.bindings
            .keys_for(action)
            .iter()
            .any(|key| self.state.is_key_pressed(*key))
    }

    fn poll_pointer_delta(&mut self) -> Vec<PointerDelta> {
        self.state.take_pointer()
    }
}

/// An [`InputHandler`] shared between an event thread and the frame loop.
///
/// Every call takes the lock for the duration of a single event or query.
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    inner: Arc<Mutex<InputHandler>>,
}

impl SharedInput {
    /// Share an existing handler
    pub fn new(handler: InputHandler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(handler)),
        }
    }

    /// Lock the handler to deliver events
    pub fn lock(&self) -> MutexGuard<'_, InputHandler> {
        self.inner.lock()
    }
}

impl InputSource for SharedInput {
    fn is_pressed(&self, action: InputAction) -> bool {
        self.inner.lock().is_pressed(action)
    }

    fn poll_pointer_delta(&mut self) -> Vec<PointerDelta> {
        self.inner.lock().poll_pointer_delta()
    }
}
