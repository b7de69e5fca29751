//! Keyboard input model consumed by the simulation

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Physical keys the duel can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    LCtrl,
    RCtrl,
    Space,
    Enter,
}

impl Key {
    pub fn name(self) -> &'static str {
        match self {
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::Up => "ArrowUp",
            Key::Down => "ArrowDown",
            Key::Left => "ArrowLeft",
            Key::Right => "ArrowRight",
            Key::LCtrl => "LCtrl",
            Key::RCtrl => "RCtrl",
            Key::Space => "Space",
            Key::Enter => "Enter",
        }
    }
}

impl FromStr for Key {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "W" => Ok(Key::W),
            "a" | "A" => Ok(Key::A),
            "s" | "S" => Ok(Key::S),
            "d" | "D" => Ok(Key::D),
            "ArrowUp" | "Up" => Ok(Key::Up),
            "ArrowDown" | "Down" => Ok(Key::Down),
            "ArrowLeft" | "Left" => Ok(Key::Left),
            "ArrowRight" | "Right" => Ok(Key::Right),
            "LCtrl" | "ControlLeft" => Ok(Key::LCtrl),
            "RCtrl" | "ControlRight" => Ok(Key::RCtrl),
            "Space" | " " => Ok(Key::Space),
            "Enter" => Ok(Key::Enter),
            _ => Err(ConfigError::UnknownKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Discrete key transition delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// One frame of input: keys currently held plus the key events since last frame
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub held: HashSet<Key>,
    pub events: Vec<KeyEvent>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Key-down event; the key also counts as held this frame
    pub fn press(mut self, key: Key) -> Self {
        self.held.insert(key);
        self.events.push(KeyEvent::Down(key));
        self
    }

    pub fn release(mut self, key: Key) -> Self {
        self.held.remove(&key);
        self.events.push(KeyEvent::Up(key));
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Edge detector for a fire key
///
/// Fires once per down transition. Repeated `Down` events while the key is
/// still pressed (OS key repeat) are ignored until an `Up` arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireTrigger {
    pressed: bool,
}

impl FireTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event; returns true when a shot should be fired
    pub fn on_event(&mut self, event: KeyEvent, fire_key: Key) -> bool {
        match event {
            KeyEvent::Down(key) if key == fire_key => {
                let fire = !self.pressed;
                self.pressed = true;
                fire
            }
            KeyEvent::Up(key) if key == fire_key => {
                self.pressed = false;
                false
            }
            _ => false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Keys controlling one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct KeyBindings {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub fire: Key,
}

impl KeyBindings {
    pub fn yellow() -> Self {
        Self {
            up: Key::W,
            down: Key::S,
            left: Key::A,
            right: Key::D,
            fire: Key::LCtrl,
        }
    }

    pub fn red() -> Self {
        Self {
            up: Key::Up,
            down: Key::Down,
            left: Key::Left,
            right: Key::Right,
            fire: Key::RCtrl,
        }
    }

    pub fn keys(&self) -> [Key; 5] {
        [self.up, self.down, self.left, self.right, self.fire]
    }
}
