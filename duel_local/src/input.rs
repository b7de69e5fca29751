//! Keyboard input sources for headless play

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use duel_core::{InputFrame, Key, KeyEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// Produces one frame of input per simulation step
pub trait InputSource {
    fn next_frame(&mut self) -> InputFrame;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ScriptFrame {
    hold: Vec<Key>,
    down: Vec<Key>,
    up: Vec<Key>,
    repeat: u32,
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    frames: Vec<ScriptFrame>,
}

/// Input read from a TOML script of `[[frames]]` entries.
///
/// `down` keys are pressed and stay held until a later `up`; `hold` keys are
/// held for that entry only. An entry with `repeat = n` lasts `n` frames and
/// delivers its events on the first one. Once the script runs out every
/// frame is empty.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let script: Script = toml::from_str(text)?;
        let mut latched: HashSet<Key> = HashSet::new();
        let mut frames = VecDeque::new();

        for entry in script.frames {
            let mut events = Vec::new();
            for key in &entry.up {
                latched.remove(key);
                events.push(KeyEvent::Up(*key));
            }
            for key in &entry.down {
                latched.insert(*key);
                events.push(KeyEvent::Down(*key));
            }

            let mut held = latched.clone();
            held.extend(entry.hold.iter().copied());

            frames.push_back(InputFrame {
                held: held.clone(),
                events,
            });
            for _ in 1..entry.repeat.max(1) {
                frames.push_back(InputFrame {
                    held: held.clone(),
                    events: Vec::new(),
                });
            }
        }

        Ok(Self { frames })
    }

    /// Frames left before the script falls back to idle input
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_frame(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Seeded random key mashing over a fixed key set
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: StdRng,
    keys: Vec<Key>,
    held: HashSet<Key>,
    toggle_chance: f64,
}

impl RandomInput {
    pub fn new(seed: u64, keys: Vec<Key>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            keys,
            held: HashSet::new(),
            toggle_chance: 0.1,
        }
    }
}

impl InputSource for RandomInput {
    fn next_frame(&mut self) -> InputFrame {
        let mut events = Vec::new();
        for key in &self.keys {
            if !self.rng.gen_bool(self.toggle_chance) {
                continue;
            }
            if self.held.remove(key) {
                events.push(KeyEvent::Up(*key));
            } else {
                self.held.insert(*key);
                events.push(KeyEvent::Down(*key));
            }
        }

        InputFrame {
            held: self.held.clone(),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_expands_repeats() {
        let mut input = ScriptedInput::parse(
            r#"
            [[frames]]
            hold = ["d"]
            down = ["LCtrl"]
            repeat = 3

            [[frames]]
            up = ["LCtrl"]
            "#,
        )
        .unwrap();
        assert_eq!(input.remaining(), 4);

        let first = input.next_frame();
        assert_eq!(first.events, vec![KeyEvent::Down(Key::LCtrl)]);
        assert!(first.is_held(Key::D));
        assert!(first.is_held(Key::LCtrl));

        let second = input.next_frame();
        assert!(second.events.is_empty());
        assert!(second.is_held(Key::LCtrl));

        input.next_frame();
        let last = input.next_frame();
        assert_eq!(last.events, vec![KeyEvent::Up(Key::LCtrl)]);
        assert!(!last.is_held(Key::LCtrl));
        assert!(!last.is_held(Key::D));

        assert_eq!(input.remaining(), 0);
        let idle = input.next_frame();
        assert!(idle.held.is_empty());
        assert!(idle.events.is_empty());
    }

    #[test]
    fn test_script_rejects_unknown_keys() {
        assert!(ScriptedInput::parse("[[frames]]\nhold = [\"q\"]\n").is_err());
    }

    #[test]
    fn test_random_input_is_deterministic() {
        let keys = vec![Key::W, Key::S, Key::LCtrl, Key::Up, Key::RCtrl];
        let mut a = RandomInput::new(7, keys.clone());
        let mut b = RandomInput::new(7, keys);

        for _ in 0..200 {
            let fa = a.next_frame();
            let fb = b.next_frame();
            assert_eq!(fa.held, fb.held);
            assert_eq!(fa.events, fb.events);
        }
    }

    #[test]
    fn test_random_events_match_held_set() {
        let mut input = RandomInput::new(42, vec![Key::A, Key::D, Key::Space]);
        let mut held = HashSet::new();

        for _ in 0..500 {
            let frame = input.next_frame();
            for event in &frame.events {
                match event {
                    KeyEvent::Down(key) => assert!(held.insert(*key)),
                    KeyEvent::Up(key) => assert!(held.remove(key)),
                }
            }
            assert_eq!(frame.held, held);
        }
    }
}
