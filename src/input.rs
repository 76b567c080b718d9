//! Key bindings mapped to per-actor intents
//!
//! The presentation layer forwards raw key names (`KeyboardEvent.key` values)
//! and the binding table decides which actor they drive. Held keys become
//! continuous intents; weapon switches and pause are one-shots consumed by
//! the next tick.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_WEAPONS;
use crate::sim::{ActorIntent, TickInput};

/// Something a key can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    /// Make inventory slot `n` active
    SwitchWeapon(usize),
    /// Global, regardless of actor
    Pause,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub key: String,
    pub actor: usize,
    pub action: Action,
}

impl Binding {
    pub fn new(key: &str, actor: usize, action: Action) -> Self {
        Self {
            key: normalize_key(key),
            actor,
            action,
        }
    }
}

/// Single letters are matched case-insensitively so Shift does not break movement
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Table of key bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputMap {
    pub bindings: Vec<Binding>,
}

impl InputMap {
    /// One player on either half of the keyboard
    pub fn single_player() -> Self {
        let mut bindings = vec![
            Binding::new("a", 0, Action::MoveLeft),
            Binding::new("ArrowLeft", 0, Action::MoveLeft),
            Binding::new("d", 0, Action::MoveRight),
            Binding::new("ArrowRight", 0, Action::MoveRight),
            Binding::new("f", 0, Action::Fire),
            Binding::new(" ", 0, Action::Fire),
        ];
        bindings.extend(digit_row(0, &["1", "2", "3", "4", "5"]));
        bindings.extend(pause_keys());
        Self { bindings }
    }

    /// Left hand for actor 0, arrows and Space for actor 1
    pub fn two_player() -> Self {
        let mut bindings = vec![
            Binding::new("a", 0, Action::MoveLeft),
            Binding::new("d", 0, Action::MoveRight),
            Binding::new("f", 0, Action::Fire),
            Binding::new("ArrowLeft", 1, Action::MoveLeft),
            Binding::new("ArrowRight", 1, Action::MoveRight),
            Binding::new(" ", 1, Action::Fire),
        ];
        bindings.extend(digit_row(0, &["1", "2", "3", "4", "5"]));
        bindings.extend(digit_row(1, &["6", "7", "8", "9", "0"]));
        bindings.extend(pause_keys());
        Self { bindings }
    }

    pub fn for_players(count: usize) -> Self {
        if count >= 2 {
            Self::two_player()
        } else {
            Self::single_player()
        }
    }

    pub fn lookup<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Binding> + 'a {
        let key = normalize_key(key);
        self.bindings.iter().filter(move |b| b.key == key)
    }

    /// Highest actor index any binding refers to, plus one
    pub fn actor_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.action != Action::Pause)
            .map(|b| b.actor + 1)
            .max()
            .unwrap_or(0)
    }
}

impl Default for InputMap {
    fn default() -> Self {
        Self::single_player()
    }
}

fn digit_row(actor: usize, keys: &[&str]) -> Vec<Binding> {
    keys.iter()
        .take(MAX_WEAPONS)
        .enumerate()
        .map(|(slot, key)| Binding::new(key, actor, Action::SwitchWeapon(slot)))
        .collect()
}

fn pause_keys() -> [Binding; 2] {
    [
        Binding::new("Escape", 0, Action::Pause),
        Binding::new("p", 0, Action::Pause),
    ]
}

/// Live keyboard state between ticks
#[derive(Debug, Clone)]
pub struct InputState {
    map: InputMap,
    actors: usize,
    held: BTreeSet<String>,
    pending_switch: Vec<Option<usize>>,
    pending_pause: bool,
}

impl InputState {
    pub fn new(map: InputMap, actors: usize) -> Self {
        Self {
            map,
            actors,
            held: BTreeSet::new(),
            pending_switch: vec![None; actors],
            pending_pause: false,
        }
    }

    /// Record a key press. Returns true if the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        let mut bound = false;
        for binding in self.map.lookup(key) {
            bound = true;
            match binding.action {
                Action::SwitchWeapon(slot) => {
                    if let Some(pending) = self.pending_switch.get_mut(binding.actor) {
                        *pending = Some(slot);
                    }
                }
                Action::Pause => self.pending_pause = true,
                Action::MoveLeft | Action::MoveRight | Action::Fire => {}
            }
        }
        if bound {
            self.held.insert(normalize_key(key));
        } else {
            log::trace!("Unbound key {key:?}");
        }
        bound
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.held.remove(&normalize_key(key))
    }

    /// Forget held keys (focus lost)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Intents for the next tick
    pub fn tick_input(&self) -> TickInput {
        let mut actors = vec![ActorIntent::default(); self.actors];
        for binding in &self.map.bindings {
            if !self.held.contains(&binding.key) {
                continue;
            }
            let Some(intent) = actors.get_mut(binding.actor) else {
                continue;
            };
            match binding.action {
                Action::MoveLeft => intent.move_left = true,
                Action::MoveRight => intent.move_right = true,
                Action::Fire => intent.firing = true,
                Action::SwitchWeapon(_) | Action::Pause => {}
            }
        }
        for (intent, pending) in actors.iter_mut().zip(&self.pending_switch) {
            intent.switch_weapon = *pending;
        }
        TickInput {
            actors,
            pause: self.pending_pause,
        }
    }

    /// Clear one-shots once a tick has seen them
    pub fn consume_one_shots(&mut self) {
        self.pending_switch.iter_mut().for_each(|p| *p = None);
        self.pending_pause = false;
    }
}
