//! Elemental status effects carried by enemies
//!
//! Effects live inside the enemy they afflict and are advanced by the tick
//! loop. Speed effects never rewrite a stored speed; the enemy recomputes its
//! effective speed from the archetype value and the active factors, so expiry
//! restores the original speed exactly.

use serde::{Deserialize, Serialize};

use super::catalog::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    Burning,
    Shocked,
    Slowed,
    Poisoned,
}

impl StatusKind {
    /// Status inflicted by a projectile element; plasma has none
    pub fn from_element(element: Element) -> Option<Self> {
        match element {
            Element::Fire => Some(StatusKind::Burning),
            Element::Electric => Some(StatusKind::Shocked),
            Element::Ice => Some(StatusKind::Slowed),
            Element::Toxic => Some(StatusKind::Poisoned),
            Element::Plasma => None,
        }
    }
}

/// How an active status progresses over time
#[derive(Debug, Clone, PartialEq)]
pub enum StatusTiming {
    /// Damage applied every `interval_ms` until `ticks_left` reaches zero
    Periodic {
        damage: f32,
        ticks_left: u32,
        interval_ms: f64,
        next_at_ms: f64,
    },
    /// Speed factor held until `expires_at_ms`
    Timed { speed_factor: f32, expires_at_ms: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStatus {
    pub kind: StatusKind,
    pub timing: StatusTiming,
}

impl ActiveStatus {
    /// Build a status from the damage of the hit that inflicted it
    pub fn new(kind: StatusKind, hit_damage: f32, now_ms: f64) -> Self {
        let timing = match kind {
            StatusKind::Burning => StatusTiming::Periodic {
                damage: 0.2 * hit_damage,
                ticks_left: 3,
                interval_ms: 500.0,
                next_at_ms: now_ms + 500.0,
            },
            StatusKind::Poisoned => StatusTiming::Periodic {
                damage: 0.1 * hit_damage,
                ticks_left: 5,
                interval_ms: 400.0,
                next_at_ms: now_ms + 400.0,
            },
            StatusKind::Shocked => StatusTiming::Timed {
                speed_factor: 0.5,
                expires_at_ms: now_ms + 1000.0,
            },
            StatusKind::Slowed => StatusTiming::Timed {
                speed_factor: 0.6,
                expires_at_ms: now_ms + 1200.0,
            },
        };
        Self { kind, timing }
    }
}

/// Result of advancing a status set by one tick
#[derive(Debug, Default, PartialEq)]
pub struct StatusTick {
    /// Damage-over-time due this tick
    pub damage: f32,
    pub expired: Vec<StatusKind>,
}

/// Statuses currently afflicting one enemy, at most one per kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSet {
    active: Vec<ActiveStatus>,
}

impl StatusSet {
    pub fn contains(&self, kind: StatusKind) -> bool {
        self.active.iter().any(|s| s.kind == kind)
    }

    /// Afflict with `kind` unless already afflicted. Returns true if applied.
    pub fn apply(&mut self, kind: StatusKind, hit_damage: f32, now_ms: f64) -> bool {
        if self.contains(kind) {
            return false;
        }
        self.active.push(ActiveStatus::new(kind, hit_damage, now_ms));
        true
    }

    /// Product of all active speed factors (1.0 when unaffected)
    pub fn speed_factor(&self) -> f32 {
        self.active
            .iter()
            .map(|s| match s.timing {
                StatusTiming::Timed { speed_factor, .. } => speed_factor,
                StatusTiming::Periodic { .. } => 1.0,
            })
            .product()
    }

    /// Advance all statuses to `now_ms`, collecting due damage and expiries
    ///
    /// Each periodic status deals at most one tick of damage per call.
    pub fn advance(&mut self, now_ms: f64) -> StatusTick {
        let mut result = StatusTick::default();
        self.active.retain_mut(|status| {
            let done = match &mut status.timing {
                StatusTiming::Periodic {
                    damage,
                    ticks_left,
                    interval_ms,
                    next_at_ms,
                } => {
                    if *ticks_left > 0 && now_ms >= *next_at_ms {
                        result.damage += *damage;
                        *ticks_left -= 1;
                        *next_at_ms += *interval_ms;
                    }
                    *ticks_left == 0
                }
                StatusTiming::Timed { expires_at_ms, .. } => now_ms >= *expires_at_ms,
            };
            if done {
                result.expired.push(status.kind);
            }
            !done
        });
        result
    }

    pub fn kinds(&self) -> impl Iterator<Item = StatusKind> + '_ {
        self.active.iter().map(|s| s.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
