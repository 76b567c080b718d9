//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, ids ascending)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod player;
pub mod powerup;
pub mod progression;
pub mod projectile;
pub mod shop;
pub mod skills;
pub mod state;
pub mod status;
pub mod tick;
pub mod timers;
pub mod weapon;

/// Stable handle for enemies (and anything else allocated by the world)
pub type EntityId = u32;

pub use catalog::{Element, EnemyKind, Tier, WeaponKind, enemy_archetype};
pub use enemy::Enemy;
pub use events::{EffectsSink, GameEvent};
pub use player::{InventoryError, ModifierKind, Player};
pub use powerup::{PowerUp, PowerUpKind};
pub use shop::{ShopError, ShopItem};
pub use skills::{SkillError, SkillKind};
pub use state::{GamePhase, Ledger, RunConfig, Snapshot, World};
pub use status::StatusKind;
pub use tick::{ActorIntent, Stepper, TickInput, autopilot, tick};
pub use weapon::Weapon;
