//! Player ships: movement, damage, weapon inventory and temporary modifiers

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{Tier, WeaponKind};
use super::collision::Rect;
use super::events::GameEvent;
use super::state::{RunConfig, World};
use super::tick::TickInput;
use super::weapon::{FireModifiers, Shot, Weapon};
use crate::consts::*;

/// Fire interval factor while rapid fire is active
pub const RAPID_FIRE_FACTOR: f32 = 0.7;

/// Weapon inventory failures; the inventory is left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    /// Already holding the maximum number of weapons
    Full,
    SlotOutOfRange { index: usize, len: usize },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::Full => write!(f, "inventory full ({MAX_WEAPONS} weapons)"),
            InventoryError::SlotOutOfRange { index, len } => {
                write!(f, "weapon slot {index} out of range (holding {len})")
            }
        }
    }
}

impl std::error::Error for InventoryError {}

/// Timed player effects with an apply/revert pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierKind {
    RapidFire,
    DoubleGold,
    Invincibility,
}

impl ModifierKind {
    fn apply(self, player: &mut Player, run: &mut RunConfig) {
        match self {
            ModifierKind::RapidFire => player.fire_interval_factor = RAPID_FIRE_FACTOR,
            ModifierKind::DoubleGold => run.gold_multiplier *= 2.0,
            ModifierKind::Invincibility => player.invincible = true,
        }
    }

    fn revert(self, player: &mut Player, run: &mut RunConfig) {
        match self {
            ModifierKind::RapidFire => player.fire_interval_factor = 1.0,
            ModifierKind::DoubleGold => run.gold_multiplier /= 2.0,
            ModifierKind::Invincibility => player.invincible = false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub expires_at_ms: f64,
}

/// Result of one damage call against a player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerHit {
    pub absorbed: f32,
    pub health_lost: f32,
    pub died: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Position in the actor list; input rows bind to this
    pub index: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub shield: f32,
    pub max_shield: f32,
    /// Units per tick
    pub speed: f32,
    pub weapons: Vec<Weapon>,
    pub active_weapon: usize,
    pub modifiers: Vec<Modifier>,
    pub invincible: bool,
    /// Multiplies weapon fire intervals (rapid fire)
    pub fire_interval_factor: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(index: usize, x: f32) -> Self {
        Self {
            index,
            pos: Vec2::new(
                x,
                WORLD_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            health: PLAYER_HEALTH,
            max_health: PLAYER_HEALTH,
            shield: 0.0,
            max_shield: PLAYER_MAX_SHIELD,
            speed: PLAYER_SPEED,
            weapons: vec![Weapon::new(WeaponKind::Gun, Tier::Common)],
            active_weapon: 0,
            modifiers: Vec::new(),
            invincible: false,
            fire_interval_factor: 1.0,
            alive: true,
        }
    }

    /// Starting x for player `index` of `count`
    pub fn spawn_x(index: usize, count: usize) -> f32 {
        let center = WORLD_WIDTH / 2.0;
        match (count, index) {
            (1, _) => center - PLAYER_WIDTH / 2.0,
            (_, 0) => center - PLAYER_WIDTH - 20.0,
            _ => center + 20.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Top-center of the ship, where shots leave
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Shift horizontally, clamped to the playfield
    pub fn steer(&mut self, left: bool, right: bool) {
        let mut dx = 0.0;
        if left {
            dx -= self.speed;
        }
        if right {
            dx += self.speed;
        }
        self.pos.x = (self.pos.x + dx).clamp(0.0, WORLD_WIDTH - self.size.x);
    }

    /// Shield first, then health. Ignored entirely while invincible.
    pub fn take_damage(&mut self, amount: f32) -> PlayerHit {
        if self.invincible || !self.alive {
            return PlayerHit::default();
        }
        let amount = amount.max(0.0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let before = self.health;
        self.health = (self.health - (amount - absorbed)).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
        }
        PlayerHit {
            absorbed,
            health_lost: before - self.health,
            died: !self.alive,
        }
    }

    pub fn add_health(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn add_shield(&mut self, amount: f32) {
        self.shield = (self.shield + amount).min(self.max_shield);
    }

    pub fn active(&self) -> Option<&Weapon> {
        self.weapons.get(self.active_weapon)
    }

    pub fn switch_weapon(&mut self, index: usize) -> Result<(), InventoryError> {
        if index >= self.weapons.len() {
            return Err(InventoryError::SlotOutOfRange {
                index,
                len: self.weapons.len(),
            });
        }
        self.active_weapon = index;
        Ok(())
    }

    /// Add a weapon, then combine any three of the same grade into the next tier
    ///
    /// Returns the weapons produced by merging.
    pub fn add_weapon(&mut self, weapon: Weapon) -> Result<Vec<Weapon>, InventoryError> {
        if self.weapons.len() >= MAX_WEAPONS {
            return Err(InventoryError::Full);
        }
        self.weapons.push(weapon);
        let mut merged = Vec::new();
        while let Some(upgraded) = self.merge_once() {
            merged.push(upgraded);
        }
        Ok(merged)
    }

    /// Replace the last three weapons of a shared grade with one of the next tier
    fn merge_once(&mut self) -> Option<Weapon> {
        let (kind, tier, next) = self.weapons.iter().find_map(|candidate| {
            let count = self.weapons.iter().filter(|w| w.same_grade(candidate)).count();
            let next = candidate.tier.next()?;
            (count >= 3).then_some((candidate.kind, candidate.tier, next))
        })?;

        let mut removed = 0;
        let mut i = self.weapons.len();
        while i > 0 && removed < 3 {
            i -= 1;
            if self.weapons[i].kind == kind && self.weapons[i].tier == tier {
                self.weapons.remove(i);
                removed += 1;
                if i <= self.active_weapon {
                    self.active_weapon = self.active_weapon.saturating_sub(1);
                }
            }
        }
        let upgraded = Weapon::new(kind, next);
        self.weapons.push(upgraded.clone());
        Some(upgraded)
    }

    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers.iter().any(|m| m.kind == kind)
    }

    /// Grant a timed modifier
    ///
    /// A second grant of an active kind extends its expiry instead of stacking
    /// another apply/revert pair. Returns true when the effect was newly applied.
    pub fn grant_modifier(
        &mut self,
        kind: ModifierKind,
        duration_ms: f64,
        now_ms: f64,
        run: &mut RunConfig,
    ) -> bool {
        let expires_at_ms = now_ms + duration_ms;
        if let Some(existing) = self.modifiers.iter_mut().find(|m| m.kind == kind) {
            existing.expires_at_ms = existing.expires_at_ms.max(expires_at_ms);
            return false;
        }
        kind.apply(self, run);
        self.modifiers.push(Modifier {
            kind,
            expires_at_ms,
        });
        true
    }

    /// Revert and drop every modifier whose expiry has passed
    pub fn expire_modifiers(&mut self, now_ms: f64, run: &mut RunConfig) -> Vec<ModifierKind> {
        let mut expired = Vec::new();
        self.modifiers.retain(|m| {
            let done = m.expires_at_ms <= now_ms;
            if done {
                expired.push(m.kind);
            }
            !done
        });
        for kind in &expired {
            kind.revert(self, run);
        }
        expired
    }

    /// Revert everything still active (used when a level ends)
    pub fn clear_modifiers(&mut self, run: &mut RunConfig) {
        for modifier in std::mem::take(&mut self.modifiers) {
            modifier.kind.revert(self, run);
        }
    }
}

/// Apply intents, expire modifiers and fire for every living player
pub(crate) fn update(world: &mut World, input: &TickInput) {
    let now_ms = world.now_ms();
    for i in 0..world.players.len() {
        if !world.players[i].alive {
            continue;
        }
        let intent = input.actors.get(i).copied().unwrap_or_default();
        let player = &mut world.players[i];

        if let Some(Err(err)) = intent.switch_weapon.map(|slot| player.switch_weapon(slot)) {
            log::debug!("Player {i}: {err}");
        }
        player.steer(intent.move_left, intent.move_right);

        for kind in player.expire_modifiers(now_ms, &mut world.run) {
            log::debug!("Player {i}: {kind:?} expired");
        }

        if !intent.firing {
            continue;
        }
        let mods = FireModifiers::new(&world.run, player.fire_interval_factor);
        let muzzle = player.muzzle();
        let active = player.active_weapon;
        let Some(weapon) = player.weapons.get_mut(active) else {
            continue;
        };
        let kind = weapon.kind;
        let shots = weapon.fire(muzzle, now_ms, &mods, &mut world.rng);
        if shots.is_empty() {
            continue;
        }
        for shot in shots {
            match shot {
                Shot::Bullet(projectile) => world.projectiles.push(projectile),
                Shot::Beam(laser) => world.lasers.push(laser),
            }
        }
        world.events.push(GameEvent::WeaponFired {
            player: i,
            weapon: kind,
            pos: muzzle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::ActorIntent;

    fn player() -> Player {
        Player::new(0, Player::spawn_x(0, 1))
    }

    #[test]
    fn test_spawn_layout() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(375.0, 540.0));
        assert_eq!(Player::spawn_x(0, 2), 330.0);
        assert_eq!(Player::spawn_x(1, 2), 420.0);
        assert_eq!(p.weapons, vec![Weapon::new(WeaponKind::Gun, Tier::Common)]);
    }

    #[test]
    fn test_steer_clamps_to_field() {
        let mut p = player();
        p.pos.x = 2.0;
        p.steer(true, false);
        assert_eq!(p.pos.x, 0.0);
        p.pos.x = WORLD_WIDTH - PLAYER_WIDTH - 1.0;
        p.steer(false, true);
        assert_eq!(p.pos.x, WORLD_WIDTH - PLAYER_WIDTH);
        // Both directions cancel
        p.steer(true, true);
        assert_eq!(p.pos.x, WORLD_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_shield_then_health() {
        let mut p = player();
        p.shield = 1.0;
        let hit = p.take_damage(2.0);
        assert_eq!(hit.absorbed, 1.0);
        assert_eq!(hit.health_lost, 1.0);
        assert_eq!(p.shield, 0.0);
        assert_eq!(p.health, 2.0);

        let hit = p.take_damage(5.0);
        assert!(hit.died);
        assert_eq!(p.health, 0.0);
        assert!(!p.alive);
    }

    #[test]
    fn test_invincible_ignores_damage() {
        let mut p = player();
        p.shield = 2.0;
        p.invincible = true;
        for amount in [0.5, 1.0, 1000.0] {
            assert_eq!(p.take_damage(amount), PlayerHit::default());
        }
        assert_eq!((p.health, p.shield), (PLAYER_HEALTH, 2.0));
    }

    #[test]
    fn test_three_commons_merge() {
        let mut p = player();
        p.add_weapon(Weapon::new(WeaponKind::Gun, Tier::Common)).unwrap();
        assert_eq!(p.weapons.len(), 2);
        let merged = p.add_weapon(Weapon::new(WeaponKind::Gun, Tier::Common)).unwrap();
        assert_eq!(merged, vec![Weapon::new(WeaponKind::Gun, Tier::Uncommon)]);
        assert_eq!(p.weapons, vec![Weapon::new(WeaponKind::Gun, Tier::Uncommon)]);
        assert_eq!(p.active_weapon, 0);
    }

    #[test]
    fn test_merge_cascades() {
        let mut p = player();
        p.weapons = vec![
            Weapon::new(WeaponKind::Gun, Tier::Uncommon),
            Weapon::new(WeaponKind::Gun, Tier::Uncommon),
            Weapon::new(WeaponKind::Gun, Tier::Common),
            Weapon::new(WeaponKind::Gun, Tier::Common),
        ];
        p.active_weapon = 3;
        let merged = p.add_weapon(Weapon::new(WeaponKind::Gun, Tier::Common)).unwrap();
        assert_eq!(
            merged,
            vec![
                Weapon::new(WeaponKind::Gun, Tier::Uncommon),
                Weapon::new(WeaponKind::Gun, Tier::Rare),
            ]
        );
        assert_eq!(p.weapons, vec![Weapon::new(WeaponKind::Gun, Tier::Rare)]);
        assert_eq!(p.active_weapon, 0);
    }

    #[test]
    fn test_full_inventory_is_unchanged() {
        let mut p = player();
        for kind in [
            WeaponKind::Rocket,
            WeaponKind::Laser,
            WeaponKind::Sniper,
            WeaponKind::Shotgun,
        ] {
            p.add_weapon(Weapon::new(kind, Tier::Common)).unwrap();
        }
        let before = p.weapons.clone();
        assert_eq!(
            p.add_weapon(Weapon::new(WeaponKind::Gun, Tier::Common)),
            Err(InventoryError::Full)
        );
        assert_eq!(p.weapons, before);
    }

    #[test]
    fn test_transcendent_does_not_merge() {
        let mut p = player();
        p.weapons.clear();
        for _ in 0..3 {
            p.add_weapon(Weapon::new(WeaponKind::Laser, Tier::Transcendent)).unwrap();
        }
        assert_eq!(p.weapons.len(), 3);
    }

    #[test]
    fn test_switch_weapon_validates() {
        let mut p = player();
        assert_eq!(
            p.switch_weapon(3),
            Err(InventoryError::SlotOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(p.active_weapon, 0);
        p.add_weapon(Weapon::new(WeaponKind::Rocket, Tier::Common)).unwrap();
        assert_eq!(p.switch_weapon(1), Ok(()));
        assert_eq!(p.active().map(|w| w.kind), Some(WeaponKind::Rocket));
    }

    #[test]
    fn test_modifier_active_until_expiry() {
        let mut p = player();
        let mut run = RunConfig::default();
        let t = 12_000.0;
        assert!(p.grant_modifier(ModifierKind::Invincibility, 5000.0, t, &mut run));
        assert!(p.invincible);

        assert!(p.expire_modifiers(t + 4999.0, &mut run).is_empty());
        assert!(p.invincible);

        assert_eq!(
            p.expire_modifiers(t + 5000.0, &mut run),
            vec![ModifierKind::Invincibility]
        );
        assert!(!p.invincible);
        assert!(p.modifiers.is_empty());
    }

    #[test]
    fn test_regrant_extends_instead_of_stacking() {
        let mut p = player();
        let mut run = RunConfig::default();
        assert!(p.grant_modifier(ModifierKind::DoubleGold, 15_000.0, 0.0, &mut run));
        assert!(!p.grant_modifier(ModifierKind::DoubleGold, 15_000.0, 10_000.0, &mut run));
        assert_eq!(run.gold_multiplier, 2.0);
        assert_eq!(p.modifiers.len(), 1);

        p.expire_modifiers(15_000.0, &mut run);
        assert_eq!(run.gold_multiplier, 2.0);
        p.expire_modifiers(25_000.0, &mut run);
        assert_eq!(run.gold_multiplier, 1.0);
    }

    #[test]
    fn test_update_moves_and_fires() {
        let mut world = World::new(5, 1);
        let start = world.players[0].pos.x;
        let input = TickInput {
            actors: vec![ActorIntent {
                move_left: true,
                firing: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        world.ticks += 1;
        update(&mut world, &input);
        assert_eq!(world.players[0].pos.x, start - PLAYER_SPEED);
        assert_eq!(world.projectiles.len(), 1);

        // Cooldown holds the next shot back
        world.ticks += 1;
        update(&mut world, &input);
        assert_eq!(world.projectiles.len(), 1);
    }
}
