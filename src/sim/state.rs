//! World state and core simulation types
//!
//! The world owns every entity collection, the run's multipliers and the
//! single random source. Entities refer to each other by id only.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::EntityId;
use super::catalog::{Element, EnemyKind, Tier, WeaponKind};
use super::enemy::Enemy;
use super::events::{EffectsSink, GameEvent};
use super::player::{ModifierKind, Player};
use super::powerup::{POWERUP_SIZE, PowerUp, PowerUpKind, roll_drop};
use super::progression::{self, health_multiplier, speed_multiplier};
use super::projectile::{EnemyProjectile, Explosion, Laser, Projectile};
use super::shop::{self, ShopError, ShopItem};
use super::skills::{self, SkillError, SkillKind};
use super::status::StatusKind;
use super::timers::Scheduler;
use super::weapon::Weapon;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Level cleared, waiting for a skill pick
    SkillChoice,
    /// Between levels, buying weapons and consumables
    Shop,
    /// Run ended
    GameOver,
}

/// Run-wide multipliers written by skills and power-ups
///
/// Everything starts at 1.0 and is reset with the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub gold_multiplier: f32,
    /// Composes into the level speed multiplier
    pub enemy_slowdown: f32,
    pub damage_multiplier: f32,
    pub fire_interval_multiplier: f32,
    pub projectile_size_multiplier: f32,
    pub projectile_speed_multiplier: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gold_multiplier: 1.0,
            enemy_slowdown: 1.0,
            damage_multiplier: 1.0,
            fire_interval_multiplier: 1.0,
            projectile_size_multiplier: 1.0,
            projectile_speed_multiplier: 1.0,
        }
    }
}

/// Score and currency accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub gold: u32,
    pub score: u64,
    pub enemies_defeated: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub level: u32,
    /// Level a fresh run starts on
    pub starting_level: u32,
    /// Simulation tick counter; the clock every timer compares against
    pub ticks: u64,
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    pub lasers: Vec<Laser>,
    pub explosions: Vec<Explosion>,
    pub powerups: Vec<PowerUp>,
    pub ledger: Ledger,
    pub run: RunConfig,
    pub scheduler: Scheduler,
    /// Notifications recorded since the last drain
    pub events: Vec<GameEvent>,
    pub skill_offer: Vec<SkillKind>,
    pub shop_stock: Vec<ShopItem>,
    /// Next entity ID
    next_id: EntityId,
}

impl World {
    /// Create a world with `player_count` players (clamped to
    /// `1..=MAX_PLAYERS`), already playing level 1
    pub fn new(seed: u64, player_count: usize) -> Self {
        Self::with_level(seed, player_count, 1)
    }

    pub fn with_level(seed: u64, player_count: usize, starting_level: u32) -> Self {
        let count = player_count.clamp(1, MAX_PLAYERS);
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            level: 0,
            starting_level: starting_level.max(1),
            ticks: 0,
            players: (0..count)
                .map(|i| Player::new(i, Player::spawn_x(i, count)))
                .collect(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            lasers: Vec::new(),
            explosions: Vec::new(),
            powerups: Vec::new(),
            ledger: Ledger::default(),
            run: RunConfig::default(),
            scheduler: Scheduler::default(),
            events: Vec::new(),
            skill_offer: Vec::new(),
            shop_stock: Vec::new(),
            next_id: 1,
        };
        world.start_level(world.starting_level);
        world
    }

    /// Build a world from loaded settings; `fallback_seed` is used when none is configured
    pub fn from_settings(settings: &Settings, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!(
            "New run: seed {seed}, {} player(s), level {}",
            settings.player_count,
            settings.starting_level
        );
        Self::with_level(seed, settings.player_count, settings.starting_level)
    }

    /// Throw everything away and start over, including run multipliers
    pub fn new_run(&mut self, seed: u64) {
        *self = Self::with_level(seed, self.players.len(), self.starting_level);
    }

    /// Simulation time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.ticks as f64 * TICK_MS
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn the population for `level` and resume play
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        self.enemies.clear();
        self.clear_transient();
        progression::populate(self, level);
        self.phase = GamePhase::Playing;
        log::info!("Level {level} started with {} enemies", self.enemies.len());
        self.events.push(GameEvent::LevelStarted { level });
    }

    /// Drop every projectile, beam, blast, pickup and pending action
    fn clear_transient(&mut self) {
        self.projectiles.clear();
        self.enemy_projectiles.clear();
        self.lasers.clear();
        self.explosions.clear();
        self.powerups.clear();
        self.scheduler.clear();
    }

    /// Current enemy speed scale including skill slowdown
    pub fn level_speed_multiplier(&self) -> f32 {
        speed_multiplier(self.level, self.run.enemy_slowdown)
    }

    /// Spawn a regular enemy scaled for the current level
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let health = kind.archetype().health * health_multiplier(self.level, false);
        let enemy = Enemy::new(
            id,
            kind,
            pos,
            health,
            self.level_speed_multiplier(),
            self.now_ms(),
        );
        self.enemies.push(enemy);
        id
    }

    /// Spawn the swaying boss of a milestone level with boss health scaling
    pub fn spawn_milestone_boss(&mut self, kind: EnemyKind, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let health = kind.archetype().health * health_multiplier(self.level, true);
        let boss = Enemy::milestone_boss(id, kind, pos, health, self.now_ms());
        self.enemies.push(boss);
        id
    }

    /// Index of a living enemy by id
    pub fn enemy_index(&self, id: EntityId) -> Option<usize> {
        self.enemies.iter().position(|e| e.id == id && !e.removed)
    }

    /// Damage enemy `i`, resolving its death. Returns true if it died.
    pub fn damage_enemy(&mut self, i: usize, amount: f32) -> bool {
        let Some(enemy) = self.enemies.get_mut(i) else {
            return false;
        };
        if enemy.removed {
            return false;
        }
        let outcome = enemy.take_damage(amount);
        let (id, pos) = (enemy.id, enemy.center());
        self.events.push(GameEvent::DamageDealt {
            target: id,
            amount: outcome.absorbed + outcome.health_lost,
            pos,
        });
        if outcome.killed {
            self.defeat_enemy(i);
        }
        outcome.killed
    }

    /// Mark enemy `i` dead and pay out its rewards
    fn defeat_enemy(&mut self, i: usize) {
        let enemy = &mut self.enemies[i];
        enemy.removed = true;
        let (id, kind, pos) = (enemy.id, enemy.kind, enemy.center());
        self.scheduler.cancel_owner(id);

        let arch = kind.archetype();
        let gold = (arch.gold_value as f32 * self.run.gold_multiplier).round() as u32;
        self.ledger.gold += gold;
        self.ledger.score += u64::from(arch.score_value);
        self.ledger.enemies_defeated += 1;
        log::trace!("{} {id} defeated for {gold} gold", kind.name());

        self.events.push(GameEvent::EnemyDefeated { id, kind, pos });
        self.events.push(GameEvent::GoldAwarded { amount: gold, pos });
        self.events.push(GameEvent::PowerUpDropRequested { pos });
        let drop_at = pos - Vec2::splat(POWERUP_SIZE / 2.0);
        if let Some(pickup) = roll_drop(&mut self.rng, drop_at) {
            self.powerups.push(pickup);
        }
    }

    /// Projectile hit: damage, then the element's status if the enemy survived
    pub fn hit_enemy(&mut self, i: usize, damage: f32, element: Option<Element>) -> bool {
        if self.damage_enemy(i, damage) {
            return true;
        }
        let Some(kind) = element.and_then(StatusKind::from_element) else {
            return false;
        };
        let now_ms = self.now_ms();
        let enemy = &mut self.enemies[i];
        if enemy.removed || !enemy.statuses.apply(kind, damage, now_ms) {
            return false;
        }
        enemy.refresh_speed();
        let (target, pos) = (enemy.id, enemy.center());
        self.events.push(GameEvent::StatusApplied { target, kind, pos });
        false
    }

    /// Damage player `i`; a death ends the run
    pub fn damage_player(&mut self, i: usize, amount: f32) {
        let Some(player) = self.players.get_mut(i) else {
            return;
        };
        let hit = player.take_damage(amount);
        let pos = player.rect().center();
        if hit.absorbed + hit.health_lost > 0.0 {
            self.events.push(GameEvent::PlayerDamaged {
                player: i,
                amount: hit.absorbed + hit.health_lost,
                pos,
            });
        }
        if hit.died {
            log::info!(
                "Player {i} died on level {} (score {})",
                self.level,
                self.ledger.score
            );
            self.events.push(GameEvent::PlayerDied { player: i, pos });
            self.phase = GamePhase::GameOver;
        }
    }

    /// Drop everything flagged for removal this tick
    pub fn purge_removed(&mut self) {
        self.enemies.retain(|e| !e.removed);
        self.projectiles.retain(|p| !p.removed);
        self.enemy_projectiles.retain(|p| !p.removed);
        self.explosions.retain(|x| !x.removed);
        self.powerups.retain(|p| !p.removed);
    }

    /// Wrap up a cleared level and offer skills for the next one
    pub fn finish_level(&mut self) {
        let cleared = self.level;
        self.clear_transient();
        for player in &mut self.players {
            player.clear_modifiers(&mut self.run);
        }
        self.level += 1;
        self.skill_offer = skills::offer(&mut self.rng);
        self.phase = GamePhase::SkillChoice;
        log::info!(
            "Level {cleared} cleared: {} gold, {} defeated",
            self.ledger.gold,
            self.ledger.enemies_defeated
        );
        self.events.push(GameEvent::LevelCleared { level: cleared });
    }

    /// Playing and Paused swap; other phases ignore it
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    pub fn choose_skill(&mut self, index: usize) -> Result<SkillKind, SkillError> {
        skills::choose(self, index).inspect_err(|err| log::debug!("Skill choice rejected: {err}"))
    }

    /// Restock and open the shop for the upcoming level
    pub fn open_shop(&mut self) {
        self.shop_stock = shop::stock(self.level, &mut self.rng);
        self.phase = GamePhase::Shop;
    }

    pub fn buy(&mut self, player: usize, index: usize) -> Result<ShopItem, ShopError> {
        shop::buy(self, player, index).inspect_err(|err| log::debug!("Purchase rejected: {err}"))
    }

    /// Close the shop and start the next level
    pub fn leave_shop(&mut self) -> Result<(), ShopError> {
        if self.phase != GamePhase::Shop {
            return Err(ShopError::PhaseMismatch);
        }
        self.shop_stock.clear();
        self.start_level(self.level);
        Ok(())
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand every pending event to `sink`, oldest first
    pub fn flush_events(&mut self, sink: &mut impl EffectsSink) {
        for event in self.drain_events() {
            sink.notify(&event);
        }
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            level: self.level,
            ticks: self.ticks,
            gold: self.ledger.gold,
            score: self.ledger.score,
            enemies_defeated: self.ledger.enemies_defeated,
            players: self.players.iter().map(PlayerView::from).collect(),
            enemies: self
                .enemies
                .iter()
                .filter(|e| !e.removed)
                .map(EnemyView::from)
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| BodyView {
                    pos: p.pos,
                    size: p.size,
                })
                .collect(),
            enemy_projectiles: self
                .enemy_projectiles
                .iter()
                .map(|p| BodyView {
                    pos: p.pos,
                    size: p.size,
                })
                .collect(),
            lasers: self
                .lasers
                .iter()
                .map(|l| LaserView {
                    x: l.x,
                    origin_y: l.origin_y,
                    width: l.width,
                })
                .collect(),
            explosions: self
                .explosions
                .iter()
                .map(|x| ExplosionView {
                    center: x.center,
                    radius: x.radius(),
                })
                .collect(),
            powerups: self
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    kind: p.kind,
                    pos: p.pos,
                })
                .collect(),
            skill_offer: self.skill_offer.clone(),
            shop: self.shop_stock.clone(),
        }
    }
}

/// Everything the presentation layer draws in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub ticks: u64,
    pub gold: u32,
    pub score: u64,
    pub enemies_defeated: u32,
    pub players: Vec<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<BodyView>,
    pub enemy_projectiles: Vec<BodyView>,
    pub lasers: Vec<LaserView>,
    pub explosions: Vec<ExplosionView>,
    pub powerups: Vec<PowerUpView>,
    pub skill_offer: Vec<SkillKind>,
    pub shop: Vec<ShopItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub weapons: Vec<WeaponView>,
    pub active_weapon: usize,
    pub modifiers: Vec<ModifierKind>,
    pub invincible: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub tier: Tier,
}

impl From<&Weapon> for WeaponView {
    fn from(weapon: &Weapon) -> Self {
        Self {
            kind: weapon.kind,
            tier: weapon.tier,
        }
    }
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            health: p.health,
            max_health: p.max_health,
            shield: p.shield,
            max_shield: p.max_shield,
            weapons: p.weapons.iter().map(WeaponView::from).collect(),
            active_weapon: p.active_weapon,
            modifiers: p.modifiers.iter().map(|m| m.kind).collect(),
            invincible: p.invincible,
            alive: p.alive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub emoji: String,
    pub pos: Vec2,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub statuses: Vec<StatusKind>,
    pub boss: bool,
    pub jumping: bool,
}

impl From<&Enemy> for EnemyView {
    fn from(e: &Enemy) -> Self {
        Self {
            id: e.id,
            kind: e.kind,
            emoji: e.archetype().emoji.to_string(),
            pos: e.pos,
            size: e.size,
            health: e.health,
            max_health: e.max_health,
            shield: e.shield,
            max_shield: e.max_shield,
            statuses: e.statuses.kinds().collect(),
            boss: e.is_boss(),
            jumping: e.jumping,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaserView {
    pub x: f32,
    pub origin_y: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub pos: Vec2,
}
