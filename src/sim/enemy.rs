//! Enemy entities and their per-tick behavior
//!
//! Every enemy shares one record; the variant-specific part is the archetype's
//! `Behavior`, dispatched exhaustively each tick. Delayed parts of a behavior
//! (jump landings) go through the world scheduler, keyed by enemy id.

use glam::Vec2;
use rand::Rng;

use super::EntityId;
use super::catalog::{Behavior, BossPattern, EnemyArchetype, EnemyKind};
use super::collision::{Rect, within_radius};
use super::events::GameEvent;
use super::projectile::EnemyProjectile;
use super::state::World;
use super::status::StatusSet;
use super::timers::ScheduledAction;
use crate::consts::*;
use crate::{direction, ms_to_ticks};

/// Attack interval for boss-tier enemies drawn into the regular grid
pub const GRID_BOSS_ATTACK_MS: f64 = 1200.0;
/// Attack interval for the boss appended on milestone levels
pub const MILESTONE_BOSS_ATTACK_MS: f64 = 2000.0;
/// Health given to spawner minions
pub const MINION_HEALTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossMotion {
    /// Regular drift with wall bounces
    Drift,
    /// Sinusoidal sway around a fixed anchor; never steps down
    Sway { anchor_x: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossState {
    pub pattern: BossPattern,
    pub interval_ms: f64,
    /// Counts down by one tick each update; attacks at or below zero
    pub cooldown_ms: f64,
    pub motion: BossMotion,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
    pub shield: f32,
    pub max_shield: f32,
    /// Archetype speed scaled by the level speed multiplier
    pub base_speed: f32,
    /// Effective speed this tick (base speed times status factors)
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Last time the variant behavior (jump, teleport, spawn, heal) fired
    pub last_action_ms: f64,
    /// Airborne jumpers cannot be hit
    pub jumping: bool,
    pub statuses: StatusSet,
    pub boss: Option<BossState>,
    pub removed: bool,
}

/// How a hit was split between shield and health
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub absorbed: f32,
    pub health_lost: f32,
    pub killed: bool,
}

impl Enemy {
    /// Create an enemy of `kind` with the given starting health
    pub fn new(
        id: EntityId,
        kind: EnemyKind,
        pos: Vec2,
        health: f32,
        speed_multiplier: f32,
        now_ms: f64,
    ) -> Self {
        let arch = kind.archetype();
        let shield = match arch.behavior {
            Behavior::Shielded { shield } => shield,
            _ => 0.0,
        };
        let boss = match arch.behavior {
            Behavior::Boss { pattern } => Some(BossState {
                pattern,
                interval_ms: GRID_BOSS_ATTACK_MS,
                cooldown_ms: 0.0,
                motion: BossMotion::Drift,
            }),
            _ => None,
        };
        let base_speed = arch.speed * speed_multiplier;
        Self {
            id,
            kind,
            pos,
            size: arch.size,
            health,
            max_health: health,
            shield,
            max_shield: shield,
            base_speed,
            speed: base_speed,
            direction: 1.0,
            last_action_ms: now_ms,
            jumping: false,
            statuses: StatusSet::default(),
            boss,
            removed: false,
        }
    }

    /// The boss placed at top-center on milestone levels
    pub fn milestone_boss(id: EntityId, kind: EnemyKind, pos: Vec2, health: f32, now_ms: f64) -> Self {
        let mut enemy = Self::new(id, kind, pos, health, 1.0, now_ms);
        if let Some(boss) = &mut enemy.boss {
            boss.interval_ms = MILESTONE_BOSS_ATTACK_MS;
            boss.motion = BossMotion::Sway { anchor_x: pos.x };
        }
        enemy
    }

    pub fn archetype(&self) -> &'static EnemyArchetype {
        self.kind.archetype()
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    /// Can be hit by projectiles, beams and blasts
    pub fn collidable(&self) -> bool {
        !self.removed && !self.jumping
    }

    /// Shield absorbs first; the overflow comes off health, clamped at zero
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let amount = amount.max(0.0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let before = self.health;
        self.health = (self.health - (amount - absorbed)).max(0.0);
        DamageOutcome {
            absorbed,
            health_lost: before - self.health,
            killed: self.health <= 0.0,
        }
    }

    /// Restore health up to the maximum, returning the amount actually healed
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.health >= self.max_health {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Recompute effective speed from the scaled archetype speed
    pub fn refresh_speed(&mut self) {
        self.speed = self.base_speed * self.statuses.speed_factor();
    }

    /// Move one tick: drift with wall bounces, or sway for milestone bosses
    pub fn advance_position(&mut self, now_ms: f64) {
        if let Some(BossState {
            motion: BossMotion::Sway { anchor_x },
            ..
        }) = self.boss
        {
            let amplitude = WORLD_WIDTH / 3.0;
            let x = anchor_x + (now_ms * 0.001).sin() as f32 * amplitude;
            self.pos.x = x.clamp(0.0, WORLD_WIDTH - self.size);
            return;
        }

        self.pos.x += self.speed * self.direction;
        // Only bounce when heading into the wall so one contact steps down once
        if self.pos.x <= 0.0 && self.direction < 0.0 {
            self.pos.x = 0.0;
            self.direction = 1.0;
            self.pos.y += STEP_DOWN;
        } else if self.pos.x + self.size >= WORLD_WIDTH && self.direction > 0.0 {
            self.pos.x = WORLD_WIDTH - self.size;
            self.direction = -1.0;
            self.pos.y += STEP_DOWN;
        }
    }
}

/// Shots for one boss attack
///
/// `aim` is the point targeted by the aimed shot of the strongest pattern.
pub fn boss_volley(pattern: BossPattern, boss: &Rect, aim: Option<Vec2>) -> Vec<EnemyProjectile> {
    use std::f32::consts::TAU;

    let spawn = Vec2::new(
        boss.center().x - ENEMY_PROJECTILE_SIZE / 2.0,
        boss.bottom(),
    );
    let speed = ENEMY_PROJECTILE_SPEED;
    let downward = |factor: f32| EnemyProjectile::new(spawn, Vec2::new(factor * speed, speed));
    let ring = |count: u32| {
        (0..count).map(move |i| {
            let angle = i as f32 / count as f32 * TAU;
            EnemyProjectile::new(spawn, direction(angle) * speed)
        })
    };

    match pattern {
        BossPattern::Spread3 => (-1..=1).map(|i| downward(i as f32 * 0.3)).collect(),
        BossPattern::Spread5 => (-2..=2).map(|i| downward(i as f32 * 0.25)).collect(),
        BossPattern::Ring8 => ring(8).collect(),
        BossPattern::Ring16Aimed => {
            let mut shots: Vec<_> = ring(16).collect();
            if let Some(target) = aim {
                let delta = target - boss.center();
                let angle = delta.y.atan2(delta.x);
                shots.push(EnemyProjectile::new(spawn, direction(angle) * speed * 2.0));
            }
            shots
        }
    }
}

/// Run every enemy for one tick
pub(crate) fn update(world: &mut World) {
    let now_ms = world.now_ms();
    land_jumpers(world);

    let mut spawned = Vec::new();
    for i in 0..world.enemies.len() {
        if world.enemies[i].removed {
            continue;
        }

        let status = world.enemies[i].statuses.advance(now_ms);
        let id = world.enemies[i].id;
        for kind in status.expired {
            world.events.push(GameEvent::StatusExpired { target: id, kind });
        }
        if status.damage > 0.0 && world.damage_enemy(i, status.damage) {
            continue;
        }

        let enemy = &mut world.enemies[i];
        enemy.refresh_speed();
        enemy.advance_position(now_ms);

        run_behavior(world, i, now_ms, &mut spawned);
        boss_attack(world, i);
        player_contact(world, i);
    }
    world.enemies.extend(spawned);
}

/// Resolve due jump landings for enemies that are still alive
fn land_jumpers(world: &mut World) {
    for entry in world.scheduler.take_due(world.ticks) {
        match entry.action {
            ScheduledAction::JumpLanding => {
                let Some(index) = world.enemy_index(entry.owner) else {
                    continue;
                };
                let distance = match world.enemies[index].archetype().behavior {
                    Behavior::Jump { distance, .. } => distance,
                    _ => 0.0,
                };
                let dx = world.rng.random_range(-1.0f32..=1.0) * distance;
                let dy = world.rng.random_range(0.0f32..30.0);
                let enemy = &mut world.enemies[index];
                enemy.pos.x = (enemy.pos.x + dx).clamp(0.0, WORLD_WIDTH - enemy.size);
                enemy.pos.y = (enemy.pos.y + dy).clamp(0.0, WORLD_HEIGHT - enemy.size);
                enemy.jumping = false;
            }
        }
    }
}

fn run_behavior(world: &mut World, i: usize, now_ms: f64, spawned: &mut Vec<Enemy>) {
    let enemy = &world.enemies[i];
    let id = enemy.id;
    let elapsed = now_ms - enemy.last_action_ms;

    match enemy.archetype().behavior {
        Behavior::Drift | Behavior::Shielded { .. } | Behavior::Boss { .. } => {}
        Behavior::Jump { interval_ms, .. } => {
            if enemy.jumping || elapsed <= interval_ms {
                return;
            }
            let land_at = world.ticks + ms_to_ticks(JUMP_AIRTIME_MS);
            world.scheduler.schedule(land_at, id, ScheduledAction::JumpLanding);
            let enemy = &mut world.enemies[i];
            enemy.jumping = true;
            enemy.last_action_ms = now_ms;
        }
        Behavior::Teleport { interval_ms } => {
            if elapsed <= interval_ms {
                return;
            }
            let size = enemy.size;
            let y = enemy.pos.y;
            let x = world.rng.random_range(0.0f32..=(WORLD_WIDTH - size));
            let y = (y + world.rng.random_range(-50.0f32..=50.0)).clamp(GRID_TOP, WORLD_HEIGHT * 0.6);
            let enemy = &mut world.enemies[i];
            enemy.pos = Vec2::new(x, y);
            enemy.last_action_ms = now_ms;
            world.events.push(GameEvent::Teleported { id, pos: Vec2::new(x, y) });
        }
        Behavior::Spawn { interval_ms } => {
            if elapsed <= interval_ms {
                return;
            }
            let origin = enemy.pos;
            let offset = world.rng.random_range(-30.0f32..=30.0);
            let pos = Vec2::new(origin.x + offset, origin.y + 50.0);
            let child = world.next_entity_id();
            let mut minion = Enemy::new(
                child,
                EnemyKind::Normal,
                pos,
                MINION_HEALTH,
                world.level_speed_multiplier(),
                now_ms,
            );
            minion.size = EnemyKind::Normal.archetype().size / 2.0;
            spawned.push(minion);
            world.enemies[i].last_action_ms = now_ms;
            world.events.push(GameEvent::Spawned { parent: id, child, pos });
        }
        Behavior::Heal { interval_ms, range } => {
            if elapsed <= interval_ms {
                return;
            }
            let center = enemy.center();
            world.enemies[i].last_action_ms = now_ms;
            for j in 0..world.enemies.len() {
                if j == i || world.enemies[j].removed {
                    continue;
                }
                let target = &mut world.enemies[j];
                if !within_radius(center, range, &target.rect()) {
                    continue;
                }
                let amount = target.heal(1.0);
                if amount > 0.0 {
                    let (target, pos) = (target.id, target.center());
                    world.events.push(GameEvent::Healed { target, amount, pos });
                }
            }
        }
    }
}

fn boss_attack(world: &mut World, i: usize) {
    let Some(boss) = &mut world.enemies[i].boss else {
        return;
    };
    boss.cooldown_ms -= TICK_MS;
    if boss.cooldown_ms > 0.0 {
        return;
    }
    boss.cooldown_ms = boss.interval_ms;
    let pattern = boss.pattern;

    let aim = world
        .players
        .iter()
        .find(|p| p.alive)
        .or(world.players.first())
        .map(|p| p.muzzle());
    let rect = world.enemies[i].rect();
    let volley = boss_volley(pattern, &rect, aim);
    log::trace!("{:?} fires {} shots", world.enemies[i].kind, volley.len());
    world.enemy_projectiles.extend(volley);
}

/// Damage players touched by the enemy, or all of them once it crosses the danger line
fn player_contact(world: &mut World, i: usize) {
    let enemy = &world.enemies[i];
    let rect = enemy.rect();
    let reached_line = rect.bottom() >= DANGER_LINE;
    let airborne = enemy.jumping;

    let mut touched = false;
    for p in 0..world.players.len() {
        let player = &world.players[p];
        if !player.alive {
            continue;
        }
        if reached_line || (!airborne && rect.overlaps(&player.rect())) {
            world.damage_player(p, 1.0);
            touched = true;
        }
    }
    if touched {
        let id = world.enemies[i].id;
        world.enemies[i].removed = true;
        world.scheduler.cancel_owner(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::status::StatusKind;
    use crate::sim::tick::{TickInput, tick};
    use proptest::prelude::*;

    fn quiet_world() -> World {
        let mut world = World::new(11, 1);
        world.enemies.clear();
        world
    }

    fn enemy(kind: EnemyKind) -> Enemy {
        Enemy::new(1, kind, Vec2::new(100.0, 100.0), kind.archetype().health, 1.0, 0.0)
    }

    #[test]
    fn test_shield_absorbs_before_health() {
        let mut e = enemy(EnemyKind::Shielded);
        assert_eq!(e.shield, 2.0);
        let out = e.take_damage(1.5);
        assert_eq!(out.absorbed, 1.5);
        assert_eq!(e.shield, 0.5);
        assert_eq!(e.health, 2.0);

        let out = e.take_damage(1.0);
        assert_eq!(out.absorbed, 0.5);
        assert_eq!(e.shield, 0.0);
        assert_eq!(e.health, 1.5);
        assert!(!out.killed);

        let out = e.take_damage(10.0);
        assert!(out.killed);
        assert_eq!(e.health, 0.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut e = enemy(EnemyKind::Tank);
        assert_eq!(e.heal(1.0), 0.0);
        e.take_damage(0.5);
        assert_eq!(e.heal(1.0), 0.5);
        assert_eq!(e.health, e.max_health);
    }

    #[test]
    fn test_wall_bounce_steps_down_once() {
        let mut e = enemy(EnemyKind::Normal);
        e.pos = Vec2::new(WORLD_WIDTH - 30.5, 100.0);
        e.advance_position(0.0);
        assert_eq!(e.direction, -1.0);
        assert_eq!(e.pos.y, 120.0);
        // Still touching the wall, but heading away
        e.speed = 0.0;
        e.advance_position(0.0);
        assert_eq!(e.pos.y, 120.0);
    }

    #[test]
    fn test_milestone_boss_sways_within_bounds() {
        let mut boss = Enemy::milestone_boss(1, EnemyKind::Boss, Vec2::new(370.0, 80.0), 20.0, 0.0);
        for step in 0..2000 {
            boss.advance_position(step as f64 * 50.0);
            assert!(boss.pos.x >= 0.0 && boss.pos.x <= WORLD_WIDTH - boss.size);
            assert_eq!(boss.pos.y, 80.0);
        }
        assert_eq!(boss.boss.as_ref().map(|b| b.interval_ms), Some(MILESTONE_BOSS_ATTACK_MS));
    }

    #[test]
    fn test_boss_volleys() {
        let rect = Rect::square(Vec2::new(375.0, 80.0), 50.0);
        assert_eq!(boss_volley(BossPattern::Spread3, &rect, None).len(), 3);
        assert_eq!(boss_volley(BossPattern::Spread5, &rect, None).len(), 5);
        assert_eq!(boss_volley(BossPattern::Ring8, &rect, None).len(), 8);

        let aim = Vec2::new(400.0, 540.0);
        let shots = boss_volley(BossPattern::Ring16Aimed, &rect, Some(aim));
        assert_eq!(shots.len(), 17);
        let aimed = shots.last().unwrap();
        assert!((aimed.vel.length() - 2.0 * ENEMY_PROJECTILE_SPEED).abs() < 1e-4);
        assert!(aimed.vel.y > 0.0);
        assert_eq!(aimed.pos, Vec2::new(395.0, 130.0));
    }

    #[test]
    fn test_ultra_boss_aims_at_first_living_player() {
        let mut world = World::new(3, 2);
        world.enemies.clear();
        // Boss center x = 400, between player 0 (left) and player 1 (right)
        world.spawn_enemy(EnemyKind::UltraBoss, Vec2::new(360.0, 80.0));
        let aimed_x = |world: &World| world.enemy_projectiles.last().unwrap().vel.x;

        boss_attack(&mut world, 0);
        assert_eq!(world.enemy_projectiles.len(), 17);
        assert!(aimed_x(&world) < 0.0);

        world.enemy_projectiles.clear();
        world.players[0].alive = false;
        world.enemies[0].boss.as_mut().unwrap().cooldown_ms = 0.0;
        boss_attack(&mut world, 0);
        assert_eq!(world.enemy_projectiles.len(), 17);
        assert!(aimed_x(&world) > 0.0);
    }

    #[test]
    fn test_burning_kill_pays_out() {
        let mut world = quiet_world();
        let id = world.spawn_enemy(EnemyKind::Normal, Vec2::new(300.0, 100.0));
        // Keeps the level running
        world.spawn_enemy(EnemyKind::Tank, Vec2::new(100.0, 100.0));
        let now_ms = world.now_ms();
        world.enemies[0].health = 0.1;
        world.enemies[0].statuses.apply(StatusKind::Burning, 1.0, now_ms);
        world.drain_events();

        let input = TickInput::default();
        for _ in 0..40 {
            tick(&mut world, &input);
        }
        assert!(world.enemy_index(id).is_none());
        assert_eq!(world.ledger.enemies_defeated, 1);
        let arch = EnemyKind::Normal.archetype();
        assert_eq!(world.ledger.gold, arch.gold_value);
        assert_eq!(world.ledger.score, u64::from(arch.score_value));
        assert!(
            world
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyDefeated { id: dead, .. } if *dead == id))
        );
    }

    #[test]
    fn test_jump_lands_after_delay() {
        let mut world = quiet_world();
        let id = world.spawn_enemy(EnemyKind::Jump, Vec2::new(300.0, 100.0));
        let input = TickInput::default();

        // Interval is 1000ms from spawn
        let mut took_off = None;
        for _ in 0..80 {
            tick(&mut world, &input);
            if took_off.is_none() && world.enemies[0].jumping {
                took_off = Some(world.ticks);
                assert_eq!(world.scheduler.pending_for(id), 1);
            }
        }
        let took_off = took_off.expect("jumper never took off");
        assert!(took_off >= 60);
        // 30 ticks of airtime
        while world.ticks < took_off + ms_to_ticks(JUMP_AIRTIME_MS) {
            assert!(world.enemies[0].jumping);
            tick(&mut world, &input);
        }
        assert!(!world.enemies[0].jumping);
        assert_eq!(world.scheduler.pending_for(id), 0);
    }

    #[test]
    fn test_killed_jumper_never_lands() {
        let mut world = quiet_world();
        let id = world.spawn_enemy(EnemyKind::Jump, Vec2::new(300.0, 100.0));
        world.spawn_enemy(EnemyKind::Tank, Vec2::new(500.0, 100.0));
        let input = TickInput::default();
        while !world.enemies[0].jumping {
            tick(&mut world, &input);
        }
        world.damage_enemy(0, 100.0);
        assert_eq!(world.scheduler.pending_for(id), 0);
        for _ in 0..40 {
            tick(&mut world, &input);
        }
        assert!(world.enemy_index(id).is_none());
    }

    #[test]
    fn test_spawner_adds_half_size_minion() {
        let mut world = quiet_world();
        let parent = world.spawn_enemy(EnemyKind::Spawner, Vec2::new(300.0, 100.0));
        world.enemies[0].last_action_ms = -10_000.0;
        tick(&mut world, &TickInput::default());

        assert_eq!(world.enemies.len(), 2);
        let minion = world.enemies[1].clone();
        assert_eq!(minion.kind, EnemyKind::Normal);
        assert_eq!(minion.size, 15.0);
        assert_eq!(minion.health, MINION_HEALTH);
        assert_eq!(minion.pos.y, 150.0);
        let events = world.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Spawned { parent: p, child, .. } if *p == parent && *child == minion.id
        )));
    }

    #[test]
    fn test_healer_heals_only_wounded_in_range() {
        let mut world = quiet_world();
        world.spawn_enemy(EnemyKind::Healer, Vec2::new(300.0, 100.0));
        let near = world.spawn_enemy(EnemyKind::Tank, Vec2::new(340.0, 100.0));
        let full = world.spawn_enemy(EnemyKind::Tank, Vec2::new(260.0, 100.0));
        let far = world.spawn_enemy(EnemyKind::Tank, Vec2::new(600.0, 300.0));
        for id in [near, far] {
            let index = world.enemy_index(id).unwrap();
            world.enemies[index].health = 1.0;
        }
        world.enemies[0].last_action_ms = -10_000.0;
        tick(&mut world, &TickInput::default());

        let health = |id| world.enemies[world.enemy_index(id).unwrap()].health;
        assert_eq!(health(near), 2.0);
        assert_eq!(health(far), 1.0);
        assert_eq!(health(full), 3.0);
        let heals = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Healed { .. }))
            .count();
        assert_eq!(heals, 1);
    }

    #[test]
    fn test_teleport_stays_in_upper_field() {
        let mut world = quiet_world();
        world.spawn_enemy(EnemyKind::Teleporter, Vec2::new(300.0, 300.0));
        for _ in 0..20 {
            world.enemies[0].last_action_ms = -10_000.0;
            tick(&mut world, &TickInput::default());
            let e = &world.enemies[0];
            assert!(e.pos.y >= GRID_TOP && e.pos.y <= WORLD_HEIGHT * 0.6 + STEP_DOWN);
            assert!(e.pos.x >= 0.0 && e.pos.x <= WORLD_WIDTH - e.size);
        }
    }

    #[test]
    fn test_danger_line_hits_every_living_player() {
        let mut world = World::new(3, 2);
        world.enemies.clear();
        world.spawn_enemy(EnemyKind::Normal, Vec2::new(100.0, DANGER_LINE - 29.0));
        world.spawn_enemy(EnemyKind::Tank, Vec2::new(100.0, 100.0));
        tick(&mut world, &TickInput::default());

        assert_eq!(world.enemies.len(), 1);
        for player in &world.players {
            assert_eq!(player.health, PLAYER_HEALTH - 1.0);
        }
        // Escaping enemies do not count as defeated
        assert_eq!(world.ledger.enemies_defeated, 0);
    }

    #[test]
    fn test_status_speed_restores_exactly() {
        let mut e = enemy(EnemyKind::Fast);
        e.base_speed = 2.4;
        e.statuses.apply(StatusKind::Shocked, 1.0, 0.0);
        e.refresh_speed();
        assert_eq!(e.speed, 1.2);
        e.statuses.advance(1000.0);
        e.refresh_speed();
        assert_eq!(e.speed, 2.4);
    }

    proptest! {
        #[test]
        fn prop_shield_overflow(shield in 0.0f32..10.0, damage in 0.0f32..10.0, extra in 0.1f32..10.0) {
            let mut e = enemy(EnemyKind::Shielded);
            let health = damage + extra;
            e.shield = shield;
            e.max_shield = shield;
            e.health = health;
            e.max_health = health;
            e.take_damage(damage);
            if shield < damage {
                prop_assert_eq!(e.shield, 0.0);
                prop_assert_eq!(e.health, health - (damage - shield));
            } else {
                prop_assert_eq!(e.shield, shield - damage);
                prop_assert_eq!(e.health, health);
            }
            prop_assert!(e.shield <= e.max_shield && e.health <= e.max_health);
        }
    }
}
