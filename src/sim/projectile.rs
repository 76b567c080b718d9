//! Kinematic bodies: player projectiles, enemy projectiles, lasers, explosions
//!
//! Explosions resolve first so a blast created this tick starts growing on the
//! next one. Lasers and player projectiles damage enemies; enemy projectiles
//! damage players.

use glam::Vec2;

use super::EntityId;
use super::catalog::Element;
use super::collision::{Rect, beam_hits, within_radius};
use super::events::GameEvent;
use super::state::World;
use crate::consts::*;

/// A shot fired by a player weapon
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub size: f32,
    pub damage: f32,
    pub piercing: bool,
    /// Zero for shots that do not explode
    pub explosion_radius: f32,
    pub element: Option<Element>,
    /// Enemies already damaged by this shot (piercing only)
    pub hits: Vec<EntityId>,
    pub removed: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, damage: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            damage,
            piercing: false,
            explosion_radius: 0.0,
            element: None,
            hits: Vec::new(),
            removed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn is_explosive(&self) -> bool {
        self.explosion_radius > 0.0
    }
}

/// A boss shot; always deals one point of damage to the player it touches
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProjectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub removed: bool,
}

impl EnemyProjectile {
    pub const DAMAGE: f32 = 1.0;

    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: ENEMY_PROJECTILE_SIZE,
            removed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// Static beam from a muzzle to the top of the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Laser {
    /// Beam center line
    pub x: f32,
    /// Muzzle height; only enemies above it are hit
    pub origin_y: f32,
    pub width: f32,
    /// Damage applied every tick the beam persists
    pub damage: f32,
    pub remaining_ms: f64,
}

/// Expanding blast left behind by explosive shots
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub center: Vec2,
    pub max_radius: f32,
    pub damage: f32,
    /// Ticks since the blast started growing
    pub ticks: u32,
    /// Each enemy is damaged at most once per blast
    pub hits: Vec<EntityId>,
    pub removed: bool,
}

impl Explosion {
    pub fn new(center: Vec2, max_radius: f32, damage: f32) -> Self {
        Self {
            center,
            max_radius,
            damage,
            ticks: 0,
            hits: Vec::new(),
            removed: false,
        }
    }

    /// Current radius, growing linearly to `max_radius`
    pub fn radius(&self) -> f32 {
        self.max_radius * self.ticks.min(EXPLOSION_GROWTH_TICKS) as f32
            / EXPLOSION_GROWTH_TICKS as f32
    }

    /// Grow by one tick. Returns false once the blast has reached full size.
    pub fn grow(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= EXPLOSION_GROWTH_TICKS {
            self.removed = true;
        }
        !self.removed
    }
}

/// Advance every body by one tick
pub(crate) fn update(world: &mut World) {
    update_explosions(world);
    update_lasers(world);
    update_projectiles(world);
    update_enemy_projectiles(world);
}

fn update_explosions(world: &mut World) {
    for x in 0..world.explosions.len() {
        if !world.explosions[x].grow() {
            continue;
        }
        let (center, radius, damage) = {
            let blast = &world.explosions[x];
            (blast.center, blast.radius(), blast.damage)
        };
        for e in 0..world.enemies.len() {
            let enemy = &world.enemies[e];
            if !enemy.collidable() || world.explosions[x].hits.contains(&enemy.id) {
                continue;
            }
            if within_radius(center, radius, &enemy.rect()) {
                let id = enemy.id;
                world.explosions[x].hits.push(id);
                world.damage_enemy(e, damage);
            }
        }
    }
    world.explosions.retain(|x| !x.removed);
}

fn update_lasers(world: &mut World) {
    for l in 0..world.lasers.len() {
        world.lasers[l].remaining_ms -= TICK_MS;
        if world.lasers[l].remaining_ms <= 0.0 {
            continue;
        }
        let Laser {
            x,
            origin_y,
            width,
            damage,
            ..
        } = world.lasers[l];
        for e in 0..world.enemies.len() {
            let enemy = &world.enemies[e];
            if enemy.collidable() && beam_hits(x, width, origin_y, &enemy.rect()) {
                world.damage_enemy(e, damage);
            }
        }
    }
    world.lasers.retain(|l| l.remaining_ms > 0.0);
}

fn update_projectiles(world: &mut World) {
    for p in 0..world.projectiles.len() {
        let shot = &mut world.projectiles[p];
        if shot.removed {
            continue;
        }
        shot.pos += shot.vel;
        if shot.rect().outside(WORLD_WIDTH, WORLD_HEIGHT) {
            shot.removed = true;
            continue;
        }

        for e in 0..world.enemies.len() {
            let enemy = &world.enemies[e];
            let shot = &world.projectiles[p];
            if !enemy.collidable()
                || shot.hits.contains(&enemy.id)
                || !shot.rect().overlaps(&enemy.rect())
            {
                continue;
            }
            let enemy_id = enemy.id;
            let (damage, element, radius, piercing, center) = (
                shot.damage,
                shot.element,
                shot.explosion_radius,
                shot.piercing,
                shot.rect().center(),
            );

            world.hit_enemy(e, damage, element);

            if radius > 0.0 {
                world.explosions.push(Explosion::new(center, radius, damage / 2.0));
                world.events.push(GameEvent::ExplosionStarted { pos: center, radius });
                world.projectiles[p].removed = true;
                break;
            }
            if !piercing {
                world.projectiles[p].removed = true;
                break;
            }
            world.projectiles[p].hits.push(enemy_id);
        }
    }
    world.projectiles.retain(|p| !p.removed);
}

fn update_enemy_projectiles(world: &mut World) {
    for b in 0..world.enemy_projectiles.len() {
        let bullet = &mut world.enemy_projectiles[b];
        bullet.pos += bullet.vel;
        if bullet.rect().outside(WORLD_WIDTH, WORLD_HEIGHT) {
            bullet.removed = true;
            continue;
        }
        let rect = bullet.rect();
        let target = world
            .players
            .iter()
            .position(|p| p.alive && p.rect().overlaps(&rect));
        if let Some(index) = target {
            world.damage_player(index, EnemyProjectile::DAMAGE);
            world.enemy_projectiles[b].removed = true;
        }
    }
    world.enemy_projectiles.retain(|b| !b.removed);
}
