//! Falling pickups dropped by defeated enemies

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::events::GameEvent;
use super::player::ModifierKind;
use super::state::World;
use crate::consts::*;

/// Probability that a defeated enemy leaves a pickup
pub const DROP_CHANCE: f64 = 0.3;
pub const POWERUP_SIZE: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    Health,
    Shield,
    RapidFire,
    DoubleGold,
    Invincibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::DoubleGold,
        PowerUpKind::Invincibility,
    ];

    /// Timed kinds become player modifiers lasting this long
    pub fn duration_ms(self) -> Option<f64> {
        match self {
            PowerUpKind::Health | PowerUpKind::Shield => None,
            PowerUpKind::RapidFire => Some(10_000.0),
            PowerUpKind::DoubleGold => Some(15_000.0),
            PowerUpKind::Invincibility => Some(5_000.0),
        }
    }

    pub fn modifier(self) -> Option<ModifierKind> {
        match self {
            PowerUpKind::Health | PowerUpKind::Shield => None,
            PowerUpKind::RapidFire => Some(ModifierKind::RapidFire),
            PowerUpKind::DoubleGold => Some(ModifierKind::DoubleGold),
            PowerUpKind::Invincibility => Some(ModifierKind::Invincibility),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick, downward
    pub fall_speed: f32,
    pub removed: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, fall_speed: f32) -> Self {
        Self {
            kind,
            pos,
            fall_speed,
            removed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, POWERUP_SIZE)
    }
}

/// Roll for a drop at `pos`; most defeats leave nothing
pub fn roll_drop(rng: &mut impl Rng, pos: Vec2) -> Option<PowerUp> {
    if !rng.random_bool(DROP_CHANCE) {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let fall_speed = rng.random_range(1.0f32..2.5);
    Some(PowerUp::new(kind, pos, fall_speed))
}

/// Give `kind` to player `index`
pub fn collect(world: &mut World, index: usize, kind: PowerUpKind) {
    let now_ms = world.now_ms();
    let Some(player) = world.players.get_mut(index) else {
        return;
    };
    match kind {
        PowerUpKind::Health => player.add_health(1.0),
        PowerUpKind::Shield => {
            let max = player.max_shield;
            player.add_shield(max);
        }
        PowerUpKind::RapidFire | PowerUpKind::DoubleGold | PowerUpKind::Invincibility => {
            if let (Some(modifier), Some(duration)) = (kind.modifier(), kind.duration_ms()) {
                let fresh = player.grant_modifier(modifier, duration, now_ms, &mut world.run);
                log::debug!("Player {index}: {modifier:?} for {duration}ms (fresh: {fresh})");
            }
        }
    }
}

/// Fall, expire below the playfield, and hand out to the first overlapping player
pub(crate) fn update(world: &mut World) {
    for i in 0..world.powerups.len() {
        let pickup = &mut world.powerups[i];
        pickup.pos.y += pickup.fall_speed;
        if pickup.pos.y > WORLD_HEIGHT {
            pickup.removed = true;
            continue;
        }
        let rect = pickup.rect();
        let Some(index) = world
            .players
            .iter()
            .position(|p| p.alive && p.rect().overlaps(&rect))
        else {
            continue;
        };
        let (kind, pos) = (world.powerups[i].kind, world.powerups[i].pos);
        world.powerups[i].removed = true;
        collect(world, index, kind);
        world.events.push(GameEvent::PowerUpCollected {
            player: index,
            kind,
            pos,
        });
    }
    world.powerups.retain(|p| !p.removed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> World {
        let mut world = World::new(21, 1);
        world.enemies.clear();
        world
    }

    #[test]
    fn test_drop_rate_is_roughly_thirty_percent() {
        let mut rng = Pcg32::seed_from_u64(4);
        let drops = (0..10_000)
            .filter_map(|_| roll_drop(&mut rng, Vec2::ZERO))
            .collect::<Vec<_>>();
        assert!((2700..3300).contains(&drops.len()), "{} drops", drops.len());
        for kind in PowerUpKind::ALL {
            assert!(drops.iter().any(|d| d.kind == kind));
        }
        assert!(drops.iter().all(|d| (1.0..2.5).contains(&d.fall_speed)));
    }

    #[test]
    fn test_pickup_falls_and_leaves_field() {
        let mut world = world();
        world
            .powerups
            .push(PowerUp::new(PowerUpKind::Health, Vec2::new(20.0, WORLD_HEIGHT - 1.0), 2.0));
        update(&mut world);
        assert!(world.powerups.is_empty());
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_collecting_health_and_shield() {
        let mut world = world();
        world.players[0].health = 1.0;
        let pos = world.players[0].pos;
        world.powerups.push(PowerUp::new(PowerUpKind::Health, pos, 1.0));
        world.powerups.push(PowerUp::new(PowerUpKind::Shield, pos, 1.0));
        update(&mut world);

        assert!(world.powerups.is_empty());
        assert_eq!(world.players[0].health, 2.0);
        assert_eq!(world.players[0].shield, PLAYER_MAX_SHIELD);
        let collected = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PowerUpCollected { player: 0, .. }))
            .count();
        assert_eq!(collected, 2);
    }

    #[test]
    fn test_double_gold_is_timed() {
        let mut world = world();
        collect(&mut world, 0, PowerUpKind::DoubleGold);
        assert_eq!(world.run.gold_multiplier, 2.0);
        assert!(world.players[0].has_modifier(ModifierKind::DoubleGold));

        let expiry = world.now_ms() + 15_000.0;
        world.players[0].expire_modifiers(expiry, &mut world.run);
        assert_eq!(world.run.gold_multiplier, 1.0);
    }

    #[test]
    fn test_dead_player_does_not_collect() {
        let mut world = world();
        world.players[0].alive = false;
        let pos = world.players[0].pos;
        world.powerups.push(PowerUp::new(PowerUpKind::Invincibility, pos, 0.0));
        update(&mut world);
        assert_eq!(world.powerups.len(), 1);
        assert!(!world.players[0].invincible);
    }
}
