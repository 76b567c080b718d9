//! Player weapons: tier scaling, cooldown gating and emission patterns

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::{FirePattern, Tier, WeaponArchetype, WeaponKind};
use super::projectile::{Laser, Projectile};
use super::state::RunConfig;

/// Run-wide and per-player factors folded in at fire time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireModifiers {
    pub damage: f32,
    /// Multiplies the fire interval (below 1.0 fires faster)
    pub interval: f64,
    pub size: f32,
    pub speed: f32,
}

impl Default for FireModifiers {
    fn default() -> Self {
        Self {
            damage: 1.0,
            interval: 1.0,
            size: 1.0,
            speed: 1.0,
        }
    }
}

impl FireModifiers {
    /// Combine the run configuration with a player's rapid-fire factor
    pub fn new(run: &RunConfig, rapid_fire: f32) -> Self {
        Self {
            damage: run.damage_multiplier,
            interval: f64::from(run.fire_interval_multiplier * rapid_fire),
            size: run.projectile_size_multiplier,
            speed: run.projectile_speed_multiplier,
        }
    }
}

/// One body produced by a trigger pull
#[derive(Debug, Clone, PartialEq)]
pub enum Shot {
    Bullet(Projectile),
    Beam(Laser),
}

/// A weapon owned by a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub tier: Tier,
    /// Time of the last accepted trigger pull
    #[serde(skip)]
    pub last_fire_ms: Option<f64>,
}

impl Weapon {
    pub fn new(kind: WeaponKind, tier: Tier) -> Self {
        Self {
            kind,
            tier,
            last_fire_ms: None,
        }
    }

    /// Build a weapon from an archetype name; unknown names yield `None`
    pub fn from_name(name: &str, tier: Tier) -> Option<Self> {
        let weapon = WeaponKind::from_name(name).map(|kind| Self::new(kind, tier));
        if weapon.is_none() {
            log::debug!("Unknown weapon type {name:?}");
        }
        weapon
    }

    pub fn archetype(&self) -> &'static WeaponArchetype {
        self.kind.archetype()
    }

    pub fn damage(&self) -> f32 {
        self.archetype().damage * self.tier.multiplier()
    }

    /// Milliseconds between shots; higher tiers fire more often
    pub fn fire_rate_ms(&self) -> f64 {
        self.archetype().fire_rate_ms / f64::from(self.tier.multiplier()).sqrt()
    }

    pub fn projectile_speed(&self) -> f32 {
        self.archetype().projectile_speed * self.tier.multiplier().sqrt()
    }

    /// Same archetype and tier
    pub fn same_grade(&self, other: &Weapon) -> bool {
        self.kind == other.kind && self.tier == other.tier
    }

    /// Whether the cooldown gate is open at `now_ms`
    pub fn ready(&self, now_ms: f64, mods: &FireModifiers) -> bool {
        match self.last_fire_ms {
            None => true,
            Some(last) => now_ms - last >= self.fire_rate_ms() * mods.interval,
        }
    }

    /// Pull the trigger with the muzzle at `origin` (top-center of the ship)
    ///
    /// Returns nothing while the cooldown gate is closed. Otherwise resets the
    /// gate and emits the archetype's pattern.
    pub fn fire(
        &mut self,
        origin: Vec2,
        now_ms: f64,
        mods: &FireModifiers,
        rng: &mut impl Rng,
    ) -> Vec<Shot> {
        if !self.ready(now_ms, mods) {
            return Vec::new();
        }
        self.last_fire_ms = Some(now_ms);

        let arch = self.archetype();
        let damage = self.damage() * mods.damage;
        let speed = self.projectile_speed() * mods.speed;
        let size = arch.projectile_size * mods.size;

        let bullet = |vel: Vec2| {
            let mut shot = Projectile::new(
                Vec2::new(origin.x - size / 2.0, origin.y - size),
                vel,
                size,
                damage,
            );
            shot.piercing = arch.piercing;
            shot.explosion_radius = arch.explosion_radius;
            shot.element = arch.element;
            Shot::Bullet(shot)
        };

        match arch.pattern {
            FirePattern::Single | FirePattern::Explosive => vec![bullet(Vec2::new(0.0, -speed))],
            FirePattern::Spread { count, spread } => {
                let mid = (count as f32 - 1.0) / 2.0;
                (0..count)
                    .map(|i| {
                        let factor = (i as f32 - mid) * spread;
                        bullet(Vec2::new(factor * speed, -speed))
                    })
                    .collect()
            }
            FirePattern::Spray {
                shots,
                jitter,
                min_speed_factor,
            } => (0..shots)
                .map(|_| {
                    let dx = (rng.random::<f32>() - 0.5) * jitter * speed;
                    let factor = min_speed_factor + rng.random::<f32>() * (1.0 - min_speed_factor);
                    bullet(Vec2::new(dx, -speed * factor))
                })
                .collect(),
            FirePattern::Beam { width, duration_ms } => vec![Shot::Beam(Laser {
                x: origin.x,
                origin_y: origin.y,
                width,
                damage,
                remaining_ms: duration_ms,
            })],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Element;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bullets(shots: &[Shot]) -> Vec<&Projectile> {
        shots
            .iter()
            .filter_map(|s| match s {
                Shot::Bullet(p) => Some(p),
                Shot::Beam(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_transcendent_scaling_is_exact() {
        let base = WeaponKind::Gun.archetype();
        let weapon = Weapon::new(WeaponKind::Gun, Tier::Transcendent);
        assert_eq!(weapon.damage(), base.damage * 20.0);
        assert_eq!(weapon.fire_rate_ms(), base.fire_rate_ms / 20f64.sqrt());
        assert_eq!(weapon.projectile_speed(), base.projectile_speed * 20f32.sqrt());
    }

    #[test]
    fn test_unknown_weapon_is_none() {
        assert!(Weapon::from_name("Banana", Tier::Common).is_none());
        assert_eq!(
            Weapon::from_name("Sniper", Tier::Rare).map(|w| w.kind),
            Some(WeaponKind::Sniper)
        );
    }

    #[test]
    fn test_cooldown_gate() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mods = FireModifiers::default();
        let mut gun = Weapon::new(WeaponKind::Gun, Tier::Common);
        let origin = Vec2::new(400.0, 540.0);

        assert_eq!(gun.fire(origin, 1000.0, &mods, &mut rng).len(), 1);
        assert!(gun.fire(origin, 1399.0, &mods, &mut rng).is_empty());
        assert_eq!(gun.fire(origin, 1400.0, &mods, &mut rng).len(), 1);
    }

    #[test]
    fn test_rapid_fire_shortens_interval() {
        let run = RunConfig::default();
        let mods = FireModifiers::new(&run, 0.7);
        let mut gun = Weapon::new(WeaponKind::Gun, Tier::Common);
        gun.last_fire_ms = Some(0.0);
        assert!(gun.ready(281.0, &mods));
        assert!(!gun.ready(279.0, &mods));
        assert!(!gun.ready(281.0, &FireModifiers::default()));
    }

    #[test]
    fn test_shotgun_spread_is_even() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shotgun = Weapon::new(WeaponKind::Shotgun, Tier::Common);
        let shots = shotgun.fire(Vec2::new(400.0, 540.0), 0.0, &FireModifiers::default(), &mut rng);
        let bullets = bullets(&shots);
        assert_eq!(bullets.len(), 5);
        let dxs: Vec<f32> = bullets.iter().map(|b| b.vel.x).collect();
        assert!((dxs[2]).abs() < 1e-6);
        assert!((dxs[0] + dxs[4]).abs() < 1e-5);
        assert!((dxs[1] - dxs[0] - 0.3 * 7.0).abs() < 1e-5);
        assert!(bullets.iter().all(|b| b.vel.y == -7.0));
    }

    #[test]
    fn test_spawn_position_and_flags() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut rocket = Weapon::new(WeaponKind::Rocket, Tier::Common);
        let shots = rocket.fire(Vec2::new(400.0, 540.0), 0.0, &FireModifiers::default(), &mut rng);
        let shot = bullets(&shots)[0].clone();
        assert_eq!(shot.pos, Vec2::new(396.0, 532.0));
        assert!(shot.is_explosive());
        assert!(!shot.piercing);

        let mut railgun = Weapon::new(WeaponKind::Railgun, Tier::Common);
        let shots = railgun.fire(Vec2::new(400.0, 540.0), 0.0, &FireModifiers::default(), &mut rng);
        let shot = bullets(&shots)[0].clone();
        assert!(shot.piercing);
        assert_eq!(shot.element, Some(Element::Electric));
    }

    #[test]
    fn test_laser_emits_beam() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut laser = Weapon::new(WeaponKind::Laser, Tier::Common);
        let shots = laser.fire(Vec2::new(123.0, 540.0), 0.0, &FireModifiers::default(), &mut rng);
        match shots.as_slice() {
            [Shot::Beam(beam)] => {
                assert_eq!(beam.x, 123.0);
                assert_eq!(beam.origin_y, 540.0);
                assert_eq!(beam.remaining_ms, 100.0);
            }
            other => panic!("expected one beam, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_spray_stays_within_jitter(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut sprayer = Weapon::new(WeaponKind::ToxicSprayer, Tier::Common);
            let shots = sprayer.fire(Vec2::new(400.0, 540.0), 0.0, &FireModifiers::default(), &mut rng);
            let bullets = bullets(&shots);
            prop_assert_eq!(bullets.len(), 2);
            for b in bullets {
                prop_assert!(b.vel.x.abs() <= 0.35 * 5.0 + 1e-4);
                prop_assert!(b.vel.y <= -0.8 * 5.0 + 1e-4);
                prop_assert!(b.vel.y >= -5.0 - 1e-4);
            }
        }

        #[test]
        fn prop_tier_scaling(tier_index in 0usize..8, kind_index in 0usize..11) {
            let tier = Tier::ALL[tier_index];
            let kind = WeaponKind::ALL[kind_index];
            let weapon = Weapon::new(kind, tier);
            let m = tier.multiplier();
            prop_assert_eq!(weapon.damage(), kind.archetype().damage * m);
            prop_assert!(weapon.fire_rate_ms() <= kind.archetype().fire_rate_ms);
        }
    }
}
