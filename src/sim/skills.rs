//! Permanent skills offered after each cleared level

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::player::Player;
use super::state::{GamePhase, RunConfig, World};

/// Skills offered per level clear
pub const OFFER_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillKind {
    FireRate,
    Health,
    Shield,
    EnemySlowdown,
    PlayerSpeed,
    DamageBoost,
    MaxShield,
    GoldBonus,
    ProjectileSize,
    ProjectileSpeed,
}

impl SkillKind {
    pub const ALL: [SkillKind; 10] = [
        SkillKind::FireRate,
        SkillKind::Health,
        SkillKind::Shield,
        SkillKind::EnemySlowdown,
        SkillKind::PlayerSpeed,
        SkillKind::DamageBoost,
        SkillKind::MaxShield,
        SkillKind::GoldBonus,
        SkillKind::ProjectileSize,
        SkillKind::ProjectileSpeed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkillKind::FireRate => "Fire Rate",
            SkillKind::Health => "Health",
            SkillKind::Shield => "Shield",
            SkillKind::EnemySlowdown => "Enemy Slowdown",
            SkillKind::PlayerSpeed => "Player Speed",
            SkillKind::DamageBoost => "Damage Boost",
            SkillKind::MaxShield => "Max Shield",
            SkillKind::GoldBonus => "Gold Bonus",
            SkillKind::ProjectileSize => "Projectile Size",
            SkillKind::ProjectileSpeed => "Projectile Speed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillKind::FireRate => "Shoot 1% faster",
            SkillKind::Health => "Add 1 HP",
            SkillKind::Shield => "Recover shield",
            SkillKind::EnemySlowdown => "Enemies move 1% slower",
            SkillKind::PlayerSpeed => "Move 1% faster",
            SkillKind::DamageBoost => "Increase damage by 1%",
            SkillKind::MaxShield => "Increase max shield by 1",
            SkillKind::GoldBonus => "Enemies drop 10% more gold",
            SkillKind::ProjectileSize => "Increase projectile size by 5%",
            SkillKind::ProjectileSpeed => "Increase projectile speed by 5%",
        }
    }
}

/// Failures when picking a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillError {
    /// No skill choice is pending
    PhaseMismatch,
    NoSuchChoice { index: usize, offered: usize },
}

impl fmt::Display for SkillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillError::PhaseMismatch => write!(f, "no skill choice pending"),
            SkillError::NoSuchChoice { index, offered } => {
                write!(f, "skill choice {index} out of range ({offered} offered)")
            }
        }
    }
}

impl std::error::Error for SkillError {}

/// Three distinct skills in random order
pub fn offer(rng: &mut impl Rng) -> Vec<SkillKind> {
    let mut skills = SkillKind::ALL.to_vec();
    skills.shuffle(rng);
    skills.truncate(OFFER_SIZE);
    skills
}

/// Apply a skill permanently: multipliers go to the run, stats to every player
pub fn apply(skill: SkillKind, players: &mut [Player], run: &mut RunConfig) {
    match skill {
        SkillKind::FireRate => run.fire_interval_multiplier *= 0.99,
        SkillKind::EnemySlowdown => run.enemy_slowdown *= 0.99,
        SkillKind::DamageBoost => run.damage_multiplier *= 1.01,
        SkillKind::GoldBonus => run.gold_multiplier *= 1.1,
        SkillKind::ProjectileSize => run.projectile_size_multiplier *= 1.05,
        SkillKind::ProjectileSpeed => run.projectile_speed_multiplier *= 1.05,
        SkillKind::Health => {
            for p in players.iter_mut() {
                p.max_health += 1.0;
                p.health += 1.0;
            }
        }
        SkillKind::Shield => {
            for p in players.iter_mut() {
                p.shield = p.max_shield;
            }
        }
        SkillKind::PlayerSpeed => {
            for p in players.iter_mut() {
                p.speed *= 1.01;
            }
        }
        SkillKind::MaxShield => {
            for p in players.iter_mut() {
                p.max_shield += 1.0;
                p.shield += 1.0;
            }
        }
    }
}

/// Take offered skill `index`, then open the shop
pub fn choose(world: &mut World, index: usize) -> Result<SkillKind, SkillError> {
    if world.phase != GamePhase::SkillChoice {
        return Err(SkillError::PhaseMismatch);
    }
    let skill = *world.skill_offer.get(index).ok_or(SkillError::NoSuchChoice {
        index,
        offered: world.skill_offer.len(),
    })?;
    apply(skill, &mut world.players, &mut world.run);
    log::info!("Skill chosen: {}", skill.name());
    world.events.push(GameEvent::SkillChosen { skill });
    world.skill_offer.clear();
    world.open_shop();
    Ok(skill)
}
