//! Notifications for the presentation and audio layers
//!
//! The simulation only records what happened. Rendering floating numbers,
//! playing sounds or updating the HUD is up to whoever drains the queue.

use glam::Vec2;
use serde::Serialize;

use super::EntityId;
use super::catalog::{EnemyKind, Tier, WeaponKind};
use super::powerup::PowerUpKind;
use super::skills::SkillKind;
use super::status::StatusKind;

/// Something the outside world may want to show or play
///
/// Positions are playfield coordinates of the entity involved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    DamageDealt {
        target: EntityId,
        amount: f32,
        pos: Vec2,
    },
    GoldAwarded {
        amount: u32,
        pos: Vec2,
    },
    EnemyDefeated {
        id: EntityId,
        kind: EnemyKind,
        pos: Vec2,
    },
    StatusApplied {
        target: EntityId,
        kind: StatusKind,
        pos: Vec2,
    },
    StatusExpired {
        target: EntityId,
        kind: StatusKind,
    },
    Teleported {
        id: EntityId,
        pos: Vec2,
    },
    Spawned {
        parent: EntityId,
        child: EntityId,
        pos: Vec2,
    },
    Healed {
        target: EntityId,
        amount: f32,
        pos: Vec2,
    },
    PowerUpDropRequested {
        pos: Vec2,
    },
    PowerUpCollected {
        player: usize,
        kind: PowerUpKind,
        pos: Vec2,
    },
    PlayerDamaged {
        player: usize,
        amount: f32,
        pos: Vec2,
    },
    PlayerDied {
        player: usize,
        pos: Vec2,
    },
    BossSpawned {
        id: EntityId,
        kind: EnemyKind,
        pos: Vec2,
    },
    WeaponFired {
        player: usize,
        weapon: WeaponKind,
        pos: Vec2,
    },
    WeaponMerged {
        player: usize,
        weapon: WeaponKind,
        tier: Tier,
    },
    ExplosionStarted {
        pos: Vec2,
        radius: f32,
    },
    LevelStarted {
        level: u32,
    },
    LevelCleared {
        level: u32,
    },
    SkillChosen {
        skill: SkillKind,
    },
}

/// Receiver for simulation events
pub trait EffectsSink {
    fn notify(&mut self, event: &GameEvent);
}

impl EffectsSink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_is_tagged() {
        let event = GameEvent::GoldAwarded {
            amount: 7,
            pos: Vec2::new(1.0, 2.0),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "goldAwarded");
        assert_eq!(json["amount"], 7);

        let json = serde_json::to_value(GameEvent::EnemyDefeated {
            id: 3,
            kind: EnemyKind::SuperBoss,
            pos: Vec2::ZERO,
        })
        .unwrap();
        assert_eq!(json["kind"], "superBoss");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<GameEvent> = Vec::new();
        sink.notify(&GameEvent::LevelCleared { level: 2 });
        assert_eq!(sink, vec![GameEvent::LevelCleared { level: 2 }]);
    }
}
