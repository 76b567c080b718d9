//! Static enemy and weapon archetypes
//!
//! Archetypes are immutable and looked up by kind or by name. Entities keep a
//! kind and resolve their archetype through these tables; they never copy and
//! mutate the template.

use serde::{Deserialize, Serialize};

/// Enemy archetype identifiers, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
    Jump,
    Boss,
    SuperBoss,
    HyperBoss,
    UltraBoss,
    Shielded,
    Teleporter,
    Spawner,
    Healer,
}

impl EnemyKind {
    /// Catalog order; weighted sampling accumulates in this order
    pub const ALL: [EnemyKind; 12] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Jump,
        EnemyKind::Boss,
        EnemyKind::SuperBoss,
        EnemyKind::HyperBoss,
        EnemyKind::UltraBoss,
        EnemyKind::Shielded,
        EnemyKind::Teleporter,
        EnemyKind::Spawner,
        EnemyKind::Healer,
    ];

    /// Boss tiers from weakest to strongest
    pub const BOSS_TIERS: [EnemyKind; 4] = [
        EnemyKind::Boss,
        EnemyKind::SuperBoss,
        EnemyKind::HyperBoss,
        EnemyKind::UltraBoss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Jump => "jump",
            EnemyKind::Boss => "boss",
            EnemyKind::SuperBoss => "superBoss",
            EnemyKind::HyperBoss => "hyperBoss",
            EnemyKind::UltraBoss => "ultraBoss",
            EnemyKind::Shielded => "shielded",
            EnemyKind::Teleporter => "teleporter",
            EnemyKind::Spawner => "spawner",
            EnemyKind::Healer => "healer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn archetype(self) -> &'static EnemyArchetype {
        &ENEMY_ARCHETYPES[self as usize]
    }

    pub fn is_boss(self) -> bool {
        matches!(self.archetype().behavior, Behavior::Boss { .. })
    }
}

/// Boss attack patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPattern {
    /// Three shots fanned downward
    Spread3,
    /// Five shots fanned downward
    Spread5,
    /// Eight-direction ring
    Ring8,
    /// Sixteen-direction ring plus one aimed double-speed shot
    Ring16Aimed,
}

/// Variant-specific behavior parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Plain horizontal drift
    Drift,
    Jump { interval_ms: f64, distance: f32 },
    Teleport { interval_ms: f64 },
    Spawn { interval_ms: f64 },
    Heal { interval_ms: f64, range: f32 },
    Shielded { shield: f32 },
    Boss { pattern: BossPattern },
}

/// Immutable enemy template
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyArchetype {
    pub kind: EnemyKind,
    pub emoji: &'static str,
    /// Horizontal speed in units per tick
    pub speed: f32,
    pub health: f32,
    pub size: f32,
    pub score_value: u32,
    pub gold_value: u32,
    /// Relative weight for grid sampling
    pub spawn_weight: f64,
    pub behavior: Behavior,
}

static ENEMY_ARCHETYPES: [EnemyArchetype; 12] = [
    EnemyArchetype {
        kind: EnemyKind::Normal,
        emoji: "👾",
        speed: 1.0,
        health: 1.2,
        size: 30.0,
        score_value: 10,
        gold_value: 7,
        spawn_weight: 40.0,
        behavior: Behavior::Drift,
    },
    EnemyArchetype {
        kind: EnemyKind::Fast,
        emoji: "⚡",
        speed: 2.0,
        health: 1.0,
        size: 25.0,
        score_value: 15,
        gold_value: 8,
        spawn_weight: 12.0,
        behavior: Behavior::Drift,
    },
    EnemyArchetype {
        kind: EnemyKind::Tank,
        emoji: "🪖",
        speed: 0.7,
        health: 3.0,
        size: 35.0,
        score_value: 20,
        gold_value: 10,
        spawn_weight: 12.0,
        behavior: Behavior::Drift,
    },
    EnemyArchetype {
        kind: EnemyKind::Jump,
        emoji: "🦘",
        speed: 1.2,
        health: 1.2,
        size: 30.0,
        score_value: 25,
        gold_value: 12,
        spawn_weight: 11.0,
        behavior: Behavior::Jump {
            interval_ms: 1000.0,
            distance: 50.0,
        },
    },
    EnemyArchetype {
        kind: EnemyKind::Boss,
        emoji: "👹",
        speed: 0.5,
        health: 10.0,
        size: 50.0,
        score_value: 100,
        gold_value: 50,
        spawn_weight: 1.0,
        behavior: Behavior::Boss {
            pattern: BossPattern::Spread3,
        },
    },
    EnemyArchetype {
        kind: EnemyKind::SuperBoss,
        emoji: "🐉",
        speed: 0.4,
        health: 25.0,
        size: 60.0,
        score_value: 250,
        gold_value: 100,
        spawn_weight: 0.1,
        behavior: Behavior::Boss {
            pattern: BossPattern::Spread5,
        },
    },
    EnemyArchetype {
        kind: EnemyKind::HyperBoss,
        emoji: "👿",
        speed: 0.3,
        health: 50.0,
        size: 70.0,
        score_value: 500,
        gold_value: 200,
        spawn_weight: 0.01,
        behavior: Behavior::Boss {
            pattern: BossPattern::Ring8,
        },
    },
    EnemyArchetype {
        kind: EnemyKind::UltraBoss,
        emoji: "💀",
        speed: 0.2,
        health: 100.0,
        size: 80.0,
        score_value: 1000,
        gold_value: 500,
        spawn_weight: 0.001,
        behavior: Behavior::Boss {
            pattern: BossPattern::Ring16Aimed,
        },
    },
    EnemyArchetype {
        kind: EnemyKind::Shielded,
        emoji: "🛡️",
        speed: 0.8,
        health: 2.0,
        size: 32.0,
        score_value: 30,
        gold_value: 15,
        spawn_weight: 8.0,
        behavior: Behavior::Shielded { shield: 2.0 },
    },
    EnemyArchetype {
        kind: EnemyKind::Teleporter,
        emoji: "🌀",
        speed: 1.5,
        health: 1.5,
        size: 28.0,
        score_value: 35,
        gold_value: 18,
        spawn_weight: 6.0,
        behavior: Behavior::Teleport {
            interval_ms: 3000.0,
        },
    },
    EnemyArchetype {
        kind: EnemyKind::Spawner,
        emoji: "🥚",
        speed: 0.6,
        health: 4.0,
        size: 40.0,
        score_value: 60,
        gold_value: 30,
        spawn_weight: 5.0,
        behavior: Behavior::Spawn {
            interval_ms: 5000.0,
        },
    },
    EnemyArchetype {
        kind: EnemyKind::Healer,
        emoji: "💚",
        speed: 1.0,
        health: 2.0,
        size: 30.0,
        score_value: 40,
        gold_value: 20,
        spawn_weight: 5.0,
        behavior: Behavior::Heal {
            interval_ms: 4000.0,
            range: 100.0,
        },
    },
];

/// Look up an enemy archetype by name, falling back to `normal`
pub fn enemy_archetype(name: &str) -> &'static EnemyArchetype {
    match EnemyKind::from_name(name) {
        Some(kind) => kind.archetype(),
        None => {
            log::debug!("Unknown enemy type {name:?}, using normal");
            EnemyKind::Normal.archetype()
        }
    }
}

/// Elemental tags carried by projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Element {
    Fire,
    Ice,
    Electric,
    Toxic,
    Plasma,
}

/// Weapon power ranks, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Exotic,
    Transcendent,
}

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::Common,
        Tier::Uncommon,
        Tier::Rare,
        Tier::Epic,
        Tier::Legendary,
        Tier::Mythic,
        Tier::Exotic,
        Tier::Transcendent,
    ];

    /// Damage multiplier; fire interval divides by its square root
    pub fn multiplier(self) -> f32 {
        match self {
            Tier::Common => 1.0,
            Tier::Uncommon => 1.5,
            Tier::Rare => 2.0,
            Tier::Epic => 3.0,
            Tier::Legendary => 6.0,
            Tier::Mythic => 8.0,
            Tier::Exotic => 10.0,
            Tier::Transcendent => 20.0,
        }
    }

    /// Next tier up, `None` at the top
    pub fn next(self) -> Option<Tier> {
        Self::ALL.get(self as usize + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Common => "common",
            Tier::Uncommon => "uncommon",
            Tier::Rare => "rare",
            Tier::Epic => "epic",
            Tier::Legendary => "legendary",
            Tier::Mythic => "mythic",
            Tier::Exotic => "exotic",
            Tier::Transcendent => "transcendent",
        }
    }

    /// Lowest level at which the shop stocks this tier
    pub fn unlock_level(self) -> u32 {
        match self {
            Tier::Common => 1,
            Tier::Uncommon => 2,
            Tier::Rare => 3,
            Tier::Epic => 6,
            Tier::Legendary => 10,
            Tier::Mythic => 15,
            Tier::Exotic => 20,
            Tier::Transcendent => 30,
        }
    }
}

/// Weapon archetype identifiers, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Gun,
    MachineGun,
    Shotgun,
    Rocket,
    Laser,
    Sniper,
    Flamethrower,
    Railgun,
    PlasmaCannon,
    IceBlaster,
    ToxicSprayer,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 11] = [
        WeaponKind::Gun,
        WeaponKind::MachineGun,
        WeaponKind::Shotgun,
        WeaponKind::Rocket,
        WeaponKind::Laser,
        WeaponKind::Sniper,
        WeaponKind::Flamethrower,
        WeaponKind::Railgun,
        WeaponKind::PlasmaCannon,
        WeaponKind::IceBlaster,
        WeaponKind::ToxicSprayer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Gun => "Gun",
            WeaponKind::MachineGun => "MachineGun",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Rocket => "Rocket",
            WeaponKind::Laser => "Laser",
            WeaponKind::Sniper => "Sniper",
            WeaponKind::Flamethrower => "Flamethrower",
            WeaponKind::Railgun => "Railgun",
            WeaponKind::PlasmaCannon => "PlasmaCannon",
            WeaponKind::IceBlaster => "IceBlaster",
            WeaponKind::ToxicSprayer => "ToxicSprayer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn archetype(self) -> &'static WeaponArchetype {
        &WEAPON_ARCHETYPES[self as usize]
    }
}

/// How a weapon turns one trigger pull into bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FirePattern {
    /// One straight shot
    Single,
    /// Evenly fanned shots; `spread` is the horizontal factor between neighbors
    Spread { count: u32, spread: f32 },
    /// One straight shot that bursts on impact
    Explosive,
    /// Static beam toward the top of the playfield
    Beam { width: f32, duration_ms: f64 },
    /// Several shots with random horizontal jitter and speed
    Spray {
        shots: u32,
        jitter: f32,
        min_speed_factor: f32,
    },
}

/// Immutable weapon template
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponArchetype {
    pub kind: WeaponKind,
    pub damage: f32,
    /// Minimum milliseconds between shots
    pub fire_rate_ms: f64,
    /// Units per tick
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub piercing: bool,
    /// Zero when the weapon does not explode
    pub explosion_radius: f32,
    pub element: Option<Element>,
    pub price: u32,
    pub pattern: FirePattern,
    pub description: &'static str,
}

impl WeaponArchetype {
    /// Bodies emitted per trigger pull
    pub fn projectile_count(&self) -> u32 {
        match self.pattern {
            FirePattern::Spread { count, .. } => count,
            FirePattern::Spray { shots, .. } => shots,
            _ => 1,
        }
    }
}

static WEAPON_ARCHETYPES: [WeaponArchetype; 11] = [
    WeaponArchetype {
        kind: WeaponKind::Gun,
        damage: 1.0,
        fire_rate_ms: 400.0,
        projectile_speed: 8.0,
        projectile_size: 5.0,
        piercing: false,
        explosion_radius: 0.0,
        element: None,
        price: 120,
        pattern: FirePattern::Single,
        description: "Balanced weapon",
    },
    WeaponArchetype {
        kind: WeaponKind::MachineGun,
        damage: 0.5,
        fire_rate_ms: 130.0,
        projectile_speed: 10.0,
        projectile_size: 3.0,
        piercing: false,
        explosion_radius: 0.0,
        element: None,
        price: 240,
        pattern: FirePattern::Single,
        description: "Fast firing, less damage",
    },
    WeaponArchetype {
        kind: WeaponKind::Shotgun,
        damage: 0.7,
        fire_rate_ms: 900.0,
        projectile_speed: 7.0,
        projectile_size: 4.0,
        piercing: false,
        explosion_radius: 0.0,
        element: None,
        price: 350,
        pattern: FirePattern::Spread {
            count: 5,
            spread: 0.3,
        },
        description: "Fires multiple projectiles",
    },
    WeaponArchetype {
        kind: WeaponKind::Rocket,
        damage: 3.0,
        fire_rate_ms: 1400.0,
        projectile_speed: 5.0,
        projectile_size: 8.0,
        piercing: false,
        explosion_radius: 50.0,
        element: None,
        price: 600,
        pattern: FirePattern::Explosive,
        description: "High damage, slow fire rate",
    },
    WeaponArchetype {
        kind: WeaponKind::Laser,
        damage: 0.05,
        fire_rate_ms: 50.0,
        projectile_speed: 0.0,
        projectile_size: 0.0,
        piercing: true,
        explosion_radius: 0.0,
        element: None,
        price: 1500,
        pattern: FirePattern::Beam {
            width: 5.0,
            duration_ms: 100.0,
        },
        description: "Continuous beam, pierces enemies",
    },
    WeaponArchetype {
        kind: WeaponKind::Sniper,
        damage: 5.0,
        fire_rate_ms: 1500.0,
        projectile_speed: 15.0,
        projectile_size: 4.0,
        piercing: true,
        explosion_radius: 0.0,
        element: None,
        price: 700,
        pattern: FirePattern::Single,
        description: "High damage, pierces enemies",
    },
    WeaponArchetype {
        kind: WeaponKind::Flamethrower,
        damage: 0.15,
        fire_rate_ms: 40.0,
        projectile_speed: 6.0,
        projectile_size: 6.0,
        piercing: false,
        explosion_radius: 0.0,
        element: Some(Element::Fire),
        price: 600,
        pattern: FirePattern::Spray {
            shots: 2,
            jitter: 0.5,
            min_speed_factor: 0.7,
        },
        description: "Short range, rapid fire, burns enemies",
    },
    WeaponArchetype {
        kind: WeaponKind::Railgun,
        damage: 8.0,
        fire_rate_ms: 2000.0,
        projectile_speed: 20.0,
        projectile_size: 6.0,
        piercing: true,
        explosion_radius: 0.0,
        element: Some(Element::Electric),
        price: 400,
        pattern: FirePattern::Single,
        description: "Very high damage, pierces all enemies, slow reload",
    },
    WeaponArchetype {
        kind: WeaponKind::PlasmaCannon,
        damage: 10.0,
        fire_rate_ms: 2500.0,
        projectile_speed: 7.0,
        projectile_size: 12.0,
        piercing: false,
        explosion_radius: 70.0,
        element: Some(Element::Plasma),
        price: 1500,
        pattern: FirePattern::Explosive,
        description: "Slow, huge plasma ball with splash damage",
    },
    WeaponArchetype {
        kind: WeaponKind::IceBlaster,
        damage: 1.2,
        fire_rate_ms: 350.0,
        projectile_speed: 7.0,
        projectile_size: 6.0,
        piercing: false,
        explosion_radius: 0.0,
        element: Some(Element::Ice),
        price: 900,
        pattern: FirePattern::Single,
        description: "Slows enemies with ice shots",
    },
    WeaponArchetype {
        kind: WeaponKind::ToxicSprayer,
        damage: 0.18,
        fire_rate_ms: 35.0,
        projectile_speed: 5.0,
        projectile_size: 5.0,
        piercing: false,
        explosion_radius: 0.0,
        element: Some(Element::Toxic),
        price: 650,
        pattern: FirePattern::Spray {
            shots: 2,
            jitter: 0.7,
            min_speed_factor: 0.8,
        },
        description: "Rapid fire, poisons enemies over time",
    },
];
