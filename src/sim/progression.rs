//! Level progression: grid layout, difficulty scaling and boss selection

use glam::Vec2;
use rand::Rng;

use super::catalog::EnemyKind;
use super::events::GameEvent;
use super::state::World;
use crate::consts::*;

/// Enemy grid dimensions for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

/// Every fifth level adds a boss
pub fn is_milestone(level: u32) -> bool {
    level > 0 && level % 5 == 0
}

/// Grid size by level bracket, shrunk by one row and column on milestones
pub fn grid_for_level(level: u32) -> Grid {
    let (rows, cols) = match level {
        0..=5 => (3, 5),
        6..=10 => (4, 5),
        11..=15 => (4, 6),
        16..=20 => (5, 6),
        _ => (5, 7),
    };
    if is_milestone(level) {
        Grid {
            rows: (rows - 1).max(2),
            cols: (cols - 1).max(3),
        }
    } else {
        Grid { rows, cols }
    }
}

/// Enemy health scale for a level; bosses get double
pub fn health_multiplier(level: u32, boss: bool) -> f32 {
    let base = 1.0 + level.saturating_sub(1) as f32 * 0.5;
    if boss { base * 2.0 } else { base }
}

/// Enemy speed scale: +10% per level, times any slowdown from skills
pub fn speed_multiplier(level: u32, slowdown: f32) -> f32 {
    (1.0 + level.saturating_sub(1) as f32 * 0.1) * slowdown
}

pub fn total_spawn_weight() -> f64 {
    EnemyKind::ALL
        .iter()
        .map(|kind| kind.archetype().spawn_weight)
        .sum()
}

/// Map a draw in `[0, total_spawn_weight)` to a kind by cumulative weight
///
/// Draws past the last threshold fall back to `Normal`.
pub fn pick_enemy_kind(draw: f64) -> EnemyKind {
    let mut cumulative = 0.0;
    for kind in EnemyKind::ALL {
        cumulative += kind.archetype().spawn_weight;
        if draw < cumulative {
            return kind;
        }
    }
    EnemyKind::Normal
}

pub fn choose_enemy_kind(rng: &mut impl Rng) -> EnemyKind {
    pick_enemy_kind(rng.random::<f64>() * total_spawn_weight())
}

/// Boss tier for a level given a uniform draw in `[0, 1)`
///
/// Milestones 5 to 20 are fixed; later levels lean toward stronger tiers.
pub fn boss_tier_from_draw(level: u32, draw: f64) -> EnemyKind {
    match level {
        5 => return EnemyKind::Boss,
        10 => return EnemyKind::SuperBoss,
        15 => return EnemyKind::HyperBoss,
        20 => return EnemyKind::UltraBoss,
        _ => {}
    }
    let thresholds = match level {
        0..25 => [0.7, 0.9, 0.98],
        25..30 => [0.4, 0.8, 0.95],
        _ => [0.2, 0.5, 0.8],
    };
    thresholds
        .iter()
        .position(|&t| draw < t)
        .map_or(EnemyKind::UltraBoss, |i| EnemyKind::BOSS_TIERS[i])
}

pub fn boss_for_level(level: u32, rng: &mut impl Rng) -> EnemyKind {
    match level {
        5 | 10 | 15 | 20 => boss_tier_from_draw(level, 0.0),
        _ => boss_tier_from_draw(level, rng.random::<f64>()),
    }
}

/// Top-left corner of a grid cell; the grid is centered horizontally
pub fn grid_position(grid: Grid, row: u32, col: u32) -> Vec2 {
    let start_x = (WORLD_WIDTH - grid.cols as f32 * GRID_CELL_WIDTH) / 2.0;
    Vec2::new(
        start_x + col as f32 * GRID_CELL_WIDTH,
        GRID_TOP + row as f32 * GRID_CELL_HEIGHT,
    )
}

/// Fill the world with the enemy population for `level`
///
/// The world's level must already be set so spawned enemies pick up its
/// health and speed scaling.
pub fn populate(world: &mut World, level: u32) {
    let grid = grid_for_level(level);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let kind = choose_enemy_kind(&mut world.rng);
            world.spawn_enemy(kind, grid_position(grid, row, col));
        }
    }

    if is_milestone(level) {
        let kind = boss_for_level(level, &mut world.rng);
        let pos = Vec2::new(WORLD_WIDTH / 2.0 - 30.0, BOSS_SPAWN_Y);
        let id = world.spawn_milestone_boss(kind, pos);
        log::info!("Level {level}: {} joins the wave", kind.name());
        world.events.push(GameEvent::BossSpawned { id, kind, pos });
    }
}
