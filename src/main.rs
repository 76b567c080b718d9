//! Wave Defender entry point
//!
//! The browser build is driven from JavaScript through `wave_defender::web`.
//! Natively this runs a headless autopilot session and logs how far it got.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wave Defender (native) starting...");

    if let Err(err) = headless::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wave_defender::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use wave_defender::Settings;
    use wave_defender::consts::TICK_MS;
    use wave_defender::sim::{GameEvent, GamePhase, World, autopilot, tick};

    /// Ten simulated minutes
    const MAX_TICKS: u64 = 10 * 60 * 60;
    const DEFAULT_SEED: u64 = 42;

    /// `wave-defender [settings.json]`
    pub fn run() -> Result<(), Box<dyn Error>> {
        let settings = match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|err| format!("cannot read {path}: {err}"))?;
                Settings::from_json(&json)?
            }
            None => Settings::default(),
        };

        let mut world = World::from_settings(&settings, DEFAULT_SEED);
        let mut steps = 0u64;
        while steps < MAX_TICKS {
            match world.phase {
                GamePhase::Playing => {
                    let input = autopilot(&world);
                    tick(&mut world, &input);
                    steps += 1;
                }
                GamePhase::SkillChoice => {
                    let skill = world.choose_skill(0)?;
                    log::info!("Picked {}", skill.name());
                }
                GamePhase::Shop => {
                    go_shopping(&mut world);
                    world.leave_shop()?;
                }
                GamePhase::Paused => world.toggle_pause(),
                GamePhase::GameOver => break,
            }
            report(&mut world);
        }

        log::info!(
            "Finished after {:.1}s of play: level {}, score {}, {} enemies defeated, {} gold left",
            steps as f64 * TICK_MS / 1000.0,
            world.level,
            world.ledger.score,
            world.ledger.enemies_defeated,
            world.ledger.gold
        );
        Ok(())
    }

    /// Each player buys the cheapest item they can afford, once
    fn go_shopping(world: &mut World) {
        let mut order: Vec<usize> = (0..world.shop_stock.len()).collect();
        order.sort_by_key(|&i| world.shop_stock[i].price());
        for player in 0..world.players.len() {
            for &index in &order {
                if let Ok(item) = world.buy(player, index) {
                    log::info!("Player {player} bought {item:?}");
                    break;
                }
            }
        }
    }

    fn report(world: &mut World) {
        for event in world.drain_events() {
            match event {
                GameEvent::LevelCleared { .. }
                | GameEvent::BossSpawned { .. }
                | GameEvent::PlayerDied { .. } => log::info!("{event:?}"),
                _ => log::trace!("{event:?}"),
            }
        }
    }
}
