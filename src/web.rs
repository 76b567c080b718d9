//! Browser boundary
//!
//! JavaScript owns rendering, audio and the DOM. It forwards keys and frame
//! times, then reads back snapshots and event batches as JSON.

use wasm_bindgen::prelude::*;

use crate::input::{InputMap, InputState};
use crate::settings::Settings;
use crate::sim::{Stepper, World};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
}

/// One running game
#[wasm_bindgen]
pub struct Game {
    world: World,
    input: InputState,
    stepper: Stepper,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, player_count: usize) -> Game {
        let seed = seed as u64;
        let world = World::new(seed, player_count);
        let actors = world.players.len();
        log::info!("Game created with seed {seed}, {actors} player(s)");
        Game {
            world,
            input: InputState::new(InputMap::for_players(actors), actors),
            stepper: Stepper::default(),
        }
    }

    /// Create from a settings JSON blob; the current time seeds runs without one
    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(json: &str) -> Result<Game, JsError> {
        let settings = Settings::from_json(json)?;
        let world = World::from_settings(&settings, js_sys::Date::now() as u64);
        let actors = world.players.len();
        Ok(Game {
            world,
            input: InputState::new(settings.input_map(), actors),
            stepper: Stepper::default(),
        })
    }

    /// Returns true if the key is bound, so the page can suppress scrolling
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    /// Advance by a frame's worth of time, returning the ticks run
    pub fn advance(&mut self, frame_ms: f64) -> u32 {
        let input = self.input.tick_input();
        let ran = self.stepper.advance(&mut self.world, &input, frame_ms);
        if ran > 0 {
            self.input.consume_one_shots();
        }
        ran
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.world.snapshot())?)
    }

    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.world.drain_events())?)
    }

    #[wasm_bindgen(js_name = chooseSkill)]
    pub fn choose_skill(&mut self, index: usize) -> Result<(), JsError> {
        self.world.choose_skill(index)?;
        Ok(())
    }

    pub fn buy(&mut self, player: usize, index: usize) -> Result<(), JsError> {
        self.world.buy(player, index)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = leaveShop)]
    pub fn leave_shop(&mut self) -> Result<(), JsError> {
        self.world.leave_shop()?;
        self.stepper.reset();
        Ok(())
    }

    /// Start over with a new seed
    pub fn restart(&mut self, seed: f64) {
        let seed = seed as u64;
        self.world.new_run(seed);
        self.input.release_all();
        self.input.consume_one_shots();
        self.stepper.reset();
        log::info!("Game restarted with seed {seed}");
    }
}
