//! Fixed-step loop driver
//!
//! Hosts call `update` once per rendered frame with the real elapsed time.
//! The driver turns that into whole simulation ticks.

use crate::consts::*;
use crate::error::ConfigError;
use crate::palette::Palette;
use crate::platform::{Button, EdgeDetector, InputPort, InputSnapshot};
use crate::renderer::Presentation;
use crate::settings::Settings;
use crate::sim::{GameState, tick};

/// Owns the game state and paces it
#[derive(Debug, Clone)]
pub struct Driver {
    state: GameState,
    palette: Palette,
    settings: Settings,
    accumulator: f32,
    edges: EdgeDetector,
    /// Presses seen on a frame too short to run a tick
    carried: InputSnapshot,
}

impl Driver {
    /// Validate `settings` and start a run
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let palette = settings.validate()?;
        let state = new_state(settings, settings.seed);
        log::info!(
            "Starting run: seed {}, screen {}x{}, {} waves",
            settings.seed,
            settings.width,
            settings.height,
            settings.waves.entries().len()
        );
        Ok(Self {
            state,
            palette,
            settings: settings.clone(),
            accumulator: 0.0,
            edges: EdgeDetector::new(),
            carried: InputSnapshot::new(),
        })
    }

    /// Run exactly one tick with an already-resolved input
    pub fn frame<I, P>(&mut self, input: &I, out: &mut P)
    where
        I: InputPort + ?Sized,
        P: Presentation + ?Sized,
    {
        tick(&mut self.state, input, out);
    }

    /// Advance by `dt` seconds of real time with `held` buttons down
    ///
    /// Runs as many fixed ticks as fit, up to `MAX_SUBSTEPS`, and returns
    /// how many ran. Presses reach only the first tick.
    pub fn update<B, P>(&mut self, dt: f32, held: B, out: &mut P) -> u32
    where
        B: IntoIterator<Item = Button>,
        P: Presentation + ?Sized,
    {
        let mut input = self.edges.next(held).with_presses_of(self.carried);
        self.carried = InputSnapshot::new();
        self.accumulator += dt.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &input, out);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input = input.without_presses();
        }

        if substeps == 0 {
            self.carried = input;
        }
        if self.accumulator >= SIM_DT {
            log::warn!(
                "Falling behind: dropped {:.3}s of simulation time",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Start over with a new seed, keeping the configuration
    pub fn restart(&mut self, seed: u64) {
        self.state = new_state(&self.settings, seed);
        self.accumulator = 0.0;
        self.edges.reset();
        self.carried = InputSnapshot::new();
        log::info!("Restarted with seed {}", seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.state.elapsed_ticks()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn new_state(settings: &Settings, seed: u64) -> GameState {
    GameState::with_config(seed, settings.screen(), settings.waves.clone())
}
