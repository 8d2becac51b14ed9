//! Host glue: one play session
//!
//! Owns the simulation, the frame pump and the high score store. Hosts call
//! `frame` once per displayed frame, then `present` and `scoreboard`.

use glam::Vec2;

use crate::frame::FramePump;
use crate::highscores::HighScoreStore;
use crate::render::{self, SceneSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Scoreboard, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore> {
    state: GameState,
    pump: FramePump,
    store: S,
    settings: Settings,
    /// Input waiting for the next tick; one-shots survive zero-tick frames
    pending: TickInput,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a session, reading the persisted high score once
    pub fn new(settings: Settings, tuning: Tuning, mut store: S, seed: u64) -> Self {
        let high_score = store.read_high_score().unwrap_or_else(|err| {
            log::warn!("Could not read high score, starting from 0: {err:#}");
            0
        });
        let mut state = GameState::new(seed, tuning, settings.spawn_mode, high_score);
        state.particle_budget = settings.max_particles();

        Self {
            state,
            pump: FramePump::default(),
            store,
            settings,
            pending: TickInput::default(),
            events: Vec::new(),
        }
    }

    /// Run the ticks owed for one frame displayed at `display_hz`.
    /// Returns the number of ticks run.
    pub fn frame(&mut self, display_hz: f32, input: &TickInput) -> u32 {
        let ticks = self.pump.ticks_for_rate(display_hz);
        self.run(ticks, input)
    }

    /// Like [`Session::frame`], measuring the display rate from frame
    /// timestamps (seconds)
    pub fn frame_at(&mut self, now_secs: f64, input: &TickInput) -> u32 {
        let ticks = self.pump.ticks_for_frame(now_secs);
        self.run(ticks, input)
    }

    fn run(&mut self, ticks: u32, input: &TickInput) -> u32 {
        self.pending.move_dir = input.move_dir;
        if input.shoot.is_some() {
            self.pending.shoot = input.shoot;
        }
        self.pending.pause |= input.pause;

        for _ in 0..ticks {
            tick(&mut self.state, &self.pending);

            // Clear one-shot inputs after processing
            self.pending.shoot = None;
            self.pending.pause = false;

            self.handle_events();
        }
        ticks
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::PlayerDied {
                points, high_score, ..
            } = event
            {
                log::info!("Game over with {} points", points);
                if let Err(err) = self.store.write_high_score(high_score) {
                    log::warn!("Could not save high score {}: {err:#}", high_score);
                }
            }
            self.events.push(event);
        }
    }

    /// Events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand pending scene changes and this frame's transforms to the renderer
    pub fn present(&mut self, sink: &mut impl SceneSink) {
        render::present(&mut self.state.registry, sink);
    }

    /// Values for the display collaborator
    pub fn scoreboard(&self) -> Scoreboard {
        self.state.score.scoreboard()
    }

    /// Where the camera should look (the live player), if anywhere
    pub fn camera_focus(&self) -> Option<Vec2> {
        self.state.player_pos()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Start a new life after game over
    pub fn restart(&mut self) {
        self.state.restart();
        self.pump.reset();
        self.pending = TickInput::default();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
