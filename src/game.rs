//! Frame driver
//!
//! Owns the one [`GameState`] and moves it through
//! `NotStarted -> Running -> GameOver -> Running ...`. The host calls
//! [`Game::frame`] once per display refresh and keeps scheduling frames for
//! as long as it returns `true`.
//!
//! Gameplay events are collected here and handed to the host through
//! [`Game::drain_events`], in the order they happened.

use crate::error::LoginError;
use crate::renderer::{self, Scene};
use crate::session::Session;
use crate::sim::{GameState, Surface, TickInput, tick};
use crate::telemetry::GameEvent;
use crate::tuning::Tuning;

/// Lifecycle of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for a valid login
    NotStarted,
    /// Frames are being simulated
    Running,
    /// Player hit an obstacle; only a restart leaves this phase
    GameOver,
}

/// The game as seen by the host page
#[derive(Debug)]
pub struct Game {
    tuning: Tuning,
    surface: Surface,
    phase: GamePhase,
    session: Option<Session>,
    state: GameState,
    /// Requests gathered since the last frame
    input: TickInput,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(tuning: Tuning, surface: Surface) -> Self {
        Self {
            state: GameState::new(tuning.clone(), surface, 0, 0.0),
            tuning,
            surface,
            phase: GamePhase::NotStarted,
            session: None,
            input: TickInput::default(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Validate the login form and start the first run.
    ///
    /// Rejected input changes nothing and logs no event.
    pub fn login(
        &mut self,
        name: &str,
        student_id: &str,
        seed: u64,
        now_ms: f64,
    ) -> Result<&Session, LoginError> {
        if self.phase != GamePhase::NotStarted {
            return Err(LoginError::AlreadyStarted);
        }
        let session = Session::login(name, student_id)?;
        log::info!("{} ({}) logged in", session.name, session.student_id);

        self.events.push(GameEvent::Login);
        self.start_run(seed, now_ms);
        Ok(self.session.insert(session))
    }

    /// Ask for a jump on the next frame. Ignored unless running.
    pub fn request_jump(&mut self) {
        if self.phase == GamePhase::Running {
            self.input.jump = true;
        }
    }

    /// Simulate one frame at wall-clock time `now_ms`.
    ///
    /// Returns whether the host should schedule another frame.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }

        let input = std::mem::take(&mut self.input);
        let outcome = tick(&mut self.state, &input, now_ms);

        if outcome.jumped {
            self.events.push(GameEvent::Jump);
        }
        if outcome.game_over {
            log::info!(
                "Game over with score {} after {} frames",
                self.state.score,
                self.state.frame
            );
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.state.score,
            });
            return false;
        }
        true
    }

    /// Start a brand-new run after a game over.
    ///
    /// Returns whether the restart happened; it is ignored in any other phase.
    pub fn restart(&mut self, seed: u64, now_ms: f64) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        log::info!("Restarting (previous score {})", self.state.score);
        self.events.push(GameEvent::Restart);
        self.start_run(seed, now_ms);
        true
    }

    /// Host surface changed size; takes effect from the next frame
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface = Surface::new(width, height);
        self.state.surface = self.surface;
    }

    /// What to draw for the current state
    pub fn scene(&self) -> Scene {
        renderer::build(&self.state)
    }

    /// Events produced since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn start_run(&mut self, seed: u64, now_ms: f64) {
        self.state = GameState::new(self.tuning.clone(), self.surface, seed, now_ms);
        self.input = TickInput::default();
        self.phase = GamePhase::Running;
        log::info!("Run started with seed {}", self.state.seed);
    }
}
