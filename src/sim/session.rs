//! Session lifecycle
//!
//! Owns the game state, the spawn RNG and the input buffer, and is the only
//! place lifecycle requests (`start`, `end`, `restart`) are accepted:
//!
//! ```text
//! Idle --start--> Running --(lives = 0 | end)--> Ended --restart--> Idle | Running
//! ```
//!
//! Anything else is ignored. Every entry into Running bumps a generation
//! counter; a [`FrameTicket`] taken in an older generation is stale and its
//! tick is dropped, so a frame scheduled before `end`/`restart` can never
//! touch the new state.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::snapshot::Snapshot;
use super::state::{GameEvent, GameState, PlayField, SessionStatus, SessionSummary};
use super::tick::{TickInput, tick};
use crate::{GameError, Tuning};

/// Where a restart lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartMode {
    /// Back to Idle, waiting for `start`
    Idle,
    /// Straight into a new run
    Immediate,
}

/// Permission to run one tick of a specific run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

/// Outcome of [`Session::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Still running; schedule the next frame
    Continue,
    /// This tick ended the run
    Ended(SessionSummary),
    /// The ticket belongs to an earlier run (or the session is not running)
    Stale,
}

type GameOverHandler = Box<dyn FnMut(&SessionSummary)>;

pub struct Session {
    state: GameState,
    rng: Pcg32,
    pending: TickInput,
    generation: u64,
    on_game_over: Option<GameOverHandler>,
}

impl Session {
    /// Create an idle session. Tuning is validated here so a bad balance
    /// sheet fails before the first frame.
    pub fn new(field: PlayField, tuning: Tuning, seed: u64) -> Result<Self, GameError> {
        tuning.validate()?;
        log::info!(
            "Session created ({}x{} field, seed {})",
            field.width(),
            field.height(),
            seed
        );
        Ok(Self {
            state: GameState::new(field, tuning),
            rng: Pcg32::seed_from_u64(seed),
            pending: TickInput::default(),
            generation: 0,
            on_game_over: None,
        })
    }

    /// Like [`Session::new`] but from raw surface dimensions, which the host
    /// may not have at all.
    pub fn from_surface(
        size: Option<(f32, f32)>,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, GameError> {
        let (width, height) = size.ok_or(GameError::MissingPlayField)?;
        Self::new(PlayField::new(width, height)?, tuning, seed)
    }

    /// Register the callback fired exactly once per Ended transition
    pub fn set_game_over_handler(&mut self, handler: impl FnMut(&SessionSummary) + 'static) {
        self.on_game_over = Some(Box::new(handler));
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Idle/Ended -> Running. Returns false (no-op) when already running.
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            log::debug!("start() ignored: already running");
            return false;
        }
        self.begin_run();
        true
    }

    /// Running -> Ended on external request. Returns the summary, or `None`
    /// when there was no run to end.
    pub fn end(&mut self) -> Option<SessionSummary> {
        let Some(summary) = self.state.finish() else {
            log::debug!("end() ignored: status {:?}", self.state.status);
            return None;
        };
        self.generation += 1;
        self.apply_pending_resize();
        log::info!("Session ended by request: score {}", summary.final_score);
        self.notify_game_over(&summary);
        Some(summary)
    }

    /// Ended -> Idle or Running. Returns false unless the session had ended.
    pub fn restart(&mut self, mode: RestartMode) -> bool {
        if self.state.status != SessionStatus::Ended {
            log::debug!("restart() ignored: status {:?}", self.state.status);
            return false;
        }
        match mode {
            RestartMode::Idle => {
                self.state.reset();
                self.pending = TickInput::default();
                self.generation += 1;
                log::info!("Session reset to idle");
            }
            RestartMode::Immediate => self.begin_run(),
        }
        true
    }

    /// Buffer the latest pointer x for the next tick
    pub fn set_pointer_x(&mut self, x: f32) {
        if x.is_finite() {
            self.pending.pointer_x = Some(x);
        }
    }

    /// Buffer a viewport resize for the next tick. Invalid sizes (a hidden
    /// canvas reports 0x0) are ignored and the last valid field is kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        match PlayField::new(width, height) {
            Ok(field) => {
                if self.state.is_running() {
                    self.pending.resize = Some(field);
                } else {
                    self.pending.resize = None;
                    self.state.resize(field);
                }
            }
            Err(err) => log::warn!("Resize ignored: {err}"),
        }
    }

    /// Ticket for the next frame, only while Running
    pub fn frame_ticket(&self) -> Option<FrameTicket> {
        self.state.is_running().then_some(FrameTicket {
            generation: self.generation,
        })
    }

    /// Run one tick if the ticket is still current
    pub fn tick(&mut self, ticket: FrameTicket) -> TickStatus {
        if ticket.generation != self.generation || !self.state.is_running() {
            return TickStatus::Stale;
        }

        let input = std::mem::take(&mut self.pending);
        match tick(&mut self.state, &input, &mut self.rng) {
            Some(summary) => {
                self.generation += 1;
                self.apply_pending_resize();
                self.notify_game_over(&summary);
                TickStatus::Ended(summary)
            }
            None => TickStatus::Continue,
        }
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.state)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    fn begin_run(&mut self) {
        self.state.begin_run();
        self.generation += 1;
        log::info!("Session started (generation {})", self.generation);
    }

    /// Land a resize buffered during the run that just ended
    fn apply_pending_resize(&mut self) {
        if let Some(field) = self.pending.resize.take() {
            self.state.resize(field);
        }
    }

    fn notify_game_over(&mut self, summary: &SessionSummary) {
        if let Some(handler) = self.on_game_over.as_mut() {
            handler(summary);
        }
    }
}
