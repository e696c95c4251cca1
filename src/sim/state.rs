//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives here, including the seeded RNG,
//! so a run replays exactly from its seed and inputs.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::body::ShapeError;
use super::cannon::Cannon;
use super::enemy::{Enemy, EnemyKind};
use super::registry::{EntityId, Registry};
use super::turret::Turret;
use super::wave::{WaveError, WaveProgress, WaveSchedule};
use crate::settings::{Settings, SettingsError};

/// Errors setting up a game
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Wave(#[from] WaveError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Every wave cleared
    Won,
    /// Out of lives
    GameOver,
}

/// Something the frontend should react to (sound, flash, HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    EnemyEmerged {
        id: EntityId,
        kind: EnemyKind,
        position: Vec2,
    },
    /// Detection ping, with the emitter position for positional audio
    EnemyPinged { id: EntityId, emitter: Vec3 },
    EnemyKilled { id: EntityId, point: Vec2 },
    PlayerHit { by: EntityId, lives: u8 },
    ShotFired {
        origin: Vec2,
        end: Vec2,
        hit: Option<EntityId>,
    },
    WaveCleared { wave: usize },
    GameOver { wave: usize },
    Victory,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    pub schedule: WaveSchedule,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current wave index (0-based)
    pub wave_index: usize,
    /// Seconds since the current wave started
    pub wave_time: f32,
    pub wave_progress: WaveProgress,
    /// Showing the first-person view (the cannon only charges in it)
    pub first_person: bool,
    pub turret: Turret,
    pub cannon: Cannon,
    pub enemies: Registry<Enemy>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New game with default settings and the built-in schedule
    pub fn new(seed: u64) -> Result<Self, GameError> {
        Self::with_config(seed, Settings::default(), WaveSchedule::builtin())
    }

    pub fn with_config(
        seed: u64,
        settings: Settings,
        schedule: WaveSchedule,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        schedule.validate()?;

        let turret = Turret::new(Vec2::ZERO, &settings)?;
        let wave_progress = schedule
            .wave(0)
            .map(WaveProgress::new)
            .unwrap_or_default();

        log::info!(
            "New game: seed={seed}, {} waves, {} lives",
            schedule.len(),
            settings.player_lives
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            first_person: settings.first_person,
            settings,
            schedule,
            phase: GamePhase::Playing,
            time_ticks: 0,
            wave_index: 0,
            wave_time: 0.0,
            wave_progress,
            turret,
            cannon: Cannon::default(),
            enemies: Registry::new(),
            events: Vec::new(),
        })
    }

    /// Waves are shown 1-based
    pub fn wave_number(&self) -> usize {
        self.wave_index + 1
    }

    /// Enemies still to come in this wave plus those on the field
    pub fn enemies_left(&self) -> usize {
        self.wave_progress.remaining() + self.enemies.len()
    }

    /// The current wave has nothing left to release or kill
    pub fn wave_is_clear(&self) -> bool {
        self.wave_progress.is_exhausted() && self.enemies.is_empty()
    }

    /// Move to the next wave. Returns false after the last one.
    pub fn advance_wave(&mut self) -> bool {
        match self.schedule.wave(self.wave_index + 1) {
            Some(wave) => {
                self.wave_progress = WaveProgress::new(wave);
                self.wave_index += 1;
                self.wave_time = 0.0;
                log::info!("Wave {} started", self.wave_number());
                true
            }
            None => false,
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
