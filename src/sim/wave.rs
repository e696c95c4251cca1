//! Wave schedules
//!
//! A schedule is a list of waves; each wave lists the enemies it releases and
//! when (seconds after the wave starts). Spawn points are either explicit or
//! a side of the arena, resolved with the run's seeded RNG so a given seed
//! always produces the same game.
//!
//! Schedules load from JSON or from the line-based wave script format:
//!
//! ```text
//! // comment
//! wave 1
//! @ <direction 1-4> <kind 0-6> <emergence seconds>
//! ```

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::enemy::EnemyKind;
use crate::consts::MAX_AXIS_DISTANCE;

/// Errors building a wave schedule
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("schedule has no waves")]
    NoWaves,
    #[error("wave {0} has no enemies")]
    EmptyWave(usize),
    #[error("wave {wave}: emergence time {time} is not a finite, non-negative number")]
    EmergenceTime { wave: usize, time: f32 },
    #[error("line {line}: {reason}")]
    Script { line: usize, reason: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Side of the arena an enemy comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnOrigin {
    Point(Vec2),
    /// Random point in the outer quarter of the arena on this side
    Direction(Direction),
}

impl SpawnOrigin {
    /// Concrete spawn position
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let far = MAX_AXIS_DISTANCE;
        let near = MAX_AXIS_DISTANCE * 3.0 / 4.0;
        match *self {
            SpawnOrigin::Point(p) => p,
            SpawnOrigin::Direction(Direction::Up) => {
                Vec2::new(rng.random_range(-far..=far), rng.random_range(near..=far))
            }
            SpawnOrigin::Direction(Direction::Down) => {
                Vec2::new(rng.random_range(-far..=far), rng.random_range(-far..=-near))
            }
            SpawnOrigin::Direction(Direction::Left) => {
                Vec2::new(rng.random_range(-far..=-near), rng.random_range(-far..=far))
            }
            SpawnOrigin::Direction(Direction::Right) => {
                Vec2::new(rng.random_range(near..=far), rng.random_range(-far..=far))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub kind: EnemyKind,
    pub origin: SpawnOrigin,
    /// Seconds after the wave starts
    pub emergence_time: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub entries: Vec<SpawnEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSchedule {
    pub waves: Vec<Wave>,
}

impl WaveSchedule {
    pub fn validate(&self) -> Result<(), WaveError> {
        if self.waves.is_empty() {
            return Err(WaveError::NoWaves);
        }
        for (i, wave) in self.waves.iter().enumerate() {
            if wave.entries.is_empty() {
                return Err(WaveError::EmptyWave(i + 1));
            }
            // A NaN or infinite time is never reached, so the wave could not clear
            if let Some(entry) = wave
                .entries
                .iter()
                .find(|e| !valid_emergence_time(e.emergence_time))
            {
                return Err(WaveError::EmergenceTime {
                    wave: i + 1,
                    time: entry.emergence_time,
                });
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, WaveError> {
        let schedule: Self = serde_json::from_str(json)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Parse the line-based wave script format.
    ///
    /// Waves are ordered by their number, not by where they appear.
    pub fn parse_script(script: &str) -> Result<Self, WaveError> {
        let mut waves: BTreeMap<u32, Wave> = BTreeMap::new();
        let mut current: Option<u32> = None;

        for (index, raw) in script.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with("//") {
                continue;
            }
            let err = |reason: String| WaveError::Script { line, reason };

            let mut words = text.split_whitespace();
            match words.next() {
                Some(cmd) if cmd.eq_ignore_ascii_case("wave") => {
                    let number: u32 = parse_param(words.next(), "wave number").map_err(err)?;
                    waves.entry(number).or_default();
                    current = Some(number);
                }
                Some("@") => {
                    let number = current.ok_or_else(|| err("enemy before any wave".into()))?;
                    let direction = direction_from_code(
                        parse_param(words.next(), "direction").map_err(err)?,
                    )
                    .map_err(err)?;
                    let kind =
                        kind_from_code(parse_param(words.next(), "enemy kind").map_err(err)?)
                            .map_err(err)?;
                    let emergence_time: f32 =
                        parse_param(words.next(), "emergence time").map_err(err)?;
                    if !valid_emergence_time(emergence_time) {
                        return Err(err(format!("bad emergence time `{emergence_time}`")));
                    }
                    waves.entry(number).or_default().entries.push(SpawnEntry {
                        kind,
                        origin: SpawnOrigin::Direction(direction),
                        emergence_time,
                    });
                }
                Some(other) => return Err(err(format!("unknown command `{other}`"))),
                None => {}
            }
        }

        let schedule = Self {
            waves: waves.into_values().collect(),
        };
        schedule.validate()?;
        log::debug!("Parsed wave script: {} waves", schedule.len());
        Ok(schedule)
    }

    /// Load a `.json` schedule or a wave script
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, WaveError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&text)
        } else {
            Self::parse_script(&text)
        }
    }

    /// Schedule used when no wave file is supplied
    pub fn builtin() -> Self {
        use Direction::*;
        use EnemyKind::*;

        let wave = |entries: &[(Direction, EnemyKind, f32)]| Wave {
            entries: entries
                .iter()
                .map(|&(dir, kind, emergence_time)| SpawnEntry {
                    kind,
                    origin: SpawnOrigin::Direction(dir),
                    emergence_time,
                })
                .collect(),
        };

        Self {
            waves: vec![
                wave(&[(Up, Easy, 0.0), (Down, Easy, 4.0), (Left, Moderate, 8.0)]),
                wave(&[
                    (Right, Moderate, 0.0),
                    (Up, Moderate, 3.0),
                    (Down, Hard, 6.0),
                    (Left, Easy, 6.0),
                ]),
                wave(&[
                    (Up, Zigzag, 0.0),
                    (Left, Hard, 2.0),
                    (Right, Zigzag, 5.0),
                    (Down, Moderate, 8.0),
                ]),
                wave(&[
                    (Down, Warp, 0.0),
                    (Up, Warp, 3.0),
                    (Left, Zigzag, 5.0),
                    (Right, Hard, 7.0),
                    (Up, Moderate, 9.0),
                ]),
                wave(&[
                    (Up, SuperFast, 0.0),
                    (Left, Warp, 2.0),
                    (Right, Zigzag, 4.0),
                    (Down, SuperFast, 6.0),
                    (Up, Hard, 8.0),
                    (Left, SuperFast, 10.0),
                ]),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn wave(&self, index: usize) -> Option<&Wave> {
        self.waves.get(index)
    }
}

impl Default for WaveSchedule {
    fn default() -> Self {
        Self::builtin()
    }
}

fn valid_emergence_time(time: f32) -> bool {
    time.is_finite() && time >= 0.0
}

fn parse_param<T: std::str::FromStr>(word: Option<&str>, what: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {what}"))?;
    word.parse().map_err(|_| format!("invalid {what} `{word}`"))
}

fn direction_from_code(code: u32) -> Result<Direction, String> {
    match code {
        1 => Ok(Direction::Up),
        2 => Ok(Direction::Down),
        3 => Ok(Direction::Left),
        4 => Ok(Direction::Right),
        _ => Err(format!("direction must be 1-4, got {code}")),
    }
}

fn kind_from_code(code: u32) -> Result<EnemyKind, String> {
    match code {
        1 => Ok(EnemyKind::Easy),
        // 0 is the script's "default" kind
        0 | 2 => Ok(EnemyKind::Moderate),
        3 => Ok(EnemyKind::Hard),
        4 => Ok(EnemyKind::Zigzag),
        5 => Ok(EnemyKind::Warp),
        6 => Ok(EnemyKind::SuperFast),
        _ => Err(format!("enemy kind must be 0-6, got {code}")),
    }
}

/// Entries of the current wave that have not emerged yet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveProgress {
    /// Latest first, so the next entry to emerge is at the end
    pending: Vec<SpawnEntry>,
}

impl WaveProgress {
    pub fn new(wave: &Wave) -> Self {
        let mut pending = wave.entries.clone();
        // Stable sort then reverse: equal times still pop in script order
        pending.sort_by(|a, b| {
            a.emergence_time
                .partial_cmp(&b.emergence_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pending.reverse();
        Self { pending }
    }

    /// Remove and return the entries due at `wave_time`, earliest first
    pub fn release_due(&mut self, wave_time: f32) -> Vec<SpawnEntry> {
        let mut due = Vec::new();
        while self
            .pending
            .last()
            .is_some_and(|e| wave_time >= e.emergence_time)
        {
            if let Some(entry) = self.pending.pop() {
                due.push(entry);
            }
        }
        due
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Every entry has emerged
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}
