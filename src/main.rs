//! Turret Arena entry point
//!
//! Native headless runner: loads settings and an optional wave file, then
//! plays the game with a simple autopilot and logs what happens.
//!
//! Usage: `turret-arena [settings.json] [waves.txt|waves.json] [seed]`

use std::process::ExitCode;

use turret_arena::Settings;
use turret_arena::consts::SIM_DT;
use turret_arena::renderer;
use turret_arena::sim::{
    Collidable, GameEvent, GamePhase, GameState, TickInput, WaveSchedule, tick,
};

/// Maximum simulation steps per frame (prevents spiral of death)
const MAX_SUBSTEPS: u32 = 4;
/// Simulated frame time of the headless loop
const FRAME_DT: f32 = 1.0 / 50.0;
/// Give up after ten minutes of game time
const MAX_TICKS: u64 = 60 * 60 * 10;
/// Aim tolerance for the autopilot (view-frame units)
const AIM_TOLERANCE: f32 = 15.0;

/// Turn toward the nearest enemy and fire once the charge reaches it
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        first_person: !state.first_person,
        ..Default::default()
    };

    let target = state
        .enemies
        .alive()
        .filter(|e| !e.value.is_dying())
        .min_by(|a, b| {
            let da = (a.position() - state.turret.position()).length_squared();
            let db = (b.position() - state.turret.position()).length_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return input;
    };
    let view = target.value.view;

    if view.y <= 0.0 || view.x.abs() > AIM_TOLERANCE {
        // Negative x is to the left
        input.turn_left = view.x < 0.0 || view.y <= 0.0;
        input.turn_right = !input.turn_left;
    } else {
        // Keep charging until the beam reaches past the target
        input.fire = state.cannon.charged_range < view.y;
    }
    input
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::EnemyEmerged { id, kind, position } => {
            log::info!("{kind:?} enemy #{} emerged at {position}", id.0)
        }
        GameEvent::EnemyPinged { id, emitter } => {
            log::debug!("Ping from enemy #{} at {emitter}", id.0)
        }
        GameEvent::EnemyKilled { id, point } => log::info!("Enemy #{} hit at {point}", id.0),
        GameEvent::PlayerHit { by, lives } => {
            log::warn!("Rammed by enemy #{}, {lives} lives left", by.0)
        }
        GameEvent::ShotFired { origin, end, hit } => {
            log::debug!("Shot {origin} -> {end}, hit={hit:?}")
        }
        GameEvent::WaveCleared { wave } => log::info!("Wave {wave} cleared"),
        GameEvent::GameOver { wave } => log::info!("Game over on wave {wave}"),
        GameEvent::Victory => log::info!("Victory!"),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Turret Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = Settings::load_or_default(args.next().unwrap_or("settings.json".into()));
    let schedule = match args.next() {
        Some(path) => match WaveSchedule::load_from(&path) {
            Ok(schedule) => schedule,
            Err(err) => {
                log::error!("Failed to load waves from {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => WaveSchedule::builtin(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

    let mut state = match GameState::with_config(seed, settings, schedule) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Failed to start game: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut accumulator = 0.0;
    let mut vertex_count = 0;
    while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
        accumulator += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            for event in state.drain_events() {
                log_event(&event);
            }
        }

        let frame = if state.first_person {
            renderer::first_person(&state)
        } else {
            renderer::top_down(&state)
        };
        vertex_count = vertex_count.max(frame.len());
    }

    log::info!(
        "Finished: {:?} on wave {} after {} ticks, {} lives left, peak {} vertices/frame",
        state.phase,
        state.wave_number(),
        state.time_ticks,
        state.turret.lives,
        vertex_count
    );

    match state.phase {
        GamePhase::Won | GamePhase::GameOver => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
