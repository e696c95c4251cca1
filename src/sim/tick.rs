//! Fixed timestep simulation tick
//!
//! Order within a tick:
//! 1. Pause toggle
//! 2. Turret steering and motion
//! 3. Cannon charge/fire against the live enemy snapshot
//! 4. Emergence of due wave entries
//! 5. Enemy updates (contact, pings, expiry)
//! 6. Perception (view-frame positions)
//! 7. Sweep of dead enemies
//! 8. Wave progression, then the game-over check

use super::body::Collidable;
use super::enemy::{Enemy, EnemyUpdate};
use super::projection::{emitter_position, view_position};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Fire held (charges in first-person, fires on release)
    pub fire: bool,
    /// Toggle the first-person view
    pub first_person: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused");
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.wave_time += dt;

    if input.first_person {
        state.first_person = !state.first_person;
    }

    update_turret(state, input, dt);
    update_cannon(state, input, dt);
    emerge_enemies(state);
    update_enemies(state, dt);
    update_perception(state);

    let removed = state.enemies.sweep();
    if !removed.is_empty() {
        log::trace!("Swept {} enemies", removed.len());
    }

    if !state.turret.is_dead() && state.wave_is_clear() {
        let wave = state.wave_number();
        state.events.push(GameEvent::WaveCleared { wave });
        log::info!("Wave {wave} cleared");
        if !state.advance_wave() {
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::Victory);
            log::info!("All waves cleared");
        }
    }

    if state.turret.is_dead() {
        let wave = state.wave_number();
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { wave });
        log::info!("Game over on wave {wave}");
    }
}

fn update_turret(state: &mut GameState, input: &TickInput, dt: f32) {
    let turret = &mut state.turret;
    turret.decay_shake();
    // Facing is locked while a shot is in flight
    if !state.cannon.firing {
        turret.steer(input.turn_left, input.turn_right, dt, &state.settings);
    }
    turret.drive(input.forward, input.backward, dt, &state.settings);
}

fn update_cannon(state: &mut GameState, input: &TickInput, dt: f32) {
    let origin = state.turret.position();
    let facing = state.turret.facing;
    // Dying enemies are already hit and no longer block shots. Earlier
    // versions let a dying enemy soak up the shot without dying again.
    let candidates = state.enemies.alive().filter(|e| !e.value.is_dying());

    let Some(shot) = state.cannon.update(
        input.fire,
        state.first_person,
        origin,
        facing,
        candidates,
        dt,
        &state.settings,
    ) else {
        return;
    };
    let hit = shot.hit.map(|h| (h.target.id, h.point));

    state.events.push(GameEvent::ShotFired {
        origin: shot.origin,
        end: shot.end,
        hit: hit.map(|(id, _)| id),
    });

    if let Some((id, point)) = hit
        && state.enemies.get_mut(id).is_some_and(Enemy::make_dying)
    {
        state.events.push(GameEvent::EnemyKilled { id, point });
        log::debug!("Enemy {} killed at {point}", id.0);
    }
}

fn emerge_enemies(state: &mut GameState) {
    for entry in state.wave_progress.release_due(state.wave_time) {
        let position = entry.origin.resolve(&mut state.rng);
        match Enemy::new(position, entry.kind, &state.settings) {
            Ok(enemy) => {
                let id = state.enemies.spawn(enemy);
                state.events.push(GameEvent::EnemyEmerged {
                    id,
                    kind: entry.kind,
                    position,
                });
                log::debug!("{:?} enemy {} emerged at {position}", entry.kind, id.0);
            }
            Err(err) => log::warn!("Skipping {:?} enemy: {err}", entry.kind),
        }
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let turret_pos = state.turret.position();
    let stereo_reversed = state.settings.stereo_reversed;

    let mut updates = Vec::new();
    for (id, enemy) in state.enemies.alive_mut() {
        if let Some(update) = enemy.update(turret_pos, dt, &state.settings) {
            updates.push((id, update, enemy.view));
        }
    }

    for (id, update, view) in updates {
        match update {
            EnemyUpdate::Contact => {
                state.enemies.mark_dead(id);
                state.turret.on_hit();
                state.events.push(GameEvent::PlayerHit {
                    by: id,
                    lives: state.turret.lives,
                });
            }
            EnemyUpdate::Pinged => state.events.push(GameEvent::EnemyPinged {
                id,
                emitter: emitter_position(view, stereo_reversed),
            }),
            EnemyUpdate::Expired => {
                state.enemies.mark_dead(id);
            }
        }
    }
}

fn update_perception(state: &mut GameState) {
    let observer = state.turret.position();
    let facing = state.turret.facing;
    for (_, enemy) in state.enemies.alive_mut() {
        enemy.view = view_position(observer, facing, enemy.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::enemy::EnemyKind;
    use crate::sim::wave::{Direction, SpawnEntry, SpawnOrigin, Wave, WaveSchedule};
    use glam::Vec2;

    fn entry(kind: EnemyKind, x: f32, y: f32, emergence_time: f32) -> SpawnEntry {
        SpawnEntry {
            kind,
            origin: SpawnOrigin::Point(Vec2::new(x, y)),
            emergence_time,
        }
    }

    fn game(waves: Vec<Vec<SpawnEntry>>, settings: Settings) -> GameState {
        let schedule = WaveSchedule {
            waves: waves.into_iter().map(|entries| Wave { entries }).collect(),
        };
        GameState::with_config(1, settings, schedule).unwrap()
    }

    fn run(state: &mut GameState, input: &TickInput, ticks: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            tick(state, input, SIM_DT);
            events.extend(state.drain_events());
        }
        events
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = GameState::new(1).unwrap();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        run(&mut state, &TickInput::default(), 10);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_enemies_emerge_on_schedule() {
        let mut state = game(
            vec![vec![
                entry(EnemyKind::Easy, 0.0, 1000.0, 0.0),
                entry(EnemyKind::Easy, 1000.0, 0.0, 1.0),
            ]],
            Settings::default(),
        );
        let events = run(&mut state, &TickInput::default(), 1);
        assert!(matches!(
            events[..],
            [GameEvent::EnemyEmerged {
                kind: EnemyKind::Easy,
                ..
            }]
        ));
        assert_eq!(state.enemies.len(), 1);
        // Perception ran on the new enemy: straight ahead
        let enemy = state.enemies.alive().next().unwrap().value;
        assert!(enemy.view.x.abs() < 1.0);
        assert!(enemy.view.y > 900.0);

        run(&mut state, &TickInput::default(), 60);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies_left(), 2);
    }

    #[test]
    fn test_view_toggle() {
        let mut state = GameState::new(1).unwrap();
        assert!(!state.first_person);
        let toggle = TickInput {
            first_person: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, SIM_DT);
        assert!(state.first_person);
        tick(&mut state, &toggle, SIM_DT);
        assert!(!state.first_person);
    }

    #[test]
    fn test_shot_kills_enemy_and_clears_wave() {
        let mut state = game(
            vec![vec![entry(EnemyKind::Easy, 0.0, 300.0, 0.0)]],
            Settings::default(),
        );
        state.first_person = true;

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let events = run(&mut state, &fire, 70);
        assert!(state.cannon.charging);
        assert!(state.cannon.target_in_range);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ShotFired { .. })));

        let events = run(&mut state, &TickInput::default(), 1);
        let killed = events.iter().find_map(|e| match e {
            GameEvent::EnemyKilled { id, point } => Some((*id, *point)),
            _ => None,
        });
        let (id, point) = killed.unwrap();
        assert!(events.contains(&GameEvent::ShotFired {
            origin: Vec2::ZERO,
            end: Vec2::new(0.0, 345.0),
            hit: Some(id),
        }));
        assert!(point.x.abs() < 1e-3);
        assert!(state.enemies.get(id).unwrap().is_dying());

        // Dying lasts two seconds, then the only wave is clear
        let events = run(&mut state, &TickInput::default(), 130);
        assert!(state.enemies.is_empty());
        assert!(events.contains(&GameEvent::WaveCleared { wave: 1 }));
        assert!(events.contains(&GameEvent::Victory));
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_shot_passes_through_dying_enemy() {
        let settings = Settings {
            charge_per_tick: 50.0,
            ..Default::default()
        };
        let mut state = game(
            vec![vec![
                entry(EnemyKind::Easy, 0.0, 200.0, 0.0),
                entry(EnemyKind::Easy, 0.0, 400.0, 0.0),
            ]],
            settings,
        );
        state.first_person = true;

        let mut killed = Vec::new();
        for _ in 0..100 {
            let nearest = state
                .enemies
                .alive()
                .filter(|e| !e.value.is_dying())
                .map(|e| e.value.view.y)
                .fold(f32::INFINITY, f32::min);
            let input = TickInput {
                fire: nearest.is_finite() && state.cannon.charged_range < nearest,
                ..Default::default()
            };
            for event in run(&mut state, &input, 1) {
                if let GameEvent::EnemyKilled { id, .. } = event {
                    killed.push(id);
                }
            }
        }

        // Second shot went straight through the first enemy while it was dying
        assert_eq!(killed.len(), 2);
        assert_ne!(killed[0], killed[1]);
        assert!(state.enemies.get(killed[0]).is_some_and(Enemy::is_dying));
        assert!(state.enemies.get(killed[1]).is_some_and(Enemy::is_dying));
    }

    #[test]
    fn test_steering_locked_while_firing() {
        let mut state = game(
            vec![vec![entry(EnemyKind::Easy, 1400.0, 1400.0, 60.0)]],
            Settings::default(),
        );
        state.first_person = true;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        run(&mut state, &fire, 101);
        run(&mut state, &TickInput::default(), 1);
        assert!(state.cannon.firing);

        let facing = state.turret.facing;
        let turn = TickInput {
            turn_left: true,
            ..Default::default()
        };
        run(&mut state, &turn, 10);
        assert_eq!(state.turret.facing, facing);
    }

    #[test]
    fn test_contact_costs_a_life() {
        let mut state = game(
            vec![vec![
                entry(EnemyKind::Hard, 0.0, 70.0, 0.0),
                entry(EnemyKind::Easy, 1400.0, 1400.0, 60.0),
            ]],
            Settings::default(),
        );
        let lives = state.turret.lives;
        let events = run(&mut state, &TickInput::default(), 60);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerHit { .. })));
        assert_eq!(state.turret.lives, lives - 1);
        assert!(state.turret.shake_ticks > 0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_game() {
        let settings = Settings {
            player_lives: 1,
            ..Default::default()
        };
        let mut state = game(vec![vec![entry(EnemyKind::Hard, 0.0, 70.0, 0.0)]], settings);
        let events = run(&mut state, &TickInput::default(), 60);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { wave: 1 }));
        assert!(!events.contains(&GameEvent::Victory));

        // Nothing moves after game over
        let ticks = state.time_ticks;
        run(&mut state, &TickInput::default(), 5);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_waves_advance_in_order() {
        let mut state = game(
            vec![
                vec![entry(EnemyKind::Hard, 0.0, 70.0, 0.0)],
                vec![entry(EnemyKind::Easy, 0.0, 1400.0, 0.0)],
            ],
            Settings::default(),
        );
        let events = run(&mut state, &TickInput::default(), 60);
        assert!(events.contains(&GameEvent::WaveCleared { wave: 1 }));
        assert_eq!(state.wave_number(), 2);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_same_seed_same_game() {
        let schedule = WaveSchedule {
            waves: vec![Wave {
                entries: [Direction::Up, Direction::Left, Direction::Right]
                    .into_iter()
                    .enumerate()
                    .map(|(i, dir)| SpawnEntry {
                        kind: EnemyKind::Zigzag,
                        origin: SpawnOrigin::Direction(dir),
                        emergence_time: i as f32,
                    })
                    .collect(),
            }],
        };
        let positions = |seed: u64| {
            let mut state =
                GameState::with_config(seed, Settings::default(), schedule.clone()).unwrap();
            let input = TickInput {
                turn_left: true,
                forward: true,
                ..Default::default()
            };
            run(&mut state, &input, 200);
            state
                .enemies
                .alive()
                .map(|e| e.value.position())
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(5), positions(5));
        assert_ne!(positions(5), positions(6));
    }
}
