//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! The geometry core (`vector`, `line`, `intersect`, `projection`, `body`,
//! `raycast`) has no game knowledge and is usable on its own.

pub mod body;
pub mod cannon;
pub mod enemy;
pub mod intersect;
pub mod line;
pub mod projection;
pub mod raycast;
pub mod registry;
pub mod state;
pub mod tick;
pub mod turret;
pub mod vector;
pub mod wave;

pub use body::{Body, Collidable, Shape, ShapeError, regular_polygon_edges};
pub use cannon::{Cannon, Shot};
pub use enemy::{Enemy, EnemyKind, EnemyState};
pub use intersect::{ray_circle_intersection, ray_intersection, segment_intersection};
pub use line::LineSegment;
pub use projection::{
    ScreenSprite, emitter_position, project_point_onto_line, screen_sprite, view_position,
};
pub use raycast::{RayHit, find_nearest_hit, intersect_body};
pub use registry::{EntityId, Entry, Registry};
pub use state::{GameError, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use turret::Turret;
pub use vector::{VectorExt, lerp};
pub use wave::{Direction, SpawnEntry, SpawnOrigin, Wave, WaveError, WaveProgress, WaveSchedule};
