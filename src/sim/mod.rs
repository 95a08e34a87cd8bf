//! Runner simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Obstacles iterate in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod rank;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_target;
pub use collision::{Aabb, first_hit, obstacle_hitbox, player_hitbox, player_sprite};
pub use rank::{RankInfo, RankTable, RankTracker};
pub use spawner::{maybe_spawn, obstacle_size, spawn_obstacle};
pub use state::{Obstacle, RunEvent, RunPhase, RunSnapshot, RunState, TerminalReason};
pub use tick::{TickInput, tick};
