//! Frame simulation module
//!
//! All gameplay logic lives here. It has no rendering or platform
//! dependencies:
//! - One `SessionState` per session, borrowed by each component per frame
//! - Wall-clock `dt` threaded explicitly into every update
//! - Seeded RNG only
//! - Stable iteration order (static obstacles before oscillating ones)

pub mod collision;
pub mod obstacle;
pub mod player;
pub mod portal;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Hit, HitSource, find_collision};
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::PlayerState;
pub use portal::PortalState;
pub use spawner::{Difficulty, Lane, maybe_spawn};
pub use state::{GamePhase, RunEnd, SessionState};
pub use tick::{Command, TickInput, TickOutcome, tick};
