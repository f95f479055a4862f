//! Collision detection
//!
//! Everything in the field is an axis-aligned box, so a hit is a strict
//! rectangle overlap. Resolution is first-match-wins: static obstacles are
//! tested before oscillating ones and the scan stops at the first overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::PlayerState;

/// Axis-aligned bounding box in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box whose bottom-right corner sits at `anchor`
    pub fn from_bottom_right(anchor: Vec2, size: Vec2) -> Self {
        Self::new(anchor - size, anchor)
    }

    /// Box whose bottom edge is centred on `anchor`
    pub fn from_bottom_center(anchor: Vec2, size: Vec2) -> Self {
        let half_w = size.x / 2.0;
        Self::new(
            Vec2::new(anchor.x - half_w, anchor.y - size.y),
            Vec2::new(anchor.x + half_w, anchor.y),
        )
    }

    /// Strict overlap; boxes that only touch along an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x.max(other.min.x) < self.max.x.min(other.max.x)
            && self.min.y.max(other.min.y) < self.max.y.min(other.max.y)
    }
}

/// Which collection the hit obstacle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    Static,
    Oscillating,
}

/// The first obstacle found overlapping the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub source: HitSource,
    /// Index into the source collection
    pub index: usize,
}

/// Find the first obstacle the player overlaps
///
/// Static obstacles are scanned before oscillating ones. When both overlap in
/// the same frame the static one is reported; nothing downstream depends on
/// which one wins.
pub fn find_collision(
    player: &PlayerState,
    obstacles: &[Obstacle],
    oscillators: &[Obstacle],
) -> Option<Hit> {
    let player_box = player.bounds();

    let first_in = |list: &[Obstacle]| list.iter().position(|o| o.bounds().intersects(&player_box));

    if let Some(index) = first_in(obstacles) {
        return Some(Hit {
            source: HitSource::Static,
            index,
        });
    }
    first_in(oscillators).map(|index| Hit {
        source: HitSource::Oscillating,
        index,
    })
}
