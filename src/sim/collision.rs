//! Hitboxes and overlap tests
//!
//! Everything is axis-aligned in track-percentage units. Hitboxes are
//! shrunk copies of the drawn boxes so grazes don't count as hits.

use glam::Vec2;

use super::state::Obstacle;
use crate::tuning::RunnerTuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a center point and full size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Same center, size multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_center(self.center(), self.size() * factor)
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Horizontal extents overlap (broad phase)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }
}

/// Drawn player box at a vertical position
pub fn player_sprite(tuning: &RunnerTuning, player_y: f32) -> Aabb {
    Aabb::from_center(
        Vec2::new(tuning.player_x, player_y),
        Vec2::new(tuning.player_width, tuning.player_height),
    )
}

/// Player hitbox (smaller than the sprite)
pub fn player_hitbox(tuning: &RunnerTuning, player_y: f32) -> Aabb {
    player_sprite(tuning, player_y).scaled(tuning.player_hitbox_scale)
}

/// Obstacle hitbox (smaller than the drawn label box)
pub fn obstacle_hitbox(tuning: &RunnerTuning, obstacle: &Obstacle) -> Aabb {
    obstacle.bounds().scaled(tuning.obstacle_hitbox_scale)
}

/// First obstacle (in spawn order) whose hitbox overlaps the player hitbox
///
/// Obstacles outside the player's lane are rejected before the full test.
/// `is_danger` plays no part.
pub fn first_hit(tuning: &RunnerTuning, player_y: f32, obstacles: &[Obstacle]) -> Option<u32> {
    let player = player_hitbox(tuning, player_y);
    obstacles
        .iter()
        .filter(|o| o.bounds().overlaps_x(&player))
        .find(|o| obstacle_hitbox(tuning, o).overlaps(&player))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn obstacle(id: u32, x: f32, y: f32, is_danger: bool) -> Obstacle {
        Obstacle {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(12.0, 7.0),
            label: "RUMOR".into(),
            is_danger,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Aabb::from_center(Vec2::new(1.5, 0.0), Vec2::new(2.0, 2.0));
        let c = Aabb::from_center(Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0));
        assert!(a.overlaps(&b));
        // Edge contact only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_hitboxes_smaller_than_sprites() {
        let tuning = RunnerTuning::default();
        let sprite = player_sprite(&tuning, 50.0);
        let hit = player_hitbox(&tuning, 50.0);
        assert!(hit.size().x < sprite.size().x);
        assert!(hit.size().y < sprite.size().y);

        let o = obstacle(1, 40.0, 50.0, false);
        let hit = obstacle_hitbox(&tuning, &o);
        assert!(hit.size().x < o.size.x);
        assert!(hit.size().y < o.size.y);
    }

    #[test]
    fn test_graze_is_forgiven() {
        let tuning = RunnerTuning::default();
        // Sprites overlap by a sliver vertically
        let sprite_gap = tuning.player_height / 2.0 + 7.0 / 2.0 - 0.5;
        let o = obstacle(1, tuning.player_x, 50.0 + sprite_gap, true);
        assert!(player_sprite(&tuning, 50.0).overlaps(&o.bounds()));
        assert_eq!(first_hit(&tuning, 50.0, &[o]), None);
    }

    #[test]
    fn test_first_hit_in_spawn_order() {
        let tuning = RunnerTuning::default();
        let obstacles = vec![
            obstacle(1, 70.0, 50.0, false),
            obstacle(2, tuning.player_x, 50.0, false),
            obstacle(3, tuning.player_x + 1.0, 50.0, true),
        ];
        assert_eq!(first_hit(&tuning, 50.0, &obstacles), Some(2));
    }

    #[test]
    fn test_out_of_lane_never_hits() {
        let tuning = RunnerTuning::default();
        let obstacles = vec![obstacle(1, 80.0, 50.0, true)];
        assert_eq!(first_hit(&tuning, 50.0, &obstacles), None);
    }

    proptest! {
        #[test]
        fn prop_danger_flag_does_not_change_collision(
            x in -20.0f32..120.0,
            y in 0.0f32..100.0,
            player_y in 8.0f32..92.0,
        ) {
            let tuning = RunnerTuning::default();
            let safe = [obstacle(1, x, y, false)];
            let danger = [obstacle(1, x, y, true)];
            prop_assert_eq!(
                first_hit(&tuning, player_y, &safe),
                first_hit(&tuning, player_y, &danger)
            );
        }
    }
}
