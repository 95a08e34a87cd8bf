//! Pointer input
//!
//! Translates press/drag/release into track coordinates. Releasing stops
//! tracking; the last target stays in place and the player keeps easing
//! toward it.

use crate::clamp_track_y;
use crate::tuning::RunnerTuning;

/// What the frame loop should do after a pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Start or resume the run, then aim at `target_y`
    Engage { target_y: f32 },
    /// Aim at `target_y`
    Aim { target_y: f32 },
    /// Nothing to forward
    None,
}

/// Convert a client-space y into track units (0 top, 100 bottom)
///
/// A zero-height track maps everything to the middle.
pub fn client_to_track_y(client_y: f32, track_top: f32, track_height: f32) -> f32 {
    if track_height.is_nan() || track_height <= 0.0 {
        return 50.0;
    }
    (client_y - track_top) / track_height * 100.0
}

/// Pointer tracking state
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    tracking: bool,
    last_target: Option<f32>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Last clamped target sent to the engine
    pub fn last_target(&self) -> Option<f32> {
        self.last_target
    }

    pub fn pointer_down(&mut self, track_y: f32, tuning: &RunnerTuning) -> PointerAction {
        self.tracking = true;
        let target_y = self.aim(track_y, tuning);
        PointerAction::Engage { target_y }
    }

    pub fn pointer_move(&mut self, track_y: f32, tuning: &RunnerTuning) -> PointerAction {
        if !self.tracking {
            return PointerAction::None;
        }
        let target_y = self.aim(track_y, tuning);
        PointerAction::Aim { target_y }
    }

    /// Release or leave
    pub fn pointer_up(&mut self) -> PointerAction {
        self.tracking = false;
        PointerAction::None
    }

    fn aim(&mut self, track_y: f32, tuning: &RunnerTuning) -> f32 {
        let y = clamp_track_y(track_y, tuning.min_y, tuning.max_y);
        self.last_target = Some(y);
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_track() {
        assert_eq!(client_to_track_y(150.0, 100.0, 200.0), 25.0);
        assert_eq!(client_to_track_y(300.0, 100.0, 200.0), 100.0);
        assert_eq!(client_to_track_y(10.0, 0.0, 0.0), 50.0);
        assert_eq!(client_to_track_y(10.0, 0.0, f32::NAN), 50.0);
    }

    #[test]
    fn test_drag_only_while_pressed() {
        let tuning = RunnerTuning::default();
        let mut pointer = PointerTracker::new();
        assert_eq!(pointer.pointer_move(30.0, &tuning), PointerAction::None);

        assert_eq!(
            pointer.pointer_down(30.0, &tuning),
            PointerAction::Engage { target_y: 30.0 }
        );
        assert_eq!(
            pointer.pointer_move(-50.0, &tuning),
            PointerAction::Aim {
                target_y: tuning.min_y
            }
        );

        pointer.pointer_up();
        assert!(!pointer.is_tracking());
        assert_eq!(pointer.pointer_move(70.0, &tuning), PointerAction::None);
        assert_eq!(pointer.last_target(), Some(tuning.min_y));
    }
}
