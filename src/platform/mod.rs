//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling and cancellation
//! - Pointer input
//! - Storage (LocalStorage on web)

pub mod frame_loop;
pub mod input;
pub mod storage;

pub use frame_loop::{FpsMeter, FrameOutcome, FrameToken, RunLoop, RunObserver};
pub use input::{PointerAction, PointerTracker, client_to_track_y};
