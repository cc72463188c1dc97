//! Analysis module - per-frame pose math and rep detection
//!
//! Re-exports only. All logic in submodules. Nothing in here touches the
//! browser, so every submodule is unit-testable on the host.

mod angles;
mod exercise;
mod joints;
mod rep_detector;

pub use angles::joint_angle;
pub use exercise::{ExerciseKind, JointTriple};
pub use joints::{
    select_triple, Keypoint, SelectedTriple, Side, CONFIDENCE_GATE, KEYPOINT_COUNT, SKELETON,
};
pub use rep_detector::{form_feedback, Phase, RepDetector, RepEvent};
