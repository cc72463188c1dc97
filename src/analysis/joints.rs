//! Keypoint layout and confidence-gated joint selection
//!
//! MoveNet single-pose returns 17 keypoints in COCO order. Selection picks
//! the usable left/right triple for the active exercise; a side only counts
//! when all three of its keypoints clear the confidence gate.

use super::exercise::{ExerciseKind, JointTriple};

// ============================================================================
// KEYPOINT INDICES (MoveNet / COCO - 17 total)
// ============================================================================

pub const KEYPOINT_COUNT: usize = 17;

// Face keypoints (0-4) exist in the model output but play no part in
// exercise tracking, so only the body indices get names.
pub const LEFT_SHOULDER: usize = 5;
pub const RIGHT_SHOULDER: usize = 6;
pub const LEFT_ELBOW: usize = 7;
pub const RIGHT_ELBOW: usize = 8;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;
pub const LEFT_HIP: usize = 11;
pub const RIGHT_HIP: usize = 12;
pub const LEFT_KNEE: usize = 13;
pub const RIGHT_KNEE: usize = 14;
pub const LEFT_ANKLE: usize = 15;
pub const RIGHT_ANKLE: usize = 16;

/// Skeleton connections for the overlay (pairs of keypoint indices).
/// Face edges are left out; they add nothing to exercise form.
pub const SKELETON: [(usize, usize); 12] = [
    (LEFT_SHOULDER, RIGHT_SHOULDER),
    (LEFT_HIP, RIGHT_HIP),
    (LEFT_SHOULDER, LEFT_HIP),
    (RIGHT_SHOULDER, RIGHT_HIP),
    (LEFT_SHOULDER, LEFT_ELBOW),
    (LEFT_ELBOW, LEFT_WRIST),
    (RIGHT_SHOULDER, RIGHT_ELBOW),
    (RIGHT_ELBOW, RIGHT_WRIST),
    (LEFT_HIP, LEFT_KNEE),
    (LEFT_KNEE, LEFT_ANKLE),
    (RIGHT_HIP, RIGHT_KNEE),
    (RIGHT_KNEE, RIGHT_ANKLE),
];

// ============================================================================
// CONFIDENCE GATE
// ============================================================================

/// Minimum score for a keypoint to take part in rep detection
pub const CONFIDENCE_GATE: f32 = 0.3;

/// A single 2D keypoint (normalized coordinates) with detection score
#[derive(Clone, Copy, Default, Debug)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

impl Keypoint {
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One usable joint triple, all three keypoints above the gate
#[derive(Clone, Copy, Debug)]
pub struct SelectedTriple {
    pub a: Keypoint,
    pub vertex: Keypoint,
    pub b: Keypoint,
    pub side: Side,
    pub indices: JointTriple,
}

impl SelectedTriple {
    /// Interior angle at the joint, degrees
    pub fn angle(&self) -> f32 {
        super::angles::joint_angle(self.a.position(), self.vertex.position(), self.b.position())
    }
}

fn gated(keypoints: &[Keypoint; KEYPOINT_COUNT], indices: JointTriple, side: Side) -> Option<SelectedTriple> {
    let a = keypoints[indices.a];
    let vertex = keypoints[indices.vertex];
    let b = keypoints[indices.b];

    if a.score < CONFIDENCE_GATE || vertex.score < CONFIDENCE_GATE || b.score < CONFIDENCE_GATE {
        return None;
    }

    Some(SelectedTriple { a, vertex, b, side, indices })
}

/// Pick the joint triple to track this frame, or None if neither side is
/// confidently visible.
///
/// Tie-break when both sides clear the gate: the side with the smaller
/// angle (more bent) wins. Mid-rep the working side reads more reliably,
/// and the rule is deterministic frame to frame.
pub fn select_triple(
    keypoints: &[Keypoint; KEYPOINT_COUNT],
    kind: ExerciseKind,
) -> Option<SelectedTriple> {
    let [left_indices, right_indices] = kind.joint_triples();
    let left = gated(keypoints, left_indices, Side::Left);
    let right = gated(keypoints, right_indices, Side::Right);

    match (left, right) {
        (Some(l), Some(r)) => {
            if l.angle() <= r.angle() {
                Some(l)
            } else {
                Some(r)
            }
        }
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> [Keypoint; KEYPOINT_COUNT] {
        [Keypoint { x: 0.5, y: 0.5, score: 0.9 }; KEYPOINT_COUNT]
    }

    fn set(frame: &mut [Keypoint; KEYPOINT_COUNT], idx: usize, x: f32, y: f32, score: f32) {
        frame[idx] = Keypoint { x, y, score };
    }

    #[test]
    fn test_low_confidence_blocks_side() {
        let mut kps = frame();
        // Left leg straight, but knee score below gate
        set(&mut kps, LEFT_HIP, 0.4, 0.3, 0.9);
        set(&mut kps, LEFT_KNEE, 0.4, 0.5, 0.2);
        set(&mut kps, LEFT_ANKLE, 0.4, 0.7, 0.9);
        // Right leg entirely invisible
        set(&mut kps, RIGHT_HIP, 0.6, 0.3, 0.1);
        set(&mut kps, RIGHT_KNEE, 0.6, 0.5, 0.1);
        set(&mut kps, RIGHT_ANKLE, 0.6, 0.7, 0.1);

        assert!(select_triple(&kps, ExerciseKind::Squat).is_none());
    }

    #[test]
    fn test_falls_back_to_visible_side() {
        let mut kps = frame();
        set(&mut kps, LEFT_HIP, 0.4, 0.3, 0.1);
        set(&mut kps, LEFT_KNEE, 0.4, 0.5, 0.9);
        set(&mut kps, LEFT_ANKLE, 0.4, 0.7, 0.9);
        set(&mut kps, RIGHT_HIP, 0.6, 0.3, 0.8);
        set(&mut kps, RIGHT_KNEE, 0.6, 0.5, 0.8);
        set(&mut kps, RIGHT_ANKLE, 0.6, 0.7, 0.8);

        let selected = select_triple(&kps, ExerciseKind::Squat).unwrap();
        assert_eq!(selected.side, Side::Right);
    }

    #[test]
    fn test_prefers_more_bent_side() {
        let mut kps = frame();
        // Left leg straight (~180°)
        set(&mut kps, LEFT_HIP, 0.4, 0.2, 0.9);
        set(&mut kps, LEFT_KNEE, 0.4, 0.5, 0.9);
        set(&mut kps, LEFT_ANKLE, 0.4, 0.8, 0.9);
        // Right leg bent at ~90°
        set(&mut kps, RIGHT_HIP, 0.6, 0.5, 0.9);
        set(&mut kps, RIGHT_KNEE, 0.6, 0.7, 0.9);
        set(&mut kps, RIGHT_ANKLE, 0.8, 0.7, 0.9);

        let selected = select_triple(&kps, ExerciseKind::Squat).unwrap();
        assert_eq!(selected.side, Side::Right);
        assert!(selected.angle() < 100.0);
    }

    #[test]
    fn test_pushup_tracks_elbow() {
        let mut kps = frame();
        set(&mut kps, LEFT_SHOULDER, 0.3, 0.4, 0.9);
        set(&mut kps, LEFT_ELBOW, 0.4, 0.55, 0.9);
        set(&mut kps, LEFT_WRIST, 0.4, 0.75, 0.9);
        // Right arm occluded
        set(&mut kps, RIGHT_SHOULDER, 0.0, 0.0, 0.0);
        set(&mut kps, RIGHT_ELBOW, 0.0, 0.0, 0.0);
        set(&mut kps, RIGHT_WRIST, 0.0, 0.0, 0.0);

        let selected = select_triple(&kps, ExerciseKind::Pushup).unwrap();
        assert_eq!(selected.side, Side::Left);
        assert_eq!(selected.indices.vertex, LEFT_ELBOW);
    }
}
