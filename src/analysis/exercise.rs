//! Exercise table - tracked joints, thresholds and calorie rates
//!
//! One row per supported exercise. The session and detector read everything
//! they need from here, so adding an exercise means adding a row, not
//! touching the state machines.

use super::joints::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE,
    RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};

/// Keypoint indices for one tracked joint: two limb ends around a vertex
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JointTriple {
    pub a: usize,
    pub vertex: usize,
    pub b: usize,
}

/// Supported exercises
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseKind {
    Squat,
    Pushup,
}

/// kcal credited per completed rep (linear model, not biometric)
const KCAL_PER_REP: [(ExerciseKind, f32); 2] =
    [(ExerciseKind::Squat, 0.32), (ExerciseKind::Pushup, 0.29)];

impl ExerciseKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "squat" => Some(ExerciseKind::Squat),
            "pushup" => Some(ExerciseKind::Pushup),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squat",
            ExerciseKind::Pushup => "Push-up",
        }
    }

    pub fn kcal_per_rep(&self) -> f32 {
        KCAL_PER_REP
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, kcal)| *kcal)
            .unwrap_or(0.0)
    }

    /// Angle below this flips the phase to Down
    pub fn down_threshold(&self) -> f32 {
        match self {
            ExerciseKind::Squat => 95.0,
            ExerciseKind::Pushup => 90.0,
        }
    }

    /// Angle above this flips the phase back to Up and completes a rep.
    /// Deliberately far from the down threshold: the gap is the hysteresis
    /// band that keeps jitter near one boundary from double-counting.
    pub fn up_threshold(&self) -> f32 {
        match self {
            ExerciseKind::Squat => 160.0,
            ExerciseKind::Pushup => 155.0,
        }
    }

    /// Left and right keypoint triples for the tracked joint
    pub fn joint_triples(&self) -> [JointTriple; 2] {
        match self {
            ExerciseKind::Squat => [
                JointTriple { a: LEFT_HIP, vertex: LEFT_KNEE, b: LEFT_ANKLE },
                JointTriple { a: RIGHT_HIP, vertex: RIGHT_KNEE, b: RIGHT_ANKLE },
            ],
            ExerciseKind::Pushup => [
                JointTriple { a: LEFT_SHOULDER, vertex: LEFT_ELBOW, b: LEFT_WRIST },
                JointTriple { a: RIGHT_SHOULDER, vertex: RIGHT_ELBOW, b: RIGHT_WRIST },
            ],
        }
    }

    /// What the user should show the camera, for visibility messages
    pub fn tracked_joints(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "hips, knees and ankles",
            ExerciseKind::Pushup => "shoulders, elbows and wrists",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for kind in [ExerciseKind::Squat, ExerciseKind::Pushup] {
            assert_eq!(ExerciseKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ExerciseKind::from_name("deadlift"), None);
    }

    #[test]
    fn test_hysteresis_band_is_open() {
        for kind in [ExerciseKind::Squat, ExerciseKind::Pushup] {
            assert!(kind.up_threshold() > kind.down_threshold());
        }
    }

    #[test]
    fn test_kcal_rates() {
        assert_eq!(ExerciseKind::Squat.kcal_per_rep(), 0.32);
        assert_eq!(ExerciseKind::Pushup.kcal_per_rep(), 0.29);
    }
}
