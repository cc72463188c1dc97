//! Hysteresis rep detection
//!
//! Two-phase machine per exercise: Up (default) and Down. The phase only
//! flips when the joint angle crosses the exercise's down threshold going
//! down, or its up threshold coming back up. Angles wandering between the
//! two thresholds change nothing, so noise near a single boundary cannot
//! double-count.

use super::exercise::ExerciseKind;

/// Exercise phase within one rep
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Up,
    Down,
}

/// What a single angle observation produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepEvent {
    /// No threshold crossed
    None,
    /// Up -> Down: user hit working depth
    ReachedDepth,
    /// Down -> Up: one full rep cycle done
    Completed,
}

/// Phase tracker for the active exercise
pub struct RepDetector {
    kind: ExerciseKind,
    phase: Phase,
}

impl RepDetector {
    pub fn new(kind: ExerciseKind) -> Self {
        Self { kind, phase: Phase::Up }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed one confidently-detected joint angle.
    ///
    /// Callers must NOT call this for frames where the joints failed the
    /// confidence gate; skipping the call is what keeps occlusion from
    /// faking reps.
    pub fn observe(&mut self, angle: f32) -> RepEvent {
        match self.phase {
            Phase::Up if angle < self.kind.down_threshold() => {
                self.phase = Phase::Down;
                RepEvent::ReachedDepth
            }
            Phase::Down if angle > self.kind.up_threshold() => {
                self.phase = Phase::Up;
                RepEvent::Completed
            }
            _ => RepEvent::None,
        }
    }

    /// Back to the initial phase (exercise change or workout reset)
    pub fn reset(&mut self) {
        self.phase = Phase::Up;
    }
}

// ============================================================================
// FORM FEEDBACK
// ============================================================================

/// Coarse form commentary for the current angle. Stateless, display only,
/// safe to recompute every frame.
pub fn form_feedback(kind: ExerciseKind, angle: f32) -> &'static str {
    match kind {
        ExerciseKind::Squat => {
            if angle >= 160.0 {
                "standing tall"
            } else if angle >= 120.0 {
                "descending"
            } else if angle >= 95.0 {
                "almost there"
            } else if angle >= 70.0 {
                "good depth"
            } else {
                "too low"
            }
        }
        ExerciseKind::Pushup => {
            if angle >= 155.0 {
                "arms extended"
            } else if angle >= 110.0 {
                "lowering"
            } else if angle >= 90.0 {
                "almost there"
            } else if angle >= 65.0 {
                "good depth"
            } else {
                "too low"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_credits_once() {
        let mut detector = RepDetector::new(ExerciseKind::Squat);

        assert_eq!(detector.observe(170.0), RepEvent::None);
        assert_eq!(detector.observe(90.0), RepEvent::ReachedDepth);
        assert_eq!(detector.phase(), Phase::Down);
        // Holding depth produces nothing further
        assert_eq!(detector.observe(85.0), RepEvent::None);
        assert_eq!(detector.observe(165.0), RepEvent::Completed);
        assert_eq!(detector.phase(), Phase::Up);
    }

    #[test]
    fn test_oscillation_inside_band_credits_nothing() {
        let mut detector = RepDetector::new(ExerciseKind::Squat);

        // Bounce between the two thresholds without crossing either
        for angle in [120.0, 100.0, 140.0, 98.0, 150.0, 110.0] {
            assert_eq!(detector.observe(angle), RepEvent::None);
        }
        assert_eq!(detector.phase(), Phase::Up);
    }

    #[test]
    fn test_partial_rise_does_not_complete() {
        let mut detector = RepDetector::new(ExerciseKind::Pushup);

        assert_eq!(detector.observe(80.0), RepEvent::ReachedDepth);
        // Rises past the down threshold but not the up threshold
        assert_eq!(detector.observe(120.0), RepEvent::None);
        assert_eq!(detector.observe(85.0), RepEvent::None);
        assert_eq!(detector.observe(156.0), RepEvent::Completed);
    }

    #[test]
    fn test_reset_restores_up_phase() {
        let mut detector = RepDetector::new(ExerciseKind::Squat);
        detector.observe(90.0);
        assert_eq!(detector.phase(), Phase::Down);

        detector.reset();
        assert_eq!(detector.phase(), Phase::Up);
        // A rise after reset is not a completion
        assert_eq!(detector.observe(170.0), RepEvent::None);
    }

    #[test]
    fn test_feedback_bands() {
        assert_eq!(form_feedback(ExerciseKind::Squat, 175.0), "standing tall");
        assert_eq!(form_feedback(ExerciseKind::Squat, 130.0), "descending");
        assert_eq!(form_feedback(ExerciseKind::Squat, 100.0), "almost there");
        assert_eq!(form_feedback(ExerciseKind::Squat, 80.0), "good depth");
        assert_eq!(form_feedback(ExerciseKind::Squat, 50.0), "too low");

        assert_eq!(form_feedback(ExerciseKind::Pushup, 160.0), "arms extended");
        assert_eq!(form_feedback(ExerciseKind::Pushup, 70.0), "good depth");
    }
}
