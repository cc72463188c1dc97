//! Workout controls and sampling loop - JS bridge
//!
//! Owns the live session and detector. The page calls `pose_tick` from its
//! requestAnimationFrame loop (throttled here, not there) and `clock_tick`
//! from a permanent 1-second interval; buttons map onto the remaining
//! entry points.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::analysis::{form_feedback, select_triple, ExerciseKind, RepDetector, RepEvent};
use crate::narration;
use crate::renderer;
use crate::session::{Effect, WorkoutSession};

use super::keypoints;

/// Minimum gap between classification passes. The rAF loop fires at display
/// refresh; pose math only needs ~8 Hz.
const SAMPLE_INTERVAL_MS: f64 = 120.0;

/// Everything the bridge mutates on behalf of the page
struct CoachState {
    session: WorkoutSession,
    detector: RepDetector,
    /// Form commentary line, refreshed every sample
    feedback: String,
    /// Status line from the last session effect
    message: String,
    /// Persistent camera/model failure reported by the page
    capture_error: Option<String>,
    last_sample_ms: f64,
}

impl Default for CoachState {
    fn default() -> Self {
        Self {
            session: WorkoutSession::new(ExerciseKind::Squat),
            detector: RepDetector::new(ExerciseKind::Squat),
            feedback: String::new(),
            message: "Ready".to_string(),
            capture_error: None,
            last_sample_ms: 0.0,
        }
    }
}

thread_local! {
    static COACH: RefCell<CoachState> = RefCell::new(CoachState::default());
}

/// Perform the effects a session transition asked for. Narration failures
/// are swallowed inside `narration`; nothing here can fail a rep.
fn apply_effects(coach: &mut CoachState, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Speak { text, interrupt } => narration::speak(&text, interrupt),
            Effect::Message(text) => coach.message = text,
        }
    }
}

/// Push current numbers to the overlay HUD
fn refresh_hud(coach: &CoachState) {
    let session = &coach.session;
    renderer::update_workout_hud(
        session.total_reps(),
        session.reps_in_set(),
        session.completed_sets(),
        session.calories(),
        session.status().as_str(),
        session.seconds_remaining(),
        &coach.feedback,
    );
}

// ============================================================================
// SAMPLING LOOP
// ============================================================================

/// Called every animation frame with `performance.now()`. Internally gated
/// to one classification pass per SAMPLE_INTERVAL_MS.
#[wasm_bindgen]
pub fn pose_tick(now_ms: f64) {
    COACH.with(|coach_cell| {
        let mut coach = coach_cell.borrow_mut();

        if now_ms - coach.last_sample_ms < SAMPLE_INTERVAL_MS {
            return;
        }
        coach.last_sample_ms = now_ms;

        let Some(frame) = keypoints::current_frame() else {
            return;
        };

        let kind = coach.detector.kind();
        let Some(triple) = select_triple(&frame, kind) else {
            // Occlusion: keep phase and counters exactly where they are
            coach.feedback = format!("Can't see your {}", kind.tracked_joints());
            renderer::set_tracked_triple(None);
            refresh_hud(&coach);
            return;
        };

        let angle = triple.angle();
        coach.feedback = form_feedback(kind, angle).to_string();
        renderer::set_tracked_triple(Some([
            triple.indices.a,
            triple.indices.vertex,
            triple.indices.b,
        ]));

        let effects = match coach.detector.observe(angle) {
            RepEvent::ReachedDepth => coach.session.on_depth_reached(),
            RepEvent::Completed => coach.session.on_rep_completed(),
            RepEvent::None => vec![],
        };
        apply_effects(&mut coach, effects);
        refresh_hud(&coach);
    });
}

/// 1 Hz clock from the page. Drives the countdown and rest timers; the
/// session ignores the tick when no timer is live or the generation is
/// stale, so this can run unconditionally for the life of the page.
#[wasm_bindgen]
pub fn clock_tick() {
    COACH.with(|coach_cell| {
        let mut coach = coach_cell.borrow_mut();
        let generation = coach.session.timer_generation();
        let effects = coach.session.tick(generation);
        apply_effects(&mut coach, effects);
        refresh_hud(&coach);
    });
}

// ============================================================================
// CONTROLS
// ============================================================================

/// Start/stop button
#[wasm_bindgen]
pub fn toggle_workout() {
    COACH.with(|coach_cell| {
        let mut coach = coach_cell.borrow_mut();
        let effects = coach.session.toggle_start();
        apply_effects(&mut coach, effects);
        refresh_hud(&coach);
    });
}

/// Reset button: counters, phase and timers back to initial
#[wasm_bindgen]
pub fn reset_workout() {
    COACH.with(|coach_cell| {
        let mut coach = coach_cell.borrow_mut();
        let effects = coach.session.reset();
        coach.detector.reset();
        coach.feedback.clear();
        apply_effects(&mut coach, effects);
        refresh_hud(&coach);
    });
}

/// Exercise selector. Unknown names are dropped with a warning; a live
/// workout keeps its exercise (the page disables the selector too, this is
/// the backstop).
#[wasm_bindgen]
pub fn select_exercise(name: &str) {
    let Some(kind) = ExerciseKind::from_name(name) else {
        web_sys::console::warn_1(&format!("Unknown exercise: {}", name).into());
        return;
    };

    COACH.with(|coach_cell| {
        let mut coach = coach_cell.borrow_mut();
        let effects = coach.session.change_exercise(kind);
        // Only retarget the detector if the session actually switched
        if coach.session.kind() == kind {
            coach.detector = RepDetector::new(kind);
            coach.feedback.clear();
        }
        apply_effects(&mut coach, effects);
        refresh_hud(&coach);
    });
}

// ============================================================================
// PAGE STATE
// ============================================================================

/// Camera or model acquisition failed on the page. Sticky until the user
/// reloads; detection cannot run without frames anyway.
#[wasm_bindgen]
pub fn report_capture_error(detail: &str) {
    web_sys::console::warn_1(&format!("Capture failed: {}", detail).into());
    COACH.with(|coach_cell| {
        coach_cell.borrow_mut().capture_error = Some(format!("Camera unavailable: {}", detail));
    });
}

/// Teardown on page unload: stop speech, drop frames, fresh session
#[wasm_bindgen]
pub fn shutdown() {
    narration::cancel_all();
    keypoints::clear_keypoints();
    COACH.with(|coach_cell| {
        *coach_cell.borrow_mut() = CoachState::default();
    });
}

// ============================================================================
// UI GETTERS
// ============================================================================

/// Status line for the page: a sticky capture error wins over everything
#[wasm_bindgen]
pub fn status_message() -> String {
    COACH.with(|coach_cell| {
        let coach = coach_cell.borrow();
        match &coach.capture_error {
            Some(error) => error.clone(),
            None => coach.message.clone(),
        }
    })
}

/// Form commentary for the current frame
#[wasm_bindgen]
pub fn feedback_text() -> String {
    COACH.with(|coach_cell| coach_cell.borrow().feedback.clone())
}

/// "idle" / "countdown" / "running" / "resting"
#[wasm_bindgen]
pub fn session_status() -> String {
    COACH.with(|coach_cell| coach_cell.borrow().session.status().as_str().to_string())
}

/// Seconds left on the countdown or rest timer, 0 when neither is running
#[wasm_bindgen]
pub fn seconds_remaining() -> u32 {
    COACH.with(|coach_cell| coach_cell.borrow().session.seconds_remaining())
}

/// Active exercise name ("squat" / "pushup")
#[wasm_bindgen]
pub fn current_exercise() -> String {
    COACH.with(|coach_cell| coach_cell.borrow().session.kind().name().to_string())
}

/// Total reps this run
#[wasm_bindgen]
pub fn total_reps() -> u32 {
    COACH.with(|coach_cell| coach_cell.borrow().session.total_reps())
}

/// Reps into the current set (0-9)
#[wasm_bindgen]
pub fn reps_in_set() -> u32 {
    COACH.with(|coach_cell| coach_cell.borrow().session.reps_in_set())
}

/// Sets finished this run
#[wasm_bindgen]
pub fn completed_sets() -> u32 {
    COACH.with(|coach_cell| coach_cell.borrow().session.completed_sets())
}

/// Estimated calories, already rounded to two decimals
#[wasm_bindgen]
pub fn calories() -> f32 {
    COACH.with(|coach_cell| coach_cell.borrow().session.calories())
}
