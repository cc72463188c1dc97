//! Workout HUD - numbers and status for the on-page overlay
//!
//! The bridge pushes fresh values after every sample and tick; the page
//! polls the formatted text whenever it repaints its HUD element.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

/// Current workout numbers for display
struct WorkoutHud {
    total_reps: u32,
    reps_in_set: u32,
    completed_sets: u32,
    calories: f32,
    status: String,
    seconds_remaining: u32,
    feedback: String,
    /// Keypoint indices of the joint triple driving detection right now
    tracked: Option<[usize; 3]>,
}

impl Default for WorkoutHud {
    fn default() -> Self {
        Self {
            total_reps: 0,
            reps_in_set: 0,
            completed_sets: 0,
            calories: 0.0,
            status: "idle".to_string(),
            seconds_remaining: 0,
            feedback: String::new(),
            tracked: None,
        }
    }
}

thread_local! {
    static HUD: RefCell<WorkoutHud> = RefCell::new(WorkoutHud::default());
}

/// Update display numbers (called from the bridge)
pub fn update_workout_hud(
    total_reps: u32,
    reps_in_set: u32,
    completed_sets: u32,
    calories: f32,
    status: &str,
    seconds_remaining: u32,
    feedback: &str,
) {
    HUD.with(|hud_cell| {
        let mut hud = hud_cell.borrow_mut();
        hud.total_reps = total_reps;
        hud.reps_in_set = reps_in_set;
        hud.completed_sets = completed_sets;
        hud.calories = calories;
        hud.status = status.to_string();
        hud.seconds_remaining = seconds_remaining;
        hud.feedback = feedback.to_string();
    });
}

/// Remember which joints detection is tracking so the overlay can highlight
/// them; None when the triple failed the confidence gate this frame.
pub fn set_tracked_triple(indices: Option<[usize; 3]>) {
    HUD.with(|hud_cell| {
        hud_cell.borrow_mut().tracked = indices;
    });
}

/// Read side for the skeleton renderer
pub(super) fn tracked_triple() -> Option<[usize; 3]> {
    HUD.with(|hud_cell| hud_cell.borrow().tracked)
}

/// Formatted HUD text (called from JS to update the page)
#[wasm_bindgen]
pub fn get_workout_overlay_text() -> String {
    HUD.with(|hud_cell| {
        let hud = hud_cell.borrow();
        let timer = if hud.seconds_remaining > 0 {
            format!(" | {}s", hud.seconds_remaining)
        } else {
            String::new()
        };
        format!(
            "Reps: {} (set: {}/10) | Sets: {} | {:.2} kcal\n\
             {}{}\n\
             {}",
            hud.total_reps,
            hud.reps_in_set,
            hud.completed_sets,
            hud.calories,
            hud.status,
            timer,
            hud.feedback,
        )
    })
}
