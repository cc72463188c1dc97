//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod keypoints;
mod session_api;

pub use keypoints::{
    // WASM entry points
    update_keypoints,
    // Internal API
    clear_keypoints,
    current_frame,
};

pub use session_api::{
    // WASM entry points
    clock_tick,
    pose_tick,
    toggle_workout,
    reset_workout,
    select_exercise,
    report_capture_error,
    shutdown,
    // UI getters
    calories,
    completed_sets,
    current_exercise,
    feedback_text,
    reps_in_set,
    seconds_remaining,
    session_status,
    status_message,
    total_reps,
};
