//! Fitcoach Web - Browser Workout Coach
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The page owns the camera and the MoveNet model; each pose result is
//! pushed in through the bridge. This module owns workout state, narration
//! and the skeleton overlay.

pub mod analysis;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod bridge;
#[cfg(target_arch = "wasm32")]
mod narration;
#[cfg(target_arch = "wasm32")]
mod renderer;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
#[cfg(target_arch = "wasm32")]
pub use bridge::{
    clock_tick, pose_tick, report_capture_error, reset_workout, select_exercise, shutdown,
    toggle_workout, update_keypoints,
};

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[cfg(target_arch = "wasm32")]
macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize WebGPU overlay - must be called before render_frame
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn init() -> Result<(), JsValue> {
    renderer::initialize_gpu().await?;
    console_log!("✅ WebGPU overlay initialized");
    Ok(())
}

/// Render one overlay frame with current keypoints
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn render_frame() {
    renderer::render_frame();
}
