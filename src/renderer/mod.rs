//! Renderer module - WebGPU skeleton overlay and HUD text
//!
//! Re-exports only. All logic in submodules.

mod hud;
mod shapes;
mod skeleton;
mod state;

pub use hud::{set_tracked_triple, update_workout_hud};
pub use skeleton::render_frame;
pub use state::initialize_gpu;
