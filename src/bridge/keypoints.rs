//! Keypoint storage and JS bridge
//!
//! Receives MoveNet keypoints from JavaScript and stores them for the
//! sampler and the overlay renderer to read. The page runs the model and
//! flattens each result to `x, y, score` per keypoint in COCO index order.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::analysis::{Keypoint, KEYPOINT_COUNT};

/// Floats per frame: 17 keypoints x (x, y, score)
const FRAME_FLOATS: usize = KEYPOINT_COUNT * 3;

/// Internal storage for the current frame's keypoints
struct KeypointStore {
    keypoints: [Keypoint; KEYPOINT_COUNT],
    has_frame: bool,
}

impl Default for KeypointStore {
    fn default() -> Self {
        Self {
            keypoints: [Keypoint::default(); KEYPOINT_COUNT],
            has_frame: false,
        }
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static KEYPOINTS: RefCell<KeypointStore> = RefCell::new(KeypointStore::default());
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Called from JavaScript with a flat Float32Array of 51 values.
/// An empty detection (model saw nobody) clears the stored frame; malformed
/// lengths are dropped with a console warning and the session is untouched.
#[wasm_bindgen]
pub fn update_keypoints(data: &[f32]) {
    if data.is_empty() {
        clear_keypoints();
        return;
    }

    if data.len() != FRAME_FLOATS {
        web_sys::console::warn_1(
            &format!(
                "Invalid keypoint data length: {} (expected {})",
                data.len(),
                FRAME_FLOATS
            )
            .into(),
        );
        return;
    }

    KEYPOINTS.with(|store_cell| {
        let mut store = store_cell.borrow_mut();
        for (i, keypoint) in store.keypoints.iter_mut().enumerate() {
            *keypoint = Keypoint {
                x: data[i * 3],
                y: data[i * 3 + 1],
                score: data[i * 3 + 2],
            };
        }
        store.has_frame = true;
    });
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Current frame for the sampler and renderer, None before the first result
pub fn current_frame() -> Option<[Keypoint; KEYPOINT_COUNT]> {
    KEYPOINTS.with(|store_cell| {
        let store = store_cell.borrow();
        if store.has_frame {
            Some(store.keypoints)
        } else {
            None
        }
    })
}

/// Drop the stored frame (teardown, or the model lost the person)
pub fn clear_keypoints() {
    KEYPOINTS.with(|store_cell| {
        *store_cell.borrow_mut() = KeypointStore::default();
    });
}
