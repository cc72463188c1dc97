//! Skeleton rendering - draws keypoint dots and bone lines over the video
//!
//! Low-confidence keypoints are simply not drawn; the overlay shows exactly
//! what detection can see. The joint triple currently driving rep detection
//! gets a highlight so the user knows which side is being tracked.

use crate::analysis::{Keypoint, CONFIDENCE_GATE, KEYPOINT_COUNT, SKELETON};
use crate::bridge;

use super::hud;
use super::shapes::{push_circle, push_line, Vertex};
use super::state::{GPU_STATE, MAX_VERTICES};

/// Colors for the overlay elements
mod colors {
    /// Bone lines
    pub const BONE: [f32; 4] = [0.2, 0.9, 0.9, 0.8];
    /// Ordinary joint dots
    pub const JOINT: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    /// Joints of the tracked triple
    pub const TRACKED: [f32; 4] = [0.3, 1.0, 0.4, 1.0];
    /// Clear color; the video element shows through
    pub const CLEAR: wgpu::Color = wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
}

/// Convert normalized keypoint (0-1) to clip space (-1 to 1), flip Y
fn to_clip_space(x: f32, y: f32) -> (f32, f32) {
    (x * 2.0 - 1.0, -(y * 2.0 - 1.0))
}

/// Bones where both endpoints clear the confidence gate
fn build_bone_vertices(keypoints: &[Keypoint; KEYPOINT_COUNT]) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for (start_idx, end_idx) in SKELETON.iter() {
        let start = keypoints[*start_idx];
        let end = keypoints[*end_idx];

        if start.score < CONFIDENCE_GATE || end.score < CONFIDENCE_GATE {
            continue;
        }

        let from = to_clip_space(start.x, start.y);
        let to = to_clip_space(end.x, end.y);
        push_line(&mut vertices, from, to, 0.006, colors::BONE);
    }

    vertices
}

/// Dots for visible keypoints, tracked triple highlighted
fn build_joint_vertices(keypoints: &[Keypoint; KEYPOINT_COUNT]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let tracked = hud::tracked_triple();

    for (idx, keypoint) in keypoints.iter().enumerate() {
        if keypoint.score < CONFIDENCE_GATE {
            continue;
        }

        let (x, y) = to_clip_space(keypoint.x, keypoint.y);
        let is_tracked = tracked.map(|t| t.contains(&idx)).unwrap_or(false);
        let (color, radius) = if is_tracked {
            (colors::TRACKED, 0.020)
        } else {
            (colors::JOINT, 0.012)
        };

        push_circle(&mut vertices, x, y, radius, color);
    }

    vertices
}

/// Render one overlay frame from the current keypoints
pub fn render_frame() {
    GPU_STATE.with(|state_cell| {
        let state_ref = state_cell.borrow();
        let state = match state_ref.as_ref() {
            Some(s) => s,
            None => return,
        };

        let mut vertices: Vec<Vertex> = Vec::new();

        if let Some(keypoints) = bridge::current_frame() {
            vertices.extend(build_bone_vertices(&keypoints));
            vertices.extend(build_joint_vertices(&keypoints));
        }

        // Never overrun the fixed-size buffer
        vertices.truncate(MAX_VERTICES as usize);

        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Overlay Encoder"),
            });

        if !vertices.is_empty() {
            state
                .queue
                .write_buffer(&state.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Skeleton Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !vertices.is_empty() {
                pass.set_pipeline(&state.render_pipeline);
                pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}
