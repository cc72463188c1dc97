//! Shape primitives - vertices for joint dots and bone lines

/// Vertex structure for rendering colored shapes
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Append a filled circle (triangle fan) to the vertex list
pub fn push_circle(out: &mut Vec<Vertex>, cx: f32, cy: f32, radius: f32, color: [f32; 4]) {
    const SEGMENTS: u32 = 14;

    for i in 0..SEGMENTS {
        let a1 = (i as f32 / SEGMENTS as f32) * std::f32::consts::TAU;
        let a2 = ((i + 1) as f32 / SEGMENTS as f32) * std::f32::consts::TAU;

        out.push(Vertex { position: [cx, cy], color });
        out.push(Vertex {
            position: [cx + radius * a1.cos(), cy + radius * a1.sin()],
            color,
        });
        out.push(Vertex {
            position: [cx + radius * a2.cos(), cy + radius * a2.sin()],
            color,
        });
    }
}

/// Append a line segment (thin quad) to the vertex list
pub fn push_line(
    out: &mut Vec<Vertex>,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: [f32; 4],
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let len = (dx * dx + dy * dy).sqrt();

    if len < 0.001 {
        return;
    }

    // Perpendicular direction for line thickness
    let px = -dy / len * width;
    let py = dx / len * width;

    out.extend_from_slice(&[
        Vertex { position: [from.0 - px, from.1 - py], color },
        Vertex { position: [from.0 + px, from.1 + py], color },
        Vertex { position: [to.0 + px, to.1 + py], color },
        Vertex { position: [from.0 - px, from.1 - py], color },
        Vertex { position: [to.0 + px, to.1 + py], color },
        Vertex { position: [to.0 - px, to.1 - py], color },
    ]);
}
