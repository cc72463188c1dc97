//! GPU state management - WebGPU device, queue, surface initialization
//!
//! The overlay canvas sits on top of the page's video element, so the
//! surface clears to transparent instead of a background color.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use super::shapes::Vertex;

/// Canvas element the overlay draws into
const CANVAS_ID: &str = "overlay-canvas";

/// Vertex buffer capacity; 17 dots plus 12 bones fit with a wide margin
pub(crate) const MAX_VERTICES: u64 = 4096;

/// Errors that can occur during GPU initialization
pub enum OverlayError {
    NoWindow,
    NoDocument,
    NoCanvas,
    SurfaceCreationFailed(String),
    NoAdapter,
    DeviceCreationFailed(String),
}

impl From<OverlayError> for JsValue {
    fn from(err: OverlayError) -> Self {
        match err {
            OverlayError::NoWindow => JsValue::from_str("No window found"),
            OverlayError::NoDocument => JsValue::from_str("No document found"),
            OverlayError::NoCanvas => {
                JsValue::from_str("No canvas with id 'overlay-canvas' found")
            }
            OverlayError::SurfaceCreationFailed(e) => {
                JsValue::from_str(&format!("Surface creation failed: {}", e))
            }
            OverlayError::NoAdapter => JsValue::from_str("Failed to find a suitable GPU adapter"),
            OverlayError::DeviceCreationFailed(e) => {
                JsValue::from_str(&format!("Device creation failed: {}", e))
            }
        }
    }
}

/// Holds all WebGPU state for rendering
pub(crate) struct GpuState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub render_pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
}

// Thread-local storage for GPU state (WASM is single-threaded)
thread_local! {
    pub(crate) static GPU_STATE: RefCell<Option<GpuState>> = RefCell::new(None);
}

/// Initialize WebGPU: adapter, device, surface, pipeline
pub async fn initialize_gpu() -> Result<(), OverlayError> {
    let window = web_sys::window().ok_or(OverlayError::NoWindow)?;
    let document = window.document().ok_or(OverlayError::NoDocument)?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or(OverlayError::NoCanvas)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| OverlayError::NoCanvas)?;

    // The page sizes the canvas to match the video element; fall back to a
    // webcam-typical size if it hasn't yet
    let mut width = canvas.width();
    let mut height = canvas.height();
    if width == 0 || height == 0 {
        width = 640;
        height = 480;
        canvas.set_width(width);
        canvas.set_height(height);
    }

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| OverlayError::SurfaceCreationFailed(format!("{:?}", e)))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(OverlayError::NoAdapter)?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Overlay Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| OverlayError::DeviceCreationFailed(format!("{:?}", e)))?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .unwrap_or(surface_caps.formats[0]);

    // Prefer an alpha mode that lets the video show through
    let alpha_mode = if surface_caps
        .alpha_modes
        .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
    {
        wgpu::CompositeAlphaMode::PreMultiplied
    } else {
        surface_caps.alpha_modes[0]
    };

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Overlay Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Overlay Pipeline Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Overlay Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Overlay Vertex Buffer"),
        size: MAX_VERTICES * std::mem::size_of::<Vertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    GPU_STATE.with(|state| {
        *state.borrow_mut() = Some(GpuState {
            device,
            queue,
            surface,
            render_pipeline,
            vertex_buffer,
        });
    });

    Ok(())
}
