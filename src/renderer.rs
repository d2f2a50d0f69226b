// Renderer module for the F

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;
use wgpu::{Adapter, Buffer, RenderPipeline};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

use crate::config::{Config, RenderMode};
use crate::geometry::{F_POSITIONS_2D, F_POSITIONS_3D, F_TEX_COORDS, VERTEX_COUNT};
use crate::input::{self, Action};
use crate::math::{m3, m4};
use crate::scene::Scene;
use crate::texture::Texture;

pub struct Renderer {
    adapter: Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    window: Arc<winit::window::Window>,
    surface_format: wgpu::TextureFormat,
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    uniform_buffer: Buffer,
    uniform_bind_group: wgpu::BindGroup,
    variant: Variant,
    scene: Scene,
}

/// Per-mode GPU state beyond the shared pipeline/buffers.
enum Variant {
    Solid,
    Textured {
        _texture: Texture,
        bind_group: wgpu::BindGroup,
    },
}

// Vertex for the textured F
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct TexturedVertex {
    position: [f32; 2],
    tex_coord: [f32; 2],
}

// Uniforms for the solid F: matrix chain plus fill colour
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct SolidUniforms {
    matrix: m4::Mat4,
    color: [f32; 4],
}

// Uniforms for the textured F; mat3x3 columns are padded to 16 bytes
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FlatUniforms {
    matrix: [[f32; 4]; 3],
}

impl Renderer {
    pub async fn new(event_loop: &EventLoop<()>, config: &Config, scene: Scene) -> Result<Self> {
        let window = Arc::new(
            WindowBuilder::new()
                .with_title("fshape")
                .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
                .build(event_loop)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Renderer Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format =
            pick_surface_format(&surface_caps.formats).context("surface reports no formats")?;

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let (pipeline, vertex_buffer, uniform_buffer, variant) = match &config.mode {
            RenderMode::Solid => {
                let (pipeline, vertex_buffer, uniform_buffer) =
                    create_solid(&device, surface_format, &uniform_layout);
                (pipeline, vertex_buffer, uniform_buffer, Variant::Solid)
            }
            RenderMode::Textured { image } => {
                create_textured(&device, &queue, surface_format, &uniform_layout, image)?
            }
        };

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let renderer = Self {
            adapter,
            device,
            queue,
            surface,
            window,
            surface_format,
            pipeline,
            vertex_buffer,
            uniform_buffer,
            uniform_bind_group,
            variant,
            scene,
        };
        renderer.configure_surface(renderer.window.inner_size());
        Ok(renderer)
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<()> {
        event_loop
            .run(move |event, target| {
                // Frames are drawn only when something changes.
                target.set_control_flow(ControlFlow::Wait);

                if let Event::WindowEvent { window_id, event } = event {
                    if window_id != self.window.id() {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(physical_size) => self.resize(physical_size),
                        WindowEvent::RedrawRequested => {
                            if !self.redraw() {
                                target.exit();
                            }
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if self.handle_keyboard_input(event) {
                                target.exit();
                            }
                        }
                        _ => {}
                    }
                }
            })
            .context("event loop terminated with an error")
    }

    fn configure_surface(&self, size: winit::dpi::PhysicalSize<u32>) {
        let surface_caps = self.surface.get_capabilities(&self.adapter);
        self.surface.configure(
            &self.device,
            &wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format: self.surface_format,
                width: size.width.max(1),
                height: size.height.max(1),
                present_mode: wgpu::PresentMode::Fifo,
                alpha_mode: surface_caps
                    .alpha_modes
                    .first()
                    .copied()
                    .unwrap_or(wgpu::CompositeAlphaMode::Auto),
                view_formats: vec![],
                desired_maximum_frame_latency: 2,
            },
        );
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        log::debug!("resized to {}x{}", new_size.width, new_size.height);
        self.configure_surface(new_size);
        self.scene.resize(new_size.width, new_size.height);
        self.window.request_redraw();
    }

    /// Returns true when the user asked to quit.
    fn handle_keyboard_input(&mut self, event: KeyEvent) -> bool {
        if event.state != ElementState::Pressed {
            return false;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        match input::action_for(code) {
            Some(Action::Quit) => true,
            Some(action) => {
                if input::apply(&mut self.scene, action) {
                    self.window.request_redraw();
                }
                false
            }
            None => false,
        }
    }

    /// Rebuilds the matrix chain from the sliders and draws one frame.
    /// Returns false on an unrecoverable surface error.
    fn redraw(&mut self) -> bool {
        let size = self.window.inner_size();
        let (width, height) = (size.width as f32, size.height as f32);

        match &self.variant {
            Variant::Solid => {
                let matrix = self.scene.matrix(width, height);
                log::trace!("F origin in clip space: {:?}", m4::transform_point(&matrix, [0.0; 3]));
                let uniforms = SolidUniforms {
                    matrix,
                    color: self.scene.color,
                };
                self.queue
                    .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
            }
            Variant::Textured { .. } => {
                let matrix = self.scene.matrix_2d(width, height);
                log::trace!("F origin in clip space: {:?}", m3::transform_point(&matrix, [0.0; 2]));
                let uniforms = FlatUniforms {
                    matrix: m3::to_padded_columns(&matrix),
                };
                self.queue
                    .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
            }
        }

        match self.render() {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.configure_surface(size);
                self.window.request_redraw();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                false
            }
            Err(e) => {
                log::warn!("skipping frame: {e}");
                true
            }
        }
    }

    fn render(&self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            if let Variant::Textured { bind_group, .. } = &self.variant {
                render_pass.set_bind_group(1, bind_group, &[]);
            }
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..VERTEX_COUNT, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_solid(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    uniform_layout: &wgpu::BindGroupLayout,
) -> (RenderPipeline, Buffer, Buffer) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Solid Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    };

    let pipeline = create_pipeline(
        device,
        "Solid Pipeline",
        &shader,
        vertex_layout,
        &[uniform_layout],
        format,
    );

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("F Vertex Buffer"),
        contents: bytemuck::cast_slice(&F_POSITIONS_3D),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Solid Uniform Buffer"),
        contents: bytemuck::cast_slice(&[SolidUniforms {
            matrix: m4::IDENTITY,
            color: [0.0; 4],
        }]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    (pipeline, vertex_buffer, uniform_buffer)
}

fn create_textured(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    format: wgpu::TextureFormat,
    uniform_layout: &wgpu::BindGroupLayout,
    image: &Path,
) -> Result<(RenderPipeline, Buffer, Buffer, Variant)> {
    let texture = Texture::from_path(device, queue, image)?;
    log::debug!("texture size {:?}", texture.texture.size());

    let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Texture Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Texture Bind Group"),
        layout: &texture_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Textured Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("textured.wgsl").into()),
    });

    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    let pipeline = create_pipeline(
        device,
        "Textured Pipeline",
        &shader,
        vertex_layout,
        &[uniform_layout, &texture_layout],
        format,
    );

    let vertices: Vec<TexturedVertex> = F_POSITIONS_2D
        .iter()
        .zip(F_TEX_COORDS.iter())
        .map(|(&position, &tex_coord)| TexturedVertex {
            position,
            tex_coord,
        })
        .collect();

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Textured F Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Flat Uniform Buffer"),
        contents: bytemuck::cast_slice(&[FlatUniforms {
            matrix: m3::to_padded_columns(&m3::IDENTITY),
        }]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    Ok((
        pipeline,
        vertex_buffer,
        uniform_buffer,
        Variant::Textured {
            _texture: texture,
            bind_group,
        },
    ))
}

/// Prefers a non-sRGB format so shader colours reach the screen unchanged, as
/// they do on a WebGL canvas.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    vertex_layout: wgpu::VertexBufferLayout<'_>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    format: wgpu::TextureFormat,
) -> RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[vertex_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Rotations and negative scales flip winding; draw both faces.
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
