use anyhow::{anyhow, Context, Result};
use glam::Mat4;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::config::ActorProfile;
use crate::mesh::{MeshSet, Vertex};
use crate::shading::{DrawCommand, Shading};

const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 1000.0;

/// Uniform stride for dynamic offsets; matches the common
/// min_uniform_buffer_offset_alignment
const OBJECT_UNIFORM_STRIDE: u64 = 256;

/// Buffer size for `object_count` per-draw uniform slots, never zero
fn object_buffer_size(object_count: usize) -> u64 {
    OBJECT_UNIFORM_STRIDE * object_count.max(1) as u64
}

/// Camera-to-clip state, published on every resize and read by both
/// pipelines
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ProjectionBlock {
    camera_to_clip: [[f32; 4]; 4],
    clip_to_camera: [[f32; 4]; 4],
    viewport: [f32; 2],
    _pad: [f32; 2],
}

/// Per-draw uniforms; one slot per object in a dynamic-offset buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model_to_camera: [[f32; 4]; 4],
    color: [f32; 4],
    sun_position_model: [f32; 4],
    lamp_position_model: [f32; 4],
    // xyz = intensity, w = attenuation coefficient
    sun_intensity: [f32; 4],
    sun_ambient: [f32; 4],
    lamp_intensity: [f32; 4],
    lamp_ambient: [f32; 4],
}

impl ObjectUniforms {
    fn from_command(cmd: &DrawCommand) -> Self {
        let mut uniforms = Self {
            model_to_camera: cmd.model_to_camera.to_cols_array_2d(),
            ..Self::zeroed()
        };

        match cmd.shading {
            Shading::Flat(flat) => {
                uniforms.color = flat.color.to_array();
            }
            Shading::Lit(lit) => {
                uniforms.color = lit.flat.color.to_array();
                uniforms.sun_position_model = lit.sun.position_model.to_array();
                uniforms.lamp_position_model = lit.lamp.position_model.to_array();
                uniforms.sun_intensity = lit.sun.intensity.extend(lit.sun.attenuation).to_array();
                uniforms.sun_ambient = lit.sun.ambient.extend(1.0).to_array();
                uniforms.lamp_intensity =
                    lit.lamp.intensity.extend(lit.lamp.attenuation).to_array();
                uniforms.lamp_ambient = lit.lamp.ambient.extend(1.0).to_array();
            }
        }
        uniforms
    }

    fn zeroed() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

/// Forward renderer: lit + flat pipelines over a shared uniform layout,
/// consuming the scene's draw commands.
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    meshes: MeshSet,
    lit_pipeline: wgpu::RenderPipeline,
    flat_pipeline: wgpu::RenderPipeline,
    projection_buffer: wgpu::Buffer,
    object_buffer: wgpu::Buffer,
    object_capacity: usize,
    bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        profile: &ActorProfile,
        world_half_extent: f32,
        max_objects: usize,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating render surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size);
        surface.configure(&device, &surface_config);

        let depth_view = Self::create_depth_texture(&device, size.width, size.height);
        let meshes = MeshSet::new(&device, profile.body, world_half_extent);

        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Projection Block"),
            contents: bytemuck::cast_slice(&[Self::projection_block(size.width, size.height)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniforms"),
            size: object_buffer_size(max_objects),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (bind_group_layout, bind_group) =
            Self::create_bind_group(&device, &projection_buffer, &object_buffer);

        let lit_pipeline = Self::create_pipeline(
            &device,
            &bind_group_layout,
            surface_config.format,
            include_str!("lit.wgsl"),
            "Lit Pipeline",
        );
        let flat_pipeline = Self::create_pipeline(
            &device,
            &bind_group_layout,
            surface_config.format,
            include_str!("flat.wgsl"),
            "Flat Pipeline",
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            meshes,
            lit_pipeline,
            flat_pipeline,
            projection_buffer,
            object_buffer,
            object_capacity: max_objects.max(1),
            bind_group,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| anyhow!("no compatible graphics adapter"))
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("requesting graphics device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_bind_group(
        device: &wgpu::Device,
        projection_buffer: &wgpu::Buffer,
        object_buffer: &wgpu::Buffer,
    ) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ObjectUniforms>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
            label: Some("scene_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: projection_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: object_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                    }),
                },
            ],
            label: Some("scene_bind_group"),
        });

        (layout, bind_group)
    }

    fn create_pipeline(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        label: &str,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn projection_block(width: u32, height: u32) -> ProjectionBlock {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let camera_to_clip =
            Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);

        ProjectionBlock {
            camera_to_clip: camera_to_clip.to_cols_array_2d(),
            clip_to_camera: camera_to_clip.inverse().to_cols_array_2d(),
            viewport: [width as f32, height as f32],
            _pad: [0.0; 2],
        }
    }

    /// Reconfigure the surface and republish the camera-to-clip state
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_texture(&self.device, width, height);

        self.queue.write_buffer(
            &self.projection_buffer,
            0,
            bytemuck::cast_slice(&[Self::projection_block(width, height)]),
        );
    }

    /// Draw one frame's command list
    pub fn render(&mut self, commands: &[DrawCommand]) -> Result<(), wgpu::SurfaceError> {
        // The buffer is sized for the scene's frame capacity at startup;
        // never write past it
        let commands = &commands[..commands.len().min(self.object_capacity)];

        for (i, cmd) in commands.iter().enumerate() {
            self.queue.write_buffer(
                &self.object_buffer,
                i as u64 * OBJECT_UNIFORM_STRIDE,
                bytemuck::cast_slice(&[ObjectUniforms::from_command(cmd)]),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (i, cmd) in commands.iter().enumerate() {
                let pipeline = match cmd.shading {
                    Shading::Lit(_) => &self.lit_pipeline,
                    Shading::Flat(_) => &self.flat_pipeline,
                };
                let mesh = self.meshes.get(cmd.mesh);
                let offset = (i as u64 * OBJECT_UNIFORM_STRIDE) as u32;

                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.bind_group, &[offset]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
