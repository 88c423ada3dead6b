//! Drawing the fractal texture through the camera with `wgpu`.

use bytemuck::{Pod, Zeroable};
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    camera::{Camera, Vec2},
    error::Error,
    screen, settings,
    uniform::Uniform,
};

/// Mirrors `shader.wgsl#Camera`.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug)]
struct CameraUniform {
    camera_target: Vec2,
    camera_offset: Vec2,
    window_size: Vec2,
    origin: Vec2,
    extent: Vec2,
    zoom: f32,
    rotation: f32,
}

impl CameraUniform {
    fn new(camera: &Camera, window_size: screen::Size, fractal_size: screen::Size) -> Self {
        Self {
            camera_target: camera.target,
            camera_offset: camera.offset,
            window_size: Vec2::new(window_size.width as f32, window_size.height as f32),
            origin: fractal_origin(window_size, fractal_size),
            extent: Vec2::new(fractal_size.width as f32, fractal_size.height as f32),
            zoom: camera.zoom,
            rotation: camera.rotation,
        }
    }
}

/// World position of the fractal's top-left corner: centred in the window,
/// with both halves rounded down.
fn fractal_origin(window_size: screen::Size, fractal_size: screen::Size) -> Vec2 {
    let x = window_size.width as i64 / 2 - fractal_size.width as i64 / 2;
    let y = window_size.height as i64 / 2 - fractal_size.height as i64 / 2;
    Vec2::new(x as f32, y as f32)
}

pub struct Renderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    camera_uniform: Uniform<CameraUniform>,
    multisample_view: wgpu::TextureView,
    fractal_texture: wgpu::Texture,
    fractal_size: screen::Size,
}

impl Renderer {
    /// Set up the surface for `window` and upload `pixels` (RGBA8, `fractal_size`) as a texture.
    pub fn new(window: &Window, pixels: &[u8], fractal_size: screen::Size) -> Result<Self, Error> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let size = window.inner_size();
        let surface = unsafe { instance.create_surface(window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(Error::NoAdapter)?;
        info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let format = surface
            .get_supported_formats(&adapter)
            .first()
            .copied()
            .ok_or(Error::NoSurfaceFormat)?;
        debug!("surface format {:?}", format);

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &surface_configuration);

        // Match the surface's colour space so the texture's bytes reach the screen unchanged.
        let fractal_format = if format.describe().srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let fractal_texture = device.create_texture_with_data(
            &queue,
            &wgpu::TextureDescriptor {
                label: Some("fractal-texture"),
                size: wgpu::Extent3d {
                    width: fractal_size.width,
                    height: fractal_size.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: fractal_format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            },
            pixels,
        );
        let fractal_texture_view =
            fractal_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

        let camera_uniform = Uniform::new(
            &device,
            "camera-buffer",
            CameraUniform::new(&Camera::centred(Default::default()), size.into(), fractal_size),
        );

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bind-group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&fractal_texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: camera_uniform.binding_resource(),
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("render-pipeline-layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render-pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: settings::MSAA_SAMPLES,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        let multisample_view = create_multisample_view(&device, &surface_configuration);

        Ok(Self {
            surface,
            device,
            queue,
            surface_configuration,
            render_pipeline,
            bind_group,
            camera_uniform,
            multisample_view,
            fractal_texture,
            fractal_size,
        })
    }

    pub fn resize(&mut self, size: screen::Size) {
        if size.width == 0 || size.height == 0 {
            debug!("ignoring resize to {:?}", size);
            return;
        }

        debug!("resizing to {:?}", size);
        self.surface_configuration.width = size.width;
        self.surface_configuration.height = size.height;
        self.reconfigure();
    }

    /// Re-apply the current configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface
            .configure(&self.device, &self.surface_configuration);
        self.multisample_view = create_multisample_view(&self.device, &self.surface_configuration);
    }

    /// Clear to black and draw the fractal as seen by `camera`.
    pub fn render(
        &mut self,
        camera: &Camera,
        window_size: screen::Size,
    ) -> Result<(), wgpu::SurfaceError> {
        if window_size.width == 0 || window_size.height == 0 {
            return Ok(());
        }

        self.camera_uniform.write(
            &self.queue,
            CameraUniform::new(camera, window_size, self.fractal_size),
        );

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut command_encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame"),
            });

        command_encoder.push_debug_group("render-pass");
        {
            let mut render_pass = command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.multisample_view,
                    resolve_target: Some(&surface_texture_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..4, 0..1);
        }
        command_encoder.pop_debug_group();

        self.queue.submit([command_encoder.finish()]);
        surface_texture.present();
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        info!("releasing graphics resources");
        self.fractal_texture.destroy();
    }
}

fn create_multisample_view(
    device: &wgpu::Device,
    surface_configuration: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("multisample-texture"),
            size: wgpu::Extent3d {
                width: surface_configuration.width,
                height: surface_configuration.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: settings::MSAA_SAMPLES,
            dimension: wgpu::TextureDimension::D2,
            format: surface_configuration.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}
