//! Interactive viewer: frames are shaded on the CPU, uploaded to a texture and
//! drawn over the window surface.

use std::time::Instant;

use log::{debug, error, info, warn};
use winit::{
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::{
    camera::{CameraConfig, CameraController},
    config::Config,
    error::AppError,
    gpu::{self, FrameTexture, ScreenSizeUniform},
    render::Renderer,
    screen,
};

pub struct App {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    render_bind_group_layout: wgpu::BindGroupLayout,
    render_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    screen_size: ScreenSizeUniform,
    frame: FrameTexture,
    pixels: Vec<[u8; 4]>,
    scale: u32,
    renderer: Renderer,
    camera: CameraConfig,
    camera_controller: CameraController,
    /// Set when `pixels` no longer matches `camera`.
    stale: bool,
    // Dropped after `surface`.
    window: Window,
}

impl App {
    pub fn new(config: &Config, renderer: Renderer) -> Result<(Self, EventLoop<()>), AppError> {
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title("orbit trap")
            .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
            .build(&event_loop)?;

        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let size = screen::Size::from(window.inner_size());
        // SAFETY: `window` is owned by the returned `App` alongside the surface,
        // so it outlives it.
        let surface = unsafe { instance.create_surface(&window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(AppError::NoAdapter)?;
        info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
            },
            None,
        ))?;
        device.on_uncaptured_error(|err| error!("{}", err));

        let format = surface
            .get_supported_formats(&adapter)
            .first()
            .copied()
            .ok_or(AppError::NoSurfaceFormat)?;
        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &surface_configuration);

        let render_shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("render-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let render_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("render-bind-group-layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("render-pipeline-layout"),
            bind_group_layouts: &[&render_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render-pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &render_shader_module,
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
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &render_shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("frame-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let screen_size = ScreenSizeUniform::new(&device, size);

        let scale = config.scale;
        let frame = FrameTexture::new(&device, size.downscaled(scale));
        let render_bind_group = create_render_bind_group(
            &device,
            &render_bind_group_layout,
            &frame,
            &sampler,
            &screen_size,
        );
        let pixels = vec![[0u8; 4]; frame.size().area()];
        let camera = config.camera(size);

        let app = Self {
            surface,
            device,
            queue,
            surface_configuration,
            render_pipeline,
            render_bind_group_layout,
            render_bind_group,
            sampler,
            screen_size,
            frame,
            pixels,
            scale,
            renderer,
            camera,
            camera_controller: CameraController::new(),
            stale: true,
            window,
        };
        Ok((app, event_loop))
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> ! {
        let mut last = Instant::now();

        event_loop.run(move |event, _, control_flow| {
            let dt = last.elapsed();
            last = Instant::now();

            if self.camera_controller.update_camera(dt, &mut self.camera) {
                self.stale = true;
                self.window.request_redraw();
            }

            // Keep polling while a key holds the camera in motion, otherwise
            // the fractal is static.
            *control_flow = if self.camera_controller.is_moving() {
                ControlFlow::Poll
            } else {
                ControlFlow::Wait
            };

            match event {
                Event::WindowEvent { window_id, event } if window_id == self.window.id() => {
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            input:
                                KeyboardInput {
                                    state: ElementState::Pressed,
                                    virtual_keycode: Some(VirtualKeyCode::Escape),
                                    ..
                                },
                            ..
                        } => {
                            *control_flow = ControlFlow::Exit;
                        }
                        WindowEvent::Resized(size) => self.resize(size.into()),
                        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                            self.resize((*new_inner_size).into())
                        }
                        event => {
                            if self.camera_controller.process_events(&event) {
                                self.window.request_redraw();
                            }
                        }
                    }
                }
                Event::RedrawRequested(window_id) if window_id == self.window.id() => {
                    if let Err(err) = self.draw() {
                        match err {
                            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                                let size = screen::Size::new(
                                    self.surface_configuration.width,
                                    self.surface_configuration.height,
                                );
                                self.resize(size);
                            }
                            wgpu::SurfaceError::OutOfMemory => {
                                error!("surface out of memory");
                                *control_flow = ControlFlow::Exit;
                            }
                            wgpu::SurfaceError::Timeout => warn!("surface timed out"),
                        }
                    }
                }
                _ => {}
            }
        })
    }

    fn resize(&mut self, size: screen::Size) {
        // Minimized.
        if size.width == 0 || size.height == 0 {
            return;
        }
        debug!("resizing to {:?}", size);

        self.surface_configuration.width = size.width;
        self.surface_configuration.height = size.height;
        self.surface.configure(&self.device, &self.surface_configuration);

        self.screen_size.update(&self.queue, size);
        self.camera_controller
            .update_aspect_ratio(size.aspect_ratio());

        let frame = FrameTexture::new(&self.device, size.downscaled(self.scale));
        self.pixels = vec![[0u8; 4]; frame.size().area()];
        std::mem::replace(&mut self.frame, frame).destroy();
        self.render_bind_group = create_render_bind_group(
            &self.device,
            &self.render_bind_group_layout,
            &self.frame,
            &self.sampler,
            &self.screen_size,
        );

        self.stale = true;
        self.window.request_redraw();
    }

    fn draw(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.stale {
            let started = Instant::now();
            self.renderer
                .render(self.frame.size(), &self.camera, &mut self.pixels);
            self.frame.upload(&self.queue, &self.pixels);
            self.stale = false;
            debug!(
                "rendered {:?} frame on {} threads in {:?}",
                self.frame.size(),
                self.renderer.threads(),
                started.elapsed()
            );
        }

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let command_buffer = gpu::command_buffer(&self.device, "present", |command_encoder| {
            gpu::draw_frame(
                command_encoder,
                &surface_texture_view,
                &self.render_pipeline,
                &self.render_bind_group,
            );
        });

        self.queue.submit([command_buffer]);
        surface_texture.present();
        Ok(())
    }
}

fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    frame: &FrameTexture,
    sampler: &wgpu::Sampler,
    screen_size: &ScreenSizeUniform,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("render-bind-group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(frame.view()),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: screen_size.binding_resource(),
            },
        ],
    })
}
