//! Elevator particle box
//!
//! Circles fall under gravity, ride up the elevator strip on the left and
//! bounce off each other and the walls. Moving the mouse through them
//! shoves them away.
//!
//! Keys: Space pauses, R re-randomizes, Escape quits.

mod config;
mod error;

use clap::Parser;
use config::Args;
use error::AppError;
use glam::Vec2;
use particle_renderer::{Canvas, ParticleRenderer};
use particle_simulation::{Frame, FrameLoop, FrameSink, ParticleSimulation, PointerSource};
use std::collections::VecDeque;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const FRAME_TIME_WINDOW: usize = 120;
const FRAME_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Last known cursor position, normalized. Stays put when the cursor leaves
/// the window.
struct Cursor {
    position: Vec2,
    open: bool,
}

impl PointerSource for Cursor {
    fn pointer_position(&mut self) -> Vec2 {
        self.position
    }

    fn running(&self) -> bool {
        self.open
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    canvas: Canvas,
    renderer: ParticleRenderer,

    // Set when presentation hits an unrecoverable surface error
    out_of_memory: bool,
}

impl GpuState {
    async fn new(window: Arc<Window>, particle_capacity: usize) -> Result<Self, AppError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(AppError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let canvas = Canvas::new(config.width, config.height);
        let renderer = ParticleRenderer::new(&device, &config, particle_capacity);
        log::info!("✓ Renderer initialized ({:?})", surface_format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            canvas,
            renderer,
            out_of_memory: false,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.canvas.resize(new_size.width, new_size.height);
        }
    }
}

impl FrameSink for GpuState {
    fn present(&mut self, frame: &Frame<'_>) {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                self.out_of_memory = true;
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, &self.canvas, frame);
        output.present();
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    frame_loop: FrameLoop,
    cursor: Cursor,
    canvas_size: u32,
    error: Option<AppError>,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
    last_frame_log: Instant,
}

impl App {
    fn new(args: &Args) -> Self {
        let params = args.params();
        let simulation = ParticleSimulation::new(params, args.seed);
        let now = Instant::now();
        Self {
            window: None,
            gpu_state: None,
            frame_loop: FrameLoop::new(simulation),
            cursor: Cursor {
                position: Vec2::ZERO,
                open: true,
            },
            canvas_size: params.canvas_size,
            error: None,
            frame_times: VecDeque::with_capacity(FRAME_TIME_WINDOW),
            last_frame_time: now,
            last_frame_log: now,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error = Some(error);
        self.cursor.open = false;
        event_loop.exit();
    }

    fn track_frame_time(&mut self) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        if self.frame_times.len() == FRAME_TIME_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        if now - self.last_frame_log >= FRAME_LOG_INTERVAL {
            self.last_frame_log = now;
            let avg = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
            log::debug!(
                "Frame {}: {:.2} ms avg ({:.0} fps)",
                self.frame_loop.frames(),
                avg,
                1000.0 / avg.max(f32::EPSILON)
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Particle Physics Simulation")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.canvas_size,
                self.canvas_size,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let capacity = self.frame_loop.simulation().particle_count();
        match pollster::block_on(GpuState::new(window.clone(), capacity)) {
            Ok(gpu_state) => {
                self.gpu_state = Some(gpu_state);
                self.window = Some(window.clone());
                window.request_redraw();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.cursor.open = false;
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.frame_loop.toggle_pause();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyR),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.frame_loop.reset(None);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(gpu_state) = &self.gpu_state {
                    self.cursor.position = gpu_state.canvas.normalize_cursor(position.x, position.y);
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.cursor.running() {
                    return;
                }
                let Some(gpu_state) = &mut self.gpu_state else {
                    return;
                };

                self.frame_loop.run_frame(&mut self.cursor, gpu_state);

                if gpu_state.out_of_memory {
                    self.cursor.open = false;
                    event_loop.exit();
                    return;
                }

                self.track_frame_time();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() -> ExitCode {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting elevator particle simulation...");

    let args = Args::parse();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("{}", AppError::from(e));
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&args);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("{}", AppError::from(e));
        return ExitCode::FAILURE;
    }

    match app.error {
        Some(_) => ExitCode::FAILURE,
        None => ExitCode::SUCCESS,
    }
}
