use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use noise_orb::camera::Camera;
use noise_orb::cli::Cli;
use noise_orb::config::AppConfig;
use noise_orb::frame::FrameClock;
use noise_orb::renderer::OrbRenderer;
use noise_orb::scroll::{ScrollTrigger, Scrubber, Timeline};

const FPS_UPDATE_INTERVAL: f32 = 1.0;
// Logical pixels of scroll travel per wheel line
const SCROLL_LINE_HEIGHT: f32 = 40.0;

struct App {
    cli: Cli,
    config: AppConfig,
    window: Option<Arc<Window>>,
    renderer: Option<OrbRenderer>,
    camera: Camera,
    clock: FrameClock,
    trigger: ScrollTrigger,
    scrubber: Scrubber,
    timeline: Timeline,
    scroll_offset: f32,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli, config: AppConfig) -> Self {
        let camera = Camera::new(config.window_width, config.window_height);
        let trigger = config.trigger;
        let scrubber = Scrubber::new(config.scrub);
        Self {
            cli,
            config,
            window: None,
            renderer: None,
            camera,
            clock: FrameClock::new(),
            trigger,
            scrubber,
            timeline: Timeline::default(),
            scroll_offset: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            if !self.cli.no_ui {
                println!("FPS: {:.1}", self.fps);
            }
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    // Wheel travel accumulates like a page scroll: wheel-down moves the
    // virtual page down, clamped to the trigger region.
    fn apply_scroll(&mut self, delta: MouseScrollDelta) {
        let travel = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * SCROLL_LINE_HEIGHT,
            MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
        };
        self.scroll_offset = (self.scroll_offset + travel).clamp(0.0, self.trigger.end);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Noise Orb")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window_width,
                        self.config.window_height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(OrbRenderer::new(window.clone(), &self.config))
            {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            self.camera.set_aspect(size.width, size.height);
            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::MouseWheel { delta, .. } => self.apply_scroll(delta),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
                self.camera.set_aspect(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let frame = self.clock.tick();
                self.update_fps(frame.delta);

                let target = self.trigger.progress(self.scroll_offset);
                let progress = self.scrubber.advance(target, frame.delta);
                let state = self.timeline.sample(progress);

                if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
                    match renderer.render(
                        &self.camera,
                        window,
                        &state,
                        &frame,
                        self.fps,
                        !self.cli.no_ui,
                    ) {
                        Ok(()) => {}
                        // Stale swapchain: reconfigure and try again next frame
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = renderer.size();
                            renderer.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            eprintln!("Render error: out of GPU memory");
                            event_loop.exit();
                        }
                        Err(e) => eprintln!("Render error: {}", e),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(subdivisions) = cli.subdivisions {
        config.subdivisions = subdivisions;
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config);

    println!("Noise Orb - scroll to blend the palette, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
