use glam::Vec2;
use log::{debug, error, info};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::{ActorProfile, SceneConfig};
use crate::core::FrameClock;
use crate::renderer::Renderer;
use crate::scene::{CraftIntent, Scene};

const INITIAL_WINDOW_WIDTH: u32 = 1024;
const INITIAL_WINDOW_HEIGHT: u32 = 768;
const FPS_LOG_INTERVAL: f32 = 5.0;

/// winit application shell: owns the window, renderer, and scene, and
/// routes events into the simulation. Dropping it releases the graphics
/// resources deterministically.
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Scene,
    profile: ActorProfile,
    world_half_extent: f32,
    max_objects: usize,
    clock: FrameClock,
    modifiers: ModifiersState,
    frame_count: u32,
    fps_timer: f32,
}

impl App {
    pub fn new(config: SceneConfig, profile: ActorProfile) -> Self {
        let world_half_extent = config.world.half_extent;
        let max_objects = Scene::frame_capacity(&config);
        Self {
            window: None,
            renderer: None,
            scene: Scene::new(config, profile),
            profile,
            world_half_extent,
            max_objects,
            clock: FrameClock::new(),
            modifiers: ModifiersState::empty(),
            frame_count: 0,
            fps_timer: 0.0,
        }
    }

    fn craft_intent(keycode: KeyCode) -> Option<CraftIntent> {
        match keycode {
            KeyCode::KeyW => Some(CraftIntent::Forward),
            KeyCode::KeyS => Some(CraftIntent::Backward),
            KeyCode::KeyE => Some(CraftIntent::Ascend),
            KeyCode::KeyQ => Some(CraftIntent::Descend),
            KeyCode::KeyA => Some(CraftIntent::TurnLeft),
            KeyCode::KeyD => Some(CraftIntent::TurnRight),
            _ => None,
        }
    }

    fn log_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_timer += delta;

        if self.fps_timer >= FPS_LOG_INTERVAL {
            debug!("{:.1} fps", self.frame_count as f32 / self.fps_timer);
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        self.log_fps(delta);
        self.scene.advance(delta);

        if let Some(renderer) = &mut self.renderer {
            let commands = self.scene.build_frame();
            match renderer.render(&commands) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    if let Some(window) = &self.window {
                        let size = window.inner_size();
                        renderer.resize(size.width, size.height);
                    }
                }
                Err(e) => error!("render error: {e}"),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("hoverscene")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        // A missing adapter or device is a fatal setup failure: exit
        // rather than render a broken scene
        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            &self.profile,
            self.world_half_extent,
            self.max_objects,
        )) {
            Ok(r) => r,
            Err(e) => {
                error!("failed to initialize renderer: {e:#}");
                event_loop.exit();
                return;
            }
        };

        info!("controls: W/S move, A/D turn, E/Q climb, drag to orbit, Esc quits");

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock = FrameClock::new();
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
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(keycode),
                        ..
                    },
                ..
            } => {
                if let Some(intent) = Self::craft_intent(keycode) {
                    self.scene.apply_intent(intent);
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.scene
                    .pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.scene.pointer_pressed(button),
                ElementState::Released => self.scene.pointer_released(button),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                self.scene.scroll(notches, self.modifiers.shift_key());
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
