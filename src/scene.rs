use glam::{Quat, Vec2, Vec3};
use winit::event::MouseButton;

use crate::config::{ActorProfile, SceneConfig};
use crate::core::{LoopTimer, TimerMode};
use crate::lights::{craft_lamp_position, sun_position};
use crate::movement::{Mover, Obstacle};
use crate::pole::{ObjectPole, ViewConfig, ViewPole};
use crate::shading::{DrawCommand, FlatParams, LitParams, MeshKind, Shading};
use crate::transform::MatrixStack;

/// Discrete craft input, decoded from key events by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftIntent {
    Forward,
    Backward,
    Ascend,
    Descend,
    TurnLeft,
    TurnRight,
}

/// The whole mutable simulation state for one session: camera pole, object
/// pole, craft, obstacle set, and the sun timer. Owned by the frame loop;
/// nothing here is global.
pub struct Scene {
    pub view: ViewPole,
    pub craft_pole: ObjectPole,
    pub mover: Mover,
    lamp_position: Vec3,
    sun_timer: LoopTimer,
    clearances: Vec<Obstacle>,
    config: SceneConfig,
    profile: ActorProfile,
    pointer_pos: Vec2,
}

impl Scene {
    /// Number of draw commands one frame produces for `config`: ground,
    /// sun marker, craft, lamp marker, plus the obstacles. The renderer
    /// sizes its per-object uniform buffer from this.
    pub fn frame_capacity(config: &SceneConfig) -> usize {
        4 + config.obstacles.len()
    }

    pub fn new(config: SceneConfig, profile: ActorProfile) -> Self {
        let view = ViewPole::new(
            Vec3::ZERO,
            // Pitched down toward the ground plane
            Quat::from_xyzw(0.5, 0.0, 0.0, 1.0).normalize(),
            50.0,
            ViewConfig::default(),
        );
        let craft_pole = ObjectPole::new(Quat::IDENTITY, 90.0 / 250.0, MouseButton::Right);

        let mover = Mover::new(profile.start_position, profile.radius);

        // Combined clearance radii are fixed for the session
        let clearances = config
            .obstacles
            .iter()
            .map(|spec| Obstacle {
                position: spec.position,
                clearance: spec.radius + profile.radius,
            })
            .collect();

        let lamp_position =
            craft_lamp_position(mover.position, mover.heading_deg, profile.lamp_offset);

        Self {
            view,
            craft_pole,
            mover,
            lamp_position,
            sun_timer: LoopTimer::new(TimerMode::Loop, config.sun.period_secs),
            clearances,
            config,
            profile,
            pointer_pos: Vec2::ZERO,
        }
    }

    /// Advance the simulation clock for this frame
    pub fn advance(&mut self, delta_secs: f32) {
        self.sun_timer.advance(delta_secs);
    }

    /// Current sun position in world space, derived from the timer phase
    pub fn sun_position(&self) -> Vec3 {
        sun_position(self.sun_timer.phase(), self.config.sun)
    }

    /// Craft lamp position in world space. Updated on accepted moves and
    /// turns, not per frame.
    pub fn lamp_position(&self) -> Vec3 {
        self.lamp_position
    }

    /// Apply one discrete craft input. Movement may be silently rejected
    /// by clearance or boundary constraints; turning always succeeds.
    pub fn apply_intent(&mut self, intent: CraftIntent) {
        let step = self.profile.move_step;
        match intent {
            CraftIntent::Forward => {
                let _ = self
                    .mover
                    .try_move(step, 0.0, &self.clearances, self.config.world);
            }
            CraftIntent::Backward => {
                let _ = self
                    .mover
                    .try_move(-step, 0.0, &self.clearances, self.config.world);
            }
            CraftIntent::Ascend => {
                let _ = self
                    .mover
                    .try_move(0.0, 1.0, &self.clearances, self.config.world);
            }
            CraftIntent::Descend => {
                let _ = self
                    .mover
                    .try_move(0.0, -1.0, &self.clearances, self.config.world);
            }
            CraftIntent::TurnLeft => self.mover.turn(self.profile.turn_step_deg),
            CraftIntent::TurnRight => self.mover.turn(-self.profile.turn_step_deg),
        }

        self.lamp_position = craft_lamp_position(
            self.mover.position,
            self.mover.heading_deg,
            self.profile.lamp_offset,
        );
    }

    /// Route a pointer press to whichever pole owns the button
    pub fn pointer_pressed(&mut self, button: MouseButton) {
        self.view.begin_drag(button, self.pointer_pos);
        self.craft_pole.begin_drag(button, self.pointer_pos);
    }

    pub fn pointer_released(&mut self, button: MouseButton) {
        self.view.end_drag(button);
        self.craft_pole.end_drag(button);
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer_pos = pos;
        self.view.on_drag(pos);
        self.craft_pole.on_drag(pos, &self.view);
    }

    pub fn scroll(&mut self, notches: f32, precise: bool) {
        self.view.on_scroll(notches, precise);
    }

    /// Build this frame's draw list: a fresh matrix stack seeded with the
    /// view matrix, one composed transform chain per object. The stack is
    /// discarded when this returns.
    pub fn build_frame(&self) -> Vec<DrawCommand> {
        let mut stack = MatrixStack::new();
        stack.set_matrix(self.view.view_matrix());

        let sun_pos = self.sun_position();
        let sun_in_camera = stack.top() * sun_pos.extend(1.0);
        let lamp_in_camera = stack.top() * self.lamp_position.extend(1.0);

        let mut commands = Vec::with_capacity(Self::frame_capacity(&self.config));

        let lit = |mesh, matrix, color| DrawCommand {
            mesh,
            model_to_camera: matrix,
            shading: Shading::Lit(LitParams::for_object(
                matrix,
                color,
                sun_in_camera,
                lamp_in_camera,
                self.config.sun_light,
                self.config.lamp_light,
            )),
        };
        let flat = |mesh, matrix, color: Vec3| DrawCommand {
            mesh,
            model_to_camera: matrix,
            shading: Shading::Flat(FlatParams {
                color: color.extend(1.0),
            }),
        };

        stack.scoped(|s| {
            commands.push(lit(MeshKind::Ground, s.top(), self.config.ground_color));
        });

        stack.scoped(|s| {
            s.translate(sun_pos);
            commands.push(flat(MeshKind::SunMarker, s.top(), self.config.sun_color));
        });

        stack.scoped(|s| {
            s.apply_matrix(self.craft_pole.matrix());
            s.translate(self.mover.position);
            s.rotate_y(self.mover.heading_deg);
            commands.push(lit(MeshKind::Craft, s.top(), self.profile.body_color));
        });

        stack.scoped(|s| {
            s.translate(self.lamp_position);
            s.scale(Vec3::splat(0.5));
            commands.push(flat(MeshKind::LampMarker, s.top(), self.config.lamp_color));
        });

        for spec in &self.config.obstacles {
            stack.scoped(|s| {
                s.translate(spec.position);
                commands.push(lit(spec.kind.mesh(), s.top(), spec.color));
            });
        }

        commands
    }
}
