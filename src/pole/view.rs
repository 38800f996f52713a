use glam::{Mat4, Quat, Vec2, Vec3};
use winit::event::MouseButton;

use super::DragState;

/// Immutable tuning constants for the orbit camera, supplied once at
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct ViewConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Degrees of orbit rotation per pixel of pointer travel
    pub rotation_scale_deg: f32,
    /// Distance change per scroll notch
    pub zoom_step: f32,
    /// Distance change per scroll notch while the precise modifier is held
    pub zoom_step_precise: f32,
    /// Which pointer button drives the orbit drag
    pub orbit_button: MouseButton,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 150.0,
            rotation_scale_deg: 90.0 / 250.0,
            zoom_step: 1.5,
            zoom_step_precise: 0.5,
            orbit_button: MouseButton::Left,
        }
    }
}

/// Orbit camera controller: a target point, an orientation quaternion, and
/// a distance back along the view axis.
///
/// All input is clamped or ignored rather than rejected; no operation here
/// can fail.
pub struct ViewPole {
    target: Vec3,
    orientation: Quat,
    distance: f32,
    spin_deg: f32,
    config: ViewConfig,
    drag: Option<DragState>,
}

impl ViewPole {
    pub fn new(target: Vec3, orientation: Quat, distance: f32, config: ViewConfig) -> Self {
        Self {
            target,
            orientation: orientation.normalize(),
            distance: distance.clamp(config.min_distance, config.max_distance),
            spin_deg: 0.0,
            config,
            drag: None,
        }
    }

    /// Current orbit orientation (always normalized)
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start an orbit drag if `button` is the configured orbit button.
    /// Records the orientation at drag start; every subsequent drag delta
    /// is applied relative to it.
    pub fn begin_drag(&mut self, button: MouseButton, pos: Vec2) {
        if button == self.config.orbit_button && self.drag.is_none() {
            self.drag = Some(DragState {
                start_pos: pos,
                start_orientation: self.orientation,
            });
        }
    }

    pub fn end_drag(&mut self, button: MouseButton) {
        if button == self.config.orbit_button {
            self.drag = None;
        }
    }

    /// Map pointer travel since drag start to yaw + pitch and compose it
    /// onto the drag-start orientation. No clamping on the orientation.
    pub fn on_drag(&mut self, pos: Vec2) {
        let Some(drag) = self.drag else { return };

        let delta = (pos - drag.start_pos) * self.config.rotation_scale_deg;
        let increment =
            Quat::from_rotation_x(delta.y.to_radians()) * Quat::from_rotation_y(delta.x.to_radians());

        self.orientation = (increment * drag.start_orientation).normalize();
    }

    /// Move the camera along its view axis. Positive `notches` zooms in.
    pub fn on_scroll(&mut self, notches: f32, precise: bool) {
        let step = if precise {
            self.config.zoom_step_precise
        } else {
            self.config.zoom_step
        };

        self.distance = (self.distance - notches * step)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Roll the view about its forward axis
    pub fn spin(&mut self, degrees: f32) {
        self.spin_deg += degrees;
    }

    /// World-to-camera transform: back off along the view axis, rotate by
    /// the inverse orientation, then recentre on the target. Pure function
    /// of the current state.
    pub fn view_matrix(&self) -> Mat4 {
        let spin = Quat::from_rotation_z(self.spin_deg.to_radians());
        let full_rotation = spin * self.orientation;

        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_quat(full_rotation.inverse())
            * Mat4::from_translation(-self.target)
    }
}
