use glam::{Mat4, Quat, Vec2};
use winit::event::MouseButton;

use super::view::ViewPole;
use super::DragState;

/// Drag controller for an auxiliary object orientation.
///
/// Same drag contract as [`ViewPole`], on a separate pointer button. Drag
/// deltas are interpreted in camera-relative screen space: the yaw/pitch
/// increment is conjugated by the camera orientation before composing, so
/// dragging right always spins the object toward screen-right no matter
/// where the camera has orbited to.
pub struct ObjectPole {
    orientation: Quat,
    rotation_scale_deg: f32,
    drag_button: MouseButton,
    drag: Option<DragState>,
}

impl ObjectPole {
    pub fn new(orientation: Quat, rotation_scale_deg: f32, drag_button: MouseButton) -> Self {
        Self {
            orientation: orientation.normalize(),
            rotation_scale_deg,
            drag_button,
            drag: None,
        }
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, button: MouseButton, pos: Vec2) {
        if button == self.drag_button && self.drag.is_none() {
            self.drag = Some(DragState {
                start_pos: pos,
                start_orientation: self.orientation,
            });
        }
    }

    pub fn end_drag(&mut self, button: MouseButton) {
        if button == self.drag_button {
            self.drag = None;
        }
    }

    /// Apply pointer travel since drag start as a camera-aligned rotation
    /// of the object. The view pole supplies the camera basis.
    pub fn on_drag(&mut self, pos: Vec2, view: &ViewPole) {
        let Some(drag) = self.drag else { return };

        let delta = (pos - drag.start_pos) * self.rotation_scale_deg;
        let increment =
            Quat::from_rotation_x(delta.y.to_radians()) * Quat::from_rotation_y(delta.x.to_radians());

        // Re-express the screen-space increment in world space via the
        // camera orientation
        let cam = view.orientation();
        let world_increment = cam * increment * cam.inverse();

        self.orientation = (world_increment * drag.start_orientation).normalize();
    }

    /// Rotation layered before the object's own position/heading transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pole::view::ViewConfig;
    use glam::Vec3;

    fn camera() -> ViewPole {
        ViewPole::new(Vec3::ZERO, Quat::IDENTITY, 50.0, ViewConfig::default())
    }

    fn pole() -> ObjectPole {
        ObjectPole::new(Quat::IDENTITY, 90.0 / 250.0, MouseButton::Right)
    }

    #[test]
    fn wrong_button_is_ignored() {
        let mut pole = pole();
        let view = camera();

        pole.begin_drag(MouseButton::Left, Vec2::ZERO);
        pole.on_drag(Vec2::new(100.0, 0.0), &view);

        assert_eq!(pole.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn identity_camera_drag_matches_view_pole_convention() {
        let mut pole = pole();
        let view = camera();

        pole.begin_drag(MouseButton::Right, Vec2::ZERO);
        pole.on_drag(Vec2::new(250.0, 0.0), &view);

        let expected = Quat::from_rotation_y(90.0f32.to_radians());
        assert!(pole.orientation().angle_between(expected) < 1e-3);
    }

    #[test]
    fn drag_axes_follow_the_camera() {
        let mut pole = pole();

        // Camera yawed 90 degrees: a screen-space yaw increment about the
        // camera's up axis is conjugated into world space
        let mut view = camera();
        view.begin_drag(MouseButton::Left, Vec2::ZERO);
        view.on_drag(Vec2::new(250.0, 0.0));
        view.end_drag(MouseButton::Left);

        pole.begin_drag(MouseButton::Right, Vec2::ZERO);
        pole.on_drag(Vec2::new(0.0, 250.0), &view);

        // Screen-space pitch about camera X; with the camera yawed 90
        // degrees, world axis is -Z (camera right maps there)
        let cam = view.orientation();
        let expected = cam * Quat::from_rotation_x(90.0f32.to_radians()) * cam.inverse();
        assert!(pole.orientation().angle_between(expected) < 1e-3);
    }

    #[test]
    fn orientation_stays_normalized() {
        let mut pole = pole();
        let view = camera();

        pole.begin_drag(MouseButton::Right, Vec2::ZERO);
        for i in 0..40 {
            pole.on_drag(Vec2::new(i as f32 * 17.0, i as f32 * 11.0), &view);
            assert!((pole.orientation().length() - 1.0).abs() < 1e-5);
        }
    }
}
