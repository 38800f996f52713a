//! Pointer-drag-driven orientation controllers ("poles"): one orbits the
//! camera, one spins a scene object in camera-aligned screen space.

pub mod object;
pub mod view;

pub use object::ObjectPole;
pub use view::{ViewConfig, ViewPole};

use glam::Vec2;

/// Shared drag bookkeeping for both pole kinds
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    pub start_pos: Vec2,
    pub start_orientation: glam::Quat,
}
