use glam::Vec3;
use serde::Deserialize;
use std::f32::consts::TAU;

/// Tuning constants for one light source: intensity, ambient floor, and
/// the distance-attenuation coefficient fed to the shader. Shared
/// read-only by every object in a frame.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LightParams {
    pub intensity: Vec3,
    pub ambient: Vec3,
    pub attenuation: f32,
}

/// Orbit parameters for the sun
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SunOrbit {
    pub radius: f32,
    pub max_height: f32,
    pub period_secs: f32,
}

/// World position of the sun for a timer phase in [0, 1).
///
/// The sun completes one horizontal revolution per period. Its height
/// follows a piecewise-linear law over the four phase quarters, producing
/// a continuous rise-and-fall bounce: below the horizon in the first
/// quarter, climbing through the middle two, descending in the last.
pub fn sun_position(phase: f32, orbit: SunOrbit) -> Vec3 {
    let angle = phase * TAU;

    let factor = match (phase * 4.0) as i32 % 4 {
        0 => -phase,
        1 | 2 => phase - 0.5,
        _ => 1.0 - phase,
    };

    Vec3::new(
        angle.cos() * orbit.radius,
        orbit.max_height * factor,
        angle.sin() * orbit.radius,
    )
}

/// World position of the craft-mounted lamp: a fixed offset ahead of the
/// craft, rotated by its heading, at the craft's own height.
///
/// Recomputed when the craft moves or turns, not every frame.
pub fn craft_lamp_position(craft_position: Vec3, heading_deg: f32, offset: f32) -> Vec3 {
    let rad = heading_deg.to_radians();
    Vec3::new(
        craft_position.x + offset * rad.sin(),
        craft_position.y,
        craft_position.z + offset * rad.cos(),
    )
}
