use anyhow::Context;
use glam::Vec3;
use serde::Deserialize;
use std::path::Path;

use crate::lights::{LightParams, SunOrbit};
use crate::movement::WorldBounds;
use crate::shading::MeshKind;

/// Obstacle geometry used for both rendering and clearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Cube,
    Cylinder,
    Sphere,
}

impl ObstacleKind {
    pub fn mesh(self) -> MeshKind {
        match self {
            Self::Cube => MeshKind::Cube,
            Self::Cylinder => MeshKind::Cylinder,
            Self::Sphere => MeshKind::Sphere,
        }
    }
}

/// One fixed obstacle: where it stands, how big it is, how it is drawn
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub radius: f32,
    pub color: Vec3,
}

/// Everything tunable about a session, loadable from JSON. Defaults
/// reproduce the built-in scene layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub world: WorldBounds,
    pub obstacles: Vec<ObstacleSpec>,
    pub sun: SunOrbit,
    pub sun_light: LightParams,
    pub lamp_light: LightParams,
    pub ground_color: Vec3,
    pub sun_color: Vec3,
    pub lamp_color: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world: WorldBounds {
                half_extent: 50.0,
                max_height: 50.0,
            },
            obstacles: vec![
                ObstacleSpec {
                    kind: ObstacleKind::Cube,
                    position: Vec3::new(9.0, 0.0, 19.0),
                    radius: 7.0711,
                    color: Vec3::new(0.2, 0.2, 1.0),
                },
                ObstacleSpec {
                    kind: ObstacleKind::Cylinder,
                    position: Vec3::new(23.0, -0.5, -26.0),
                    radius: 3.0,
                    color: Vec3::new(0.9, 0.9, 0.0),
                },
                ObstacleSpec {
                    kind: ObstacleKind::Sphere,
                    position: Vec3::new(-20.0, 1.5, -12.0),
                    radius: 4.5,
                    color: Vec3::new(0.9, 0.2, 0.7),
                },
            ],
            sun: SunOrbit {
                radius: 50.0,
                max_height: 120.0,
                period_secs: 30.0,
            },
            sun_light: LightParams {
                intensity: Vec3::splat(5.0),
                ambient: Vec3::splat(0.3),
                attenuation: 0.001,
            },
            lamp_light: LightParams {
                intensity: Vec3::splat(8.0),
                ambient: Vec3::splat(0.2),
                attenuation: 0.05,
            },
            ground_color: Vec3::new(0.2, 0.8, 0.3),
            sun_color: Vec3::ONE,
            lamp_color: Vec3::ONE,
        }
    }
}

impl SceneConfig {
    /// Load a scene layout from a JSON file; missing fields fall back to
    /// the defaults above.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing scene config {}", path.display()))?;
        Ok(config)
    }
}

/// Craft body geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Flattened ellipsoid
    Saucer,
    /// Stretched box
    Fuselage,
}

/// Per-craft tuning: mesh identity, clearance contribution, lamp mount,
/// input step sizes. The two historical demo variants become two presets
/// of this one structure.
#[derive(Debug, Clone, Copy)]
pub struct ActorProfile {
    pub body: BodyKind,
    pub radius: f32,
    pub lamp_offset: f32,
    pub move_step: f32,
    pub turn_step_deg: f32,
    pub start_position: Vec3,
    pub body_color: Vec3,
}

impl ActorProfile {
    pub fn ufo() -> Self {
        Self {
            body: BodyKind::Saucer,
            radius: 6.71,
            lamp_offset: 6.0,
            move_step: 0.5,
            turn_step_deg: 5.0,
            start_position: Vec3::new(0.0, 0.5, 0.0),
            body_color: Vec3::new(0.9, 0.1, 0.3),
        }
    }

    pub fn helicopter() -> Self {
        Self {
            body: BodyKind::Fuselage,
            radius: 4.0,
            lamp_offset: 5.0,
            move_step: 0.5,
            turn_step_deg: 5.0,
            start_position: Vec3::new(0.0, 1.0, 0.0),
            body_color: Vec3::new(0.3, 0.5, 0.9),
        }
    }
}
