pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod lights;
pub mod mesh;
pub mod movement;
pub mod pole;
pub mod renderer;
pub mod scene;
pub mod shading;
pub mod transform;

pub use config::{ActorProfile, SceneConfig};
pub use scene::{CraftIntent, Scene};
