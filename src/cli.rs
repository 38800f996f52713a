use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ActorProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Actor {
    Ufo,
    Helicopter,
}

impl Actor {
    pub fn profile(self) -> ActorProfile {
        match self {
            Self::Ufo => ActorProfile::ufo(),
            Self::Helicopter => ActorProfile::helicopter(),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "hoverscene")]
#[command(about = "Interactive 3D scene viewer with a collision-aware craft", long_about = None)]
pub struct Cli {
    /// Which craft to fly
    #[arg(long, value_enum, default_value = "ufo")]
    pub actor: Actor,

    /// Optional scene layout (JSON); missing fields use the built-in scene
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Override the sun orbit period in seconds (must be positive)
    #[arg(long, value_parser = positive_seconds)]
    pub sun_period: Option<f32>,
}

fn positive_seconds(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(String::from("period must be positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_sun_period() {
        assert!(Cli::try_parse_from(["hoverscene", "--sun-period", "0"]).is_err());
        assert!(Cli::try_parse_from(["hoverscene", "--sun-period", "-30"]).is_err());

        let cli = Cli::try_parse_from(["hoverscene", "--sun-period", "45"])
            .expect("positive period parses");
        assert_eq!(cli.sun_period, Some(45.0));
    }

    #[test]
    fn actor_defaults_to_ufo() {
        let cli = Cli::try_parse_from(["hoverscene"]).expect("no args is valid");
        assert_eq!(cli.actor, Actor::Ufo);
    }
}
