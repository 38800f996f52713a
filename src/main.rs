use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use hoverscene::app::App;
use hoverscene::cli::Cli;
use hoverscene::config::SceneConfig;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.scene {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };
    if let Some(period) = cli.sun_period {
        config.sun.period_secs = period;
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, cli.actor.profile());
    event_loop.run_app(&mut app)?;

    Ok(())
}
