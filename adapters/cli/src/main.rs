#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Tilewire experience.

mod headless;
mod scene;
mod session;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tilewire_core::GameConfig;
use tilewire_rendering::{Color, Presentation, RenderingBackend};
use tilewire_rendering_macroquad::MacroquadBackend;
use tilewire_system_bootstrap::Bootstrap;

use crate::{headless::SummaryFormat, session::Session};

const CLEAR_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);

/// Walk the player around the grid, laying wire behind them.
#[derive(Debug, Parser)]
#[command(name = "tilewire", version)]
struct Args {
    /// TOML file overriding any subset of the default game configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the maximum number of live trail segments.
    #[arg(long)]
    max_steps: Option<u32>,
    /// Sprite atlas manifest; without it sprites are drawn as solid colours.
    #[arg(long)]
    atlas: Option<PathBuf>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: Option<bool>,
    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Replay a move script (U D L R I Q) without opening a window.
    #[arg(long)]
    script: Option<String>,
    /// Encoding of the headless replay summary.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,
}

/// Entry point for the Tilewire command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(&args)?;

    if let Some(script) = &args.script {
        let summary = headless::replay(config, script)?;
        println!("{}", summary.render(args.format)?);
        return Ok(());
    }

    run_interactive(args, config)
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            parse_config(&contents)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn parse_config(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

fn run_interactive(args: Args, config: GameConfig) -> Result<()> {
    let bootstrap = Bootstrap;
    let mut session = Session::new(config)?;
    let banner = bootstrap.welcome_banner(session.world()).to_owned();
    println!("{banner}");

    let scene = scene::build_scene(&bootstrap, session.world(), &session.hud())?;
    let presentation = Presentation::new(banner, CLEAR_COLOR, scene);

    let mut backend = MacroquadBackend::new()
        .with_show_fps(args.show_fps)
        .with_atlas(args.atlas);
    if let Some(vsync) = args.vsync {
        backend = backend.with_vsync(vsync);
    }

    info!(target: "tilewire::cli", "starting interactive session");
    backend.run(presentation, move |_dt, input, scene| {
        session.advance(&input.controls);
        scene::refresh(scene, session.world(), &session.hud());
    })?;
    info!(target: "tilewire::cli", "session ended");
    Ok(())
}
