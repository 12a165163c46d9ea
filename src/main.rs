use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use raylib::prelude::*;

mod animation;
mod config;
mod constants;
mod engine;
mod media;
mod preview;
mod state;
mod story;
mod texture_loader;
mod timer;

use crate::config::Cli;
use crate::engine::{Command, PlaybackEngine};
use crate::preview::Preview;
use crate::texture_loader::TextureLoader;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let files = media::expand_inputs(&cli.images)?;
    info!("{} input image(s), story {}", files.len(), cli.story().key());

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title("MAD Creator")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(cli.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = PlaybackEngine::new(rng);
    {
        let mut loader = TextureLoader::new(&mut rl, &thread);
        if !files.is_empty() {
            engine.apply(Command::Upload(files), &mut loader);
        }
        engine.apply(Command::SelectStory(cli.story()), &mut loader);
        if cli.play {
            engine.apply(Command::TogglePlayback, &mut loader);
        }
    }

    info!(
        "Starting with {} {} at {:?}",
        engine.media().len(),
        if engine.media().is_uploaded() { "uploaded image(s)" } else { "placeholders" },
        engine.state()
    );

    let mut preview = Preview::new(rl, thread, engine, cli.font.as_deref());
    preview.run();

    Ok(())
}
