use std::path::PathBuf;
use clap::Parser;
use crate::constants::*;
use crate::story::StoryCategory;

#[derive(Debug, Parser)]
#[command(name = "mad-creator")]
#[command(about = "Image and caption slideshow with randomized transitions")]
pub struct Cli {
    /// Images, or directories of images, to start with
    pub images: Vec<PathBuf>,

    /// Story category: youth, challenge or emotional
    #[arg(long, default_value = "youth")]
    pub story: String,

    /// Start playing immediately
    #[arg(long)]
    pub play: bool,

    /// TTF/OTF font with Japanese glyphs for captions and labels
    #[arg(long)]
    pub font: Option<PathBuf>,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Seed for the transition picker, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn story(&self) -> StoryCategory {
        StoryCategory::from_key(&self.story)
    }
}
