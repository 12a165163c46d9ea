mod draw;
mod labels;
mod layer;
mod layout;
mod state;

use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use rand::rngs::StdRng;
use raylib::ffi;
use raylib::prelude::*;
use crate::engine::{Command, PlaybackEngine};
use crate::media::{IMAGE_EXTENSIONS, expand_inputs};
use crate::story::StoryCategory;
use crate::texture_loader::TextureLoader;
use self::draw::{Scene, draw_scene};
use self::labels::{Labels, font_codepoints};
use self::layer::Layer;
use self::layout::{Hit, Layout};

const FONT_ATLAS_SIZE: i32 = 64;

/// The MAD Creator window: turns input into engine commands and draws the
/// engine's frame.
pub struct Preview {
    // Declared before the handle so textures and fonts unload while the
    // window is still open
    engine: PlaybackEngine<Texture2D, StdRng>,
    font: Option<Font>,
    labels: Labels,
    image_layer: Layer<usize>,
    text_layer: Layer<&'static str>,
    discard_frame_time: bool,

    thread: RaylibThread,
    rl: RaylibHandle,
}

fn load_font(rl: &mut RaylibHandle, thread: &RaylibThread, path: &Path) -> Result<Font> {
    let filename = path.to_str().context("Font path is not valid UTF-8")?;
    let codepoints = font_codepoints();
    rl.load_font_ex(thread, filename, FONT_ATLAS_SIZE, Some(codepoints.as_str()))
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Failed to load font {:?}", path))
}

fn pick_images() -> Option<Vec<PathBuf>> {
    rfd::FileDialog::new()
        .set_title("Upload images")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_files()
}

/// Dropped files are uploaded as given, dropped folders as the images they hold.
fn dropped_upload(paths: &[PathBuf]) -> Option<Command> {
    match expand_inputs(paths) {
        Ok(files) => {
            info!("{} file(s) dropped, {} to upload", paths.len(), files.len());
            Some(Command::Upload(files))
        }
        Err(e) => {
            warn!("Ignoring dropped files: {:#}", e);
            None
        }
    }
}

impl Preview {
    pub fn new(
        mut rl: RaylibHandle,
        thread: RaylibThread,
        engine: PlaybackEngine<Texture2D, StdRng>,
        font_path: Option<&Path>,
    ) -> Self {
        let font = match font_path {
            Some(path) => match load_font(&mut rl, &thread, path) {
                Ok(font) => Some(font),
                Err(e) => {
                    warn!("{:#}, falling back to the default font", e);
                    None
                }
            },
            None => {
                warn!("No --font given; Japanese captions need a font with CJK glyphs");
                None
            }
        };
        let labels = if font.is_some() { Labels::JAPANESE } else { Labels::ASCII };

        let frame = engine.frame();
        let image_layer = Layer::new(frame.transition, frame.image_preset.preset(), frame.highlighted);
        let text_layer = Layer::new(frame.transition, frame.text_preset.preset(), frame.caption);

        Self {
            engine,
            font,
            labels,
            image_layer,
            text_layer,
            discard_frame_time: false,
            thread,
            rl,
        }
    }

    pub fn run(&mut self) {
        while !self.rl.window_should_close() {
            // Time spent in a modal dialog does not count as playback
            let dt = if std::mem::take(&mut self.discard_frame_time) {
                0.0
            } else {
                self.rl.get_frame_time()
            };
            let layout = Layout::new(self.rl.get_screen_width() as f32);

            for command in self.poll_input(&layout) {
                self.apply(command);
            }

            self.engine.update(dt);

            let frame = self.engine.frame();
            self.image_layer.sync(frame.transition, frame.image_preset.preset(), frame.highlighted);
            self.text_layer.sync(frame.transition, frame.text_preset.preset(), frame.caption);
            self.image_layer.update(dt);
            self.text_layer.update(dt);

            self.draw(&layout);
        }
        info!("Window closed");
    }

    fn apply(&mut self, command: Command) {
        let mut loader = TextureLoader::new(&mut self.rl, &self.thread);
        self.engine.apply(command, &mut loader);
    }

    fn upload_dialog(&mut self) -> Option<Command> {
        self.discard_frame_time = true;
        match pick_images() {
            Some(files) => Some(Command::Upload(files)),
            None => {
                info!("Upload cancelled");
                None
            }
        }
    }

    fn poll_input(&mut self, layout: &Layout) -> Vec<Command> {
        let (count, highlighted) = {
            let frame = self.engine.frame();
            (frame.thumbnails.len(), frame.highlighted)
        };
        let mut commands = Vec::new();

        if self.rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            commands.push(Command::TogglePlayback);
        }
        if self.rl.is_key_pressed(KeyboardKey::KEY_R) {
            commands.push(Command::Reset);
        }
        let story_keys = [KeyboardKey::KEY_ONE, KeyboardKey::KEY_TWO, KeyboardKey::KEY_THREE];
        for (key, story) in story_keys.into_iter().zip(StoryCategory::ALL) {
            if self.rl.is_key_pressed(key) {
                commands.push(Command::SelectStory(story));
            }
        }
        if self.rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            commands.push(Command::SelectThumbnail((highlighted + 1) % count));
        }
        if self.rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            commands.push(Command::SelectThumbnail((highlighted + count - 1) % count));
        }
        if self.rl.is_key_pressed(KeyboardKey::KEY_O) {
            commands.extend(self.upload_dialog());
        }

        if self.rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = self.rl.get_mouse_position();
            match layout.hit(mouse, count, layout.thumbnail_scroll(highlighted)) {
                Some(Hit::Save) => info!("Saving is not available yet"),
                Some(Hit::Share) => info!("Sharing is not available yet"),
                Some(Hit::Upload) => commands.extend(self.upload_dialog()),
                Some(Hit::TogglePlayback) => commands.push(Command::TogglePlayback),
                Some(Hit::Reset) => commands.push(Command::Reset),
                Some(Hit::Story(story)) => commands.push(Command::SelectStory(story)),
                Some(Hit::Thumbnail(index)) => commands.push(Command::SelectThumbnail(index)),
                None => {}
            }
        }

        if self.rl.is_file_dropped() {
            let dropped = self.rl.load_dropped_files();
            let paths: Vec<PathBuf> = dropped.paths().into_iter().map(PathBuf::from).collect();
            commands.extend(dropped_upload(&paths));
        }

        commands
    }

    fn draw(&mut self, layout: &Layout) {
        let frame = self.engine.frame();
        let scene = Scene {
            layout,
            labels: &self.labels,
            frame: &frame,
            image_layer: &self.image_layer,
            text_layer: &self.text_layer,
            thumbnail_scroll: layout.thumbnail_scroll(frame.highlighted),
        };

        let mut d = self.rl.begin_drawing(&self.thread);
        let default_font = d.get_font_default();
        let font: &dyn AsRef<ffi::Font> = match &self.font {
            Some(font) => font,
            None => &default_font,
        };
        draw_scene(&mut d, font, &scene);
    }
}
