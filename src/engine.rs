use std::path::PathBuf;
use log::{debug, info};
use rand::Rng;
use crate::animation::{ImagePreset, TextPreset};
use crate::constants::TICK_INTERVAL;
use crate::media::{ImageRef, MediaLoader, MediaSequence};
use crate::state::{PlayState, PlaybackState};
use crate::story::StoryCategory;
use crate::timer::{FlashPulse, TickTimer};

/// User actions the presentation layer forwards to the engine.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    TogglePlayback,
    SelectThumbnail(usize),
    Reset,
    SelectStory(StoryCategory),
    Upload(Vec<PathBuf>),
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug)]
pub struct Frame<'a, H> {
    pub active_image: &'a ImageRef<H>,
    pub caption: &'static str,
    pub story: StoryCategory,
    pub image_preset: ImagePreset,
    pub text_preset: TextPreset,
    pub is_playing: bool,
    pub thumbnails: &'a [ImageRef<H>],
    pub highlighted: usize,
    pub flash_opacity: f32,
    /// Bumped on every preset draw; a change means both layers restart.
    pub transition: u64,
}

pub struct PlaybackEngine<H, R> {
    rng: R,
    media: MediaSequence<H>,
    state: PlaybackState,

    // Only present while playing
    tick_timer: Option<TickTimer>,
    flash: Option<FlashPulse>,

    image_preset: ImagePreset,
    text_preset: TextPreset,
    transition: u64,
}

impl<H, R: Rng> PlaybackEngine<H, R> {
    pub fn new(mut rng: R) -> Self {
        let image_preset = ImagePreset::random(&mut rng);
        let text_preset = TextPreset::random(&mut rng);
        Self {
            rng,
            media: MediaSequence::placeholder(),
            state: PlaybackState::default(),
            tick_timer: None,
            flash: None,
            image_preset,
            text_preset,
            transition: 0,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn media(&self) -> &MediaSequence<H> {
        &self.media
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.tick_timer.is_some()
    }

    pub fn apply<L>(&mut self, command: Command, loader: &mut L)
    where
        L: MediaLoader<Handle = H> + ?Sized,
    {
        debug!("Command: {:?}", command);
        match command {
            Command::TogglePlayback => self.toggle_playback(),
            Command::SelectThumbnail(index) => self.set_index(index),
            Command::Reset => self.set_index(0),
            Command::SelectStory(story) => self.state.selected_story = story,
            Command::Upload(files) => self.upload(&files, loader),
        }
    }

    /// Advances the timers by one frame's worth of time.
    pub fn update(&mut self, dt: f32) {
        if let Some(flash) = self.flash.as_mut() {
            flash.advance(dt);
        }

        let fired = match self.tick_timer.as_mut() {
            Some(timer) => timer.advance(dt),
            None => 0,
        };
        for _ in 0..fired {
            self.tick();
        }
    }

    pub fn frame(&self) -> Frame<'_, H> {
        let index = self.state.current_index;
        Frame {
            active_image: self.media.get(index),
            caption: self.state.selected_story.caption_at(index),
            story: self.state.selected_story,
            image_preset: self.image_preset,
            text_preset: self.text_preset,
            is_playing: self.state.is_playing(),
            thumbnails: self.media.entries(),
            highlighted: index % self.media.len(),
            flash_opacity: self.flash.as_ref().map_or(0.0, FlashPulse::opacity),
            transition: self.transition,
        }
    }

    fn toggle_playback(&mut self) {
        self.state.play_state = self.state.play_state.toggled();
        match self.state.play_state {
            PlayState::Playing => {
                self.tick_timer = Some(TickTimer::start(TICK_INTERVAL, self.media.len()));
                self.flash = Some(FlashPulse::default());
                info!("Playback started");
            }
            PlayState::Paused => {
                self.tick_timer = None;
                self.flash = None;
                info!("Playback paused at index {}", self.state.current_index);
            }
        }
    }

    fn tick(&mut self) {
        let len = self.media.len();
        if let Some(timer) = self.tick_timer.as_ref() {
            if timer.bound_len() != len {
                // Sequence changed under a running timer; restart it on the new length
                self.tick_timer = Some(TickTimer::start(TICK_INTERVAL, len));
                return;
            }
        }
        // Reduce first: the stored index may be any value a thumbnail selection gave it
        self.set_index((self.state.current_index % len + 1) % len);
    }

    fn upload<L>(&mut self, files: &[PathBuf], loader: &mut L)
    where
        L: MediaLoader<Handle = H> + ?Sized,
    {
        // Assigning drops the previous sequence along with its handles
        self.media = MediaSequence::resolve(files, loader);
        if self.tick_timer.is_some() {
            self.tick_timer = Some(TickTimer::start(TICK_INTERVAL, self.media.len()));
        }
    }

    fn set_index(&mut self, index: usize) {
        if index == self.state.current_index {
            return;
        }
        self.state.current_index = index;
        self.image_preset = ImagePreset::random(&mut self.rng);
        self.text_preset = TextPreset::random(&mut self.rng);
        self.transition += 1;
        debug!(
            "Index {} (image {}, text {})",
            index,
            self.image_preset.preset().name,
            self.text_preset.preset().name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::constants::PLACEHOLDER_COUNT;
    use crate::media::tests::{FakeLoader, TrackedHandle, files};

    type TestEngine = PlaybackEngine<TrackedHandle, StdRng>;

    fn engine() -> (TestEngine, FakeLoader) {
        (PlaybackEngine::new(StdRng::seed_from_u64(42)), FakeLoader::default())
    }

    fn play(engine: &mut TestEngine, loader: &mut FakeLoader) {
        engine.apply(Command::TogglePlayback, loader);
        assert!(engine.state().is_playing());
    }

    #[test]
    fn starts_paused_on_youth_at_zero() {
        let (engine, _) = engine();
        let state = engine.state();
        assert_eq!(state.play_state, PlayState::Paused);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.selected_story, StoryCategory::Youth);
        assert_eq!(engine.media().len(), PLACEHOLDER_COUNT);
        assert!(!engine.is_ticking());
    }

    #[test]
    fn toggle_flips_only_the_play_state() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::SelectThumbnail(3), &mut loader);
        play(&mut engine, &mut loader);
        assert_eq!(engine.state().current_index, 3);
        engine.apply(Command::TogglePlayback, &mut loader);
        assert_eq!(engine.state().play_state, PlayState::Paused);
        assert_eq!(engine.state().current_index, 3);
    }

    #[test]
    fn ticks_only_while_playing() {
        let (mut engine, mut loader) = engine();
        engine.update(10.0);
        assert_eq!(engine.state().current_index, 0);

        play(&mut engine, &mut loader);
        engine.update(TICK_INTERVAL);
        assert_eq!(engine.state().current_index, 1);
    }

    #[test]
    fn seven_ticks_over_placeholders_land_on_two() {
        let (mut engine, mut loader) = engine();
        play(&mut engine, &mut loader);
        for _ in 0..7 {
            engine.update(TICK_INTERVAL);
        }
        assert_eq!(engine.state().current_index, 7 % PLACEHOLDER_COUNT);
    }

    #[test]
    fn ticks_wrap_from_any_start() {
        for start in 0..PLACEHOLDER_COUNT {
            for ticks in 1..12 {
                let (mut engine, mut loader) = engine();
                engine.apply(Command::SelectThumbnail(start), &mut loader);
                play(&mut engine, &mut loader);
                for _ in 0..ticks {
                    engine.update(TICK_INTERVAL);
                }
                assert_eq!(engine.state().current_index, (start + ticks) % PLACEHOLDER_COUNT);
            }
        }
    }

    #[test]
    fn pausing_drops_the_timer_and_resuming_starts_a_fresh_period() {
        let (mut engine, mut loader) = engine();
        play(&mut engine, &mut loader);
        engine.update(1.0);
        engine.apply(Command::TogglePlayback, &mut loader);
        assert!(!engine.is_ticking());

        play(&mut engine, &mut loader);
        engine.update(1.0);
        assert_eq!(engine.state().current_index, 0);
        engine.update(0.5);
        assert_eq!(engine.state().current_index, 1);
    }

    #[test]
    fn thumbnail_then_reset() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::SelectThumbnail(3), &mut loader);
        assert_eq!(engine.state().current_index, 3);
        engine.apply(Command::Reset, &mut loader);
        assert_eq!(engine.state().current_index, 0);
    }

    #[test]
    fn thumbnail_and_reset_work_while_playing() {
        let (mut engine, mut loader) = engine();
        play(&mut engine, &mut loader);
        for index in 0..PLACEHOLDER_COUNT {
            engine.apply(Command::SelectThumbnail(index), &mut loader);
            assert_eq!(engine.state().current_index, index);
        }
        engine.apply(Command::Reset, &mut loader);
        assert_eq!(engine.state().current_index, 0);
        assert!(engine.state().is_playing());
    }

    #[test]
    fn story_change_keeps_the_index() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::SelectThumbnail(12), &mut loader);
        let transition = engine.frame().transition;
        engine.apply(Command::SelectStory(StoryCategory::Challenge), &mut loader);

        let frame = engine.frame();
        assert_eq!(engine.state().current_index, 12);
        assert_eq!(frame.caption, StoryCategory::Challenge.captions()[2]);
        assert_eq!(frame.transition, transition);
    }

    #[test]
    fn unknown_story_shows_youth_captions() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::SelectThumbnail(1), &mut loader);
        engine.apply(Command::SelectStory(StoryCategory::from_key("mystery")), &mut loader);
        let unknown = engine.frame().caption;
        engine.apply(Command::SelectStory(StoryCategory::Youth), &mut loader);
        assert_eq!(unknown, engine.frame().caption);
    }

    #[test]
    fn upload_sets_length_and_empty_upload_restores_placeholders() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::Upload(files(&["a.png", "b.png", "c.png"])), &mut loader);
        assert_eq!(engine.media().len(), 3);
        assert_eq!(engine.frame().thumbnails.len(), 3);

        engine.apply(Command::Upload(Vec::new()), &mut loader);
        assert_eq!(engine.media().len(), PLACEHOLDER_COUNT);
        assert!(!engine.media().is_uploaded());
    }

    #[test]
    fn shrinking_upload_wraps_the_displayed_index() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::SelectThumbnail(4), &mut loader);
        engine.apply(Command::Upload(files(&["a.png", "b.png"])), &mut loader);

        assert_eq!(engine.state().current_index, 4);
        let frame = engine.frame();
        assert_eq!(frame.highlighted, 0);
        assert_eq!(frame.active_image.path(), Some(std::path::Path::new("a.png")));
    }

    #[test]
    fn upload_releases_previous_handles() {
        let (mut engine, mut loader) = engine();
        let released = loader.released.clone();
        engine.apply(Command::Upload(files(&["a.png", "b.png"])), &mut loader);
        engine.apply(Command::Upload(files(&["c.png"])), &mut loader);
        assert_eq!(released.get(), 2);
        drop(engine);
        assert_eq!(released.get(), 3);
    }

    #[test]
    fn upload_while_playing_restarts_the_period() {
        let (mut engine, mut loader) = engine();
        play(&mut engine, &mut loader);
        engine.update(1.0);
        engine.apply(Command::Upload(files(&["a.png", "b.png"])), &mut loader);
        engine.update(1.0);
        assert_eq!(engine.state().current_index, 0);
        engine.update(0.5);
        assert_eq!(engine.state().current_index, 1);
        engine.update(TICK_INTERVAL);
        assert_eq!(engine.state().current_index, 0);
    }

    #[test]
    fn index_changes_draw_new_presets() {
        let (mut engine, mut loader) = engine();
        assert_eq!(engine.frame().transition, 0);
        engine.apply(Command::SelectThumbnail(2), &mut loader);
        engine.apply(Command::SelectThumbnail(0), &mut loader);
        engine.apply(Command::SelectThumbnail(2), &mut loader);
        assert_eq!(engine.frame().transition, 3);

        // Same index again is not a transition
        engine.apply(Command::SelectThumbnail(2), &mut loader);
        assert_eq!(engine.frame().transition, 3);
    }

    #[test]
    fn presets_are_redrawn_on_index_changes() {
        let (mut engine, mut loader) = engine();
        let mut images = Vec::new();
        let mut texts = Vec::new();
        for step in 1..=60 {
            engine.apply(Command::SelectThumbnail(step % 2), &mut loader);
            let frame = engine.frame();
            if !images.contains(&frame.image_preset) {
                images.push(frame.image_preset);
            }
            if !texts.contains(&frame.text_preset) {
                texts.push(frame.text_preset);
            }
        }
        assert!(images.len() > 1, "image preset never changed: {:?}", images);
        assert!(texts.len() > 1, "text preset never changed: {:?}", texts);

        let (image, text) = (engine.frame().image_preset, engine.frame().text_preset);
        for story in StoryCategory::ALL {
            engine.apply(Command::SelectStory(story), &mut loader);
            assert_eq!(engine.frame().image_preset, image);
            assert_eq!(engine.frame().text_preset, text);
        }
    }

    #[test]
    fn tick_after_a_huge_thumbnail_index_wraps() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::SelectThumbnail(usize::MAX), &mut loader);
        play(&mut engine, &mut loader);
        engine.update(TICK_INTERVAL);
        assert_eq!(engine.state().current_index, (usize::MAX % PLACEHOLDER_COUNT + 1) % PLACEHOLDER_COUNT);
        assert_eq!(engine.frame().highlighted, engine.state().current_index);
    }

    #[test]
    fn flash_only_runs_while_playing() {
        let (mut engine, mut loader) = engine();
        engine.update(0.15);
        assert_eq!(engine.frame().flash_opacity, 0.0);

        play(&mut engine, &mut loader);
        engine.update(0.15);
        assert!(engine.frame().flash_opacity > 0.4);

        engine.apply(Command::TogglePlayback, &mut loader);
        assert_eq!(engine.frame().flash_opacity, 0.0);
    }

    #[test]
    fn single_image_never_transitions() {
        let (mut engine, mut loader) = engine();
        engine.apply(Command::Upload(files(&["only.png"])), &mut loader);
        play(&mut engine, &mut loader);
        engine.update(TICK_INTERVAL * 3.0);
        assert_eq!(engine.state().current_index, 0);
        assert_eq!(engine.frame().transition, 0);
    }
}
