use crate::story::StoryCategory;

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub enum PlayState {
    #[default]
    Paused,  // Index holds still
    Playing, // Index advances on every tick
}

impl PlayState {
    pub fn toggled(self) -> PlayState {
        match self {
            PlayState::Paused => PlayState::Playing,
            PlayState::Playing => PlayState::Paused,
        }
    }
}

/// What the user controls. `current_index` is never wrapped here; readers
/// take it modulo the length of whatever they index.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct PlaybackState {
    pub play_state: PlayState,
    pub current_index: usize,
    pub selected_story: StoryCategory,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }
}
