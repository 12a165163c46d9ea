pub const WINDOW_WIDTH: i32 = 1024;           // Default window width
pub const WINDOW_HEIGHT: i32 = 860;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const TICK_INTERVAL: f32 = 1.5;           // Time between index advances while playing (seconds)

pub const FLASH_DURATION: f32 = 0.3;          // Length of one flash pulse (seconds)
pub const FLASH_REPEAT_DELAY: f32 = 1.2;      // Pause between flash pulses (seconds)
pub const FLASH_PEAK_OPACITY: f32 = 0.5;      // Opacity at the middle of a pulse

pub const PLACEHOLDER_COUNT: usize = 5;       // Entries in the fallback media sequence
pub const CAPTIONS_PER_STORY: usize = 5;      // Captions in each story category

pub const CAPTION_FONT_SIZE: f32 = 40.0;      // Caption text size in pixels
