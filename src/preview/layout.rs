use raylib::prelude::*;
use crate::story::StoryCategory;

const MARGIN: f32 = 16.0;
const MAX_CONTENT_WIDTH: f32 = 896.0;
const HEADER_HEIGHT: f32 = 56.0;
const BUTTON_HEIGHT: f32 = 44.0;
const TAB_HEIGHT: f32 = 36.0;
pub const THUMBNAIL_SIZE: f32 = 64.0;
const THUMBNAIL_GAP: f32 = 8.0;

/// Reference width that preset pixel offsets are expressed against.
pub const REFERENCE_WIDTH: f32 = MAX_CONTENT_WIDTH;

/// Clickable element under the cursor.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Hit {
    Save,
    Share,
    Upload,
    TogglePlayback,
    Reset,
    Story(StoryCategory),
    Thumbnail(usize),
}

/// Screen rectangles of every part of the window, recomputed from its width.
#[derive(Debug, Clone)]
pub struct Layout {
    pub header: Rectangle,
    pub save_button: Rectangle,
    pub share_button: Rectangle,
    pub preview: Rectangle,
    pub upload_button: Rectangle,
    pub play_button: Rectangle,
    pub reset_button: Rectangle,
    pub story_title: Vector2,
    pub story_tabs: [Rectangle; 3],
    pub story_description: Vector2,
    pub thumbnail_strip: Rectangle,
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x < rect.x + rect.width
        && point.y >= rect.y
        && point.y < rect.y + rect.height
}

impl Layout {
    pub fn new(screen_width: f32) -> Layout {
        let header = Rectangle::new(0.0, 0.0, screen_width, HEADER_HEIGHT);
        let icon = HEADER_HEIGHT - 24.0;
        let share_button = Rectangle::new(screen_width - MARGIN - icon, 12.0, icon, icon);
        let save_button = Rectangle::new(share_button.x - 8.0 - icon, 12.0, icon, icon);

        let width = (screen_width - MARGIN * 2.0).min(MAX_CONTENT_WIDTH).max(1.0);
        let left = (screen_width - width) * 0.5;

        let mut y = HEADER_HEIGHT + MARGIN;
        let preview = Rectangle::new(left, y, width, width * 9.0 / 16.0);
        y += preview.height + MARGIN * 1.5;

        let button_width = (width - MARGIN * 2.0) / 3.0;
        let button = |i: f32| Rectangle::new(left + i * (button_width + MARGIN), y, button_width, BUTTON_HEIGHT);
        let upload_button = button(0.0);
        let play_button = button(1.0);
        let reset_button = button(2.0);
        y += BUTTON_HEIGHT + MARGIN * 1.5;

        let story_title = Vector2::new(left, y);
        y += 28.0;
        let tab_width = width / 3.0;
        let story_tabs = [0.0, 1.0, 2.0].map(|i| Rectangle::new(left + i * tab_width, y, tab_width, TAB_HEIGHT));
        y += TAB_HEIGHT + 12.0;
        let story_description = Vector2::new(left, y);
        y += 36.0;

        let thumbnail_strip = Rectangle::new(left, y, width, THUMBNAIL_SIZE);

        Layout {
            header,
            save_button,
            share_button,
            preview,
            upload_button,
            play_button,
            reset_button,
            story_title,
            story_tabs,
            story_description,
            thumbnail_strip,
        }
    }

    /// Horizontal scroll that keeps the highlighted thumbnail inside the strip.
    pub fn thumbnail_scroll(&self, highlighted: usize) -> f32 {
        let right_edge = (highlighted + 1) as f32 * (THUMBNAIL_SIZE + THUMBNAIL_GAP) - THUMBNAIL_GAP;
        (right_edge - self.thumbnail_strip.width).max(0.0)
    }

    pub fn thumbnail_rect(&self, index: usize, scroll: f32) -> Rectangle {
        Rectangle::new(
            self.thumbnail_strip.x + index as f32 * (THUMBNAIL_SIZE + THUMBNAIL_GAP) - scroll,
            self.thumbnail_strip.y,
            THUMBNAIL_SIZE,
            THUMBNAIL_SIZE,
        )
    }

    pub fn hit(&self, point: Vector2, thumbnail_count: usize, scroll: f32) -> Option<Hit> {
        let buttons = [
            (self.save_button, Hit::Save),
            (self.share_button, Hit::Share),
            (self.upload_button, Hit::Upload),
            (self.play_button, Hit::TogglePlayback),
            (self.reset_button, Hit::Reset),
        ];
        if let Some((_, hit)) = buttons.iter().find(|(rect, _)| contains(rect, point)) {
            return Some(*hit);
        }

        for (tab, story) in self.story_tabs.iter().zip(StoryCategory::ALL) {
            if contains(tab, point) {
                return Some(Hit::Story(story));
            }
        }

        if contains(&self.thumbnail_strip, point) {
            return (0..thumbnail_count)
                .find(|&i| contains(&self.thumbnail_rect(i, scroll), point))
                .map(Hit::Thumbnail);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(rect: &Rectangle) -> Vector2 {
        Vector2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
    }

    #[test]
    fn preview_is_sixteen_by_nine_and_centered() {
        let layout = Layout::new(1200.0);
        assert_eq!(layout.preview.width, MAX_CONTENT_WIDTH);
        assert_eq!(layout.preview.height, MAX_CONTENT_WIDTH * 9.0 / 16.0);
        assert_eq!(layout.preview.x, (1200.0 - MAX_CONTENT_WIDTH) * 0.5);
    }

    #[test]
    fn buttons_and_tabs_are_hit() {
        let layout = Layout::new(1024.0);
        assert_eq!(layout.hit(center(&layout.play_button), 5, 0.0), Some(Hit::TogglePlayback));
        assert_eq!(layout.hit(center(&layout.reset_button), 5, 0.0), Some(Hit::Reset));
        assert_eq!(layout.hit(center(&layout.upload_button), 5, 0.0), Some(Hit::Upload));
        assert_eq!(layout.hit(center(&layout.save_button), 5, 0.0), Some(Hit::Save));
        assert_eq!(
            layout.hit(center(&layout.story_tabs[2]), 5, 0.0),
            Some(Hit::Story(StoryCategory::Emotional))
        );
        assert_eq!(layout.hit(center(&layout.preview), 5, 0.0), None);
    }

    #[test]
    fn thumbnails_are_hit_by_index() {
        let layout = Layout::new(1024.0);
        let third = layout.thumbnail_rect(3, 0.0);
        assert_eq!(layout.hit(center(&third), 5, 0.0), Some(Hit::Thumbnail(3)));
        // Past the last thumbnail
        let sixth = layout.thumbnail_rect(5, 0.0);
        assert_eq!(layout.hit(center(&sixth), 5, 0.0), None);
    }

    #[test]
    fn scroll_follows_the_highlight() {
        let layout = Layout::new(1024.0);
        assert_eq!(layout.thumbnail_scroll(0), 0.0);
        let far = 40;
        let scroll = layout.thumbnail_scroll(far);
        assert!(scroll > 0.0);
        let rect = layout.thumbnail_rect(far, scroll);
        assert!(rect.x + rect.width <= layout.thumbnail_strip.x + layout.thumbnail_strip.width + 0.01);
        assert_eq!(layout.hit(center(&rect), far + 1, scroll), Some(Hit::Thumbnail(far)));
    }
}
