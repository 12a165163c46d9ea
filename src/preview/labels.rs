use std::collections::BTreeSet;
use crate::story::{self, StoryCategory};

/// UI strings. The Japanese set needs a font with CJK glyphs; raylib's
/// built-in font only covers ASCII.
#[derive(Debug, Clone)]
pub struct Labels {
    cjk: bool,
    pub upload: &'static str,
    pub play: &'static str,
    pub pause: &'static str,
    pub reset: &'static str,
    pub story_title: &'static str,
}

impl Labels {
    pub const JAPANESE: Labels = Labels {
        cjk: true,
        upload: "画像アップロード",
        play: "再生",
        pause: "停止",
        reset: "リセット",
        story_title: "ストーリータイプを選択",
    };

    pub const ASCII: Labels = Labels {
        cjk: false,
        upload: "Upload images",
        play: "Play",
        pause: "Stop",
        reset: "Reset",
        story_title: "Story type",
    };

    pub fn story_label(&self, story: StoryCategory) -> &'static str {
        if self.cjk { story.label() } else { story.key() }
    }

    pub fn story_description(&self, story: StoryCategory) -> &'static str {
        if self.cjk { story.description() } else { "" }
    }
}

/// Codepoints to bake into a loaded font: printable ASCII plus every
/// character the captions and Japanese labels use.
pub fn font_codepoints() -> String {
    let j = Labels::JAPANESE;
    let mut chars: BTreeSet<char> = (' '..='~').collect();
    chars.extend(story::all_text().chars());
    for label in [j.upload, j.play, j.pause, j.reset, j.story_title] {
        chars.extend(label.chars());
    }
    chars.into_iter().collect()
}
