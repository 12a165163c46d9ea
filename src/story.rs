use log::debug;
use crate::constants::CAPTIONS_PER_STORY;

/// Caption theme selectable from the story tabs.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum StoryCategory {
    #[default]
    Youth,
    Challenge,
    Emotional,
}

const YOUTH: [&str; CAPTIONS_PER_STORY] = [
    "青春は一瞬の煌めき",
    "明日への希望を胸に",
    "限界を超えろ",
    "君と見た空の向こう",
    "終わらない夢を追いかけて",
];

const CHALLENGE: [&str; CAPTIONS_PER_STORY] = [
    "立ち向かえ、運命に",
    "強さとは立ち上がる勇気",
    "諦めなければ道は開ける",
    "一歩先の自分へ",
    "不可能を可能にする瞬間",
];

const EMOTIONAL: [&str; CAPTIONS_PER_STORY] = [
    "心に刻まれた記憶",
    "言葉にできない想い",
    "涙の向こうに見える光",
    "二度と戻れない日々",
    "永遠に続く絆の物語",
];

impl StoryCategory {
    pub const ALL: [StoryCategory; 3] = [
        StoryCategory::Youth,
        StoryCategory::Challenge,
        StoryCategory::Emotional,
    ];

    /// Looks up a category by its key. Unknown keys fall back to `Youth`.
    pub fn from_key(key: &str) -> StoryCategory {
        match key.trim().to_ascii_lowercase().as_str() {
            "youth" => StoryCategory::Youth,
            "challenge" => StoryCategory::Challenge,
            "emotional" => StoryCategory::Emotional,
            other => {
                debug!("Unknown story key {:?}, using youth", other);
                StoryCategory::Youth
            }
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            StoryCategory::Youth => "youth",
            StoryCategory::Challenge => "challenge",
            StoryCategory::Emotional => "emotional",
        }
    }

    pub fn captions(self) -> &'static [&'static str] {
        match self {
            StoryCategory::Youth => &YOUTH,
            StoryCategory::Challenge => &CHALLENGE,
            StoryCategory::Emotional => &EMOTIONAL,
        }
    }

    /// Caption shown at an unnormalized playback index.
    pub fn caption_at(self, index: usize) -> &'static str {
        let captions = self.captions();
        captions[index % captions.len()]
    }

    // Tab label and blurb shown under the story tabs
    pub fn label(self) -> &'static str {
        match self {
            StoryCategory::Youth => "青春",
            StoryCategory::Challenge => "挑戦",
            StoryCategory::Emotional => "感動",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StoryCategory::Youth => "青春をテーマにした爽やかで希望に満ちたストーリー展開",
            StoryCategory::Challenge => "困難に立ち向かう勇気と成長を描いたストーリー展開",
            StoryCategory::Emotional => "心に響く感動と深い絆を描いたストーリー展開",
        }
    }
}

/// Every piece of text the preview may draw, used to build the font atlas.
pub fn all_text() -> String {
    let mut text = String::new();
    for story in StoryCategory::ALL {
        for caption in story.captions() {
            text.push_str(caption);
        }
        text.push_str(story.label());
        text.push_str(story.description());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_story_has_five_captions() {
        for story in StoryCategory::ALL {
            assert_eq!(story.captions().len(), CAPTIONS_PER_STORY);
        }
    }

    #[test]
    fn unknown_key_falls_back_to_youth() {
        assert_eq!(StoryCategory::from_key("horror"), StoryCategory::Youth);
        assert_eq!(StoryCategory::from_key(""), StoryCategory::Youth);
        assert_eq!(
            StoryCategory::from_key("horror").captions(),
            StoryCategory::Youth.captions()
        );
    }

    #[test]
    fn keys_round_trip() {
        for story in StoryCategory::ALL {
            assert_eq!(StoryCategory::from_key(story.key()), story);
        }
        assert_eq!(StoryCategory::from_key(" Challenge "), StoryCategory::Challenge);
    }

    #[test]
    fn caption_index_wraps() {
        assert_eq!(StoryCategory::Challenge.caption_at(12), "諦めなければ道は開ける");
        assert_eq!(StoryCategory::Youth.caption_at(5), StoryCategory::Youth.caption_at(0));
    }

    #[test]
    fn font_text_covers_captions() {
        let text = all_text();
        assert!(text.contains("永遠に続く絆の物語"));
        assert!(text.contains("挑戦"));
    }
}
