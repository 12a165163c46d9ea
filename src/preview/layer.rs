use raylib::prelude::*;
use crate::animation::{AnimationPreset, LayerParams};
use crate::preview::state::LayerPhase;

/// One animated layer of the preview (the image or the caption).
///
/// When the engine's transition serial changes, the content on screen plays
/// the exit keyframe of its preset first, then the new content tweens from the
/// new preset's initial keyframe to its animate keyframe.
pub struct Layer<C> {
    serial: u64,
    content: C,
    outgoing: Option<C>,
    preset: AnimationPreset,

    pub phase: LayerPhase,
    params: LayerParams,
    from: LayerParams,
    to: LayerParams,

    tween: ease::Tween,
    animation_timer: f32,
    duration: f32,
}

impl<C> Layer<C> {
    pub fn new(serial: u64, preset: AnimationPreset, content: C) -> Self {
        Self {
            serial,
            content,
            outgoing: None,
            preset,
            phase: LayerPhase::Entering,
            params: preset.initial,
            from: preset.initial,
            to: preset.animate,
            tween: ease::Tween::new(ease::cubic_out, 0.0, 1.0, preset.duration),
            animation_timer: 0.0,
            duration: preset.duration,
        }
    }

    /// Feeds the latest engine output. Content changes without a new serial
    /// (story switch, upload) show up in place.
    pub fn sync(&mut self, serial: u64, preset: AnimationPreset, content: C) {
        if serial == self.serial {
            self.content = content;
            return;
        }
        self.serial = serial;

        let previous = std::mem::replace(&mut self.content, content);
        if self.phase != LayerPhase::Exiting {
            self.outgoing = Some(previous);
            let exit = self.preset;
            self.start(LayerPhase::Exiting, self.params, exit.exit, exit.duration);
        }
        self.preset = preset;
    }

    pub fn update(&mut self, dt: f32) {
        if self.phase == LayerPhase::Settled {
            return;
        }

        let t = self.tween.apply(dt);
        self.params = self.from.lerp(&self.to, t);

        self.animation_timer += dt;
        if self.animation_timer >= self.duration {
            match self.phase {
                LayerPhase::Exiting => {
                    self.outgoing = None;
                    let preset = self.preset;
                    self.start(LayerPhase::Entering, preset.initial, preset.animate, preset.duration);
                }
                _ => {
                    self.params = self.to;
                    self.phase = LayerPhase::Settled;
                }
            }
        }
    }

    /// Content to draw this frame and the parameters to draw it with.
    pub fn visible(&self) -> (&C, LayerParams) {
        let content = match (&self.phase, &self.outgoing) {
            (LayerPhase::Exiting, Some(outgoing)) => outgoing,
            _ => &self.content,
        };
        (content, self.params)
    }

    fn start(&mut self, phase: LayerPhase, from: LayerParams, to: LayerParams, duration: f32) {
        self.phase = phase;
        self.params = from;
        self.from = from;
        self.to = to;
        self.tween = ease::Tween::new(ease::cubic_out, 0.0, 1.0, duration);
        self.animation_timer = 0.0;
        self.duration = duration;
    }
}
