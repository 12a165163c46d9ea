use rand::Rng;

/// Visual parameters of one layer at a keyframe.
///
/// `x`/`y` are pixel offsets at the preview's reference width, `rotation` is in
/// degrees and `blur` in pixels. `brightness` multiplies the layer colour.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct LayerParams {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
    pub rotation: f32,
    pub blur: f32,
    pub brightness: f32,
}

impl LayerParams {
    pub const NEUTRAL: LayerParams = LayerParams {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        scale: 1.0,
        rotation: 0.0,
        blur: 0.0,
        brightness: 1.0,
    };

    pub fn lerp(&self, to: &LayerParams, t: f32) -> LayerParams {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        LayerParams {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            opacity: mix(self.opacity, to.opacity),
            scale: mix(self.scale, to.scale),
            rotation: mix(self.rotation, to.rotation),
            blur: mix(self.blur, to.blur),
            brightness: mix(self.brightness, to.brightness),
        }
    }
}

impl Default for LayerParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Enter/active/exit keyframes of a transition and how long each tween lasts.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct AnimationPreset {
    pub name: &'static str,
    pub initial: LayerParams,
    pub animate: LayerParams,
    pub exit: LayerParams,
    pub duration: f32,
}

const N: LayerParams = LayerParams::NEUTRAL;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ImagePreset {
    ZoomFade,
    TiltSlide,
    Flashbulb,
}

impl ImagePreset {
    pub const ALL: [ImagePreset; 3] = [
        ImagePreset::ZoomFade,
        ImagePreset::TiltSlide,
        ImagePreset::Flashbulb,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> ImagePreset {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn preset(self) -> AnimationPreset {
        match self {
            ImagePreset::ZoomFade => AnimationPreset {
                name: "zoom-fade",
                initial: LayerParams { scale: 1.2, opacity: 0.0, ..N },
                animate: N,
                exit: LayerParams { scale: 0.8, opacity: 0.0, ..N },
                duration: 0.7,
            },
            ImagePreset::TiltSlide => AnimationPreset {
                name: "tilt-slide",
                initial: LayerParams { rotation: -5.0, scale: 1.1, x: -50.0, ..N },
                animate: N,
                exit: LayerParams { rotation: 5.0, scale: 0.9, x: 50.0, ..N },
                duration: 0.6,
            },
            ImagePreset::Flashbulb => AnimationPreset {
                name: "flashbulb",
                initial: LayerParams { brightness: 0.0, scale: 1.1, ..N },
                animate: N,
                exit: LayerParams { brightness: 2.0, scale: 0.9, ..N },
                duration: 0.5,
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextPreset {
    SweepIn,
    DropIn,
    Punch,
    BlurFade,
}

impl TextPreset {
    pub const ALL: [TextPreset; 4] = [
        TextPreset::SweepIn,
        TextPreset::DropIn,
        TextPreset::Punch,
        TextPreset::BlurFade,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> TextPreset {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn preset(self) -> AnimationPreset {
        match self {
            TextPreset::SweepIn => AnimationPreset {
                name: "sweep-in",
                initial: LayerParams { x: -300.0, opacity: 0.0, scale: 0.5, ..N },
                animate: N,
                exit: LayerParams { x: 300.0, opacity: 0.0, scale: 0.5, ..N },
                duration: 0.5,
            },
            TextPreset::DropIn => AnimationPreset {
                name: "drop-in",
                initial: LayerParams { y: -100.0, opacity: 0.0, rotation: -10.0, ..N },
                animate: N,
                exit: LayerParams { y: 100.0, opacity: 0.0, rotation: 10.0, ..N },
                duration: 0.4,
            },
            TextPreset::Punch => AnimationPreset {
                name: "punch",
                initial: LayerParams { scale: 2.0, opacity: 0.0, ..N },
                animate: N,
                exit: LayerParams { scale: 0.0, opacity: 0.0, ..N },
                duration: 0.6,
            },
            TextPreset::BlurFade => AnimationPreset {
                name: "blur-fade",
                initial: LayerParams { opacity: 0.0, blur: 10.0, ..N },
                animate: N,
                exit: LayerParams { opacity: 0.0, blur: 10.0, ..N },
                duration: 0.5,
            },
        }
    }
}
