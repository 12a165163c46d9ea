#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum LayerPhase {
    Exiting,  // Previous content plays its exit keyframe
    Entering, // New content tweens from initial to animate
    Settled,  // Holding the animate keyframe
}
