use crate::constants::*;

/// Repeating timer that fires every `period` seconds of accumulated frame time.
///
/// Remembers the sequence length it was started for; the engine drops and
/// restarts it when that length changes.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: f32,
    elapsed: f32,
    bound_len: usize,
}

impl TickTimer {
    pub fn start(period: f32, bound_len: usize) -> Self {
        Self { period, elapsed: 0.0, bound_len }
    }

    pub fn bound_len(&self) -> usize {
        self.bound_len
    }

    /// Advances by `dt` and returns how many periods completed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// The white flash overlay: a short 0 -> peak -> 0 pulse followed by a pause.
#[derive(Debug, Clone, Default)]
pub struct FlashPulse {
    elapsed: f32,
}

impl FlashPulse {
    pub const CYCLE: f32 = FLASH_DURATION + FLASH_REPEAT_DELAY;

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt) % Self::CYCLE;
    }

    pub fn opacity(&self) -> f32 {
        if self.elapsed >= FLASH_DURATION {
            return 0.0;
        }
        let t = self.elapsed / FLASH_DURATION;
        FLASH_PEAK_OPACITY * (1.0 - (2.0 * t - 1.0).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_fires_once_per_period() {
        let mut timer = TickTimer::start(1.5, 5);
        assert_eq!(timer.advance(1.0), 0);
        assert_eq!(timer.advance(0.5), 1);
        assert_eq!(timer.advance(1.25), 0);
        assert_eq!(timer.advance(0.25), 1);
    }

    #[test]
    fn long_frame_fires_several_ticks() {
        let mut timer = TickTimer::start(1.5, 5);
        assert_eq!(timer.advance(4.6), 3);
        assert_eq!(timer.advance(1.3), 0);
    }

    #[test]
    fn flash_pulses_then_rests() {
        let mut flash = FlashPulse::default();
        assert_eq!(flash.opacity(), 0.0);
        flash.advance(FLASH_DURATION / 2.0);
        assert!((flash.opacity() - FLASH_PEAK_OPACITY).abs() < 1e-4);
        flash.advance(0.5);
        assert_eq!(flash.opacity(), 0.0);
    }

    #[test]
    fn flash_repeats_every_cycle() {
        let mut flash = FlashPulse::default();
        flash.advance(FlashPulse::CYCLE + 0.075);
        let quarter = flash.opacity();
        assert!((quarter - FLASH_PEAK_OPACITY / 2.0).abs() < 1e-3);
    }
}
