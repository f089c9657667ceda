// Real-time pacing - maps host callbacks onto emulated frames
//
// The host calls in with a millisecond timestamp, typically once per display
// refresh. Lag behind the 60 Hz schedule is accumulated in `delta`. Whole
// frames of lag are run without painting. Lag above the pause threshold
// pauses emulation instead of fast-forwarding through it.

use super::config::TimingConfig;
use super::timing::FRAME_MS;

/// What the emulator should do for one host callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceDecision {
    /// Host is ahead of emulated time; run nothing
    Skip,
    /// Lag exceeded the pause threshold; run nothing and pause
    Pause,
    /// Run `dropped` frames without painting, then one painted frame
    Run { dropped: u32 },
}

/// Frame pacer
#[derive(Debug, Clone)]
pub struct Pacer {
    /// Timestamp of the previous callback
    last_ms: Option<f64>,
    /// Accumulated lag behind the 60 Hz schedule
    delta: f64,
    pause_threshold_ms: f64,
    max_catch_up_frames: u32,
    /// Frames dropped since creation
    dropped_total: u64,
}

impl Pacer {
    /// Create a pacer from timing settings
    pub fn new(config: &TimingConfig) -> Self {
        Pacer {
            last_ms: None,
            delta: 0.0,
            pause_threshold_ms: config.pause_threshold_ms,
            max_catch_up_frames: config.max_catch_up_frames,
            dropped_total: 0,
        }
    }

    /// Decide what to run for a host callback at `now_ms`
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::config::TimingConfig;
    /// use nes_core::emulator::pacing::{PaceDecision, Pacer};
    ///
    /// let mut pacer = Pacer::new(&TimingConfig::default());
    /// assert_eq!(pacer.tick(0.0), PaceDecision::Run { dropped: 0 });
    /// assert_eq!(pacer.tick(1000.0 / 60.0), PaceDecision::Run { dropped: 0 });
    /// ```
    pub fn tick(&mut self, now_ms: f64) -> PaceDecision {
        let Some(last_ms) = self.last_ms.replace(now_ms) else {
            return PaceDecision::Run { dropped: 0 };
        };

        self.delta += (now_ms - last_ms) - FRAME_MS;

        if self.delta > self.pause_threshold_ms {
            log::debug!("Pacing lag {:.0} ms, pausing", self.delta);
            self.delta = 0.0;
            return PaceDecision::Pause;
        }

        if self.delta < -FRAME_MS {
            self.delta += FRAME_MS;
            return PaceDecision::Skip;
        }

        let mut dropped = 0;
        while self.delta > FRAME_MS {
            self.delta -= FRAME_MS;
            dropped += 1;
        }
        let dropped = dropped.min(self.max_catch_up_frames);

        if dropped > 0 {
            log::debug!("Dropping {} frame(s)", dropped);
            self.dropped_total += dropped as u64;
        }
        PaceDecision::Run { dropped }
    }

    /// Forget the previous timestamp, so the next callback starts fresh
    pub fn resume(&mut self) {
        self.last_ms = None;
        self.delta = 0.0;
    }

    /// Current lag in milliseconds (negative when ahead)
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Frames dropped since the pacer was created
    pub fn dropped_total(&self) -> u64 {
        self.dropped_total
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}
