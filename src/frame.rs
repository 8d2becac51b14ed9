//! Fixed timestep frame pump
//!
//! Decouples the logical tick rate from the display refresh rate. Each
//! displayed frame adds `tick_rate / display_rate` to an accumulator and the
//! caller runs one tick per whole unit in it: normally one, sometimes zero or
//! two. The display rate is either passed in or measured from frame
//! timestamps.

use crate::consts::{MAX_SUBSTEPS, TICK_RATE};

/// Frames averaged for the measured display rate
const RATE_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FramePump {
    tick_rate: f32,
    accumulator: f32,
    frame_times: [f64; RATE_WINDOW],
    frame_index: usize,
    frames_seen: usize,
}

impl Default for FramePump {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FramePump {
    pub fn new(tick_rate: f32) -> Self {
        Self {
            tick_rate,
            accumulator: 0.0,
            frame_times: [0.0; RATE_WINDOW],
            frame_index: 0,
            frames_seen: 0,
        }
    }

    pub fn tick_rate(&self) -> f32 {
        self.tick_rate
    }

    /// Fractional tick carried over to the next frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Logical ticks to run for one frame displayed at `display_hz`
    pub fn ticks_for_rate(&mut self, display_hz: f32) -> u32 {
        let display_hz = if display_hz.is_finite() && display_hz > 0.0 {
            display_hz
        } else {
            self.tick_rate
        };
        self.accumulator += self.tick_rate / display_hz;

        let mut ticks = 0;
        while self.accumulator >= 1.0 && ticks < MAX_SUBSTEPS {
            self.accumulator -= 1.0;
            ticks += 1;
        }

        // Prevent spiral of death
        if self.accumulator >= 1.0 {
            log::debug!(
                "Frame pump behind by {:.1} ticks at {:.1} Hz, dropping them",
                self.accumulator.trunc(),
                display_hz
            );
            self.accumulator = self.accumulator.fract();
        }
        ticks
    }

    /// Logical ticks to run for a frame presented at `now_secs`, using the
    /// display rate measured over recent frames
    pub fn ticks_for_frame(&mut self, now_secs: f64) -> u32 {
        self.frame_times[self.frame_index] = now_secs;
        self.frame_index = (self.frame_index + 1) % RATE_WINDOW;
        self.frames_seen = self.frames_seen.saturating_add(1);

        let hz = self.measured_rate().unwrap_or(self.tick_rate);
        self.ticks_for_rate(hz)
    }

    /// Display rate averaged over the last frames, once at least two have
    /// been seen
    pub fn measured_rate(&self) -> Option<f32> {
        let samples = self.frames_seen.min(RATE_WINDOW);
        if samples < 2 {
            return None;
        }
        let newest = self.frame_times[(self.frame_index + RATE_WINDOW - 1) % RATE_WINDOW];
        let oldest = if self.frames_seen >= RATE_WINDOW {
            self.frame_times[self.frame_index]
        } else {
            self.frame_times[0]
        };
        let elapsed = newest - oldest;
        if elapsed <= 0.0 {
            return None;
        }
        Some(((samples - 1) as f64 / elapsed) as f32)
    }

    /// Forget timing history (after a pause or a hidden tab)
    pub fn reset(&mut self) {
        *self = Self::new(self.tick_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn total_ticks(pump: &mut FramePump, hz: f32, frames: usize) -> u32 {
        (0..frames).map(|_| pump.ticks_for_rate(hz)).sum()
    }

    #[test]
    fn test_matching_rate_ticks_once_per_frame() {
        let mut pump = FramePump::default();
        for _ in 0..100 {
            assert_eq!(pump.ticks_for_rate(60.0), 1);
        }
    }

    #[test]
    fn test_fast_display_alternates() {
        let mut pump = FramePump::default();
        let ticks: Vec<u32> = (0..4).map(|_| pump.ticks_for_rate(120.0)).collect();
        assert_eq!(ticks, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_slow_display_runs_two() {
        let mut pump = FramePump::default();
        assert_eq!(total_ticks(&mut pump, 30.0, 10), 20);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut pump = FramePump::default();
        assert_eq!(pump.ticks_for_rate(1.0), MAX_SUBSTEPS);
        assert!(pump.accumulator() < 1.0);
    }

    #[test]
    fn test_invalid_rate_falls_back_to_tick_rate() {
        let mut pump = FramePump::default();
        assert_eq!(pump.ticks_for_rate(0.0), 1);
        assert_eq!(pump.ticks_for_rate(f32::NAN), 1);
    }

    #[test]
    fn test_measured_rate() {
        let mut pump = FramePump::default();
        assert!(pump.measured_rate().is_none());

        // First frame has no history and assumes the tick rate
        assert_eq!(pump.ticks_for_frame(0.0), 1);

        let dt = 1.0 / 144.0;
        for i in 1..200 {
            pump.ticks_for_frame(i as f64 * dt);
        }
        let hz = pump.measured_rate().unwrap();
        assert!((hz - 144.0).abs() < 0.5, "measured {hz}");
    }

    #[test]
    fn test_reset_clears_history() {
        let mut pump = FramePump::default();
        pump.ticks_for_frame(0.0);
        pump.ticks_for_frame(0.1);
        pump.ticks_for_rate(120.0);
        pump.reset();
        assert!(pump.measured_rate().is_none());
        assert_eq!(pump.accumulator(), 0.0);
    }

    proptest! {
        #[test]
        fn test_tick_count_tracks_rate(hz in 30.0f32..240.0, frames in 1usize..600) {
            let mut pump = FramePump::default();
            let ticks = total_ticks(&mut pump, hz, frames) as f32;
            let expected = frames as f32 * TICK_RATE / hz;
            prop_assert!((ticks - expected).abs() <= 1.01, "{} ticks, expected {}", ticks, expected);
        }
    }
}
