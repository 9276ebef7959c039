//! Speed-scaled simulation clock
//!
//! Movement constants are authored for `BASE_FPS`. The clock converts each
//! engine frame into the fraction of a canonical frame it represents, scaled
//! by the player-adjustable speed multiplier.

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_FPS, SPEED_INCREMENT, SPEED_MAX, SPEED_MIN};

/// Clamp a requested speed multiplier into the supported range
#[inline]
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        return 1.0;
    }
    speed.clamp(SPEED_MIN, SPEED_MAX)
}

/// Frame step, cosmetic frame counter and game time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedClock {
    fps: f32,
    speed: f32,
    /// Fraction of a canonical frame advanced per tick
    frame_step: f32,
    /// Frames that would have elapsed so far at the current speed
    /// (rescaled on speed change so background scrolling stays put)
    frame_count: f32,
    /// Seconds of 1x-speed game time since the run started
    game_time: f64,
}

impl SpeedClock {
    pub fn new(fps: u32, speed: f32) -> Self {
        let fps = fps.max(1) as f32;
        let speed = clamp_speed(speed);
        Self {
            fps,
            speed,
            frame_step: speed * BASE_FPS / fps,
            frame_count: 0.0,
            game_time: 0.0,
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn step(&self) -> f32 {
        self.frame_step
    }

    pub fn frame_count(&self) -> f32 {
        self.frame_count
    }

    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    /// Phase used for parallax/background scrolling
    pub fn scroll_phase(&self) -> f32 {
        self.frame_count * self.speed
    }

    /// Advance by one engine frame
    pub fn advance(&mut self) {
        self.frame_count += self.frame_step;
        self.game_time += f64::from(self.speed) / f64::from(self.fps);
    }

    /// Change the speed multiplier, returning the clamped value now in effect
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        let speed = clamp_speed(speed);
        let ratio = speed / self.speed;
        self.frame_count /= ratio;
        self.frame_step *= ratio;
        self.speed = speed;
        speed
    }

    pub fn speed_up(&mut self) -> f32 {
        self.set_speed(self.speed + SPEED_INCREMENT)
    }

    pub fn speed_down(&mut self) -> f32 {
        self.set_speed(self.speed - SPEED_INCREMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_step_scales_with_speed_and_fps() {
        let clock = SpeedClock::new(30, 1.0);
        assert!((clock.step() - 1.0).abs() < 1e-6);

        let clock = SpeedClock::new(75, 1.0);
        assert!((clock.step() - 0.4).abs() < 1e-6);

        let clock = SpeedClock::new(60, 2.0);
        assert!((clock.step() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut clock = SpeedClock::new(30, 10.0);
        assert_eq!(clock.speed(), SPEED_MAX);

        for _ in 0..20 {
            clock.speed_down();
        }
        assert_eq!(clock.speed(), SPEED_MIN);

        clock.speed_up();
        assert_eq!(clock.speed(), 0.5);
    }

    #[test]
    fn test_game_time_tracks_real_seconds_at_1x() {
        let mut clock = SpeedClock::new(75, 1.0);
        for _ in 0..75 {
            clock.advance();
        }
        assert!((clock.game_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_change_rescales_step() {
        let mut clock = SpeedClock::new(30, 1.0);
        clock.advance();
        clock.set_speed(2.0);
        assert!((clock.step() - 2.0).abs() < 1e-6);
        assert!((clock.frame_count() - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_scroll_phase_continuous_across_speed_changes(
            ticks in prop::collection::vec(0u32..20, 1..10),
            steps in prop::collection::vec(1u32..=12, 1..10),
        ) {
            let mut clock = SpeedClock::new(75, 1.0);
            for (n, s) in ticks.iter().zip(steps.iter()) {
                for _ in 0..*n {
                    clock.advance();
                }
                let before = clock.scroll_phase();
                clock.set_speed(*s as f32 * SPEED_INCREMENT);
                let after = clock.scroll_phase();
                prop_assert!((before - after).abs() <= 1e-3 * before.abs().max(1.0));
            }
        }
    }
}
