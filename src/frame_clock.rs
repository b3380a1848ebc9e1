use bevy::prelude::*;
use std::time::Duration;

// wall clock frame time to simulation time, with dilation and a cap
#[derive(Resource)]
pub struct FrameClock {
    frame_number: u64,
    frame_secs: f32,
    max_frame_secs: f32,
    time_dilation: f32,
    step_rate: Duration,
    pub paused: bool,
}

impl FrameClock {
    pub fn new(max_frame_secs: f32) -> Self {
        FrameClock {
            frame_number: 0,
            frame_secs: 0.0,
            max_frame_secs,
            time_dilation: 1.0,
            step_rate: Duration::from_secs(1) / 60,
            paused: false,
        }
    }

    pub fn update(&mut self, delta: Duration) {
        self.frame_number += 1;
        let frame_secs = delta.as_secs_f32() * self.time_dilation;
        if frame_secs > self.max_frame_secs {
            warn!(
                "capping frame {} time {} at {}",
                self.frame_number, frame_secs, self.max_frame_secs
            );
            self.frame_secs = self.max_frame_secs;
        } else {
            self.frame_secs = frame_secs;
        }
    }

    pub fn frame_secs(&self) -> f32 {
        self.frame_secs
    }

    /// Duration of a single manual step while paused.
    pub fn step_secs(&self) -> f32 {
        self.step_rate.as_secs_f32()
    }

    pub fn time_dilation(&self) -> f32 {
        self.time_dilation
    }

    pub fn set_time_dilation(&mut self, time_dilation: f32) {
        self.time_dilation = time_dilation;
    }
}

#[cfg(test)]
mod test {
    use super::FrameClock;
    use std::time::Duration;

    #[test]
    fn test_dilation() {
        let mut clock = FrameClock::new(0.25);
        clock.update(Duration::from_millis(10));
        assert!((clock.frame_secs() - 0.01).abs() < 1e-6);

        clock.set_time_dilation(0.5);
        clock.update(Duration::from_millis(10));
        assert!((clock.frame_secs() - 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_capped() {
        let mut clock = FrameClock::new(0.25);
        clock.update(Duration::from_secs(2));
        assert_eq!(0.25, clock.frame_secs());

        clock.set_time_dilation(4.0);
        clock.update(Duration::from_millis(100));
        assert_eq!(0.25, clock.frame_secs());
    }
}
