use crate::simulation::FrameScheduler;
use log::debug;
use std::time::{Duration, Instant};

pub const FRAME_TIME_CAP: Duration = Duration::from_millis(16);

/// Frame scheduler for a polling host loop: a step only runs when the
/// previous one asked for it, and frames are paced to `frame_time`.
#[derive(Clone, Debug)]
pub struct FrameClock {
    start: Instant,
    frame_time: Duration,
    last_frame: Option<Instant>,
    requested: bool,
}

impl FrameClock {
    pub fn new(frame_time: Duration) -> FrameClock {
        FrameClock {
            start: Instant::now(),
            frame_time,
            last_frame: None,
            // The first frame needs no request.
            requested: true,
        }
    }

    /// Monotonic time since the clock was created.
    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn take_request(&mut self) -> bool {
        std::mem::replace(&mut self.requested, false)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub fn time_to_next_frame(&self, since_last_frame: Duration) -> Duration {
        self.frame_time.saturating_sub(since_last_frame)
    }

    /// Sleeps off whatever is left of the frame budget.
    pub fn pace(&mut self) {
        let current = Instant::now();
        if let Some(last_frame) = self.last_frame {
            let frame_time = current.duration_since(last_frame);
            debug!("Frame time: {} ms", frame_time.as_millis());
            let to_sleep = self.time_to_next_frame(frame_time);
            if to_sleep > Duration::ZERO {
                std::thread::sleep(to_sleep);
            }
            self.last_frame = Some(current + to_sleep);
        } else {
            self.last_frame = Some(current);
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new(FRAME_TIME_CAP)
    }
}

impl FrameScheduler for FrameClock {
    fn request_next_frame(&mut self) {
        self.requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_pre_requested() {
        let mut clock = FrameClock::default();
        assert!(clock.take_request());
        assert!(!clock.take_request());
        clock.request_next_frame();
        assert!(clock.is_requested());
        assert!(clock.take_request());
    }

    #[test]
    fn budget_saturates() {
        let clock = FrameClock::new(Duration::from_millis(16));
        assert_eq!(
            clock.time_to_next_frame(Duration::from_millis(10)),
            Duration::from_millis(6)
        );
        assert_eq!(
            clock.time_to_next_frame(Duration::from_millis(40)),
            Duration::ZERO
        );
    }

    #[test]
    fn pace_waits_out_the_budget() {
        let mut clock = FrameClock::new(Duration::from_millis(5));
        clock.pace();
        let before = Instant::now();
        clock.pace();
        assert!(before.elapsed() >= Duration::from_millis(4));
    }
}
