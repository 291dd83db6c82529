use nalgebra::Vector2;
use std::time::Duration;

/// Raw and smoothed pointer state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTracker {
    /// Rendered position, trails `target`.
    pub position: Vector2<f64>,
    pub target: Vector2<f64>,
    pub previous: Vector2<f64>,
    moving: bool,
    last_move: Option<Duration>,
}

impl PointerTracker {
    pub fn new(position: Vector2<f64>) -> PointerTracker {
        PointerTracker {
            position,
            target: position,
            previous: position,
            moving: false,
            last_move: None,
        }
    }

    /// Records a raw move and returns the distance travelled from the
    /// previous raw position.
    pub fn move_to(&mut self, target: Vector2<f64>, now: Duration) -> f64 {
        self.previous = self.target;
        self.target = target;
        self.moving = true;
        self.last_move = Some(now);
        (self.target - self.previous).norm()
    }

    pub fn idle(&mut self) {
        self.moving = false;
    }

    /// Goes idle once `timeout` has passed since the last move. A move
    /// recorded after the deadline keeps the pointer moving.
    pub fn expire_idle(&mut self, now: Duration, timeout: Duration) {
        if let Some(last_move) = self.last_move {
            if self.moving && now.saturating_sub(last_move) >= timeout {
                self.idle();
            }
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn last_move(&self) -> Option<Duration> {
        self.last_move
    }

    /// Single-pole low-pass step toward the raw target.
    pub fn smooth(&mut self, factor: f64) {
        self.position += (self.target - self.position) * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn move_tracks_previous_and_distance() {
        let mut pointer = PointerTracker::new(Vector2::new(0., 0.));
        let d = pointer.move_to(Vector2::new(3., 4.), Duration::from_millis(5));
        assert_eq!(d, 5.);
        assert_eq!(pointer.previous, Vector2::new(0., 0.));
        assert!(pointer.is_moving());
        // Smoothed position only changes on smooth().
        assert_eq!(pointer.position, Vector2::new(0., 0.));
    }

    #[test]
    fn idle_timeout_is_debounced_by_new_moves() {
        let timeout = Duration::from_millis(100);
        let mut pointer = PointerTracker::new(Vector2::zeros());
        pointer.move_to(Vector2::new(1., 0.), Duration::from_millis(0));
        pointer.move_to(Vector2::new(2., 0.), Duration::from_millis(90));
        pointer.expire_idle(Duration::from_millis(150), timeout);
        assert!(pointer.is_moving());
        pointer.expire_idle(Duration::from_millis(190), timeout);
        assert!(!pointer.is_moving());
    }

    #[test]
    fn never_moved_pointer_stays_idle() {
        let mut pointer = PointerTracker::new(Vector2::zeros());
        pointer.expire_idle(Duration::from_secs(10), Duration::from_millis(100));
        assert!(!pointer.is_moving());
        assert_eq!(pointer.last_move(), None);
    }

    #[test]
    fn full_smoothing_snaps_to_target() {
        let mut pointer = PointerTracker::new(Vector2::zeros());
        pointer.move_to(Vector2::new(7., -3.), Duration::ZERO);
        pointer.smooth(1.);
        assert_eq!(pointer.position, Vector2::new(7., -3.));
    }

    proptest! {
        #[test]
        fn smoothing_converges_without_overshoot(
            sx in -2000.0f64..2000.0,
            sy in -2000.0f64..2000.0,
            tx in -2000.0f64..2000.0,
            ty in -2000.0f64..2000.0,
            factor in 0.01f64..=1.0,
            steps in 1usize..200,
        ) {
            let mut pointer = PointerTracker::new(Vector2::new(sx, sy));
            let target = Vector2::new(tx, ty);
            pointer.move_to(target, Duration::ZERO);
            let mut distance = (target - pointer.position).norm();
            for _ in 0..steps {
                let before = pointer.position;
                pointer.smooth(factor);
                let now = (target - pointer.position).norm();
                prop_assert!(now <= distance + 1e-9);
                // Each coordinate stays between where it was and the target.
                for axis in 0..2 {
                    let lo = before[axis].min(target[axis]) - 1e-9;
                    let hi = before[axis].max(target[axis]) + 1e-9;
                    prop_assert!(pointer.position[axis] >= lo && pointer.position[axis] <= hi);
                }
                distance = now;
            }
        }
    }
}
