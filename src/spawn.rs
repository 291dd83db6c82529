use crate::{
    config::{BurstProfile, ParticleConfig, SpawnConfig},
    particle::FireworkParticle,
    pointer::PointerTracker,
};
use nalgebra::Vector2;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BurstKind {
    Standard,
    Big,
}

impl SpawnConfig {
    pub fn profile(&self, kind: BurstKind) -> &BurstProfile {
        match kind {
            BurstKind::Standard => &self.standard,
            BurstKind::Big => &self.big,
        }
    }
}

/// Distance and interval gate for bursts raised by pointer movement.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnController {
    distance_threshold: f64,
    min_interval: Duration,
    last_burst: Duration,
}

impl SpawnController {
    pub fn new(config: &SpawnConfig) -> SpawnController {
        SpawnController {
            distance_threshold: config.distance_threshold,
            min_interval: config.min_interval,
            last_burst: Duration::ZERO,
        }
    }

    pub fn last_burst(&self) -> Duration {
        self.last_burst
    }

    pub fn on_pointer_move(
        &mut self,
        pointer: &mut PointerTracker,
        position: Vector2<f64>,
        now: Duration,
    ) -> Option<BurstKind> {
        let distance = pointer.move_to(position, now);
        let elapsed = now.saturating_sub(self.last_burst);
        if distance > self.distance_threshold && elapsed > self.min_interval {
            self.last_burst = now;
            return Some(BurstKind::Standard);
        }
        None
    }

    pub fn on_pointer_idle(&mut self, pointer: &mut PointerTracker) {
        pointer.idle();
    }

    /// End of a drag gesture: the pointer settles and a big burst fires.
    pub fn on_press(&mut self, pointer: &mut PointerTracker) -> BurstKind {
        self.on_pointer_idle(pointer);
        BurstKind::Big
    }

    pub fn on_tap(&mut self) -> BurstKind {
        BurstKind::Big
    }
}

/// Fans a burst out radially: particle `i` of `n` leaves at angle
/// `i / n * TAU` with a random speed from the profile.
pub fn spawn_burst<R: Rng + ?Sized>(
    origin: Vector2<f64>,
    profile: &BurstProfile,
    particle: &ParticleConfig,
    rng: &mut R,
) -> Vec<FireworkParticle> {
    let count = rng.gen_range(profile.count.clone());
    let mut burst = Vec::with_capacity(count);
    for i in 0..count {
        let angle = (i as f64 / count as f64) * std::f64::consts::TAU;
        let speed = rng.gen_range(profile.speed.clone());
        let mut p = FireworkParticle::new(origin, rng, particle);
        p.velocity = Vector2::new(angle.cos() * speed, angle.sin() * speed);
        if let Some(size) = &profile.size {
            p.size = rng.gen_range(size.clone());
        }
        if let Some(capacity) = &profile.trail_capacity {
            p.set_trail_capacity(rng.gen_range(capacity.clone()));
        }
        burst.push(p);
    }
    burst
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn gated() -> (SpawnController, PointerTracker) {
        let config = SpawnConfig::default();
        (
            SpawnController::new(&config),
            PointerTracker::new(Vector2::new(0., 0.)),
        )
    }

    #[test]
    fn close_moves_in_time_do_not_spawn() {
        let (mut spawner, mut pointer) = gated();
        let t0 = Duration::from_millis(0);
        let t1 = Duration::from_millis(50);
        assert_eq!(spawner.on_pointer_move(&mut pointer, Vector2::new(0., 0.), t0), None);
        assert_eq!(spawner.on_pointer_move(&mut pointer, Vector2::new(20., 0.), t1), None);
    }

    #[test]
    fn far_moves_after_the_interval_spawn() {
        let (mut spawner, mut pointer) = gated();
        let t0 = Duration::from_millis(0);
        let t1 = Duration::from_millis(100);
        assert_eq!(spawner.on_pointer_move(&mut pointer, Vector2::new(0., 0.), t0), None);
        assert_eq!(
            spawner.on_pointer_move(&mut pointer, Vector2::new(20., 0.), t1),
            Some(BurstKind::Standard)
        );
        assert_eq!(spawner.last_burst(), t1);
        // Interval restarts at the burst.
        assert_eq!(
            spawner.on_pointer_move(&mut pointer, Vector2::new(40., 0.), Duration::from_millis(150)),
            None
        );
    }

    #[test]
    fn short_hops_never_spawn() {
        let (mut spawner, mut pointer) = gated();
        for step in 1..20u64 {
            let position = Vector2::new(step as f64 * 10., 0.);
            let now = Duration::from_millis(step * 200);
            assert_eq!(spawner.on_pointer_move(&mut pointer, position, now), None);
        }
        assert!(pointer.is_moving());
    }

    #[test]
    fn press_end_idles_pointer() {
        let (mut spawner, mut pointer) = gated();
        spawner.on_pointer_move(&mut pointer, Vector2::new(5., 5.), Duration::ZERO);
        assert_eq!(spawner.on_press(&mut pointer), BurstKind::Big);
        assert!(!pointer.is_moving());
        assert_eq!(spawner.on_tap(), BurstKind::Big);
    }

    #[test]
    fn big_profile_overrides_size_and_capacity() {
        let mut rng = Pcg64::seed_from_u64(11);
        let profile = BurstProfile::big();
        let burst = spawn_burst(
            Vector2::new(1., 2.),
            &profile,
            &ParticleConfig::default(),
            &mut rng,
        );
        assert!(profile.count.contains(&burst.len()));
        for p in &burst {
            assert!(profile.size.as_ref().unwrap().contains(&p.size));
            assert!(profile
                .trail_capacity
                .as_ref()
                .unwrap()
                .contains(&p.trail_capacity));
            // cos/sin rounding can nudge the norm across either bound.
            let speed = p.velocity.norm();
            assert!(speed >= profile.speed.start - 1e-9 && speed <= profile.speed.end + 1e-9);
        }
    }

    proptest! {
        #[test]
        fn burst_angles_are_equally_spaced(seed in any::<u64>(), big in any::<bool>()) {
            let mut rng = Pcg64::seed_from_u64(seed);
            let profile = if big { BurstProfile::big() } else { BurstProfile::standard() };
            let origin = Vector2::new(320., 240.);
            let burst = spawn_burst(origin, &profile, &ParticleConfig::default(), &mut rng);
            let n = burst.len();
            prop_assert!(profile.count.contains(&n));
            for (i, p) in burst.iter().enumerate() {
                prop_assert_eq!(p.position, origin);
                let angle = p.velocity.y.atan2(p.velocity.x).rem_euclid(std::f64::consts::TAU);
                let expected = i as f64 * std::f64::consts::TAU / n as f64;
                let diff = (angle - expected).abs();
                prop_assert!(diff < 1e-9 || (std::f64::consts::TAU - diff) < 1e-9);
            }
        }
    }
}
