use crate::{
    chance,
    config::{ConfigError, EffectConfig},
    input::{InputEvent, InputKind},
    palette::{BACKGROUND, HIGHLIGHT, PRIMARY},
    particle::FireworkParticle,
    pointer::PointerTracker,
    spawn::{spawn_burst, BurstKind, SpawnController},
    surface::{Glow, Paint, RadialGradient, Surface},
    trail::TrailPoint,
};
use log::{debug, info, trace};
use nalgebra::Vector2;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::collections::VecDeque;
use std::time::Duration;

/// Host hook that arranges for the next `Simulation::step`.
pub trait FrameScheduler {
    fn request_next_frame(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.width as f64 / 2., self.height as f64 / 2.)
    }
}

pub struct Simulation {
    config: EffectConfig,
    viewport: Viewport,
    pointer: PointerTracker,
    spawner: SpawnController,
    trail: VecDeque<TrailPoint>,
    particles: VecDeque<FireworkParticle>,
    rng: Pcg64,
    frame: u64,
}

impl Simulation {
    pub fn new(config: EffectConfig, viewport: Viewport) -> Result<Simulation, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        info!(
            "Simulation started at {}x{}, particle cap {}",
            viewport.width, viewport.height, config.particle_cap
        );
        Ok(Simulation {
            pointer: PointerTracker::new(viewport.center()),
            spawner: SpawnController::new(&config.spawn),
            trail: VecDeque::new(),
            particles: VecDeque::with_capacity(config.particle_cap),
            rng,
            frame: 0,
            viewport,
            config,
        })
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    pub fn particles(&self) -> &VecDeque<FireworkParticle> {
        &self.particles
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn handle(&mut self, event: InputEvent) {
        let position = event.position();
        let burst = match event.kind() {
            InputKind::Move => {
                self.spawner
                    .on_pointer_move(&mut self.pointer, position, event.timestamp())
            }
            InputKind::PressEnd => Some(self.spawner.on_press(&mut self.pointer)),
            InputKind::Tap => Some(self.spawner.on_tap()),
        };
        if let Some(kind) = burst {
            self.spawn(kind, position);
        }
    }

    pub fn spawn(&mut self, kind: BurstKind, origin: Vector2<f64>) {
        let profile = self.config.spawn.profile(kind);
        let burst = spawn_burst(origin, profile, &self.config.particle, &mut self.rng);
        debug!(
            "{:?} burst of {} at ({:.1}, {:.1})",
            kind,
            burst.len(),
            origin.x,
            origin.y
        );
        self.particles.extend(burst);
    }

    /// Only the cached dimensions change; entities and the pointer keep
    /// their coordinates.
    pub fn resize(&mut self, viewport: Viewport) {
        info!("Resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn step(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
        now: Duration,
    ) {
        self.enforce_cap();
        self.fade(surface);

        self.pointer.smooth(self.config.pointer.smoothing);
        self.pointer.expire_idle(now, self.config.pointer.idle_timeout);
        if self.pointer.is_moving() && chance(&mut self.rng, self.config.trail.spawn_probability) {
            self.trail
                .push_back(TrailPoint::new(self.pointer.position, self.config.trail.max_age));
        }

        self.trail.retain_mut(|point| point.advance().is_alive());
        for point in &self.trail {
            point.render(
                surface,
                self.config.pointer.radius,
                PRIMARY,
                &self.config.trail,
            );
        }

        let rng = &mut self.rng;
        self.particles
            .retain_mut(|particle| particle.advance(&mut *rng).is_alive());
        for particle in &self.particles {
            particle.render(surface, &self.config.particle.style, &mut *rng);
        }

        self.draw_pointer(surface);

        trace!(
            "Frame {}: {} trail points, {} particles",
            self.frame,
            self.trail.len(),
            self.particles.len()
        );
        self.frame += 1;
        scheduler.request_next_frame();
    }

    fn enforce_cap(&mut self) {
        let cap = self.config.particle_cap;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
            debug!("Evicted {} oldest particles", excess);
        }
    }

    fn fade(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            Vector2::zeros(),
            Vector2::new(self.viewport.width as f64, self.viewport.height as f64),
            BACKGROUND.with_alpha(self.config.fade_alpha),
        );
    }

    fn draw_pointer(&self, surface: &mut dyn Surface) {
        let radius = self.config.pointer.radius;
        let gradient = RadialGradient::new(&[
            (0., HIGHLIGHT.opaque()),
            (0.7, PRIMARY.opaque()),
            (1., PRIMARY.with_alpha(0.5)),
        ]);
        surface.fill_circle(self.pointer.position, radius, &Paint::Radial(gradient));
        surface.set_glow(Some(Glow {
            blur: self.config.pointer.glow_blur,
            color: PRIMARY.opaque(),
        }));
        surface.stroke_circle(self.pointer.position, radius, 1., PRIMARY.opaque());
        surface.set_glow(None);
    }
}
