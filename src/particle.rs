use crate::{
    chance,
    config::{ParticleConfig, ParticleStyle},
    palette::{self, Color},
    surface::{Glow, Paint, Surface},
    Lifecycle,
};
use nalgebra::Vector2;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub struct FireworkParticle {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub size: f64,
    pub color: Color,
    pub life: u32,
    pub max_life: u32,
    /// Recent positions, oldest first.
    pub history: VecDeque<Vector2<f64>>,
    pub trail_capacity: usize,
    pub gravity: f64,
    pub decay: f64,
    pub history_sampling: f64,
}

impl FireworkParticle {
    /// Creates a resting particle. Callers assign `velocity` right after.
    pub fn new<R: Rng + ?Sized>(
        position: Vector2<f64>,
        rng: &mut R,
        config: &ParticleConfig,
    ) -> FireworkParticle {
        let life = rng.gen_range(config.life.clone());
        let trail_capacity = rng.gen_range(config.trail_capacity.clone()).max(1);
        let mut history = VecDeque::with_capacity(trail_capacity + 1);
        history.push_back(position);
        FireworkParticle {
            position,
            velocity: Vector2::zeros(),
            size: rng.gen_range(config.size.clone()),
            color: palette::pick(rng),
            life,
            max_life: life,
            history,
            trail_capacity,
            gravity: config.gravity,
            decay: config.decay,
            history_sampling: config.history_sampling,
        }
    }

    pub fn set_trail_capacity(&mut self, capacity: usize) {
        self.trail_capacity = capacity.max(1);
        while self.history.len() > self.trail_capacity {
            self.history.pop_front();
        }
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Lifecycle {
        if chance(rng, self.history_sampling) {
            self.history.push_back(self.position);
            if self.history.len() > self.trail_capacity {
                self.history.pop_front();
            }
        }

        self.position += self.velocity;
        self.velocity.y += self.gravity;
        self.velocity *= self.decay;

        self.life = self.life.saturating_sub(1);
        Lifecycle::from_alive(self.life > 0)
    }

    pub fn head_opacity(&self) -> f64 {
        if self.max_life == 0 {
            return 0.;
        }
        self.life as f64 / self.max_life as f64
    }

    pub fn render<R: Rng + ?Sized>(
        &self,
        surface: &mut dyn Surface,
        style: &ParticleStyle,
        rng: &mut R,
    ) {
        let head_opacity = self.head_opacity();

        let len = self.history.len();
        if len > 1 {
            let stride = std::cmp::max(1, len / style.trail_segments.max(1));
            let newest = (len - 1) as f64;
            for i in (0..len - 1).step_by(stride) {
                let next = std::cmp::min(i + stride, len - 1);
                // 0 at the oldest point, 1 at the newest.
                let t = i as f64 / newest;
                let weight = style.tail_floor + (1. - style.tail_floor) * t;
                surface.stroke_line(
                    self.history[i],
                    self.history[next],
                    self.size * weight,
                    self.color.with_alpha(head_opacity * weight),
                );
            }
        }

        let head = Paint::Solid(self.color.with_alpha(head_opacity));
        let radius = self.size * head_opacity;
        surface.fill_circle(self.position, radius, &head);

        if head_opacity > style.glow_threshold && chance(rng, style.glow_probability) {
            surface.set_glow(Some(Glow {
                blur: style.glow_blur,
                color: self.color.opaque(),
            }));
            surface.fill_circle(self.position, radius, &head);
            surface.set_glow(None);
        }
    }
}
