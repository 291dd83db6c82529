pub mod clock;
pub mod config;
pub mod input;
pub mod palette;
pub mod particle;
pub mod pointer;
#[cfg(feature = "window")]
pub mod render;
pub mod simulation;
pub mod spawn;
pub mod surface;
pub mod trail;

pub use config::{ConfigError, EffectConfig};
pub use input::{InputError, InputEvent, InputKind};
pub use simulation::{FrameScheduler, Simulation, Viewport};
pub use surface::Surface;

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Alive,
    Dead,
}

impl Lifecycle {
    pub fn from_alive(alive: bool) -> Lifecycle {
        if alive {
            Lifecycle::Alive
        } else {
            Lifecycle::Dead
        }
    }

    pub fn is_alive(self) -> bool {
        self == Lifecycle::Alive
    }
}

/// Bernoulli trial that leaves the generator untouched for 0 and 1.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    if probability >= 1. {
        return true;
    }
    probability > 0. && rng.gen_bool(probability)
}
