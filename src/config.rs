use std::ops::Range;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field}: range {start}..{end} is empty")]
    EmptyRange {
        field: &'static str,
        start: f64,
        end: f64,
    },

    #[error("{field}: probability {value} is outside [0, 1]")]
    Probability { field: &'static str, value: f64 },

    #[error("{field}: expected a positive finite value, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field}: expected a finite value, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("pointer.smoothing: factor {0} is outside (0, 1]")]
    Smoothing(f64),

    #[error("trail.max_age must be at least one frame")]
    ZeroMaxAge,

    #[error("{0}: trail capacity must hold at least one point")]
    ZeroTrailCapacity(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerConfig {
    pub radius: f64,
    /// Fraction of the remaining distance covered per frame.
    pub smoothing: f64,
    pub idle_timeout: Duration,
    pub glow_blur: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            radius: 8.,
            smoothing: 0.2,
            idle_timeout: Duration::from_millis(100),
            glow_blur: 10.,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailConfig {
    pub max_age: u32,
    pub spawn_probability: f64,
    /// Share of the base radius lost by the end of a point's life.
    pub shrink: f64,
    pub edge_opacity: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_age: 50,
            spawn_probability: 1.,
            shrink: 0.8,
            edge_opacity: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStyle {
    pub trail_segments: usize,
    pub tail_floor: f64,
    pub glow_threshold: f64,
    pub glow_probability: f64,
    pub glow_blur: f64,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            trail_segments: 8,
            tail_floor: 0.3,
            glow_threshold: 0.7,
            glow_probability: 1.,
            glow_blur: 5.,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub size: Range<f64>,
    pub life: Range<u32>,
    pub trail_capacity: Range<usize>,
    pub gravity: f64,
    pub decay: f64,
    pub history_sampling: f64,
    pub style: ParticleStyle,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            size: 2.0..5.0,
            life: 70..130,
            trail_capacity: 15..35,
            gravity: 0.03,
            decay: 0.99,
            history_sampling: 1.,
            style: ParticleStyle::default(),
        }
    }
}

/// Shape of one burst kind. `size` and `trail_capacity` override the
/// per-particle defaults when set.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstProfile {
    pub count: Range<usize>,
    pub speed: Range<f64>,
    pub size: Option<Range<f64>>,
    pub trail_capacity: Option<Range<usize>>,
}

impl BurstProfile {
    pub fn standard() -> BurstProfile {
        BurstProfile {
            count: 8..14,
            speed: 4.0..8.0,
            size: None,
            trail_capacity: None,
        }
    }

    pub fn big() -> BurstProfile {
        BurstProfile {
            count: 16..24,
            speed: 5.0..12.0,
            size: Some(2.0..6.0),
            trail_capacity: Some(20..45),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnConfig {
    pub distance_threshold: f64,
    pub min_interval: Duration,
    pub standard: BurstProfile,
    pub big: BurstProfile,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 10.,
            min_interval: Duration::from_millis(80),
            standard: BurstProfile::standard(),
            big: BurstProfile::big(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub pointer: PointerConfig,
    pub trail: TrailConfig,
    pub particle: ParticleConfig,
    pub spawn: SpawnConfig,
    pub fade_alpha: f64,
    pub particle_cap: usize,
    pub seed: Option<u64>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            pointer: PointerConfig::default(),
            trail: TrailConfig::default(),
            particle: ParticleConfig::default(),
            spawn: SpawnConfig::default(),
            fade_alpha: 0.015,
            particle_cap: 200,
            seed: None,
        }
    }
}

fn check_range_f64(field: &'static str, range: &Range<f64>) -> Result<(), ConfigError> {
    if !(range.start.is_finite() && range.end.is_finite()) || !(range.start < range.end) {
        return Err(ConfigError::EmptyRange {
            field,
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}

fn check_range<T: Copy + PartialOrd + Into<f64>>(
    field: &'static str,
    range: &Range<T>,
) -> Result<(), ConfigError> {
    if range.start >= range.end {
        return Err(ConfigError::EmptyRange {
            field,
            start: range.start.into(),
            end: range.end.into(),
        });
    }
    Ok(())
}

fn check_usize_range(field: &'static str, range: &Range<usize>) -> Result<(), ConfigError> {
    if range.start >= range.end {
        return Err(ConfigError::EmptyRange {
            field,
            start: range.start as f64,
            end: range.end as f64,
        });
    }
    Ok(())
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0. ..=1.).contains(&value) {
        return Err(ConfigError::Probability { field, value });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0. {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    Ok(())
}

fn check_profile(
    count: &'static str,
    speed: &'static str,
    size: &'static str,
    capacity: &'static str,
    profile: &BurstProfile,
) -> Result<(), ConfigError> {
    check_usize_range(count, &profile.count)?;
    check_range_f64(speed, &profile.speed)?;
    if let Some(range) = &profile.size {
        check_range_f64(size, range)?;
    }
    if let Some(range) = &profile.trail_capacity {
        check_usize_range(capacity, range)?;
        if range.start == 0 {
            return Err(ConfigError::ZeroTrailCapacity(capacity));
        }
    }
    Ok(())
}

impl EffectConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pointer = &self.pointer;
        check_positive("pointer.radius", pointer.radius)?;
        if !(pointer.smoothing > 0. && pointer.smoothing <= 1.) {
            return Err(ConfigError::Smoothing(pointer.smoothing));
        }
        check_finite("pointer.glow_blur", pointer.glow_blur)?;

        let trail = &self.trail;
        if trail.max_age == 0 {
            return Err(ConfigError::ZeroMaxAge);
        }
        check_probability("trail.spawn_probability", trail.spawn_probability)?;
        check_probability("trail.shrink", trail.shrink)?;
        check_probability("trail.edge_opacity", trail.edge_opacity)?;

        let particle = &self.particle;
        check_range_f64("particle.size", &particle.size)?;
        check_range("particle.life", &particle.life)?;
        if particle.life.start == 0 {
            return Err(ConfigError::EmptyRange {
                field: "particle.life",
                start: 0.,
                end: particle.life.end as f64,
            });
        }
        check_usize_range("particle.trail_capacity", &particle.trail_capacity)?;
        if particle.trail_capacity.start == 0 {
            return Err(ConfigError::ZeroTrailCapacity("particle.trail_capacity"));
        }
        check_finite("particle.gravity", particle.gravity)?;
        check_probability("particle.decay", particle.decay)?;
        check_probability("particle.history_sampling", particle.history_sampling)?;
        if particle.style.trail_segments == 0 {
            return Err(ConfigError::NotPositive {
                field: "particle.style.trail_segments",
                value: 0.,
            });
        }
        check_probability("particle.style.tail_floor", particle.style.tail_floor)?;
        check_finite("particle.style.glow_threshold", particle.style.glow_threshold)?;
        check_probability(
            "particle.style.glow_probability",
            particle.style.glow_probability,
        )?;
        check_finite("particle.style.glow_blur", particle.style.glow_blur)?;

        let spawn = &self.spawn;
        check_finite("spawn.distance_threshold", spawn.distance_threshold)?;
        check_profile(
            "spawn.standard.count",
            "spawn.standard.speed",
            "spawn.standard.size",
            "spawn.standard.trail_capacity",
            &spawn.standard,
        )?;
        check_profile(
            "spawn.big.count",
            "spawn.big.speed",
            "spawn.big.size",
            "spawn.big.trail_capacity",
            &spawn.big,
        )?;

        check_probability("fade_alpha", self.fade_alpha)?;
        Ok(())
    }
}
