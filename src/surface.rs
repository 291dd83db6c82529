//! The drawing-surface contract the simulation renders through, plus a
//! [`Recorder`] that keeps every call as a [`DrawCommand`].
use crate::palette::Rgba;
use nalgebra::Vector2;

#[derive(Clone, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Radial gradient centered on the shape it fills. Offsets run from the
/// center (0) to the edge (1) and must be ascending.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(stops: &[(f64, Rgba)]) -> RadialGradient {
        RadialGradient {
            stops: stops
                .iter()
                .map(|&(offset, color)| ColorStop { offset, color })
                .collect(),
        }
    }

    /// Color at normalized distance `t` from the center.
    pub fn color_at(&self, t: f64) -> Option<Rgba> {
        let first = self.stops.first()?;
        if t <= first.offset {
            return Some(first.color);
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                if span <= 0. {
                    return Some(hi.color);
                }
                return Some(lo.color.lerp(&hi.color, (t - lo.offset) / span));
            }
        }
        self.stops.last().map(|stop| stop.color)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Radial(RadialGradient),
}

/// Shadow-style halo drawn around subsequent shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub color: Rgba,
}

pub trait Surface {
    fn fill_rect(&mut self, origin: Vector2<f64>, size: Vector2<f64>, color: Rgba);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, paint: &Paint);
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Rgba);
    fn stroke_circle(&mut self, center: Vector2<f64>, radius: f64, width: f64, color: Rgba);
    fn set_glow(&mut self, glow: Option<Glow>);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Vector2<f64>,
        size: Vector2<f64>,
        color: Rgba,
    },
    FillCircle {
        center: Vector2<f64>,
        radius: f64,
        paint: Paint,
        glow: Option<Glow>,
    },
    StrokeLine {
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: Vector2<f64>,
        radius: f64,
        width: f64,
        color: Rgba,
        glow: Option<Glow>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
    glow: Option<Glow>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn glow(&self) -> Option<Glow> {
        self.glow
    }
}

impl Surface for Recorder {
    fn fill_rect(&mut self, origin: Vector2<f64>, size: Vector2<f64>, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
            glow: self.glow,
        });
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vector2<f64>, radius: f64, width: f64, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
            glow: self.glow,
        });
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }
}
