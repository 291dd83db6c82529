use crate::{
    config::TrailConfig,
    palette::Color,
    surface::{Paint, RadialGradient, Surface},
    Lifecycle,
};
use nalgebra::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: Vector2<f64>,
    pub age: u32,
    pub max_age: u32,
}

impl TrailPoint {
    pub fn new(position: Vector2<f64>, max_age: u32) -> TrailPoint {
        TrailPoint {
            position,
            age: 0,
            max_age,
        }
    }

    pub fn advance(&mut self) -> Lifecycle {
        self.age += 1;
        Lifecycle::from_alive(self.age < self.max_age)
    }

    pub fn age_ratio(&self) -> f64 {
        self.age as f64 / self.max_age as f64
    }

    pub fn render(
        &self,
        surface: &mut dyn Surface,
        base_radius: f64,
        color: Color,
        config: &TrailConfig,
    ) {
        let ratio = self.age_ratio();
        let opacity = 1. - ratio;
        let radius = base_radius * (1. - ratio * config.shrink);
        let gradient = RadialGradient::new(&[
            (0., color.with_alpha(opacity)),
            (1., color.with_alpha(opacity * config.edge_opacity)),
        ]);
        surface.fill_circle(self.position, radius, &Paint::Radial(gradient));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PRIMARY;
    use crate::surface::{DrawCommand, Recorder};

    #[test]
    fn dies_on_the_max_age_th_advance() {
        let mut point = TrailPoint::new(Vector2::new(3., 4.), 50);
        for _ in 0..49 {
            assert_eq!(point.advance(), Lifecycle::Alive);
        }
        assert_eq!(point.advance(), Lifecycle::Dead);
        assert_eq!(point.age, 50);
    }

    #[test]
    fn single_frame_point_dies_immediately() {
        let mut point = TrailPoint::new(Vector2::zeros(), 1);
        assert_eq!(point.advance(), Lifecycle::Dead);
    }

    #[test]
    fn render_fades_and_shrinks_with_age() {
        let config = TrailConfig::default();
        let mut point = TrailPoint::new(Vector2::new(10., 20.), 50);
        for _ in 0..25 {
            point.advance();
        }
        let mut recorder = Recorder::new();
        point.render(&mut recorder, 8., PRIMARY, &config);

        assert_eq!(recorder.commands.len(), 1);
        match &recorder.commands[0] {
            DrawCommand::FillCircle {
                center,
                radius,
                paint: Paint::Radial(gradient),
                ..
            } => {
                assert_eq!(*center, Vector2::new(10., 20.));
                // Half way through life: 1 - 0.5 * 0.8 of the base radius.
                assert!((radius - 4.8).abs() < 1e-9);
                assert!((gradient.stops[0].color.a - 0.5).abs() < 1e-9);
                assert!((gradient.stops[1].color.a - 0.25).abs() < 1e-9);
                assert_eq!(gradient.stops[0].color.color(), PRIMARY);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
