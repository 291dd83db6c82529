use nalgebra::Vector2;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PAN_THRESHOLD: f64 = 8.;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    #[error("pointer coordinates ({x}, {y}) are not finite")]
    NonFinite { x: f64, y: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    Move,
    PressEnd,
    Tap,
}

/// A normalized pointer event in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    kind: InputKind,
    position: Vector2<f64>,
    timestamp: Duration,
}

impl InputEvent {
    pub fn new(kind: InputKind, x: f64, y: f64, timestamp: Duration) -> Result<InputEvent, InputError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(InputError::NonFinite { x, y });
        }
        Ok(InputEvent {
            kind,
            position: Vector2::new(x, y),
            timestamp,
        })
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Touch {
    finger: i64,
    start: Vector2<f64>,
    panning: bool,
}

/// Turns raw finger events into move/press-end/tap. Only the first finger
/// down is tracked until it lifts.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureRecognizer {
    pan_threshold: f64,
    active: Option<Touch>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        GestureRecognizer::new(DEFAULT_PAN_THRESHOLD)
    }
}

impl GestureRecognizer {
    pub fn new(pan_threshold: f64) -> GestureRecognizer {
        GestureRecognizer {
            pan_threshold,
            active: None,
        }
    }

    pub fn touch_down(&mut self, finger: i64, position: Vector2<f64>) {
        if self.active.is_none() {
            self.active = Some(Touch {
                finger,
                start: position,
                panning: false,
            });
        }
    }

    pub fn touch_move(&mut self, finger: i64, position: Vector2<f64>) -> Option<InputKind> {
        let touch = self.active.as_mut().filter(|touch| touch.finger == finger)?;
        if !touch.panning && (position - touch.start).norm() > self.pan_threshold {
            touch.panning = true;
        }
        if touch.panning {
            Some(InputKind::Move)
        } else {
            None
        }
    }

    pub fn touch_up(&mut self, finger: i64) -> Option<InputKind> {
        match self.active {
            Some(touch) if touch.finger == finger => {
                self.active = None;
                if touch.panning {
                    Some(InputKind::PressEnd)
                } else {
                    Some(InputKind::Tap)
                }
            }
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        self.active.map_or(false, |touch| touch.panning)
    }
}
