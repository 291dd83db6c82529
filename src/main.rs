extern crate sdl2;

use log::{info, warn, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use nalgebra::Vector2;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sparks::{
    clock::FrameClock,
    input::GestureRecognizer,
    render::{self, CanvasSurface, DisplayConfig, HostError, TOUCH_MOUSE_ID},
    EffectConfig, InputEvent, InputKind, Simulation, Viewport,
};
use std::time::Duration;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 800;

fn init_logging() -> Result<log4rs::Handle, HostError> {
    let level = std::env::var("SPARKS_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    Ok(log4rs::init_config(config)?)
}

fn effect_config() -> EffectConfig {
    let seed = std::env::var("SPARKS_SEED")
        .ok()
        .and_then(|seed| seed.parse::<u64>().ok());
    EffectConfig {
        seed,
        ..EffectConfig::default()
    }
}

fn dispatch(simulation: &mut Simulation, kind: InputKind, x: f64, y: f64, now: Duration) {
    match InputEvent::new(kind, x, y, now) {
        Ok(event) => simulation.handle(event),
        Err(err) => warn!("Dropped input: {}", err),
    }
}

/// Finger coordinates arrive normalized to the window.
fn finger_position(x: f32, y: f32, viewport: Viewport) -> Vector2<f64> {
    Vector2::new(
        x as f64 * viewport.width as f64,
        y as f64 * viewport.height as f64,
    )
}

pub fn main() -> Result<(), HostError> {
    init_logging()?;

    // Setup.
    let mut graphics = render::init_graphics(&DisplayConfig {
        width: WIDTH,
        height: HEIGHT,
        vsync: true,
    })?;
    let mut event_pump = graphics.sdl_context.event_pump().map_err(HostError::Sdl)?;
    let mut viewport = Viewport {
        width: WIDTH,
        height: HEIGHT,
    };
    let mut simulation = Simulation::new(effect_config(), viewport)?;

    let texture_creator = graphics.canvas.texture_creator();
    let mut target = render::create_target(&texture_creator, viewport)?;
    graphics
        .canvas
        .with_texture_canvas(&mut target, |canvas| render::clear(canvas))?;

    let mut clock = FrameClock::default();
    let mut gestures = GestureRecognizer::default();

    'running: loop {
        for event in event_pump.poll_iter() {
            let now = clock.now();
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(width, height),
                    ..
                } => {
                    viewport = Viewport {
                        width: width.max(1) as u32,
                        height: height.max(1) as u32,
                    };
                    simulation.resize(viewport);
                    target = render::create_target(&texture_creator, viewport)?;
                    graphics
                        .canvas
                        .with_texture_canvas(&mut target, |canvas| render::clear(canvas))?;
                }
                Event::MouseMotion { which, x, y, .. } if which != TOUCH_MOUSE_ID => {
                    dispatch(&mut simulation, InputKind::Move, x as f64, y as f64, now);
                }
                Event::MouseButtonUp {
                    which,
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } if which != TOUCH_MOUSE_ID => {
                    dispatch(&mut simulation, InputKind::Tap, x as f64, y as f64, now);
                }
                Event::FingerDown {
                    finger_id, x, y, ..
                } => {
                    gestures.touch_down(finger_id, finger_position(x, y, viewport));
                }
                Event::FingerMotion {
                    finger_id, x, y, ..
                } => {
                    let position = finger_position(x, y, viewport);
                    if let Some(kind) = gestures.touch_move(finger_id, position) {
                        dispatch(&mut simulation, kind, position.x, position.y, now);
                    }
                }
                Event::FingerUp {
                    finger_id, x, y, ..
                } => {
                    let position = finger_position(x, y, viewport);
                    if let Some(kind) = gestures.touch_up(finger_id) {
                        dispatch(&mut simulation, kind, position.x, position.y, now);
                    }
                }
                _ => {}
            }
        }

        if clock.take_request() {
            let now = clock.now();
            graphics.canvas.with_texture_canvas(&mut target, |canvas| {
                let mut surface = CanvasSurface::new(canvas);
                simulation.step(&mut surface, &mut clock, now);
            })?;
            graphics
                .canvas
                .copy(&target, None, None)
                .map_err(HostError::Sdl)?;
            graphics.canvas.present();
        }
        clock.pace();
    }

    info!("Stopped after {} frames", simulation.frame());
    Ok(())
}
