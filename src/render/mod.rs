use crate::{
    config::ConfigError,
    palette::{Rgba, BACKGROUND},
    simulation::Viewport,
    surface::{Glow, Paint, Surface},
};
use log::debug;
use nalgebra::Vector2;
use sdl2::{
    gfx::primitives::DrawRenderer,
    pixels::Color,
    rect::Rect,
    render::{
        BlendMode, Canvas, RenderTarget, TargetRenderError, Texture, TextureCreator,
        TextureValueError,
    },
    video::{Window, WindowBuildError, WindowContext},
    IntegerOrSdlError,
};
use thiserror::Error;

/// `which` of mouse events SDL synthesizes from touch input.
pub const TOUCH_MOUSE_ID: u32 = u32::MAX;

const GLOW_LAYERS: u32 = 3;
const MAX_GRADIENT_RINGS: u32 = 16;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("SDL: {0}")]
    Sdl(String),
    #[error(transparent)]
    Window(#[from] WindowBuildError),
    #[error(transparent)]
    Canvas(#[from] IntegerOrSdlError),
    #[error(transparent)]
    Texture(#[from] TextureValueError),
    #[error(transparent)]
    RenderTarget(#[from] TargetRenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    LogConfig(#[from] log4rs::config::runtime::ConfigErrors),
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

pub struct Graphics {
    pub sdl_context: sdl2::Sdl,
    pub canvas: Canvas<Window>,
}

pub fn init_graphics(display_config: &DisplayConfig) -> Result<Graphics, HostError> {
    let sdl_context = sdl2::init().map_err(HostError::Sdl)?;
    let video_subsystem = sdl_context.video().map_err(HostError::Sdl)?;

    let window = video_subsystem
        .window("Sparks", display_config.width, display_config.height)
        .position_centered()
        .resizable()
        .build()?;

    let mut builder = window.into_canvas().accelerated().target_texture();
    if display_config.vsync {
        builder = builder.present_vsync();
    }
    let mut canvas = builder.build()?;
    canvas.set_blend_mode(BlendMode::Blend);

    Ok(Graphics {
        sdl_context,
        canvas,
    })
}

/// Offscreen texture the effect accumulates into; the fade overlay only
/// leaves trails if frames are drawn over the previous one.
pub fn create_target(
    texture_creator: &TextureCreator<WindowContext>,
    viewport: Viewport,
) -> Result<Texture<'_>, HostError> {
    let mut texture =
        texture_creator.create_texture_target(None, viewport.width.max(1), viewport.height.max(1))?;
    texture.set_blend_mode(BlendMode::None);
    Ok(texture)
}

pub fn clear<T: RenderTarget>(canvas: &mut Canvas<T>) {
    canvas.set_draw_color(to_sdl(BACKGROUND.opaque()));
    canvas.clear();
}

fn to_sdl(color: Rgba) -> Color {
    Color::RGBA(color.r, color.g, color.b, color.alpha_byte())
}

/// Rounds to pixels; out of range values saturate and get clipped.
fn px(v: f64) -> i16 {
    v.round() as i16
}

fn report(result: Result<(), String>) {
    if let Err(err) = result {
        debug!("Draw call failed: {}", err);
    }
}

pub struct CanvasSurface<'a, T: RenderTarget> {
    canvas: &'a mut Canvas<T>,
    glow: Option<Glow>,
}

impl<'a, T: RenderTarget> CanvasSurface<'a, T> {
    pub fn new(canvas: &'a mut Canvas<T>) -> CanvasSurface<'a, T> {
        canvas.set_blend_mode(BlendMode::Blend);
        CanvasSurface { canvas, glow: None }
    }

    fn halo(&mut self, center: Vector2<f64>, radius: f64) {
        if let Some(glow) = self.glow {
            if glow.blur <= 0. {
                return;
            }
            for layer in (1..=GLOW_LAYERS).rev() {
                let spread = glow.blur * layer as f64 / GLOW_LAYERS as f64;
                let color = glow.color.color().with_alpha(glow.color.a * 0.15);
                report(self.canvas.filled_circle(
                    px(center.x),
                    px(center.y),
                    px(radius + spread),
                    to_sdl(color),
                ));
            }
        }
    }
}

impl<'a, T: RenderTarget> Surface for CanvasSurface<'a, T> {
    fn fill_rect(&mut self, origin: Vector2<f64>, size: Vector2<f64>, color: Rgba) {
        self.canvas.set_draw_color(to_sdl(color));
        let rect = Rect::new(
            origin.x.round() as i32,
            origin.y.round() as i32,
            size.x.max(0.).round() as u32,
            size.y.max(0.).round() as u32,
        );
        report(self.canvas.fill_rect(rect));
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, paint: &Paint) {
        self.halo(center, radius);
        match paint {
            Paint::Solid(color) => report(self.canvas.filled_circle(
                px(center.x),
                px(center.y),
                px(radius),
                to_sdl(*color),
            )),
            Paint::Radial(gradient) => {
                // Concentric rings from the edge inwards.
                let rings = (radius.ceil() as u32).max(1).min(MAX_GRADIENT_RINGS);
                for ring in (1..=rings).rev() {
                    let t = ring as f64 / rings as f64;
                    if let Some(color) = gradient.color_at(t) {
                        report(self.canvas.filled_circle(
                            px(center.x),
                            px(center.y),
                            px(radius * t),
                            to_sdl(color),
                        ));
                    }
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Rgba) {
        let width = width.round().max(1.).min(255.) as u8;
        report(self.canvas.thick_line(
            px(from.x),
            px(from.y),
            px(to.x),
            px(to.y),
            width,
            to_sdl(color),
        ));
    }

    fn stroke_circle(&mut self, center: Vector2<f64>, radius: f64, width: f64, color: Rgba) {
        self.halo(center, radius);
        let rings = width.round().max(1.) as i16;
        for offset in 0..rings {
            report(self.canvas.aa_circle(
                px(center.x),
                px(center.y),
                px(radius).saturating_add(offset),
                to_sdl(color),
            ));
        }
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }
}
