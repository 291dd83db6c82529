use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color with straight (non-premultiplied) alpha in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: if alpha.is_nan() { 0. } else { alpha.clamp(0., 1.) },
        }
    }

    pub fn opaque(self) -> Rgba {
        self.with_alpha(1.)
    }
}

impl Rgba {
    pub fn color(&self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }

    pub fn alpha_byte(&self) -> u8 {
        (self.a * 255.).round() as u8
    }

    /// Component-wise interpolation, `t` = 0 gives `self`.
    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        let t = t.clamp(0., 1.);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

pub const PALETTE: [Color; 5] = [
    Color::rgb(0xd4, 0xaf, 0x37),
    Color::rgb(0xff, 0xd7, 0x00),
    Color::rgb(0xf0, 0xe6, 0x8c),
    Color::rgb(0xda, 0xa5, 0x20),
    Color::rgb(0xb8, 0x86, 0x0b),
];

pub const PRIMARY: Color = PALETTE[0];
pub const HIGHLIGHT: Color = PALETTE[1];
pub const BACKGROUND: Color = Color::rgb(0, 0, 0);

pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Color {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(PRIMARY.with_alpha(1.7).a, 1.);
        assert_eq!(PRIMARY.with_alpha(-0.2).a, 0.);
        assert_eq!(PRIMARY.with_alpha(f64::NAN).a, 0.);
        assert_eq!(PRIMARY.with_alpha(0.5).alpha_byte(), 128);
    }

    #[test]
    fn lerp_endpoints() {
        let a = PRIMARY.with_alpha(1.);
        let b = HIGHLIGHT.with_alpha(0.);
        assert_eq!(a.lerp(&b, 0.), a);
        assert_eq!(a.lerp(&b, 1.), b);
        assert!((a.lerp(&b, 0.5).a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn pick_stays_in_palette() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..100 {
            assert!(PALETTE.contains(&pick(&mut rng)));
        }
    }
}
