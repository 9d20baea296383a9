//! Type definitions for the live clustering engine
//! Includes the 2-D point record, display colors and the distance metric
//! shared by initialization and reassignment

use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Default factor used by [`Color::darker`]
pub const DARKER_PERCENT: f64 = 0.7;

/// RGB display color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pick every component uniformly in 0..=255
    pub fn random<R: RngExt + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random_range(0..=255),
            g: rng.random_range(0..=255),
            b: rng.random_range(0..=255),
        }
    }

    /// Scale every component by `percent` (clamped to 0.0..=1.0)
    pub fn darker(&self, percent: f64) -> Self {
        let percent = percent.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * percent).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// `#rrggbb` form, as expected by svg plotting
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A labeled 2-D point
///
/// `color` is only a display hint: it holds the color of the cluster the point
/// was last assigned to and is never read by the algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

impl Point {
    pub fn new(x: f64, y: f64, color: Color) -> Self {
        Self { x, y, color }
    }

    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y, color: BLACK }
    }
}

impl From<(f64, f64, Color)> for Point {
    fn from((x, y, color): (f64, f64, Color)) -> Self {
        Self { x, y, color }
    }
}

/// Euclidean distance in the plane
///
/// Every "nearest" comparison in the crate goes through this function.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert_eq!(distance((1.5, -2.0), (1.5, -2.0)), 0.0);
        assert_eq!(distance((3.0, 4.0), (0.0, 0.0)), distance((0.0, 0.0), (3.0, 4.0)));
    }

    #[test]
    fn darker_scales_components() {
        let c = Color::new(200, 100, 10);
        assert_eq!(c.darker(DARKER_PERCENT), Color::new(140, 70, 7));
        assert_eq!(c.darker(2.0), c);
        assert_eq!(c.darker(0.0), BLACK);
    }

    #[test]
    fn hex_form() {
        let c = Color::new(255, 0, 16);
        assert_eq!(c.to_hex(), "#ff0010");
        assert_eq!(c.darker(DARKER_PERCENT).to_hex(), "#b3000b");
    }

    #[test]
    fn random_color_follows_seed() {
        let mut rng1 = ChaChaRng::seed_from_u64(55);
        let mut rng2 = ChaChaRng::seed_from_u64(55);
        assert_eq!(Color::random(&mut rng1), Color::random(&mut rng2));
    }

    #[test]
    fn point_from_tuple_is_black() {
        let p: Point = (1.0, 2.0).into();
        assert_eq!(p.color, BLACK);
        assert_eq!(p.xy(), (1.0, 2.0));
    }
}
