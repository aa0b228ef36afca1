//! Twinkling starfield.
//!
//! This module provides [`Starfield`], a fixed set of stars scattered high above the maze. Each
//! star is drawn as a small emissive cube whose brightness oscillates with elapsed time.

use rand::Rng;

use crate::math::Mat4;
use crate::renderer::vertex::Instance;

/// Default number of stars.
pub const STAR_COUNT: usize = 2000;

/// Horizontal half-extent of the field.
const FIELD_HALF_WIDTH: f32 = 500.0;
/// Height band the stars occupy.
const FIELD_HEIGHT: std::ops::Range<f32> = 100.0..500.0;

/// Represents a single star in the starfield.
#[derive(Debug, Clone, Copy)]
struct Star {
    /// World position.
    position: [f32; 3],
    /// Edge length of the star's cube.
    size: f32,
    /// Brightness multiplier (0.0 = dim, 1.0 = bright).
    brightness: f32,
    /// Twinkle phase offset in radians.
    phase: f32,
    /// Twinkle angular speed in radians per second.
    rate: f32,
}

/// A fixed field of stars.
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Scatters `count` stars over the sky.
    ///
    /// # Arguments
    /// - `count`: Number of stars to generate.
    /// - `rng`: Random source for placement and twinkle.
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                position: [
                    rng.gen_range(-FIELD_HALF_WIDTH..FIELD_HALF_WIDTH),
                    rng.gen_range(FIELD_HEIGHT),
                    rng.gen_range(-FIELD_HALF_WIDTH..FIELD_HALF_WIDTH),
                ],
                size: rng.gen_range(0.8..2.0),
                brightness: rng.gen_range(0.3..1.0),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                rate: rng.gen_range(0.5..3.0),
            })
            .collect();
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Emissive instances for every star at time `elapsed`.
    pub fn instances(&self, elapsed: f32) -> impl Iterator<Item = Instance> + '_ {
        self.stars.iter().map(move |star| {
            let twinkle = 0.65 + 0.35 * (elapsed * star.rate + star.phase).sin();
            let level = (star.brightness * twinkle).clamp(0.0, 1.0);
            let [x, y, z] = star.position;
            let model = Mat4::translation(x, y, z)
                .multiply(&Mat4::scaling(star.size, star.size, star.size));
            Instance::emissive(model, [level, level, level * 0.95 + 0.05])
        })
    }
}
