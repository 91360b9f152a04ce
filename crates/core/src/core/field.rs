//! Vortex particle field.
//!
//! The field is a static point cloud laid along a 20-turn spiral tube. It is
//! generated once; every frame each point's apparent position is recomputed
//! from its base attributes and the elapsed time, so stored particles are
//! never mutated after generation.

use std::f32::consts::TAU;

use crate::prng::Prng;

/// Population used by the landing page.
pub const DEFAULT_PARTICLE_COUNT: usize = 25_000;

/// Full revolutions covered by the spiral parameter.
pub const SPIRAL_TURNS: f32 = 20.0;
pub const INNER_RADIUS: f32 = 0.6;
pub const RADIUS_SPAN: f32 = 2.2;
/// Total extent along the depth axis, centred on the origin.
pub const DEPTH_SPAN: f32 = 5.0;

pub const SIZE_MIN: f32 = 0.03;
pub const SIZE_MAX: f32 = 0.07;
pub const OPACITY_MIN: f32 = 0.4;
pub const OPACITY_MAX: f32 = 1.0;

/// One point of the field, immutable after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Planar distance from the spiral axis.
    pub radius: f32,
    /// Spiral angle in radians (unwrapped, up to 20 turns).
    pub angle: f32,
    /// Base position `(radius·cos a, radius·sin a, z)`.
    pub position: [f32; 3],
    /// World-space sprite size, scaled by perspective at draw time.
    pub size: f32,
    pub opacity: f32,
    /// Stable index; only varies animation phase, never placement.
    pub index: u32,
}

impl Particle {
    /// Build particle `index` of a population of `count`.
    ///
    /// Placement depends only on `t = index / count`; size and opacity are
    /// drawn from `rng`.
    pub fn at(index: usize, count: usize, rng: &mut Prng) -> Self {
        let t = if count == 0 {
            0.0
        } else {
            (index as f64 / count as f64) as f32
        };
        let angle = t * SPIRAL_TURNS * TAU;
        let radius = INNER_RADIUS + RADIUS_SPAN * t;
        let z = (t - 0.5) * DEPTH_SPAN;

        let size = rng.gen_range_f32(SIZE_MIN, SIZE_MAX);
        let opacity = rng.gen_range_f32(OPACITY_MIN, OPACITY_MAX);

        Self {
            radius,
            angle,
            position: [radius * angle.cos(), radius * angle.sin(), z],
            size,
            opacity,
            index: index as u32,
        }
    }

    /// Apparent position at elapsed time `time` (seconds).
    pub fn deformed(&self, time: f32) -> [f32; 3] {
        let [x, y, z] = self.position;

        let twist = y * twist_amount(time);
        let r = (x * x + y * y).sqrt() * breathe(time);
        let theta = y.atan2(x) + twist;

        [
            r * theta.cos(),
            r * theta.sin(),
            z + axial_jitter(time, self.index),
        ]
    }
}

/// Per-particle angular speed, cycling in bands of 1000 indices.
///
/// Always in `[0.2, 0.4)`. The vortex shader computes it but the deformed
/// position does not depend on it.
#[inline]
pub fn angular_speed(index: u32) -> f32 {
    let q = index as f32 / 1000.0;
    0.2 + 0.2 * (q - q.floor())
}

/// Shear factor applied per unit of base height; in `[-0.5, 0.5]`.
#[inline]
pub fn twist_amount(time: f32) -> f32 {
    (time * 0.3).sin() * 0.5
}

/// Global radial pulse; in `[0.9, 1.1]`.
#[inline]
pub fn breathe(time: f32) -> f32 {
    1.0 + (time * 0.5).sin() * 0.1
}

/// Depth offset travelling along the spiral by index; in `[-0.2, 0.2]`.
#[inline]
pub fn axial_jitter(time: f32, index: u32) -> f32 {
    (time * 0.2 + index as f32 * 0.01).sin() * 0.2
}

/// Fixed population of particles for one view instance.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = Prng::new(seed);
        let particles = (0..count)
            .map(|i| Particle::at(i, count, &mut rng))
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Write every particle's deformed position into `out`, in index order.
    pub fn deform_into(&self, time: f32, out: &mut Vec<[f32; 3]>) {
        out.clear();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            out.par_extend(self.particles.par_iter().map(|p| p.deformed(time)));
        }

        #[cfg(not(feature = "parallel"))]
        out.extend(self.particles.iter().map(|p| p.deformed(time)));
    }

    /// Drop particle storage. The field is empty afterwards.
    pub fn release(&mut self) {
        self.particles = Vec::new();
    }
}
