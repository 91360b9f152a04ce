//! Confetti burst played after a signup.
//!
//! Tick-based physics in overlay pixels: every piece launches from the origin
//! inside a cone, decays its velocity, falls, wobbles and fades out linearly
//! over its lifetime. The host draws each live piece as a small tilted quad.

use std::f32::consts::PI;

use crate::prng::Prng;
use crate::waitlist::Celebration;

pub const PALETTE: [&str; 7] = [
    "#26ccff", "#a25afd", "#ff5e7e", "#88ff5a", "#fcff42", "#ffa62d", "#ff36ff",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstOptions {
    pub particle_count: u32,
    /// Launch direction in degrees, 90 = straight up.
    pub angle: f32,
    /// Cone width in degrees.
    pub spread: f32,
    pub start_velocity: f32,
    pub decay: f32,
    pub gravity: f32,
    pub drift: f32,
    /// Lifetime in ticks.
    pub ticks: u32,
    /// Origin as fractions of the overlay size.
    pub origin: (f32, f32),
    pub scalar: f32,
}

impl Default for BurstOptions {
    fn default() -> Self {
        Self {
            particle_count: 50,
            angle: 90.0,
            spread: 45.0,
            start_velocity: 45.0,
            decay: 0.9,
            gravity: 1.0,
            drift: 0.0,
            ticks: 200,
            origin: (0.5, 0.5),
            scalar: 1.0,
        }
    }
}

impl From<Celebration> for BurstOptions {
    fn from(c: Celebration) -> Self {
        Self {
            particle_count: c.particle_count,
            spread: c.spread,
            origin: c.origin,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Piece {
    pub x: f32,
    pub y: f32,
    pub wobble_x: f32,
    pub wobble_y: f32,
    pub color: &'static str,
    angle_2d: f32,
    velocity: f32,
    decay: f32,
    gravity: f32,
    drift: f32,
    wobble: f32,
    wobble_speed: f32,
    tilt_angle: f32,
    tilt_sin: f32,
    tilt_cos: f32,
    random: f32,
    scalar: f32,
    tick: u32,
    total_ticks: u32,
}

impl Piece {
    fn launch(opts: &BurstOptions, x: f32, y: f32, color: &'static str, rng: &mut Prng) -> Self {
        let rad_angle = opts.angle.to_radians();
        let rad_spread = opts.spread.to_radians();
        let tilt_angle = (rng.next_f32_01() * 0.5 + 0.25) * PI;

        Self {
            x,
            y,
            wobble_x: x,
            wobble_y: y,
            color,
            angle_2d: -rad_angle + (0.5 * rad_spread - rng.next_f32_01() * rad_spread),
            velocity: opts.start_velocity * 0.5 + rng.next_f32_01() * opts.start_velocity,
            decay: opts.decay,
            gravity: opts.gravity * 3.0,
            drift: opts.drift,
            wobble: rng.next_f32_01() * 10.0,
            wobble_speed: (rng.next_f32_01() * 0.1 + 0.05).min(0.11),
            tilt_angle,
            tilt_sin: tilt_angle.sin(),
            tilt_cos: tilt_angle.cos(),
            random: rng.next_f32_01() + 2.0,
            scalar: opts.scalar,
            tick: 0,
            total_ticks: opts.ticks,
        }
    }

    /// Advance one tick. Returns `false` once the piece has expired.
    fn step(&mut self, rng: &mut Prng) -> bool {
        self.x += self.angle_2d.cos() * self.velocity + self.drift;
        self.y += self.angle_2d.sin() * self.velocity + self.gravity;
        self.velocity *= self.decay;

        self.wobble += self.wobble_speed;
        self.wobble_x = self.x + 10.0 * self.scalar * self.wobble.cos();
        self.wobble_y = self.y + 10.0 * self.scalar * self.wobble.sin();

        self.tilt_angle += 0.1;
        self.tilt_sin = self.tilt_angle.sin();
        self.tilt_cos = self.tilt_angle.cos();
        self.random = rng.next_f32_01() + 2.0;

        self.tick += 1;
        self.tick < self.total_ticks
    }

    /// Linear fade over the lifetime.
    pub fn opacity(&self) -> f32 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        1.0 - self.tick as f32 / self.total_ticks as f32
    }

    /// Corners of the tilted quad to fill, in overlay pixels.
    pub fn quad(&self) -> [(f32, f32); 4] {
        let x1 = self.x + self.random * self.tilt_cos;
        let y1 = self.y + self.random * self.tilt_sin;
        let x2 = self.wobble_x + self.random * self.tilt_cos;
        let y2 = self.wobble_y + self.random * self.tilt_sin;
        [
            (self.x.floor(), self.y.floor()),
            (self.wobble_x.floor(), y1.floor()),
            (x2.floor(), y2.floor()),
            (x1.floor(), self.wobble_y.floor()),
        ]
    }
}

/// A live burst. Finished pieces are dropped as they expire.
#[derive(Debug, Clone)]
pub struct Burst {
    pieces: Vec<Piece>,
    rng: Prng,
}

impl Burst {
    /// Launch a burst on an overlay of `width` x `height` pixels.
    pub fn launch(opts: BurstOptions, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Prng::new(seed);
        let x = opts.origin.0 * width;
        let y = opts.origin.1 * height;
        let pieces = (0..opts.particle_count)
            .map(|i| {
                let color = PALETTE[i as usize % PALETTE.len()];
                Piece::launch(&opts, x, y, color, &mut rng)
            })
            .collect();
        Self { pieces, rng }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn is_finished(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Merge another burst's pieces into this one (overlapping celebrations).
    pub fn absorb(&mut self, other: Burst) {
        self.pieces.extend(other.pieces);
    }

    pub fn step(&mut self) {
        let rng = &mut self.rng;
        self.pieces.retain_mut(|p| p.step(rng));
    }
}
