//! Software point-sprite renderer.
//!
//! Mirrors what the vortex shader does on the GPU: each particle becomes a
//! square sprite whose fragments outside a circle are discarded, and the rest
//! are alpha-blended (straight alpha, no depth writes) over an opaque
//! background in draw order.

use std::io::Write;

use crate::error::RenderError;

/// Page background, `#F0EEE6`.
pub const BACKGROUND: u32 = 0xF0EEE6;
/// Particle tint, `#333333`.
pub const PARTICLE_COLOR: u32 = 0x333333;
/// Fragments farther than this from the sprite centre (in sprite
/// coordinates, centre 0.5) are discarded.
pub const SPRITE_RADIUS: f32 = 0.475;

pub fn rgb(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

/// Whether a fragment at `offset` from the sprite centre survives.
#[inline]
pub fn keeps_fragment(offset: f32) -> bool {
    offset <= SPRITE_RADIUS
}

/// Sprite-coordinate test for a fragment at `(u, v)`.
#[inline]
pub fn sprite_covers(u: f32, v: f32) -> bool {
    let dx = u - 0.5;
    let dy = v - 0.5;
    keeps_fragment((dx * dx + dy * dy).sqrt())
}

/// Straight-alpha "over" for one channel.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: f32) -> u8 {
    let v = src as f32 * alpha + dst as f32 * (1.0 - alpha);
    v.round().clamp(0.0, 255.0) as u8
}

/// RGBA8 image, row-major, opaque background.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    background: [u8; 3],
    pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let mut fb = Self {
            width,
            height,
            background,
            pixels: vec![0; width as usize * height as usize * 4],
        };
        fb.clear();
        fb
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, suitable for a canvas `ImageData`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_released(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn clear(&mut self) {
        let [r, g, b] = self.background;
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, 255]);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height || self.is_released() {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 3], alpha: f32) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &mut self.pixels[i..i + 4];
        for c in 0..3 {
            px[c] = blend_channel(color[c], px[c], alpha);
        }
    }

    /// Draw a circular sprite of `diameter` pixels centred at `(cx, cy)`.
    ///
    /// A pixel is a candidate when its centre lies inside the sprite square;
    /// candidates outside the circle are discarded. Clipped to the buffer.
    pub fn draw_point(&mut self, cx: f32, cy: f32, diameter: f32, color: [u8; 3], alpha: f32) {
        if self.is_released() || diameter <= 0.0 || alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        let left = cx - diameter * 0.5;
        let top = cy - diameter * 0.5;

        let x0 = left.floor().max(0.0) as i64;
        let y0 = top.floor().max(0.0) as i64;
        let x1 = ((left + diameter).ceil() as i64).min(self.width as i64);
        let y1 = ((top + diameter).ceil() as i64).min(self.height as i64);

        for y in y0..y1 {
            let v = (y as f32 + 0.5 - top) / diameter;
            if !(0.0..1.0).contains(&v) {
                continue;
            }
            for x in x0..x1 {
                let u = (x as f32 + 0.5 - left) / diameter;
                if !(0.0..1.0).contains(&u) || !sprite_covers(u, v) {
                    continue;
                }
                self.blend_pixel(x as u32, y as u32, color, alpha);
            }
        }
    }

    /// Drop the pixel storage. Drawing afterwards is a no-op.
    pub fn release(&mut self) {
        self.pixels = Vec::new();
    }

    /// Write the image as binary PPM (alpha dropped).
    pub fn write_ppm<W: Write>(&self, mut out: W) -> Result<(), RenderError> {
        if self.is_released() {
            return Err(RenderError::Released);
        }
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for px in self.pixels.chunks_exact(4) {
            out.write_all(&px[..3])?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_boundary_is_inclusive() {
        assert!(keeps_fragment(0.475));
        assert!(keeps_fragment(0.2));
        assert!(!keeps_fragment(0.4751));
        assert!(!keeps_fragment(0.5));
    }

    #[test]
    fn sprite_is_round_not_square() {
        assert!(sprite_covers(0.5, 0.5));
        assert!(sprite_covers(0.5, 0.05));
        // Square corners are outside the circle.
        assert!(!sprite_covers(0.02, 0.02));
        assert!(!sprite_covers(0.98, 0.98));
    }

    #[test]
    fn opaque_point_writes_particle_color() {
        let mut fb = Framebuffer::new(8, 8, rgb(BACKGROUND));
        fb.draw_point(3.5, 3.5, 1.0, rgb(PARTICLE_COLOR), 1.0);
        assert_eq!(fb.pixel(3, 3), Some([0x33, 0x33, 0x33, 255]));
        assert_eq!(fb.pixel(0, 0), Some([0xF0, 0xEE, 0xE6, 255]));
    }

    #[test]
    fn transparent_point_leaves_background() {
        let mut fb = Framebuffer::new(4, 4, rgb(BACKGROUND));
        fb.draw_point(2.0, 2.0, 3.0, rgb(PARTICLE_COLOR), 0.0);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.pixel(x, y), Some([0xF0, 0xEE, 0xE6, 255]));
            }
        }
    }

    #[test]
    fn half_alpha_mixes_channels() {
        let mut fb = Framebuffer::new(2, 2, [200, 100, 0]);
        fb.draw_point(0.5, 0.5, 1.0, [0, 0, 200], 0.5);
        assert_eq!(fb.pixel(0, 0), Some([100, 50, 100, 255]));
    }

    #[test]
    fn large_sprite_skips_corners() {
        let mut fb = Framebuffer::new(10, 10, [255, 255, 255]);
        fb.draw_point(5.0, 5.0, 10.0, [0, 0, 0], 1.0);
        assert_eq!(fb.pixel(5, 5), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(9, 9), Some([255, 255, 255, 255]));
    }

    #[test]
    fn points_off_the_edge_are_clipped() {
        let mut fb = Framebuffer::new(4, 4, [255, 255, 255]);
        fb.draw_point(-10.0, -10.0, 3.0, [0, 0, 0], 1.0);
        fb.draw_point(0.0, 0.0, 2.0, [0, 0, 0], 1.0);
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(3, 3), Some([255, 255, 255, 255]));
    }

    #[test]
    fn released_buffer_ignores_draws() {
        let mut fb = Framebuffer::new(4, 4, [255, 255, 255]);
        fb.release();
        fb.draw_point(2.0, 2.0, 2.0, [0, 0, 0], 1.0);
        assert!(fb.is_released());
        assert_eq!(fb.pixel(1, 1), None);
        assert!(fb.write_ppm(Vec::new()).is_err());
    }

    #[test]
    fn ppm_header_and_payload() {
        let fb = Framebuffer::new(2, 1, [1, 2, 3]);
        let mut out = Vec::new();
        fb.write_ppm(&mut out).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[1, 2, 3, 1, 2, 3]);
    }
}
