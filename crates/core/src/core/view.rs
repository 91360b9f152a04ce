//! Mounted vortex view: field + camera + framebuffer + clock.
//!
//! A host (the browser frame loop, the preview binary) mounts a view, asks it
//! for a frame on every tick, and unmounts it on teardown. After unmount the
//! view holds no particle or pixel storage and refuses to render, which is
//! how the host loop knows to stop scheduling frames.

use tracing::debug;

use crate::camera::{point_diameter, OrbitCamera};
use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::raster::{rgb, Framebuffer};

// `std::time::Instant::now()` panics on `wasm32-unknown-unknown`; `web-time`
// is backed by `performance.now()` there.
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Monotonic elapsed time since mount.
#[derive(Debug, Clone)]
pub struct RenderClock {
    start: Instant,
}

impl RenderClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for RenderClock {
    fn default() -> Self {
        Self::start()
    }
}

pub struct VortexView {
    config: FieldConfig,
    field: ParticleField,
    camera: OrbitCamera,
    framebuffer: Framebuffer,
    positions: Vec<[f32; 3]>,
    clock: RenderClock,
    mounted: bool,
}

impl VortexView {
    /// Build the scene once and start the clock.
    ///
    /// The config is validated first; the viewport bound keeps the pixel
    /// buffer size within `usize` on 32-bit targets.
    pub fn mount(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = ParticleField::generate(config.particle_count, config.seed);
        let camera = OrbitCamera::new(config.camera_distance);
        let framebuffer = Framebuffer::new(config.viewport, config.viewport, rgb(config.background));
        debug!(
            particles = field.len(),
            viewport = config.viewport,
            "vortex view mounted"
        );

        Ok(Self {
            positions: Vec::with_capacity(field.len()),
            config,
            field,
            camera,
            framebuffer,
            clock: RenderClock::start(),
            mounted: true,
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn clock(&self) -> &RenderClock {
        &self.clock
    }

    /// Render at the clock's current elapsed time.
    pub fn frame(&mut self) -> Option<&Framebuffer> {
        let t = self.clock.elapsed_secs();
        self.frame_at(t)
    }

    /// Render at an explicit elapsed time (seconds). `None` once unmounted.
    pub fn frame_at(&mut self, time: f32) -> Option<&Framebuffer> {
        if !self.mounted {
            return None;
        }

        self.camera.update(time);
        self.field.deform_into(time, &mut self.positions);
        self.framebuffer.clear();

        let viewport = self.config.viewport;
        let color = rgb(self.config.particle_color);
        for (p, pos) in self.field.particles().iter().zip(&self.positions) {
            let Some(proj) = self.camera.project(*pos, viewport) else {
                continue;
            };
            let d = point_diameter(p.size, proj.depth, self.config.point_scale);
            self.framebuffer.draw_point(proj.x, proj.y, d, color, p.opacity);
        }

        Some(&self.framebuffer)
    }

    /// Release particle, position and pixel storage. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.field.release();
        self.positions = Vec::new();
        self.framebuffer.release();
        debug!("vortex view unmounted");
    }
}

impl Drop for VortexView {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> FieldConfig {
        FieldConfig {
            particle_count: 4_000,
            viewport: 96,
            ..FieldConfig::default()
        }
    }

    fn dark_pixels(fb: &Framebuffer) -> usize {
        fb.as_bytes()
            .chunks_exact(4)
            .filter(|px| px[0] < 0xF0)
            .count()
    }

    #[test]
    fn frame_draws_particles_over_background() {
        let mut view = VortexView::mount(small()).unwrap();
        let fb = view.frame_at(0.0).unwrap();
        assert_eq!(fb.width(), 96);
        assert_eq!(fb.height(), 96);
        assert!(dark_pixels(fb) > 100);
        // Corners stay background: the spiral never reaches them.
        assert_eq!(fb.pixel(0, 0), Some([0xF0, 0xEE, 0xE6, 255]));
    }

    #[test]
    fn frames_are_deterministic_in_time() {
        let mut a = VortexView::mount(small()).unwrap();
        let mut b = VortexView::mount(small()).unwrap();
        let fa = a.frame_at(12.25).unwrap().as_bytes().to_vec();
        let fb = b.frame_at(12.25).unwrap().as_bytes().to_vec();
        assert_eq!(fa, fb);

        let later = a.frame_at(30.0).unwrap().as_bytes().to_vec();
        assert_ne!(fa, later);
    }

    #[test]
    fn population_is_fixed_across_frames() {
        let mut view = VortexView::mount(small()).unwrap();
        for t in [0.0, 1.0, 5.0, 60.0] {
            view.frame_at(t);
            assert_eq!(view.field().len(), 4_000);
        }
    }

    #[test]
    fn unmount_stops_frames_and_releases_storage() {
        let mut view = VortexView::mount(small()).unwrap();
        assert!(view.frame().is_some());

        view.unmount();
        assert!(!view.is_mounted());
        assert!(view.field().is_empty());
        assert!(view.frame().is_none());
        assert!(view.frame_at(1.0).is_none());

        // Second teardown is harmless.
        view.unmount();
        assert!(view.frame_at(2.0).is_none());
    }

    #[test]
    fn clock_is_monotonic() {
        let clock = RenderClock::start();
        let a = clock.elapsed_secs();
        let b = clock.elapsed_secs();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn invalid_config_is_rejected_at_mount() {
        for viewport in [0, 8193, u32::MAX] {
            let cfg = FieldConfig {
                viewport,
                ..small()
            };
            assert!(matches!(
                VortexView::mount(cfg),
                Err(ConfigError::InvalidField(_))
            ));
        }
        let cfg = FieldConfig {
            camera_distance: -1.0,
            ..small()
        };
        assert!(VortexView::mount(cfg).is_err());
    }
}
