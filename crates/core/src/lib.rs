//! # inkloop
//!
//! Core of the Inkloop waitlist page: the decorative vortex particle field and
//! the waitlist signup flow, kept free of any browser API so everything here
//! can be unit-tested on the host.
//!
//! ## Quick Start
//!
//! ```
//! use inkloop::prelude::*;
//!
//! // Build a small view and render one frame at t = 1.5s.
//! let cfg = FieldConfig { particle_count: 2_000, viewport: 128, ..FieldConfig::default() };
//! let mut view = VortexView::mount(cfg).expect("valid config");
//! let frame = view.frame_at(1.5).expect("mounted view renders");
//! assert_eq!(frame.width(), 128);
//!
//! // Tear down: no further frames are produced.
//! view.unmount();
//! assert!(view.frame_at(2.0).is_none());
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): the `inkloop-preview` binary (clap + tracing-subscriber)
//! - `parallel`: deform the particle field across threads via rayon
//!
//! ## Modules
//!
//! - [`field`]: particle generation and per-frame deformation
//! - [`camera`]: orbiting perspective camera
//! - [`raster`]: software point-sprite renderer
//! - [`view`]: render clock and mount/unmount lifecycle
//! - [`confetti`]: celebratory burst simulation
//! - [`waitlist`]: form state machine
//! - [`api`]: backend wire types and the [`api::WaitlistBackend`] contract

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/field.rs"]
pub mod field;

#[path = "core/camera.rs"]
pub mod camera;

#[path = "core/raster.rs"]
pub mod raster;

#[path = "core/view.rs"]
pub mod view;

#[path = "core/confetti.rs"]
pub mod confetti;

#[path = "core/email.rs"]
pub mod email;

#[path = "core/api.rs"]
pub mod api;

#[path = "core/waitlist.rs"]
pub mod waitlist;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/error.rs"]
pub mod error;

/// Prelude module for convenient imports.
///
/// ```
/// use inkloop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{SignupSubmission, SubmitOutcome, WaitlistBackend};
    pub use crate::camera::OrbitCamera;
    pub use crate::confetti::{Burst, BurstOptions};
    pub use crate::config::{FieldConfig, WaitlistConfig};
    pub use crate::error::{ApiError, ConfigError};
    pub use crate::field::{Particle, ParticleField};
    pub use crate::raster::Framebuffer;
    pub use crate::view::{RenderClock, VortexView};
    pub use crate::waitlist::{Celebration, FormState, SignupCount, WaitlistController};
}
