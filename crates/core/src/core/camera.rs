//! Slowly orbiting perspective camera for the vortex.
//!
//! The camera drifts on X and Y independently and always looks at the origin.
//! It is decorative parallax only; nothing here reacts to input.

/// Amplitude / angular rate of the horizontal drift.
pub const DRIFT_X: (f32, f32) = (1.5, 0.1);
/// Amplitude / angular rate of the vertical drift.
pub const DRIFT_Y: (f32, f32) = (1.0, 0.15);

pub const DEFAULT_DISTANCE: f32 = 7.0;
pub const DEFAULT_FOV_Y_DEG: f32 = 60.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;

/// Camera position at elapsed time `time` for a camera resting `distance`
/// units down the +Z axis.
#[inline]
pub fn orbit_position(time: f32, distance: f32) -> [f32; 3] {
    [
        (time * DRIFT_X.1).sin() * DRIFT_X.0,
        (time * DRIFT_Y.1).cos() * DRIFT_Y.0,
        distance,
    ]
}

/// A world-space point mapped onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Pixel coordinates, origin top-left.
    pub x: f32,
    pub y: f32,
    /// Positive distance in front of the camera along its view axis.
    pub depth: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    distance: f32,
    position: [f32; 3],
    right: [f32; 3],
    up: [f32; 3],
    forward: [f32; 3],
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        let mut cam = Self {
            fov_y_deg: DEFAULT_FOV_Y_DEG,
            near: NEAR,
            far: FAR,
            distance,
            position: [0.0, 0.0, distance],
            right: [1.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            forward: [0.0, 0.0, -1.0],
        };
        cam.look_at_origin();
        cam
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Move to the orbit position for `time` and re-aim at the origin.
    pub fn update(&mut self, time: f32) {
        self.position = orbit_position(time, self.distance);
        self.look_at_origin();
    }

    fn look_at_origin(&mut self) {
        let forward = normalize(scale(self.position, -1.0));
        let right = normalize(cross(forward, [0.0, 1.0, 0.0]));
        self.up = cross(right, forward);
        self.right = right;
        self.forward = forward;
    }

    /// Camera-space coordinates `(x, y, depth)`; `depth > 0` is in front.
    pub fn to_camera(&self, p: [f32; 3]) -> [f32; 3] {
        let d = sub(p, self.position);
        [dot(d, self.right), dot(d, self.up), dot(d, self.forward)]
    }

    /// Project onto a square viewport of `viewport` pixels.
    ///
    /// Returns `None` outside the near/far range.
    pub fn project(&self, p: [f32; 3], viewport: u32) -> Option<Projected> {
        let [cx, cy, depth] = self.to_camera(p);
        if depth < self.near || depth > self.far {
            return None;
        }

        // Square viewport, so the horizontal and vertical focal lengths match.
        let focal = 1.0 / (self.fov_y_deg.to_radians() * 0.5).tan();
        let ndc_x = focal * cx / depth;
        let ndc_y = focal * cy / depth;

        let size = viewport as f32;
        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * size,
            y: (1.0 - ndc_y) * 0.5 * size,
            depth,
        })
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}

/// On-screen sprite diameter in pixels for a world `size` at `depth`.
///
/// Closer points render larger. Never below one pixel, matching the minimum
/// point size graphics hardware rasterises.
#[inline]
pub fn point_diameter(size: f32, depth: f32, point_scale: f32) -> f32 {
    (size * point_scale / depth).max(1.0)
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: [f32; 3], s: f32) -> [f32; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(a: [f32; 3]) -> [f32; 3] {
    let len = dot(a, a).sqrt();
    if len == 0.0 {
        return a;
    }
    scale(a, 1.0 / len)
}
