//! Torus surface sampler
//!
//! Walks the tube angle theta and the revolution angle phi, rotates each
//! surface point by A and B, projects it with a perspective divide and keeps
//! the nearest lit sample per screen cell.

use crate::config::TorusConfig;
use crate::grid::Grid;
use crate::scene::RotationState;
use crate::GLYPH_RAMP;
use nalgebra::Vector3;

/// Upper bound of theta. The literal 3.14 is part of the reference output.
pub const THETA_END: f64 = 2.0 * 3.14;

/// Upper bound of phi, deliberately past one revolution
pub const PHI_END: f64 = 3.0 * 3.14;

/// Samples with |z| below this are skipped instead of divided by
const MIN_DEPTH: f64 = 1e-9;

/// Luminance is scaled by this before bucketing (8 * sqrt(2) ~= 11.3)
const LUMINANCE_SCALE: f64 = 8.0;

/// One projected point of the torus surface, before culling and depth test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub theta: f64,
    pub phi: f64,
    /// Rotated point in view space; z includes the viewer distance
    pub point: Vector3<f64>,
    /// One over z
    pub ooz: f64,
    /// Unfloored screen position
    pub projected: (f64, f64),
    /// Screen cell the sample lands in, possibly off-screen
    pub screen: (i64, i64),
    /// Surface normal dotted with the light direction, in (-sqrt 2, sqrt 2)
    pub luminance: f64,
}

/// Everything the inner loop needs, precomputed once per frame
#[derive(Debug, Clone, Copy)]
struct View {
    r1: f64,
    r2: f64,
    k1: f64,
    k2: f64,
    half_width: f64,
    half_height: f64,
    cos_a: f64,
    sin_a: f64,
    cos_b: f64,
    sin_b: f64,
}

impl View {
    fn new(config: &TorusConfig, angles: RotationState) -> Self {
        let (sin_a, cos_a) = angles.a.sin_cos();
        let (sin_b, cos_b) = angles.b.sin_cos();
        Self {
            r1: config.minor_radius(),
            r2: config.major_radius(),
            k1: config.projection_scale(),
            k2: config.viewer_distance(),
            half_width: config.width() as f64 / 2.0,
            half_height: config.height() as f64 / 2.0,
            cos_a,
            sin_a,
            cos_b,
            sin_b,
        }
    }

    fn project(&self, theta: f64, cos_theta: f64, sin_theta: f64, phi: f64) -> Option<SurfaceSample> {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let Self { cos_a, sin_a, cos_b, sin_b, .. } = *self;

        // cross-section of the tube before revolving
        let circle_x = self.r2 + self.r1 * cos_theta;
        let circle_y = self.r1 * sin_theta;

        let x = circle_x * (cos_b * cos_phi + sin_a * sin_b * sin_phi) - circle_y * cos_a * sin_b;
        let y = circle_x * (sin_b * cos_phi - sin_a * cos_b * sin_phi) + circle_y * cos_a * cos_b;
        let z = self.k2 + cos_a * circle_x * sin_phi + circle_y * sin_a;
        if z.abs() < MIN_DEPTH {
            return None;
        }
        let ooz = 1.0 / z;

        // screen rows grow downward, so y is negated
        let px = self.half_width + self.k1 * ooz * x;
        let py = self.half_height - self.k1 * ooz * y;

        let luminance = cos_phi * cos_theta * sin_b - cos_a * cos_theta * sin_phi - sin_a * sin_theta
            + cos_b * (cos_a * sin_theta - cos_theta * sin_a * sin_phi);

        Some(SurfaceSample {
            theta,
            phi,
            point: Vector3::new(x, y, z),
            ooz,
            projected: (px, py),
            screen: (px.floor() as i64, py.floor() as i64),
            luminance,
        })
    }
}

/// 0, step, 2*step, ... while below `end`, accumulated by repeated addition
fn angle_range(step: f64, end: f64) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(0.0), move |angle| Some(angle + step))
        .take_while(move |angle| *angle < end)
}

/// Ramp index for a luminance value, `None` for surfaces facing away
pub fn luminance_bucket(luminance: f64) -> Option<usize> {
    if luminance > 0.0 {
        Some(((luminance * LUMINANCE_SCALE) as usize).min(GLYPH_RAMP.len() - 1))
    } else {
        None
    }
}

pub fn glyph_for_luminance(luminance: f64) -> Option<char> {
    luminance_bucket(luminance).map(|idx| GLYPH_RAMP[idx])
}

/// Renders torus frames for one fixed configuration
#[derive(Debug, Clone)]
pub struct FrameSampler {
    config: TorusConfig,
}

impl FrameSampler {
    pub fn new(config: TorusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TorusConfig {
        &self.config
    }

    /// Every surface sample of one frame in iteration order (theta outer)
    pub fn surface_samples(&self, angles: RotationState) -> impl Iterator<Item = SurfaceSample> {
        let view = View::new(&self.config, angles);
        let phi_step = self.config.phi_step();

        angle_range(self.config.theta_step(), THETA_END).flat_map(move |theta| {
            let (sin_theta, cos_theta) = theta.sin_cos();
            angle_range(phi_step, PHI_END)
                .filter_map(move |phi| view.project(theta, cos_theta, sin_theta, phi))
        })
    }

    /// Project a single (theta, phi) surface point
    pub fn project_point(&self, angles: RotationState, theta: f64, phi: f64) -> Option<SurfaceSample> {
        let (sin_theta, cos_theta) = theta.sin_cos();
        View::new(&self.config, angles).project(theta, cos_theta, sin_theta, phi)
    }

    /// Resolve one frame: lit samples only, nearest per cell
    pub fn sample(&self, angles: RotationState) -> Grid {
        sample(&self.config, angles)
    }
}

/// Render one frame of `config` at `angles`
pub fn sample(config: &TorusConfig, angles: RotationState) -> Grid {
    let mut grid = Grid::new(config.width(), config.height());
    let view = View::new(config, angles);

    for theta in angle_range(config.theta_step(), THETA_END) {
        let (sin_theta, cos_theta) = theta.sin_cos();
        for phi in angle_range(config.phi_step(), PHI_END) {
            let Some(s) = view.project(theta, cos_theta, sin_theta, phi) else {
                continue;
            };
            if let Some(glyph) = glyph_for_luminance(s.luminance) {
                grid.plot(s.screen.0, s.screen.1, s.ooz, glyph);
            }
        }
    }

    grid
}
