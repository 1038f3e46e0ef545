//! Point field simulation
//!
//! - Point: position, velocity, radius and pulsing opacity
//! - Edge: transient connector between two points closer than the threshold
//! - PointField: owns the points and the surface size they wrap within

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::config::FieldConfig;

// ============================================================================
// Point / Edge
// ============================================================================

/// A single animated point. Identity is its index in the field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Units per frame
    pub vx: f32,
    pub vy: f32,
    /// Fixed at creation
    pub radius: f32,
    /// Kept within the configured opacity band
    pub opacity: f32,
}

impl Point {
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Unordered pair of point indices with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

/// Linear proximity fade: `k` at distance zero, 0 at `max_distance` and beyond.
#[inline]
pub fn edge_opacity(distance: f32, max_distance: f32, k: f32) -> f32 {
    ((max_distance - distance) / max_distance * k).max(0.0)
}

/// Wrap a coordinate into `[0, extent)`.
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Uniform sample in `[min, max)`, tolerating `min == max`.
#[inline]
fn sample<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

// ============================================================================
// PointField
// ============================================================================

/// Fixed-size collection of points moving across a wrap-around surface.
#[derive(Debug)]
pub struct PointField<R: Rng = StdRng> {
    config: FieldConfig,
    width: u32,
    height: u32,
    points: Vec<Point>,
    rng: R,
}

impl PointField<StdRng> {
    /// Create a field seeded from OS entropy and generate its points
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        Self::with_rng(config, width, height, StdRng::from_entropy())
    }
}

impl<R: Rng> PointField<R> {
    /// Create a field with an explicit random source and generate its points
    pub fn with_rng(config: FieldConfig, width: u32, height: u32, rng: R) -> Self {
        let mut field = Self {
            config,
            width: 0,
            height: 0,
            points: Vec::new(),
            rng,
        };
        field.initialize(width, height);
        field
    }

    /// Set the surface size and generate a fresh batch of points.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.regenerate();
    }

    /// Resize the surface. Existing points are discarded, not rescaled.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        debug!(
            from_w = self.width,
            from_h = self.height,
            to_w = width,
            to_h = height,
            "Surface resized, regenerating points"
        );
        self.initialize(width, height);
    }

    fn regenerate(&mut self) {
        let (w, h) = (self.width as f32, self.height as f32);
        let c = &self.config;
        let half_speed = c.speed * 0.5;
        let rng = &mut self.rng;

        self.points.clear();
        self.points.reserve(c.num_points);
        for _ in 0..c.num_points {
            self.points.push(Point {
                x: wrap_coord(rng.gen::<f32>() * w, w),
                y: wrap_coord(rng.gen::<f32>() * h, h),
                vx: sample(rng, -half_speed, half_speed),
                vy: sample(rng, -half_speed, half_speed),
                radius: sample(rng, c.radius_min, c.radius_max),
                opacity: sample(rng, c.initial_opacity_min, c.initial_opacity_max)
                    .clamp(c.opacity_min, c.opacity_max),
            });
        }

        debug!(count = self.points.len(), w = self.width, h = self.height, "Points generated");
    }

    /// Move every point one frame, wrap it into the surface and pulse its opacity.
    pub fn advance(&mut self) {
        let (w, h) = (self.width as f32, self.height as f32);
        let c = &self.config;
        let half_jitter = c.opacity_jitter * 0.5;

        for p in &mut self.points {
            p.x = wrap_coord(p.x + p.vx, w);
            p.y = wrap_coord(p.y + p.vy, h);

            let delta = sample(&mut self.rng, -half_jitter, half_jitter);
            p.opacity = (p.opacity + delta).clamp(c.opacity_min, c.opacity_max);
        }
    }

    /// Proximity graph of the current positions.
    pub fn compute_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        self.compute_edges_into(&mut edges);
        edges
    }

    /// Recompute the proximity graph into `edges`, reusing its allocation.
    ///
    /// Quadratic in the point count. A uniform grid bucketed by
    /// `max_distance` would bring this near-linear for much larger fields.
    pub fn compute_edges_into(&self, edges: &mut Vec<Edge>) {
        edges.clear();
        let max_distance = self.config.max_distance;
        let k = self.config.edge_opacity;

        for (a, pa) in self.points.iter().enumerate() {
            for (offset, pb) in self.points[a + 1..].iter().enumerate() {
                let distance = pa.distance_to(pb);
                if distance < max_distance {
                    edges.push(Edge {
                        a,
                        b: a + 1 + offset,
                        opacity: edge_opacity(distance, max_distance, k),
                    });
                }
            }
        }

        trace!(points = self.points.len(), edges = edges.len(), "Edges computed");
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Direct access for hosts that need to place points explicitly.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
