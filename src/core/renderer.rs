//! Point-field renderer: advance, connect, draw

use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use super::config::FieldConfig;
use super::draw::Surface;
use super::field::{Edge, PointField};

/// Owns the point field plus the per-frame edge buffer.
///
/// Hosts call [`frame_tick`](Self::frame_tick) once per display refresh and
/// [`on_resize`](Self::on_resize) when the viewport changes. Scheduling the
/// next frame is up to the host.
pub struct PointFieldRenderer<R: Rng = StdRng> {
    field: PointField<R>,
    /// Recomputed every frame; only the allocation survives
    edges: Vec<Edge>,
    frames: u64,
}

impl PointFieldRenderer<StdRng> {
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        Self::from_field(PointField::new(config, width, height))
    }
}

impl<R: Rng> PointFieldRenderer<R> {
    pub fn from_field(field: PointField<R>) -> Self {
        info!(
            points = field.len(),
            w = field.width(),
            h = field.height(),
            "Point field renderer initialized"
        );
        Self {
            field,
            edges: Vec::new(),
            frames: 0,
        }
    }

    /// Reset the surface and regenerate every point
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.field.initialize(width, height);
        self.edges.clear();
    }

    pub fn advance(&mut self) {
        self.field.advance();
    }

    pub fn compute_edges(&mut self) {
        self.field.compute_edges_into(&mut self.edges);
    }

    /// Clear, then edges, then points on top.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        let config = self.field.config();
        let points = self.field.points();

        surface.clear(self.field.width() as f32, self.field.height() as f32);

        for edge in &self.edges {
            let (a, b) = (&points[edge.a], &points[edge.b]);
            surface.line([a.x, a.y], [b.x, b.y], config.line_width, edge.opacity);
        }

        for p in points {
            surface.disc([p.x, p.y], p.radius, p.opacity, config.glow);
        }
    }

    /// One animation frame
    pub fn frame_tick<S: Surface>(&mut self, surface: &mut S) {
        self.advance();
        self.compute_edges();
        self.render(surface);
        self.frames += 1;
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        info!(w = width, h = height, "Resizing point field");
        self.field.on_resize(width, height);
        self.edges.clear();
    }

    pub fn field(&self) -> &PointField<R> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut PointField<R> {
        &mut self.field
    }

    /// Edges from the most recent [`compute_edges`](Self::compute_edges)
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Frames rendered since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::draw::{DrawCall, RecordingSurface};
    use crate::core::field::Point;
    use rand::SeedableRng;

    fn renderer(num_points: usize) -> PointFieldRenderer<StdRng> {
        let config = FieldConfig {
            num_points,
            speed: 0.0,
            ..FieldConfig::default()
        };
        PointFieldRenderer::from_field(PointField::with_rng(
            config,
            1000,
            1000,
            StdRng::seed_from_u64(1),
        ))
    }

    fn place(r: &mut PointFieldRenderer<StdRng>, coords: &[(f32, f32)]) {
        for (p, &(x, y)) in r.field_mut().points_mut().iter_mut().zip(coords) {
            *p = Point {
                x,
                y,
                radius: 2.0,
                opacity: 0.6,
                ..Point::default()
            };
        }
    }

    #[test]
    fn test_render_draws_edges_beneath_points() {
        let mut r = renderer(3);
        place(&mut r, &[(0.0, 0.0), (50.0, 0.0), (200.0, 0.0)]);
        r.compute_edges();

        let mut surface = RecordingSurface::default();
        r.render(&mut surface);

        assert_eq!(surface.calls.len(), 1 + 1 + 3);
        assert_eq!(surface.calls[0], DrawCall::Clear);
        match &surface.calls[1] {
            DrawCall::Line { from, to, opacity } => {
                assert_eq!(*from, [0.0, 0.0]);
                assert_eq!(*to, [50.0, 0.0]);
                assert!(*opacity > 0.0);
            }
            other => panic!("expected edge line, got {:?}", other),
        }
        assert!(surface.calls[2..]
            .iter()
            .all(|c| matches!(c, DrawCall::Disc { .. })));
    }

    #[test]
    fn test_frame_tick_recomputes_edges_each_frame() {
        let mut r = renderer(2);
        place(&mut r, &[(10.0, 10.0), (20.0, 10.0)]);

        let mut surface = RecordingSurface::default();
        r.frame_tick(&mut surface);
        assert_eq!(r.edges().len(), 1);
        assert_eq!(r.frame_count(), 1);

        place(&mut r, &[(10.0, 10.0), (600.0, 600.0)]);
        r.frame_tick(&mut surface);
        assert!(r.edges().is_empty());
        assert_eq!(r.frame_count(), 2);
    }

    #[test]
    fn test_resize_clears_stale_edges() {
        let mut r = renderer(250);
        r.compute_edges();
        r.on_resize(640, 480);
        assert!(r.edges().is_empty());
        assert_eq!(r.field().len(), 250);
        assert_eq!((r.field().width(), r.field().height()), (640, 480));
    }

    #[test]
    fn test_initialize_resets_surface_and_points() {
        let mut r = renderer(10);
        r.compute_edges();
        r.initialize(50, 40);
        assert!(r.edges().is_empty());
        assert_eq!(r.field().len(), 10);
        assert!(r
            .field()
            .points()
            .iter()
            .all(|p| p.x >= 0.0 && p.x < 50.0 && p.y >= 0.0 && p.y < 40.0));
    }
}
