//! Native preview of the starfield background
//!
//! Same point field and cursor trail as the browser build, painted with
//! egui. The trail is polled every frame instead of using timers, and the
//! CSS fade transition is emulated when drawing markers.

mod painter;
mod stats;

use eframe::egui;
use tracing::{debug, info};

use crate::core::{CursorTrail, Marker, MarkerPhase, PointFieldRenderer, StarfieldConfig};
use crate::theme::{colors, minimal_visuals, white};
use crate::time::now_ms;

pub use painter::PainterSurface;
pub use stats::FpsCounter;

/// Initial window size; the field is regenerated on the first real layout
pub const DEFAULT_SIZE: [f32; 2] = [1280.0, 800.0];

/// Duration of the marker fade (`transition: all 1s`)
const FADE_TRANSITION_MS: f64 = 1000.0;

pub struct StarfieldApp {
    pub(crate) renderer: PointFieldRenderer,
    pub(crate) trail: CursorTrail,
    pub(crate) fps_counter: FpsCounter,
    /// Surface size the field was last generated for
    size: (u32, u32),
    show_stats: bool,
}

impl StarfieldApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: StarfieldConfig) -> Self {
        cc.egui_ctx.set_visuals(minimal_visuals());

        let size = (DEFAULT_SIZE[0] as u32, DEFAULT_SIZE[1] as u32);
        info!(points = config.field.num_points, "Starting native starfield");

        Self {
            renderer: PointFieldRenderer::new(config.field, size.0, size.1),
            trail: CursorTrail::new(config.trail),
            fps_counter: FpsCounter::new(),
            size,
            show_stats: true,
        }
    }

    /// Regenerate the field when the drawable area changes size
    fn sync_size(&mut self, rect: egui::Rect) {
        let size = (rect.width().max(1.0) as u32, rect.height().max(1.0) as u32);
        if size != self.size {
            self.size = size;
            self.renderer.on_resize(size.0, size.1);
        }
    }

    fn draw_trail(&self, painter: &egui::Painter, rect: egui::Rect, now: f64) {
        let config = self.trail.config();
        for marker in self.trail.markers() {
            let fade_elapsed = now - marker.spawned_at - config.fade_delay_ms;
            let (pos, radius, opacity) =
                marker_appearance(marker, fade_elapsed, config.size_px * 0.5, config.opacity);
            painter.circle_filled(rect.min + egui::vec2(pos[0], pos[1]), radius, white(opacity));
        }
    }
}

/// Position, radius and opacity of a marker `fade_elapsed` ms into its fade.
///
/// Visible markers sit at their spawn point. Fading markers ease from
/// `initial_opacity` to zero while drifting to the fade offset and scaling.
fn marker_appearance(
    marker: &Marker,
    fade_elapsed: f64,
    radius: f32,
    initial_opacity: f32,
) -> ([f32; 2], f32, f32) {
    match marker.phase {
        MarkerPhase::Visible => ([marker.x, marker.y], radius, marker.opacity),
        MarkerPhase::Fading(offset) => {
            let t = (fade_elapsed / FADE_TRANSITION_MS).clamp(0.0, 1.0) as f32;
            let opacity = (1.0 - t) * initial_opacity;
            let scale = 1.0 + (offset.scale - 1.0) * t;
            (
                [marker.x + offset.dx * t, marker.y + offset.dy * t],
                radius * scale,
                opacity,
            )
        }
    }
}

impl eframe::App for StarfieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Request continuous repaint - the field never stops moving
        ctx.request_repaint();
        self.fps_counter.tick();

        if ctx.input(|i| i.key_pressed(egui::Key::F3)) {
            self.show_stats = !self.show_stats;
            debug!(show_stats = self.show_stats, "Stats overlay toggled");
        }

        let now = now_ms();
        self.trail.tick(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                self.sync_size(rect);

                let moving = ctx.input(|i| i.pointer.is_moving());
                if let (true, Some(pos)) = (moving, response.hover_pos()) {
                    let local = pos - rect.min;
                    self.trail.on_pointer_move(local.x, local.y, now);
                }

                let mut surface = PainterSurface::new(&painter, rect);
                self.renderer.frame_tick(&mut surface);
                self.draw_trail(&painter, rect, now);
            });

        if self.show_stats {
            self.draw_stats(ctx);
        }
    }
}
