//! Stats overlay (F3) with frame rate and field counters

use std::collections::VecDeque;

use eframe::egui;

use super::StarfieldApp;
use crate::theme::colors;
use crate::time::now_ms;

/// Frame timestamps kept for the rate estimate
const FPS_WINDOW: usize = 60;

impl StarfieldApp {
    pub(crate) fn draw_stats(&self, ctx: &egui::Context) {
        let field = self.renderer.field();
        let lines = [
            format!("{:.0} fps", self.fps_counter.fps()),
            format!("{} points / {} edges", field.len(), self.renderer.edges().len()),
            format!("{}x{}", field.width(), field.height()),
            format!("{} trail markers", self.trail.len()),
        ];

        egui::Area::new(egui::Id::new("stats_area"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(colors::BG_OVERLAY)
                    .corner_radius(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        for line in &lines {
                            ui.label(
                                egui::RichText::new(line)
                                    .color(colors::TEXT_SECONDARY)
                                    .monospace()
                                    .size(11.0),
                            );
                        }
                        ui.label(
                            egui::RichText::new("F3 to hide")
                                .color(colors::TEXT_MUTED)
                                .size(10.0),
                        );
                    });
            });
    }
}

/// Frame rate over a sliding window of frame timestamps (ms)
#[derive(Default)]
pub struct FpsCounter {
    stamps: VecDeque<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            stamps: VecDeque::with_capacity(FPS_WINDOW + 1),
        }
    }

    pub fn tick(&mut self) {
        self.record(now_ms());
    }

    fn record(&mut self, now: f64) {
        self.stamps.push_back(now);
        while self.stamps.len() > FPS_WINDOW {
            self.stamps.pop_front();
        }
    }

    /// Frames per second across the window; 0 until two frames are seen
    pub fn fps(&self) -> f64 {
        match (self.stamps.front(), self.stamps.back()) {
            (Some(&first), Some(&last)) if last > first => {
                (self.stamps.len() - 1) as f64 * 1000.0 / (last - first)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_from_even_frames() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.fps(), 0.0);
        counter.record(5.0);
        assert_eq!(counter.fps(), 0.0);
        for i in 0..100 {
            counter.record(i as f64 * 20.0);
        }
        assert_eq!(counter.stamps.len(), FPS_WINDOW);
        assert!((counter.fps() - 50.0).abs() < 1e-9);
    }
}
