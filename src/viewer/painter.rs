//! egui painter adapter for the point-field renderer

use eframe::egui;

use crate::core::Surface;
use crate::theme::{colors, white};

/// Paints surface coordinates into `rect`, origin at its top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn pos(&self, p: [f32; 2]) -> egui::Pos2 {
        self.rect.min + egui::vec2(p[0], p[1])
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.painter.rect_filled(self.rect, 0.0, colors::BG_PRIMARY);
    }

    fn line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, opacity: f32) {
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            egui::Stroke::new(width, white(opacity)),
        );
    }

    fn disc(&mut self, center: [f32; 2], radius: f32, opacity: f32, glow: f32) {
        let center = self.pos(center);
        // No blur primitive: approximate the glow with two faint halos
        self.painter
            .circle_filled(center, radius + glow * 0.5, white(opacity * 0.06));
        self.painter
            .circle_filled(center, radius + glow * 0.2, white(opacity * 0.12));
        self.painter.circle_filled(center, radius, white(opacity));
    }
}
