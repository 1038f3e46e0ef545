//! 2D canvas adapter for the point-field renderer

use std::f64::consts::TAU;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::Surface;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

fn white(opacity: f32) -> String {
    format!("rgba(255, 255, 255, {})", opacity)
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, opacity: f32) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(from[0] as f64, from[1] as f64);
        ctx.line_to(to[0] as f64, to[1] as f64);
        ctx.set_stroke_style_str(&white(opacity));
        ctx.set_line_width(width as f64);
        ctx.stroke();
    }

    fn disc(&mut self, center: [f32; 2], radius: f32, opacity: f32, glow: f32) {
        let ctx = &self.ctx;
        // Shadow state must not leak into the edge strokes of the next frame
        ctx.save();
        ctx.begin_path();
        if let Err(e) = ctx.arc(center[0] as f64, center[1] as f64, radius as f64, 0.0, TAU) {
            warn!(?e, radius, "Canvas rejected point arc");
        }
        ctx.set_fill_style_str(&white(opacity));
        ctx.set_shadow_blur(glow as f64);
        ctx.set_shadow_color("white");
        ctx.fill();
        ctx.restore();
    }
}
