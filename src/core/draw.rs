//! Drawing surface abstraction
//!
//! The renderer only needs three primitives. The browser canvas and the
//! egui painter both implement them; all strokes and fills are white.

/// 2D drawing primitives consumed by the point-field renderer
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);

    /// Thin white line segment
    fn line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, opacity: f32);

    /// Filled white disc with a soft glow of radius `glow`
    fn disc(&mut self, center: [f32; 2], radius: f32, opacity: f32, glow: f32);
}

/// A single recorded draw call
#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawCall {
    Clear,
    Line { from: [f32; 2], to: [f32; 2], opacity: f32 },
    Disc { center: [f32; 2], opacity: f32 },
}

/// Surface that records calls for assertions
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.calls.push(DrawCall::Clear);
    }

    fn line(&mut self, from: [f32; 2], to: [f32; 2], _width: f32, opacity: f32) {
        self.calls.push(DrawCall::Line { from, to, opacity });
    }

    fn disc(&mut self, center: [f32; 2], _radius: f32, opacity: f32, _glow: f32) {
        self.calls.push(DrawCall::Disc { center, opacity });
    }
}
