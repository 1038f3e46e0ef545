//! Platform-agnostic core - shared between the WASM page host and the native viewer

pub mod config;
pub mod draw;
pub mod field;
pub mod renderer;
pub mod trail;

pub use config::{ConfigError, FieldConfig, StarfieldConfig, TrailConfig};
pub use draw::Surface;
pub use field::{Edge, Point, PointField};
pub use renderer::PointFieldRenderer;
pub use trail::{CursorTrail, FadeOffset, Marker, MarkerId, MarkerPhase, TrailAction};
