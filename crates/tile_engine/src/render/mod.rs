//! Rendering interfaces
//!
//! The engine never talks to a graphics API directly. Draw work goes through
//! the [`RenderBackend`] trait: one call per textured quad, with source and
//! destination rectangles in pixels. [`RecordingBackend`] is a headless
//! implementation used by tests and tools.

pub mod backend;
pub mod camera;
pub mod renderable;

pub use backend::{DrawCall, RecordingBackend, RenderBackend};
pub use camera::Camera2D;
pub use renderable::{RenderContext, Renderable};

use std::ops::AddAssign;

use thiserror::Error;

/// Errors reported by rendering backends
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A draw submission failed in the backend
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Per-pass counters reported by renderables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Tiles submitted to the backend
    pub drawn: usize,
    /// Non-empty tiles skipped because they were outside the viewport
    pub culled: usize,
    /// Cells holding the empty tile index
    pub empty: usize,
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        self.drawn += other.drawn;
        self.culled += other.culled;
        self.empty += other.empty;
    }
}
