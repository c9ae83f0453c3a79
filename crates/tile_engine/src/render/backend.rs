//! Backend abstraction traits for the rendering system

use super::RenderError;
use crate::assets::TextureId;
use crate::foundation::math::Rect;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Main rendering backend trait
///
/// Implemented by whatever owns the graphics surface. The engine core only
/// submits textured quads.
pub trait RenderBackend {
    /// Submit one draw call copying `source` (atlas pixels) of `texture` to
    /// `dest` (screen pixels)
    fn draw(&mut self, texture: TextureId, source: Rect, dest: Rect) -> BackendResult<()>;
}

/// A draw call as recorded by [`RecordingBackend`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    /// Texture sampled
    pub texture: TextureId,
    /// Source rectangle in texture pixels
    pub source: Rect,
    /// Destination rectangle in screen pixels
    pub dest: Rect,
}

/// Headless backend recording every submission
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    fail_after: Option<usize>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every submission after the first `count` fail
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Calls recorded so far
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the recorder empty
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn draw(&mut self, texture: TextureId, source: Rect, dest: Rect) -> BackendResult<()> {
        if self.fail_after.is_some_and(|limit| self.calls.len() >= limit) {
            return Err(RenderError::Backend(format!(
                "draw limit of {} reached",
                self.calls.len()
            )));
        }
        self.calls.push(DrawCall { texture, source, dest });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend_records_calls() {
        let mut backend = RecordingBackend::new();
        backend
            .draw(TextureId(1), Rect::square(0.0, 0.0, 8.0), Rect::square(4.0, 4.0, 8.0))
            .unwrap();

        assert_eq!(backend.calls().len(), 1);
        assert_eq!(backend.calls()[0].texture, TextureId(1));
        assert_eq!(backend.take_calls().len(), 1);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_failure_injection() {
        let mut backend = RecordingBackend::new().failing_after(1);
        let rect = Rect::square(0.0, 0.0, 1.0);

        assert!(backend.draw(TextureId(1), rect, rect).is_ok());
        assert!(matches!(
            backend.draw(TextureId(1), rect, rect),
            Err(RenderError::Backend(_))
        ));
        assert_eq!(backend.calls().len(), 1);
    }
}
