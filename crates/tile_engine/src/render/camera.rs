//! 2D camera
//!
//! The camera is a window onto screen space: `position` is the screen-space
//! coordinate shown at the top-left corner of the display, and the viewport
//! extends `screen_width` x `screen_height` pixels from there.

use crate::core::config::ViewportConfig;
use crate::foundation::math::{Rect, Vec2};

/// Camera / viewport provider consumed read-only by renderers each frame
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Screen-space origin of the visible area
    pub position: Vec2,
    /// Visible width in pixels
    pub screen_width: u32,
    /// Visible height in pixels
    pub screen_height: u32,
}

impl Camera2D {
    /// Create a camera at the origin
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            position: Vec2::zeros(),
            screen_width,
            screen_height,
        }
    }

    /// Create a camera sized from configuration
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.screen_width, config.screen_height)
    }

    /// Builder pattern: set the screen-space origin
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Move the camera by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Screen-space origin of the visible area
    pub fn screen_position(&self) -> Vec2 {
        self.position
    }

    /// Visible rectangle `[origin, origin + (screen_width, screen_height)]`
    #[allow(clippy::cast_precision_loss)]
    pub fn viewport(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.screen_width as f32,
            self.screen_height as f32,
        )
    }

    /// Convert a screen-space point to display coordinates
    pub fn to_view(&self, point: Vec2) -> Vec2 {
        point - self.position
    }
}
