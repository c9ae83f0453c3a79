//! Math utilities and types
//!
//! Provides the 2D math types used for screen-space tile placement.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Axis-aligned rectangle in screen space (Y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a square of side `size` with its top-left corner at `(x, y)`
    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    /// Left edge
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Offset the rectangle by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Inclusive AABB overlap test.
    ///
    /// Rectangles that only touch along an edge count as overlapping.
    pub fn overlaps_inclusive(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }

    /// Whether `point` lies inside the rectangle (left/top inclusive, right/bottom exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x < self.right() && point.y >= self.top() && point.y < self.bottom()
    }
}

/// 2D transform of a game object: screen position, rotation and local scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2D {
    /// Position in screen space (pixels)
    pub position: Vec2,

    /// Rotation in radians (not applied by the tile renderer)
    pub rotation: f32,

    /// Local scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: set a uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// Builder pattern: set the scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Screen-space position of the object's origin
    pub fn screen_position(&self) -> Vec2 {
        self.position
    }

    /// Local scale vector
    pub fn local_scale(&self) -> Vec2 {
        self.scale
    }

    /// Apply this transform's translation and scale to a local point
    pub fn transform_point(&self, point: Point2) -> Point2 {
        let (sin, cos) = self.rotation.sin_cos();
        let scaled = point.coords.component_mul(&self.scale);
        let rotated = Vec2::new(scaled.x * cos - scaled.y * sin, scaled.x * sin + scaled.y * cos);
        Point2::from(rotated + self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inclusive_overlap_on_touching_edges() {
        let viewport = Rect::new(0.0, 0.0, 64.0, 48.0);

        assert!(Rect::square(64.0, 0.0, 16.0).overlaps_inclusive(&viewport));
        assert!(Rect::square(-16.0, -16.0, 16.0).overlaps_inclusive(&viewport));
        assert!(!Rect::square(65.0, 0.0, 16.0).overlaps_inclusive(&viewport));
        assert!(!Rect::square(0.0, 49.0, 16.0).overlaps_inclusive(&viewport));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_relative_eq!(rect.right(), 40.0);
        assert_relative_eq!(rect.bottom(), 60.0);

        let moved = rect.translated(Vec2::new(-10.0, -20.0));
        assert_relative_eq!(moved.origin(), Vec2::zeros());
        assert!(moved.contains(Vec2::new(0.0, 0.0)));
        assert!(!moved.contains(Vec2::new(30.0, 0.0)));
    }

    #[test]
    fn test_transform_point() {
        let transform = Transform2D::from_position(Vec2::new(5.0, 5.0)).with_uniform_scale(2.0);
        let point = transform.transform_point(Point2::new(1.0, 2.0));

        assert_relative_eq!(point.x, 7.0);
        assert_relative_eq!(point.y, 9.0);
        assert_relative_eq!(transform.local_scale().x, 2.0);
    }
}
