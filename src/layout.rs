//! Layout metrics attached to shadow nodes
//!
//! Layout is computed elsewhere; the differ only compares metrics. A node
//! whose props are unchanged still needs an `Update` when it moved or resized.

/// A point in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A size in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// A rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from origin and size components.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }
}

/// Per-edge insets (content insets, border widths).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    /// Same inset on every edge.
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    None,
    #[default]
    Flex,
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Undefined,
    LeftToRight,
    RightToLeft,
}

/// Computed layout of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub frame: Rect,
    pub content_insets: EdgeInsets,
    pub border_width: EdgeInsets,
    pub display_type: DisplayType,
    pub layout_direction: LayoutDirection,
    pub point_scale_factor: f32,
}

impl LayoutMetrics {
    /// Metrics of a node that has not been laid out yet.
    pub const EMPTY: Self = Self {
        frame: Rect::new(0.0, 0.0, 0.0, 0.0),
        content_insets: EdgeInsets::uniform(0.0),
        border_width: EdgeInsets::uniform(0.0),
        display_type: DisplayType::Flex,
        layout_direction: LayoutDirection::Undefined,
        point_scale_factor: 1.0,
    };

    /// Metrics with the given frame and defaults elsewhere.
    pub fn with_frame(frame: Rect) -> Self {
        Self { frame, ..Self::EMPTY }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert_eq!(LayoutMetrics::default(), LayoutMetrics::EMPTY);
        assert_eq!(LayoutMetrics::EMPTY.point_scale_factor, 1.0);
    }

    #[test]
    fn test_frame_change_is_inequality() {
        let a = LayoutMetrics::with_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = LayoutMetrics::with_frame(Rect::new(0.0, 0.0, 10.0, 12.0));
        assert_ne!(a, b);
        assert_eq!(a, LayoutMetrics::with_frame(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
