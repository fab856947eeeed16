//! Core view-state newtypes shared by the viewport components.

/// Screen rectangle available to a component, in terminal cells.
///
/// Owned by the host and pushed in on resize/layout. A zero width or
/// height means "not laid out yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    /// Width in terminal columns.
    pub width: u16,
    /// Height in terminal rows.
    pub height: u16,
}

impl ViewportSize {
    /// Create new viewport dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Length along one axis.
    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.width as usize,
            Axis::Vertical => self.height as usize,
        }
    }
}

impl From<ratatui::layout::Rect> for ViewportSize {
    fn from(rect: ratatui::layout::Rect) -> Self {
        Self::new(rect.width, rect.height)
    }
}

/// Full size of the content in model units (columns x lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentExtent {
    /// Widest content line.
    pub width: usize,
    /// Number of content lines.
    pub height: usize,
}

impl ContentExtent {
    /// Create a content extent.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Length along one axis.
    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Model-space coordinate of the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ViewportOffset {
    /// First visible content column.
    pub x: usize,
    /// First visible content line.
    pub y: usize,
}

impl ViewportOffset {
    /// Create an offset.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Component along one axis.
    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy with one axis replaced.
    pub fn with(self, axis: Axis, value: usize) -> Self {
        match axis {
            Axis::Horizontal => Self { x: value, ..self },
            Axis::Vertical => Self { y: value, ..self },
        }
    }
}

/// Scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right; offset `x`, content `width`.
    Horizontal,
    /// Up/down; offset `y`, content `height`.
    Vertical,
}

impl Axis {
    /// The orthogonal axis.
    pub fn other(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// The model rectangle currently on screen: offset plus on-screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    /// First visible content column.
    pub x: usize,
    /// First visible content line.
    pub y: usize,
    /// Columns available for content (scroll bars excluded).
    pub width: usize,
    /// Lines available for content (scroll bars excluded).
    pub height: usize,
}

impl VisibleWindow {
    /// Range of visible content lines.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.y..self.y + self.height
    }

    /// Range of visible content columns.
    pub fn columns(&self) -> std::ops::Range<usize> {
        self.x..self.x + self.width
    }
}

/// Apply a signed delta to an unsigned coordinate, saturating at both ends.
pub(crate) fn offset_by(value: usize, delta: isize) -> usize {
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as usize)
    }
}
