//! Canvas-space geometry for drafts and saved regions

/// Pointer position in canvas pixels
///
/// Coordinates are signed because a drag may leave the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasPoint {
    /// Horizontal position
    pub x: i32,
    /// Vertical position
    pub y: i32,
}

impl CanvasPoint {
    /// Create a point from canvas coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by two corners in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRect {
    /// First corner x
    pub x1: i32,
    /// First corner y
    pub y1: i32,
    /// Second corner x
    pub x2: i32,
    /// Second corner y
    pub y2: i32,
}

impl CanvasRect {
    /// Create a rectangle from raw corners, in the order given
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle spanned by two points in drag order
    pub const fn spanning(start: CanvasPoint, end: CanvasPoint) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Same rectangle with `x1 <= x2` and `y1 <= y2`
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Signed horizontal extent, negative for a backward drag
    ///
    /// Widened to `i64` so corners anywhere in the `i32` range never overflow.
    pub const fn width(&self) -> i64 {
        self.x2 as i64 - self.x1 as i64
    }

    /// Signed vertical extent, negative for an upward drag
    pub const fn height(&self) -> i64 {
        self.y2 as i64 - self.y1 as i64
    }

    /// True when the rectangle covers no pixels
    pub const fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersect with a `size`×`size` canvas, returning `(x, y, width, height)`
    ///
    /// Returns `None` when nothing of the rectangle lies on the canvas.
    pub fn clamped_to_canvas(&self, size: u32) -> Option<(u32, u32, u32, u32)> {
        let rect = self.normalized();
        let limit = i64::from(size);
        let left = i64::from(rect.x1).clamp(0, limit);
        let top = i64::from(rect.y1).clamp(0, limit);
        let right = i64::from(rect.x2).clamp(0, limit);
        let bottom = i64::from(rect.y2).clamp(0, limit);

        (right > left && bottom > top).then(|| {
            (
                left as u32,
                top as u32,
                (right - left) as u32,
                (bottom - top) as u32,
            )
        })
    }
}

/// In-progress rectangle following the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftRect {
    /// Where the pointer went down
    pub anchor: CanvasPoint,
    /// Latest pointer position
    pub cursor: CanvasPoint,
}

impl DraftRect {
    /// Start a draft at a single point
    pub const fn start(at: CanvasPoint) -> Self {
        Self {
            anchor: at,
            cursor: at,
        }
    }

    /// Move the free corner
    pub const fn drag_to(self, to: CanvasPoint) -> Self {
        Self {
            anchor: self.anchor,
            cursor: to,
        }
    }

    /// Rectangle in drag order
    pub const fn rect(&self) -> CanvasRect {
        CanvasRect::spanning(self.anchor, self.cursor)
    }
}

/// A saved, labeled bounding box on the current image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Canvas rectangle, corners normalized
    pub rect: CanvasRect,
    /// Operator-entered label text
    pub label: String,
}

impl Region {
    /// Combine a rectangle and its label
    pub fn new(rect: CanvasRect, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
        }
    }
}
