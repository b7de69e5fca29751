use glam::IVec2;

/// Axis-aligned integer rectangle (x, y, width, height)
///
/// Screen coordinates: +x to the right, +y downwards. Width and height are
/// always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "geometry needs a positive size");
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn top(&self) -> i32 {
        self.pos.y
    }

    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    pub fn left(&self) -> i32 {
        self.pos.x
    }

    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    pub fn center_y(&self) -> i32 {
        self.pos.y + self.size.y / 2
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.pos += delta;
    }

    pub fn translated(&self, delta: IVec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Strict AABB overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Geometry) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when `other` lies entirely inside `self` (edges inclusive)
    pub fn contains(&self, other: &Geometry) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }
}
