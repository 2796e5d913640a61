//! Integer scene geometry.
//!
//! Every entity is an axis-aligned rectangle anchored at its **center**.
//! Coordinates are whole pixels (`i32`); movement deltas are small signed
//! integers, so nothing here needs floating point except the Euclidean
//! distance helper used to size stuck thresholds.
//!
//! # Overlap rule
//!
//! Two rectangles overlap only if their interiors intersect.  Edges that
//! exactly touch (`a.right() == b.left()`) do **not** count as overlap, so two
//! 60 px chickens may stand side by side at x = 100 and x = 160.

use std::fmt;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position on the scene plane, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return `self` shifted by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Euclidean distance in pixels.
    pub fn distance(self, other: Point) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if both axes are within `tolerance` pixels of `other`.
    #[inline]
    pub fn near(self, other: Point, tolerance: i32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Size ──────────────────────────────────────────────────────────────────────

/// Width and height of an entity, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width:  i32,
    pub height: i32,
}

impl Size {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// A center-anchored axis-aligned rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub center: Point,
    pub size:   Size,
}

impl Rect {
    #[inline]
    pub const fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.center.x - self.size.width / 2
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.left() + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.center.y - self.size.height / 2
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.bottom() + self.size.height
    }

    /// `[left, bottom]` and `[right, top]` corners, the shape `rstar` wants.
    #[inline]
    pub fn corners(&self) -> ([i32; 2], [i32; 2]) {
        ([self.left(), self.bottom()], [self.right(), self.top()])
    }

    /// Same size, new center.
    #[inline]
    pub fn moved_to(&self, center: Point) -> Rect {
        Rect { center, size: self.size }
    }

    /// Same size, center shifted by `(dx, dy)`.
    #[inline]
    pub fn shifted(&self, dx: i32, dy: i32) -> Rect {
        self.moved_to(self.center.offset(dx, dy))
    }

    /// `true` if the interiors intersect.  Touching edges are not an overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }

    /// `true` if `p` lies strictly inside the rectangle.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.bottom() && p.y < self.top()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}x{}", self.center, self.size.width, self.size.height)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// The usable part of the scene: every mobile rectangle must lie entirely
/// within `[min, max]` (inclusive edges).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Usable area of a `width × height` scene with `margin` pixels kept
    /// clear on every side.
    pub const fn with_margin(width: i32, height: i32, margin: i32) -> Self {
        Self {
            min: Point::new(margin, margin),
            max: Point::new(width - margin, height - margin),
        }
    }

    /// `true` if the whole of `rect` lies inside the bounds.
    #[inline]
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left() >= self.min.x
            && rect.right() <= self.max.x
            && rect.bottom() >= self.min.y
            && rect.top() <= self.max.y
    }

    /// Clamp a center point so a rectangle of `size` centered there fits.
    pub fn clamp_center(&self, p: Point, size: Size) -> Point {
        let probe = Rect::new(Point::new(0, 0), size);
        // Offsets from the center to each edge; asymmetric for odd sizes.
        let (lo_x, hi_x) = (-probe.left(), probe.right());
        let (lo_y, hi_y) = (-probe.bottom(), probe.top());
        Point::new(
            p.x.clamp(self.min.x + lo_x, (self.max.x - hi_x).max(self.min.x + lo_x)),
            p.y.clamp(self.min.y + lo_y, (self.max.y - hi_y).max(self.min.y + lo_y)),
        )
    }
}

impl Default for Bounds {
    /// A 900 × 600 scene with a 30 px margin.
    fn default() -> Self {
        Bounds::with_margin(900, 600, 30)
    }
}
