use serde::{Deserialize, Serialize};

pub mod config;
pub mod entities;
pub mod game;
pub mod game_loop;
pub mod map;
pub mod pathfinder;
pub mod projectiles;

/// A (column, row) index into the uniform grid laid over the playfield.
///
/// Signed so that cells just outside the grid can still be named; anything
/// outside `[0, cols) x [0, rows)` is simply not part of the grid graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        GridCoord { col, row }
    }
}

/// An axis-aligned rectangle in world units (top-left origin, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true if the two rectangles share any interior area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns true if the whole rectangle lies inside `[0, width] x [0, height]`.
    pub fn within(&self, width: i32, height: i32) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.x) + i64::from(self.width) <= i64::from(width)
            && i64::from(self.y) + i64::from(self.height) <= i64::from(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_contact_is_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partial_overlap_is_symmetric() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(9, 9, 5, 5);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn within_checks_full_extent() {
        assert!(Rect::new(0, 0, 40, 40).within(40, 40));
        assert!(!Rect::new(1, 0, 40, 40).within(40, 40));
        assert!(!Rect::new(-1, 0, 10, 10).within(40, 40));
    }
}
