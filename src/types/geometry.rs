//! Screen-space geometry used for hit testing

use serde::{Deserialize, Serialize};

/// A point in logical screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle whose right and bottom edges are part of the area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive hit test; compared in `i64` so no size overflows
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let within = |p: i32, start: i32, len: i32| {
            p >= start && i64::from(p) - i64::from(start) <= i64::from(len)
        };
        within(x, self.x, self.w) && within(y, self.y, self.h)
    }

    /// The same rectangle moved down by `dy`
    pub fn offset_y(&self, dy: i32) -> Self {
        Self {
            y: self.y.saturating_add(dy),
            ..*self
        }
    }
}
