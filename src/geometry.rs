//! Desktop geometry in pixels, and its projection onto terminal cells.
//!
//! The window manager works in desktop pixels so window math is independent
//! of the terminal. `CellMetrics` maps pixel rectangles onto the cell grid
//! for drawing and maps pointer cells back into pixels.

use std::ops::{Add, Sub};

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::window::FloatRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Applies the managed window size floor.
    pub fn floored(self) -> Self {
        Self {
            width: self.width.max(MIN_WINDOW_WIDTH),
            height: self.height.max(MIN_WINDOW_HEIGHT),
        }
    }
}

/// Window bounds in desktop pixels: top-left origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    width: u16,
    height: u16,
}

impl CellMetrics {
    /// Zero dimensions are bumped to one pixel.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn cell_width(&self) -> u16 {
        self.width
    }

    pub fn cell_height(&self) -> u16 {
        self.height
    }

    /// Projects a pixel rectangle onto cells. Edges are floored
    /// independently so abutting rectangles stay abutting.
    pub fn to_cells(&self, rect: PixelRect) -> FloatRect {
        let cw = i32::from(self.width);
        let ch = i32::from(self.height);
        let x = rect.x.div_euclid(cw);
        let y = rect.y.div_euclid(ch);
        let right = rect.right().div_euclid(cw);
        let bottom = rect.bottom().div_euclid(ch);
        FloatRect {
            x,
            y,
            width: (right - x).clamp(0, i32::from(u16::MAX)) as u16,
            height: (bottom - y).clamp(0, i32::from(u16::MAX)) as u16,
        }
    }

    /// Pixel position of the top-left corner of a cell.
    pub fn to_pixels(&self, column: u16, row: u16) -> Point {
        Point::new(
            i32::from(column) * i32::from(self.width),
            i32::from(row) * i32::from(self.height),
        )
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_width_always_spans_same_cell_count() {
        let metrics = CellMetrics::default();
        for x in -20..20 {
            let cells = metrics.to_cells(PixelRect::new(x, 0, MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
            assert_eq!(cells.width, 25, "x = {x}");
        }
    }

    #[test]
    fn negative_origins_floor_toward_negative_infinity() {
        let metrics = CellMetrics::default();
        let cells = metrics.to_cells(PixelRect::new(-1, -17, 400, 300));
        assert_eq!(cells.x, -1);
        assert_eq!(cells.y, -2);
    }

    #[test]
    fn pointer_cells_map_to_cell_origins() {
        let metrics = CellMetrics::new(8, 16);
        assert_eq!(metrics.to_pixels(3, 2), Point::new(24, 32));
    }

    #[test]
    fn zero_metrics_are_bumped() {
        let metrics = CellMetrics::new(0, 0);
        assert_eq!(metrics.cell_width(), 1);
        assert_eq!(metrics.cell_height(), 1);
    }

    #[test]
    fn size_floor_applies_per_axis() {
        assert_eq!(Size::new(150, 250).floored(), Size::new(200, 250));
        assert_eq!(Size::new(300, 20).floored(), Size::new(300, 100));
    }
}
