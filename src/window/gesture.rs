//! Pointer gestures on window chrome: title-bar drags and edge resizes.
//!
//! A gesture captures the window geometry and pointer position at
//! pointer-down; every later pointer position is turned into new geometry
//! from those captured values, never from the previous step.

use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::geometry::{PixelRect, Point};
use crate::window::{ManagedWindow, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub fn north(self) -> bool {
        matches!(
            self,
            ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest
        )
    }

    pub fn south(self) -> bool {
        matches!(
            self,
            ResizeEdge::South | ResizeEdge::SouthEast | ResizeEdge::SouthWest
        )
    }

    pub fn east(self) -> bool {
        matches!(
            self,
            ResizeEdge::East | ResizeEdge::NorthEast | ResizeEdge::SouthEast
        )
    }

    pub fn west(self) -> bool {
        matches!(
            self,
            ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest
        )
    }
}

/// New bounds for a resize of `start` by the pointer `delta` along `edge`.
///
/// East/south grow the size directly. West/north clamp the change first and
/// shift the origin by it, so the opposite edge stays where it was.
pub fn apply_resize(start: PixelRect, edge: ResizeEdge, delta: Point) -> PixelRect {
    let mut next = start;
    if edge.east() {
        next.width = MIN_WINDOW_WIDTH.max(start.width + delta.x);
    }
    if edge.west() {
        let change = start.width - MIN_WINDOW_WIDTH.max(start.width - delta.x);
        next.width = start.width - change;
        next.x = start.x + change;
    }
    if edge.south() {
        next.height = MIN_WINDOW_HEIGHT.max(start.height + delta.y);
    }
    if edge.north() {
        let change = start.height - MIN_WINDOW_HEIGHT.max(start.height - delta.y);
        next.height = start.height - change;
        next.y = start.y + change;
    }
    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub id: WindowId,
    /// Pointer position relative to the window origin at pointer-down.
    pub offset: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: Point,
    pub start: PixelRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Dragging(HeaderDrag),
    Resizing(ResizeDrag),
}

/// Geometry produced by one pointer-move during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStep {
    Move(Point),
    Bounds(PixelRect),
}

impl Gesture {
    pub fn begin_drag(window: &ManagedWindow, pointer: Point) -> Self {
        Gesture::Dragging(HeaderDrag {
            id: window.id(),
            offset: pointer - window.position(),
        })
    }

    pub fn begin_resize(window: &ManagedWindow, edge: ResizeEdge, pointer: Point) -> Self {
        Gesture::Resizing(ResizeDrag {
            id: window.id(),
            edge,
            pointer_start: pointer,
            start: window.bounds(),
        })
    }

    pub fn window_id(&self) -> WindowId {
        match self {
            Gesture::Dragging(drag) => drag.id,
            Gesture::Resizing(resize) => resize.id,
        }
    }

    pub fn step(&self, pointer: Point) -> GestureStep {
        match self {
            Gesture::Dragging(drag) => GestureStep::Move(pointer - drag.offset),
            Gesture::Resizing(resize) => GestureStep::Bounds(apply_resize(
                resize.start,
                resize.edge,
                pointer - resize.pointer_start,
            )),
        }
    }
}
