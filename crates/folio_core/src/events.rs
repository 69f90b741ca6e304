//! Host event types
//!
//! The host rendering substrate delivers pointer, viewport and frame events
//! through [`EventSource`](crate::lifecycle::EventSource)s. Event type ids are
//! plain `u32` constants so state machines can match on them directly.

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Well-known event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 1;
    pub const POINTER_MOVE: EventType = 2;
    pub const POINTER_LEAVE: EventType = 3;
    pub const POINTER_DOWN: EventType = 4;
    pub const POINTER_UP: EventType = 5;
    /// Click or tap completed on the element
    pub const ACTIVATE: EventType = 6;

    pub const SCROLL: EventType = 10;
    pub const RESIZE: EventType = 11;
    pub const FRAME: EventType = 12;
}

/// Kind of device that produced a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Pointer event delivered to interactive elements
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub event_type: EventType,
    /// Pointer position in document space
    pub position: Point,
    pub kind: PointerKind,
    /// Host timestamp in milliseconds
    pub timestamp_ms: f64,
}

impl PointerEvent {
    pub fn new(event_type: EventType, position: Point) -> Self {
        Self {
            event_type,
            position,
            kind: PointerKind::Mouse,
            timestamp_ms: 0.0,
        }
    }

    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn at(mut self, timestamp_ms: f64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn enter(position: Point) -> Self {
        Self::new(event_types::POINTER_ENTER, position)
    }

    pub fn moved(position: Point) -> Self {
        Self::new(event_types::POINTER_MOVE, position)
    }

    pub fn leave(position: Point) -> Self {
        Self::new(event_types::POINTER_LEAVE, position)
    }

    pub fn down(position: Point) -> Self {
        Self::new(event_types::POINTER_DOWN, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(event_types::POINTER_UP, position)
    }

    pub fn activate(position: Point) -> Self {
        Self::new(event_types::ACTIVATE, position)
    }
}

/// Viewport state delivered on scroll, resize and frame ticks
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportEvent {
    /// One of `SCROLL`, `RESIZE` or `FRAME`
    pub event_type: EventType,
    /// Frame counter of the host; several events may share one frame
    pub frame: u64,
    pub timestamp_ms: f64,
    /// Vertical scroll offset of the page
    pub scroll_y: f32,
    pub viewport_height: f32,
}

impl ViewportEvent {
    pub fn scroll(frame: u64, timestamp_ms: f64, scroll_y: f32, viewport_height: f32) -> Self {
        Self {
            event_type: event_types::SCROLL,
            frame,
            timestamp_ms,
            scroll_y,
            viewport_height,
        }
    }

    pub fn resize(frame: u64, timestamp_ms: f64, scroll_y: f32, viewport_height: f32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            ..Self::scroll(frame, timestamp_ms, scroll_y, viewport_height)
        }
    }

    pub fn frame(frame: u64, timestamp_ms: f64, scroll_y: f32, viewport_height: f32) -> Self {
        Self {
            event_type: event_types::FRAME,
            ..Self::scroll(frame, timestamp_ms, scroll_y, viewport_height)
        }
    }
}
