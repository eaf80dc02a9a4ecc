//! Host events
//!
//! The host translates its native input into these and hands them to a chart.
//! Pointer coordinates are in the host's client space; the chart converts
//! them to surface-local coordinates.

/// Event type identifier
pub type EventType = u32;

/// Event types a chart reacts to
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_LEAVE: EventType = 5;
    pub const RESIZE: EventType = 40;
    /// Device pixel ratio changed (window moved to another display)
    pub const SCALE_FACTOR: EventType = 41;
}

/// A host event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32, button: u8 },
    Resize { width: f32, height: f32 },
    ScaleFactor(f32),
    None,
}

impl Event {
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::pointer(event_types::POINTER_MOVE, x, y)
    }

    pub fn pointer_leave() -> Self {
        Self {
            event_type: event_types::POINTER_LEAVE,
            data: EventData::None,
            timestamp: 0,
        }
    }

    pub fn pointer(event_type: EventType, x: f32, y: f32) -> Self {
        Self {
            event_type,
            data: EventData::Pointer { x, y, button: 0 },
            timestamp: 0,
        }
    }

    pub fn resize(width: f32, height: f32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            data: EventData::Resize { width, height },
            timestamp: 0,
        }
    }

    pub fn scale_factor(dpr: f32) -> Self {
        Self {
            event_type: event_types::SCALE_FACTOR,
            data: EventData::ScaleFactor(dpr),
            timestamp: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Pointer position, if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }
}
