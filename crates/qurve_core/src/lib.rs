//! Qurve Core Runtime
//!
//! Chart-independent plumbing shared by every qurve producer:
//!
//! - **Registry**: an ordered arena of callbacks keyed by stable handles
//! - **Disposer**: the lifecycle handle returned by every registration
//! - **Events**: pointer/resize events fed in by the host
//! - **Frames**: how the engine asks the host for a display tick
//!
//! Everything here is single-threaded; nothing is `Send`.

pub mod events;
pub mod frame;
pub mod registry;

pub use events::{event_types, Event, EventData, EventType};
pub use frame::{FrameRequester, ManualFrames};
pub use registry::{Disposer, EntryId, Registry};
