//! Folio Core
//!
//! Foundational primitives for the Folio interaction layer:
//!
//! - **Geometry**: points, rects and vectors in document space
//! - **Color**: RGBA with hex parsing for per-instance hover identities
//! - **Events**: pointer and viewport events delivered by the host
//! - **Lifecycle**: event sources with scoped subscriptions and liveness flags
//! - **Frame**: frame ticks, delta clamping and once-per-frame throttling
//! - **Policy**: reduced-motion and touch policy frozen at mount
//!
//! # Example
//!
//! ```rust
//! use folio_core::{EventSource, Point, PointerEvent};
//!
//! let pointer = EventSource::<PointerEvent>::new();
//! let sub = pointer.subscribe(|e| assert_eq!(e.position.x, 4.0));
//! pointer.emit(&PointerEvent::moved(Point::new(4.0, 2.0)));
//! sub.unsubscribe();
//! assert_eq!(pointer.listener_count(), 0);
//! ```

pub mod color;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod lifecycle;
pub mod policy;

pub use color::Color;
pub use error::{ConfigurationError, Result};
pub use events::{event_types, EventType, PointerEvent, PointerKind, ViewportEvent};
pub use frame::{clamp_frame_delta, FrameClock, FrameThrottle, FrameTick, MAX_FRAME_DELTA_MS};
pub use geometry::{Point, Rect, Size, Vec2};
pub use lifecycle::{EventSource, ListenerId, Liveness, Subscription};
pub use policy::{InputEnvironment, MotionPolicy, TouchCapability};
