//! Folio Interaction
//!
//! Input-driven behavior of the portfolio page:
//!
//! - **Scroll progress**: normalized progress of a region through the
//!   viewport, recomputed at most once per frame
//! - **Magnetic controls**: spring-driven pointer attraction with hover
//!   morphing, disabled on touch devices

pub mod magnetic;
pub mod scroll;

pub use magnetic::{
    create_magnetic_controller, Attraction, HoverState, MagneticConfig, MagneticController,
    MagneticFrame,
};
pub use scroll::{
    compute_progress, subscribe_progress, Anchors, Edge, Intersection, ProgressBinding,
    ProgressSample, RegionBounds, RegionProbe, ScrollGeometry, ScrollProgressTracker,
};
