//! Folio Animation System
//!
//! Value mapping, spring physics and hierarchical reveal scheduling.
//!
//! # Features
//!
//! - **Value Mapper**: piecewise-linear [`Curve`]s with domain clamping
//! - **Easing**: CSS style cubic beziers, including the site's expo-out
//! - **Spring Physics**: RK4-integrated springs, scalar and planar
//! - **Variant Trees**: hidden/visible node trees with additive stagger delays
//! - **Reveal Scheduler**: one-shot activation after first paint, reduced-motion fallback
//! - **Presence**: ephemeral nodes (hover previews) outside the reveal tree
//! - **Presets**: one immutable timing table shared by every screen

pub mod curve;
pub mod easing;
pub mod presence;
pub mod presets;
pub mod reveal;
pub mod spring;
pub mod tween;
pub mod values;
pub mod variant;

pub use curve::{map_value, ControlPoint, Curve};
pub use easing::Easing;
pub use presence::Presence;
pub use presets::{StaggerTiming, TimingTable, TIMINGS};
pub use reveal::{declare_variant_tree, ActivationRecord, RevealPhase, RevealScheduler, VariantTree};
pub use spring::{Spring, Spring2D, SpringConfig};
pub use tween::Tween;
pub use values::Interpolate;
pub use variant::{
    NodeTiming, ResolvedStyle, Stagger, StaggerDirection, Transition, VariantGraph, VariantId,
    VariantNode, VariantSpec, VisibilityState, VisualProps,
};
