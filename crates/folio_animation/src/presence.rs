//! Ephemeral presence
//!
//! Short-lived hidden/visible nodes that live outside the reveal tree, such
//! as the "about me" preview that pops up while the logo is hovered. They
//! use one fixed short transition, ignore stagger, and can be shown and
//! hidden any number of times.

use crate::easing::Easing;
use crate::tween::Tween;
use crate::variant::{ResolvedStyle, VisualProps};
use folio_core::MotionPolicy;

/// A node that enters and exits independently of any tree
#[derive(Clone, Debug)]
pub struct Presence {
    hidden: VisualProps,
    visible: VisualProps,
    progress: Tween,
    enabled: bool,
}

impl Presence {
    /// Create a hidden presence with a fixed transition
    ///
    /// Reduced motion makes the transition instant; a policy without pointer
    /// tracking disables the presence entirely (it never shows).
    pub fn new(
        hidden: VisualProps,
        visible: VisualProps,
        duration_ms: u32,
        easing: Easing,
        policy: MotionPolicy,
    ) -> Self {
        let duration_ms = if policy.reduced_motion() { 0 } else { duration_ms };
        Self {
            hidden,
            visible,
            progress: Tween::new(0.0, duration_ms, easing),
            enabled: policy.pointer_tracking(),
        }
    }

    pub fn show(&mut self) {
        if self.enabled {
            self.progress.retarget(1.0);
        }
    }

    pub fn hide(&mut self) {
        self.progress.retarget(0.0);
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.progress.advance(dt_ms);
    }

    /// Whether the node must be rendered (visible or still exiting)
    pub fn is_present(&self) -> bool {
        self.progress.target() > 0.0 || self.progress.value() > 0.0
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current style, `None` once fully exited
    pub fn sample(&self) -> Option<ResolvedStyle> {
        if !self.is_present() {
            return None;
        }
        Some(VisualProps::interpolate(
            &self.hidden,
            &self.visible,
            self.progress.value(),
        ))
    }
}
