//! Motion and input policy
//!
//! Reduced-motion preference and touch capability are probed once when the
//! page mounts and frozen into a [`MotionPolicy`]. Components copy the policy
//! at construction and never re-inspect the environment.

/// Result of probing the device for touch input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchCapability {
    /// Touch input present (`ontouchstart` or `maxTouchPoints > 0`)
    Detected,
    /// Probe ran and found no touch input
    Absent,
    /// Probe could not run or gave a contradictory answer
    #[default]
    Unknown,
}

/// Raw environment facts reported by the host at mount
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputEnvironment {
    pub touch: TouchCapability,
    /// `prefers-reduced-motion: reduce`
    pub prefers_reduced_motion: bool,
}

impl InputEnvironment {
    /// Desktop pointer, full motion
    pub fn desktop() -> Self {
        Self {
            touch: TouchCapability::Absent,
            prefers_reduced_motion: false,
        }
    }

    pub fn touch() -> Self {
        Self {
            touch: TouchCapability::Detected,
            prefers_reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.prefers_reduced_motion = reduced;
        self
    }
}

/// Immutable motion flags derived once from the environment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionPolicy {
    reduced_motion: bool,
    pointer_tracking: bool,
}

impl MotionPolicy {
    /// Derive the policy; inconclusive touch detection disables tracking
    pub fn from_environment(env: InputEnvironment) -> Self {
        let pointer_tracking = matches!(env.touch, TouchCapability::Absent);
        let policy = Self {
            reduced_motion: env.prefers_reduced_motion,
            pointer_tracking,
        };
        tracing::debug!(?env, ?policy, "motion policy resolved");
        policy
    }

    /// Full motion with pointer tracking
    pub const fn full() -> Self {
        Self {
            reduced_motion: false,
            pointer_tracking: true,
        }
    }

    /// Whether every transition duration collapses to zero
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Whether hover-driven effects (magnetic tracking, previews) may run
    pub fn pointer_tracking(&self) -> bool {
        self.pointer_tracking
    }
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self::from_environment(InputEnvironment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_policy() {
        let policy = MotionPolicy::from_environment(InputEnvironment::desktop());
        assert!(policy.pointer_tracking());
        assert!(!policy.reduced_motion());
    }

    #[test]
    fn test_touch_disables_tracking() {
        let policy = MotionPolicy::from_environment(InputEnvironment::touch());
        assert!(!policy.pointer_tracking());
    }

    #[test]
    fn test_unknown_touch_is_treated_as_touch() {
        let policy = MotionPolicy::default();
        assert!(!policy.pointer_tracking());
    }

    #[test]
    fn test_reduced_motion_flag() {
        let env = InputEnvironment::desktop().with_reduced_motion(true);
        assert!(MotionPolicy::from_environment(env).reduced_motion());
    }
}
