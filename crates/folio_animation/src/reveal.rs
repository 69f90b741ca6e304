//! Reveal scheduler
//!
//! Activates a variant tree once and resolves when every node starts and
//! how far along its hidden→visible transition it is.
//!
//! Activation walks the arena depth-first. A node's effective delay is the
//! sum of every delay on its root-to-node path:
//!
//! ```text
//! delay(node)  = inherited(node) + node.own_delay
//! inherited(c) = delay(parent) + parent.stagger.delay_for_index(i)   (i = c's declared index)
//! ```
//!
//! so a stagger group with base `b` and interval `d` starts child `i` at
//! `b + i·d` after the group itself.
//!
//! Under reduced motion every node resolves to its visible state on the
//! activation frame: durations and delays collapse to zero.

use crate::variant::{
    NodeTiming, ResolvedStyle, VariantGraph, VariantId, VariantSpec, VisibilityState, VisualProps,
};
use folio_core::{FrameTick, Liveness, MotionPolicy};

/// One entry of the activation log, in depth-first order
#[derive(Clone, Debug, PartialEq)]
pub struct ActivationRecord {
    pub node: VariantId,
    pub label: String,
    /// Effective delay from activation
    pub delay_ms: u32,
    /// Absolute host time the node's transition starts
    pub start_ms: f64,
}

/// Activation phase of a tree
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealPhase {
    /// Declared, every node hidden
    Idle,
    /// Activated at the given host time
    Active { activated_at_ms: f64 },
}

/// Handle to a declared variant tree
///
/// Created with [`declare_variant_tree`]. `activate` runs at most once per
/// declaration; `reset` rebuilds every node from the spec so the tree can be
/// revealed again.
#[derive(Debug)]
pub struct VariantTree {
    spec: VariantSpec,
    graph: VariantGraph,
    policy: MotionPolicy,
    phase: RevealPhase,
    log: Vec<ActivationRecord>,
}

/// Flatten `spec` into a tree handle governed by `policy`
pub fn declare_variant_tree(spec: VariantSpec, policy: MotionPolicy) -> VariantTree {
    VariantTree::declare(spec, policy)
}

impl VariantTree {
    pub fn declare(spec: VariantSpec, policy: MotionPolicy) -> Self {
        let graph = VariantGraph::from_spec(&spec);
        tracing::debug!(
            root = %spec.label,
            nodes = graph.len(),
            reduced_motion = policy.reduced_motion(),
            "variant tree declared"
        );
        Self {
            spec,
            graph,
            policy,
            phase: RevealPhase::Idle,
            log: Vec::new(),
        }
    }

    pub fn graph(&self) -> &VariantGraph {
        &self.graph
    }

    pub fn spec(&self) -> &VariantSpec {
        &self.spec
    }

    pub fn policy(&self) -> MotionPolicy {
        self.policy
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, RevealPhase::Active { .. })
    }

    /// Look up a node by label (first match, depth-first)
    pub fn find(&self, label: &str) -> Option<VariantId> {
        self.graph.find(label)
    }

    pub fn timing(&self, id: VariantId) -> Option<NodeTiming> {
        self.graph.get(id).and_then(|node| node.timing())
    }

    pub fn state(&self, id: VariantId) -> Option<VisibilityState> {
        self.graph.get(id).map(|node| node.state())
    }

    /// Per-node start times recorded by the last activation
    pub fn activation_log(&self) -> &[ActivationRecord] {
        &self.log
    }

    /// Activate the tree at host time `now_ms`
    ///
    /// Returns `false` (and changes nothing) if the tree is already active.
    pub fn activate(&mut self, now_ms: f64) -> bool {
        if self.is_active() {
            tracing::trace!("variant tree already active, ignoring activate");
            return false;
        }
        let Some(root) = self.graph.root() else {
            return false;
        };

        let reduced = self.policy.reduced_motion();
        self.log.clear();

        // (node, inherited delay) in depth-first pre-order
        let mut stack: Vec<(VariantId, u32)> = vec![(root, 0)];
        while let Some((id, inherited)) = stack.pop() {
            let (delay_ms, start_ms, label, stagger, total, children) = {
                let Some(node) = self.graph.get_mut(id) else {
                    continue;
                };

                let delay_ms = if reduced {
                    0
                } else {
                    inherited.saturating_add(node.transition.delay_ms)
                };
                let duration_ms = if reduced {
                    0
                } else {
                    node.transition.duration_ms
                };
                let start_ms = now_ms + delay_ms as f64;

                node.timing = Some(NodeTiming {
                    delay_ms,
                    duration_ms,
                    start_ms,
                });
                node.progress = 0.0;

                (
                    delay_ms,
                    start_ms,
                    node.label.clone(),
                    node.stagger,
                    node.declared_children,
                    node.children.clone(),
                )
            };

            tracing::trace!(node = %label, delay_ms, start_ms, "node scheduled");
            self.log.push(ActivationRecord {
                node: id,
                label,
                delay_ms,
                start_ms,
            });

            for child in children.iter().rev() {
                let Some(index) = self.graph.get(*child).map(|c| c.declared_index) else {
                    continue;
                };
                let offset = stagger.map_or(0, |s| s.delay_for_index(index, total));
                stack.push((*child, delay_ms.saturating_add(offset)));
            }
        }

        self.phase = RevealPhase::Active {
            activated_at_ms: now_ms,
        };
        tracing::debug!(nodes = self.log.len(), now_ms, "variant tree activated");
        true
    }

    /// Recreate every node from the spec and return to the idle phase
    pub fn reset(&mut self) {
        self.graph = VariantGraph::from_spec(&self.spec);
        self.phase = RevealPhase::Idle;
        self.log.clear();
        tracing::debug!(root = %self.spec.label, "variant tree reset");
    }

    /// Unmount a node and its subtree, cancelling pending transitions
    ///
    /// Siblings keep their slots and timings. Returns `false` if the node
    /// was already gone.
    pub fn unmount(&mut self, id: VariantId) -> bool {
        let removed = self.graph.remove_subtree(id);
        if removed > 0 {
            tracing::debug!(?id, removed, "variant subtree unmounted");
        }
        removed > 0
    }

    /// Resolve a node's style at host time `now_ms`
    ///
    /// Returns `None` for unmounted nodes. Progress never decreases within
    /// an activation pass, even if `now_ms` goes backwards.
    pub fn sample(&mut self, id: VariantId, now_ms: f64) -> Option<ResolvedStyle> {
        let node = self.graph.get_mut(id)?;

        let Some(timing) = node.timing else {
            return Some(VisualProps::interpolate(&node.hidden, &node.visible, 0.0));
        };

        let elapsed = now_ms - timing.start_ms;
        if elapsed >= 0.0 {
            node.state = VisibilityState::Visible;
        }

        let raw = if elapsed < 0.0 {
            0.0
        } else if timing.duration_ms == 0 {
            1.0
        } else {
            (elapsed / timing.duration_ms as f64).clamp(0.0, 1.0) as f32
        };
        node.progress = node.progress.max(raw);

        let eased = node.transition.easing.apply(node.progress);
        Some(VisualProps::interpolate(&node.hidden, &node.visible, eased))
    }

    /// Resolve every mounted node, depth-first
    pub fn sample_all(&mut self, now_ms: f64) -> Vec<(VariantId, ResolvedStyle)> {
        self.graph
            .depth_first()
            .into_iter()
            .filter_map(|id| self.sample(id, now_ms).map(|style| (id, style)))
            .collect()
    }

    /// Whether every mounted node has finished its transition by `now_ms`
    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.is_active()
            && self
                .graph
                .depth_first()
                .into_iter()
                .filter_map(|id| self.timing(id))
                .all(|timing| now_ms >= timing.end_ms())
    }
}

/// Drives a [`VariantTree`] from host frames
///
/// The first frame paints every node hidden (hydration); the tree is
/// activated on the following frame, exactly once.
#[derive(Debug)]
pub struct RevealScheduler {
    tree: VariantTree,
    painted: bool,
    liveness: Liveness,
}

impl RevealScheduler {
    pub fn new(tree: VariantTree) -> Self {
        Self {
            tree,
            painted: false,
            liveness: Liveness::new(),
        }
    }

    pub fn tree(&self) -> &VariantTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut VariantTree {
        &mut self.tree
    }

    /// Flag shared with deferred callbacks; dead after [`RevealScheduler::dispose`]
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    pub fn is_disposed(&self) -> bool {
        !self.liveness.is_alive()
    }

    /// Advance one frame, returning the style of every mounted node
    pub fn on_frame(&mut self, tick: &FrameTick) -> Vec<(VariantId, ResolvedStyle)> {
        if self.is_disposed() {
            return Vec::new();
        }

        if !self.painted {
            self.painted = true;
            tracing::trace!(frame = tick.frame, "first paint, reveal deferred");
        } else if !self.tree.is_active() {
            self.tree.activate(tick.timestamp_ms);
        }

        self.tree.sample_all(tick.timestamp_ms)
    }

    /// Rebuild the tree and replay the reveal after the next painted frame
    pub fn replay(&mut self) {
        self.tree.reset();
        self.painted = false;
    }

    /// Tear down: pending transitions are dropped and later frames no-op
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.liveness.kill();
        if let Some(root) = self.tree.graph().root() {
            self.tree.unmount(root);
        }
        tracing::debug!("reveal scheduler disposed");
    }
}
