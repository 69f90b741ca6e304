//! Variant graph
//!
//! Declarative hidden/visible animation states arranged in a tree. A
//! [`VariantSpec`] is the owned, declarative description handed over by the
//! content layer; [`VariantGraph`] is the arena it is flattened into at
//! mount. Nodes are addressed by [`VariantId`] and keep an explicit parent
//! id, so there are no back-pointers to keep alive.
//!
//! # Example
//!
//! ```rust
//! use folio_animation::{Stagger, VariantGraph, VariantSpec, VisualProps};
//!
//! let word = |label: &str| {
//!     VariantSpec::new(label)
//!         .hidden(VisualProps::new().opacity(0.0).translate_y(20.0))
//!         .visible(VisualProps::new().opacity(1.0).translate_y(0.0))
//!         .duration_ms(800)
//! };
//!
//! let heading = VariantSpec::new("heading")
//!     .stagger(Stagger::new(200, 80))
//!     .child(word("Designing"))
//!     .child(word("with"));
//!
//! let graph = VariantGraph::from_spec(&heading);
//! assert_eq!(graph.len(), 3);
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::values::Interpolate;

new_key_type! {
    /// Handle to a node in a [`VariantGraph`]
    pub struct VariantId;
}

/// Visual properties a node may animate between its two states
///
/// `None` means "not declared": the property is left alone by the node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualProps {
    pub opacity: Option<f32>,
    /// Gaussian blur radius in pixels
    pub blur: Option<f32>,
    /// Vertical offset in pixels
    pub translate_y: Option<f32>,
    pub scale: Option<f32>,
    /// Rotation in degrees
    pub rotate: Option<f32>,
}

impl VisualProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn blur(mut self, value: f32) -> Self {
        self.blur = Some(value);
        self
    }

    pub fn translate_y(mut self, value: f32) -> Self {
        self.translate_y = Some(value);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotate(mut self, value: f32) -> Self {
        self.rotate = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Interpolate from `hidden` to `visible` by eased progress `t`
    ///
    /// A property declared in both states is interpolated. A property
    /// declared in only one state holds that value throughout. A property
    /// declared in neither stays `None`.
    pub fn interpolate(hidden: &VisualProps, visible: &VisualProps, t: f32) -> VisualProps {
        fn mix(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a.lerp(&b, t)),
                (Some(v), None) | (None, Some(v)) => Some(v),
                (None, None) => None,
            }
        }

        VisualProps {
            opacity: mix(hidden.opacity, visible.opacity, t),
            blur: mix(hidden.blur, visible.blur, t),
            translate_y: mix(hidden.translate_y, visible.translate_y, t),
            scale: mix(hidden.scale, visible.scale, t),
            rotate: mix(hidden.rotate, visible.rotate, t),
        }
    }
}

/// Per-node style produced by sampling a node; only declared properties are set
pub type ResolvedStyle = VisualProps;

/// Timing of a node's own hidden→visible transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration_ms: u32,
    pub easing: Easing,
    /// Delay declared on the node itself
    pub delay_ms: u32,
}

impl Transition {
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(300, Easing::EaseOut)
    }
}

/// Order in which stagger slots are handed to children
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// Declaration order
    #[default]
    Forward,
    /// Last child first
    Reverse,
    /// Middle child first, fanning outward
    FromCenter,
}

/// Stagger rule turning a node into a stagger group
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    /// Delay before the first child starts
    pub delay_children_ms: u32,
    /// Interval between consecutive children
    pub interval_ms: u32,
    pub direction: StaggerDirection,
    /// Cap on the stagger slot; later children share the last slot
    pub limit: Option<usize>,
}

impl Stagger {
    pub fn new(delay_children_ms: u32, interval_ms: u32) -> Self {
        Self {
            delay_children_ms,
            interval_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    /// Stagger from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Stagger from center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Limit stagger to first N slots
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Delay contributed by the group to child `index` of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let slot = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                center.abs_diff(index)
            }
        };
        let slot = match self.limit {
            Some(limit) => slot.min(limit),
            None => slot,
        };
        let slot = u32::try_from(slot).unwrap_or(u32::MAX);

        self.delay_children_ms
            .saturating_add(self.interval_ms.saturating_mul(slot))
    }
}

/// Declarative description of a variant subtree
#[derive(Clone, Debug, PartialEq)]
pub struct VariantSpec {
    pub label: String,
    pub hidden: VisualProps,
    pub visible: VisualProps,
    pub transition: Transition,
    pub stagger: Option<Stagger>,
    pub children: Vec<VariantSpec>,
}

impl VariantSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hidden: VisualProps::default(),
            visible: VisualProps::default(),
            transition: Transition::default(),
            stagger: None,
            children: Vec::new(),
        }
    }

    pub fn hidden(mut self, props: VisualProps) -> Self {
        self.hidden = props;
        self
    }

    pub fn visible(mut self, props: VisualProps) -> Self {
        self.visible = props;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.transition.duration_ms = duration_ms;
        self
    }

    pub fn delay_ms(mut self, delay_ms: u32) -> Self {
        self.transition.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.transition.easing = easing;
        self
    }

    /// Make this node a stagger group
    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn child(mut self, child: VariantSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = VariantSpec>,
    {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(VariantSpec::node_count).sum::<usize>()
    }
}

/// Whether a node has begun its reveal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

/// Effective timing computed for a node when the tree is activated
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTiming {
    /// Delay from activation, accumulated along the root-to-node path
    pub delay_ms: u32,
    pub duration_ms: u32,
    /// Absolute host time at which the transition starts
    pub start_ms: f64,
}

impl NodeTiming {
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms as f64
    }
}

/// A node in the arena
#[derive(Clone, Debug)]
pub struct VariantNode {
    pub label: String,
    pub parent: Option<VariantId>,
    /// Position among the parent's children at declaration time
    pub declared_index: usize,
    pub children: SmallVec<[VariantId; 8]>,
    /// Number of children declared, kept stable across unmounts
    pub declared_children: usize,
    pub hidden: VisualProps,
    pub visible: VisualProps,
    pub transition: Transition,
    pub stagger: Option<Stagger>,
    pub(crate) state: VisibilityState,
    pub(crate) timing: Option<NodeTiming>,
    /// Highest progress reached this activation pass
    pub(crate) progress: f32,
}

impl VariantNode {
    fn from_spec(spec: &VariantSpec, parent: Option<VariantId>, declared_index: usize) -> Self {
        Self {
            label: spec.label.clone(),
            parent,
            declared_index,
            children: SmallVec::new(),
            declared_children: spec.children.len(),
            hidden: spec.hidden,
            visible: spec.visible,
            transition: spec.transition,
            stagger: spec.stagger,
            state: VisibilityState::Hidden,
            timing: None,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn timing(&self) -> Option<NodeTiming> {
        self.timing
    }

    pub fn is_stagger_group(&self) -> bool {
        self.stagger.is_some()
    }
}

/// Arena holding one variant tree
#[derive(Clone, Debug, Default)]
pub struct VariantGraph {
    nodes: SlotMap<VariantId, VariantNode>,
    root: Option<VariantId>,
}

impl VariantGraph {
    /// Flatten a spec into a fresh arena
    pub fn from_spec(spec: &VariantSpec) -> Self {
        let mut graph = Self {
            nodes: SlotMap::with_capacity_and_key(spec.node_count()),
            root: None,
        };
        let root = graph.insert(spec, None, 0);
        graph.root = Some(root);
        graph
    }

    fn insert(&mut self, spec: &VariantSpec, parent: Option<VariantId>, index: usize) -> VariantId {
        let id = self
            .nodes
            .insert(VariantNode::from_spec(spec, parent, index));
        for (child_index, child) in spec.children.iter().enumerate() {
            let child_id = self.insert(child, Some(id), child_index);
            if let Some(node) = self.nodes.get_mut(id) {
                node.children.push(child_id);
            }
        }
        id
    }

    pub fn root(&self) -> Option<VariantId> {
        self.root
    }

    pub fn get(&self, id: VariantId) -> Option<&VariantNode> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: VariantId) -> Option<&mut VariantNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: VariantId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn parent(&self, id: VariantId) -> Option<VariantId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: VariantId) -> &[VariantId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in depth-first pre-order (declaration order among siblings)
    pub fn depth_first(&self) -> Vec<VariantId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<VariantId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// First node in depth-first order with the given label
    pub fn find(&self, label: &str) -> Option<VariantId> {
        self.depth_first()
            .into_iter()
            .find(|id| self.nodes.get(*id).is_some_and(|node| node.label == label))
    }

    /// Ids from the root down to `id`, inclusive
    pub fn path_to(&self, id: VariantId) -> Vec<VariantId> {
        let mut path = Vec::new();
        let mut cursor = self.contains(id).then_some(id);
        while let Some(current) = cursor {
            path.push(current);
            cursor = self.parent(current);
        }
        path.reverse();
        path
    }

    /// Remove `id` and its descendants, returning how many nodes were removed
    pub fn remove_subtree(&mut self, id: VariantId) -> usize {
        if !self.contains(id) {
            return 0;
        }

        if let Some(parent) = self.parent(id) {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|child| *child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children.iter().copied());
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> VariantSpec {
        VariantSpec::new(label)
            .hidden(VisualProps::new().opacity(0.0))
            .visible(VisualProps::new().opacity(1.0))
    }

    fn sample_tree() -> VariantSpec {
        VariantSpec::new("root")
            .child(
                VariantSpec::new("group")
                    .stagger(Stagger::new(200, 100))
                    .children([leaf("a"), leaf("b"), leaf("c")]),
            )
            .child(leaf("tail"))
    }

    #[test]
    fn test_arena_structure() {
        let graph = VariantGraph::from_spec(&sample_tree());
        assert_eq!(graph.len(), 6);

        let root = graph.root().unwrap();
        assert_eq!(graph.children(root).len(), 2);

        let b = graph.find("b").unwrap();
        let group = graph.find("group").unwrap();
        assert_eq!(graph.parent(b), Some(group));
        assert_eq!(graph.get(b).unwrap().declared_index, 1);
        assert_eq!(graph.path_to(b), vec![root, group, b]);
    }

    #[test]
    fn test_depth_first_order() {
        let graph = VariantGraph::from_spec(&sample_tree());
        let labels: Vec<_> = graph
            .depth_first()
            .into_iter()
            .map(|id| graph.get(id).unwrap().label.clone())
            .collect();
        assert_eq!(labels, ["root", "group", "a", "b", "c", "tail"]);
    }

    #[test]
    fn test_remove_subtree() {
        let mut graph = VariantGraph::from_spec(&sample_tree());
        let group = graph.find("group").unwrap();
        let a = graph.find("a").unwrap();

        assert_eq!(graph.remove_subtree(group), 4);
        assert_eq!(graph.len(), 2);
        assert!(!graph.contains(a));
        assert_eq!(graph.children(graph.root().unwrap()).len(), 1);
        assert_eq!(graph.remove_subtree(group), 0);
    }

    #[test]
    fn test_stagger_forward() {
        let stagger = Stagger::new(200, 100);
        let delays: Vec<_> = (0..3).map(|i| stagger.delay_for_index(i, 3)).collect();
        assert_eq!(delays, [200, 300, 400]);
    }

    #[test]
    fn test_stagger_reverse_and_center() {
        let reverse = Stagger::new(0, 10).reverse();
        assert_eq!(reverse.delay_for_index(0, 3), 20);
        assert_eq!(reverse.delay_for_index(2, 3), 0);

        let center = Stagger::new(0, 10).from_center();
        assert_eq!(center.delay_for_index(2, 5), 0);
        assert_eq!(center.delay_for_index(0, 5), 20);
        assert_eq!(center.delay_for_index(4, 5), 20);
    }

    #[test]
    fn test_stagger_limit() {
        let stagger = Stagger::new(0, 50).limit(2);
        assert_eq!(stagger.delay_for_index(5, 10), 100);
    }

    #[test]
    fn test_undeclared_property_untouched() {
        let hidden = VisualProps::new().opacity(0.0).blur(10.0);
        let visible = VisualProps::new().opacity(1.0).blur(0.0);
        let mid = VisualProps::interpolate(&hidden, &visible, 0.5);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.blur, Some(5.0));
        assert_eq!(mid.scale, None);
        assert_eq!(mid.rotate, None);
    }

    #[test]
    fn test_one_sided_property_holds() {
        let hidden = VisualProps::new().opacity(0.0);
        let visible = VisualProps::new().opacity(1.0).scale(1.0);
        let start = VisualProps::interpolate(&hidden, &visible, 0.0);
        assert_eq!(start.scale, Some(1.0));
    }
}
