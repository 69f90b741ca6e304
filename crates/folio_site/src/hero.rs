//! Hero scene
//!
//! Mounts the landing hero: the headline and description reveal, the social
//! button row with magnetic controllers, the image hover preview and the
//! scroll-linked fade of the whole block.
//!
//! ```text
//! hero
//! ├── heading       stagger 200 + i·80  (words, inline image +500)
//! ├── description   +800
//! │   └── body      +100
//! └── social        stagger 1200 + i·100 (magnetic buttons)
//! ```
//!
//! Everything is driven by host events: viewport events feed the scroll
//! tracker, pointer events feed the controllers and the preview, and
//! [`HeroScene::on_frame`] advances time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_animation::{
    declare_variant_tree, map_value, Curve, Presence, ResolvedStyle, RevealScheduler, VariantSpec,
    VariantTree, VisibilityState, TIMINGS,
};
use folio_core::{
    event_types, EventSource, FrameClock, FrameTick, Liveness, MotionPolicy, PointerEvent,
    PointerKind, Subscription, ViewportEvent,
};
use folio_interact::{
    create_magnetic_controller, subscribe_progress, Anchors, MagneticConfig, MagneticController,
    MagneticFrame, ProgressBinding,
};
use rustc_hash::FxHashMap;

use crate::config::InteractionConfig;
use crate::content::{HeadlineToken, HeroContent};
use crate::error::{Result, SiteError};
use crate::layout::HeroLayout;
use crate::navigation::Navigator;

pub const ROOT: &str = "hero";
pub const HEADING: &str = "heading";
pub const IMAGE: &str = "image";
pub const DESCRIPTION: &str = "description";
pub const BODY: &str = "description-body";
pub const SOCIAL: &str = "social";

/// Node label of a headline word
pub fn word_label(line: usize, index: usize) -> String {
    format!("word-{line}-{index}")
}

/// Node label of a social button
pub fn link_label(label: &str) -> String {
    format!("link:{label}")
}

/// Variant tree of the hero, built from the shared timing table
pub fn hero_spec(content: &HeroContent) -> VariantSpec {
    let tokens = content.lines.iter().enumerate().flat_map(|(line, tokens)| {
        tokens.iter().enumerate().map(move |(index, token)| match token {
            HeadlineToken::Word(_) => TIMINGS.word(&word_label(line, index)),
            HeadlineToken::Image => TIMINGS.image(IMAGE),
        })
    });
    let heading = TIMINGS.stagger_group(HEADING, TIMINGS.heading).children(tokens);

    let body = TIMINGS
        .fade_in_up(BODY, TIMINGS.body_rise, TIMINGS.body_duration_ms)
        .delay_ms(TIMINGS.body_delay_ms)
        .easing(TIMINGS.text_easing);
    let description = TIMINGS
        .fade_in_up(
            DESCRIPTION,
            TIMINGS.description_rise,
            TIMINGS.description_duration_ms,
        )
        .delay_ms(TIMINGS.description_delay_ms)
        .child(body);

    let social = TIMINGS
        .stagger_group(SOCIAL, TIMINGS.social)
        .children(content.links.iter().map(|link| TIMINGS.button(&link_label(&link.label))));

    VariantSpec::new(ROOT)
        .duration_ms(0)
        .children([heading, description, social])
}

/// Scroll-linked style of the hero block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollStyle {
    pub opacity: f32,
    pub scale: f32,
    pub translate_y: f32,
}

/// Curves from hero scroll progress to [`ScrollStyle`]
#[derive(Clone, Debug)]
pub struct ScrollCurves {
    pub opacity: Curve,
    pub scale: Curve,
    pub translate_y: Curve,
}

impl ScrollCurves {
    /// Fade and shrink over the second half, drift down 100px over the whole
    pub fn hero() -> folio_core::Result<Self> {
        Ok(Self {
            opacity: Curve::new([(0.5, 1.0), (1.0, 0.0)])?,
            scale: Curve::new([(0.5, 1.0), (1.0, 0.95)])?,
            translate_y: Curve::new([(0.0, 0.0), (1.0, 100.0)])?,
        })
    }

    pub fn style_at(&self, progress: f32) -> ScrollStyle {
        ScrollStyle {
            opacity: map_value(&self.opacity, progress),
            scale: map_value(&self.scale, progress),
            translate_y: map_value(&self.translate_y, progress),
        }
    }
}

/// Host event sources and services the scene attaches to
pub struct HeroHost<'a> {
    pub viewport: &'a EventSource<ViewportEvent>,
    pub pointer: &'a EventSource<PointerEvent>,
    pub navigator: Rc<dyn Navigator>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
    pub label: String,
    pub state: VisibilityState,
    pub style: ResolvedStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonFrame {
    pub label: String,
    pub frame: MagneticFrame,
}

/// Everything the host paints for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct HeroFrame {
    pub tick: FrameTick,
    pub progress: f32,
    pub scroll: ScrollStyle,
    /// Mounted nodes, depth-first
    pub nodes: Vec<NodeStyle>,
    /// Social buttons, in link order
    pub buttons: Vec<ButtonFrame>,
    /// Image preview, `None` while not rendered
    pub preview: Option<ResolvedStyle>,
}

impl HeroFrame {
    pub fn node(&self, label: &str) -> Option<&NodeStyle> {
        self.nodes.iter().find(|node| node.label == label)
    }

    pub fn button(&self, label: &str) -> Option<&MagneticFrame> {
        self.buttons
            .iter()
            .find(|button| button.label == label)
            .map(|button| &button.frame)
    }

    /// Nodes whose transition has started
    pub fn visible_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.state == VisibilityState::Visible)
            .count()
    }
}

/// The mounted landing hero
pub struct HeroScene {
    content: HeroContent,
    policy: MotionPolicy,
    reveal: RevealScheduler,
    curves: ScrollCurves,
    clock: FrameClock,
    layout: Rc<RefCell<HeroLayout>>,
    progress: Rc<Cell<f32>>,
    scroll: Option<ProgressBinding>,
    buttons: FxHashMap<String, MagneticController>,
    button_order: Vec<String>,
    preview: Rc<RefCell<Presence>>,
    image_hover: Option<Subscription>,
    liveness: Liveness,
}

impl HeroScene {
    /// Build the tree, attach every listener and paint nothing yet
    ///
    /// The reveal starts on the second frame passed to [`HeroScene::on_frame`].
    pub fn mount(
        content: HeroContent,
        interaction: &InteractionConfig,
        policy: MotionPolicy,
        layout: HeroLayout,
        host: HeroHost<'_>,
    ) -> Result<Self> {
        if layout.buttons.len() != content.links.len() {
            return Err(SiteError::Layout(format!(
                "{} button rects for {} links",
                layout.buttons.len(),
                content.links.len()
            )));
        }

        let curves = ScrollCurves::hero()?;
        let spring = interaction.spring()?;
        let reveal = RevealScheduler::new(declare_variant_tree(hero_spec(&content), policy));
        let layout = Rc::new(RefCell::new(layout));
        let liveness = Liveness::new();

        let progress = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&progress);
        let region_layout = Rc::downgrade(&layout);
        let scroll = subscribe_progress(
            host.viewport,
            move || {
                let layout = region_layout.upgrade()?;
                let region = layout.borrow().region;
                Some(region)
            },
            Anchors::TOP_TO_EXIT,
            move |sample| sink.set(sample.progress),
        );

        let mut buttons = FxHashMap::default();
        let mut button_order = Vec::with_capacity(content.links.len());
        for (index, link) in content.links.iter().enumerate() {
            let bounds = layout.borrow().buttons[index];
            let navigator = Rc::clone(&host.navigator);
            let destination = link.destination.clone();
            let config = MagneticConfig::new(interaction.influence_radius, link.hover_color.clone())
                .spring(spring)
                .pill_radius(interaction.pill_radius)
                .on_activate(move || navigator.navigate(&destination));

            let mut controller = create_magnetic_controller(config, bounds, policy)?;
            controller.bind(host.pointer);

            let label = link_label(&link.label);
            button_order.push(label.clone());
            buttons.insert(label, controller);
        }

        let (hidden, visible) = TIMINGS.preview_props();
        let preview = Rc::new(RefCell::new(Presence::new(
            hidden,
            visible,
            TIMINGS.preview_duration_ms,
            TIMINGS.reveal_easing,
            policy,
        )));
        let image_hover = content.has_image().then(|| {
            bind_image(
                host.pointer,
                &preview,
                &layout,
                &liveness,
                Rc::clone(&host.navigator),
                &content,
            )
        });

        tracing::debug!(
            nodes = reveal.tree().graph().len(),
            buttons = buttons.len(),
            reduced_motion = policy.reduced_motion(),
            pointer_tracking = policy.pointer_tracking(),
            "hero mounted"
        );

        Ok(Self {
            content,
            policy,
            reveal,
            curves,
            clock: FrameClock::new(),
            layout,
            progress,
            scroll: Some(scroll),
            buttons,
            button_order,
            preview,
            image_hover,
            liveness,
        })
    }

    pub fn content(&self) -> &HeroContent {
        &self.content
    }

    pub fn policy(&self) -> MotionPolicy {
        self.policy
    }

    pub fn tree(&self) -> &VariantTree {
        self.reveal.tree()
    }

    /// Latest scroll progress of the hero region
    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    pub fn button(&self, label: &str) -> Option<&MagneticController> {
        self.buttons.get(label)
    }

    pub fn button_labels(&self) -> &[String] {
        &self.button_order
    }

    pub fn is_preview_shown(&self) -> bool {
        self.preview.borrow().is_present()
    }

    pub fn is_disposed(&self) -> bool {
        !self.liveness.is_alive()
    }

    /// Report a new measurement of the page
    pub fn set_layout(&mut self, layout: HeroLayout) -> Result<()> {
        if layout.buttons.len() != self.content.links.len() {
            return Err(SiteError::Layout(format!(
                "{} button rects for {} links",
                layout.buttons.len(),
                self.content.links.len()
            )));
        }
        for (label, bounds) in self.button_order.iter().zip(&layout.buttons) {
            if let Some(controller) = self.buttons.get(label) {
                controller.set_bounds(*bounds);
            }
        }
        *self.layout.borrow_mut() = layout;
        Ok(())
    }

    /// Advance to host time `timestamp_ms`
    pub fn on_frame(&mut self, timestamp_ms: f64) -> HeroFrame {
        let tick = self.clock.tick(timestamp_ms);
        if let Some(scroll) = &self.scroll {
            scroll.on_frame(&tick);
        }
        let progress = self.progress.get();

        let styles = self.reveal.on_frame(&tick);
        let graph = self.reveal.tree().graph();
        let nodes = styles
            .into_iter()
            .filter_map(|(id, style)| {
                graph.get(id).map(|node| NodeStyle {
                    label: node.label.clone(),
                    state: node.state(),
                    style,
                })
            })
            .collect();

        let buttons = self
            .button_order
            .iter()
            .filter_map(|label| {
                self.buttons.get(label).map(|controller| ButtonFrame {
                    label: label.clone(),
                    frame: controller.step(tick.dt_ms),
                })
            })
            .collect();

        let preview = {
            let mut preview = self.preview.borrow_mut();
            preview.advance(tick.dt_ms);
            preview.sample()
        };

        tracing::trace!(frame = tick.frame, progress, "hero frame");
        HeroFrame {
            tick,
            progress,
            scroll: self.curves.style_at(progress),
            nodes,
            buttons,
            preview,
        }
    }

    /// Unmount one node (and its subtree) mid-flight
    ///
    /// Buttons and the image preview inside the removed subtree stop
    /// listening immediately.
    pub fn unmount_node(&mut self, label: &str) -> bool {
        let Some(id) = self.reveal.tree().find(label) else {
            return false;
        };
        if !self.reveal.tree_mut().unmount(id) {
            return false;
        }

        let tree = self.reveal.tree();
        let before = self.buttons.len();
        self.buttons.retain(|label, _| tree.find(label).is_some());
        self.button_order.retain(|label| tree.find(label).is_some());
        if tree.find(IMAGE).is_none() && self.image_hover.take().is_some() {
            self.preview.borrow_mut().hide();
        }

        tracing::debug!(
            label,
            buttons_removed = before - self.buttons.len(),
            "hero node unmounted"
        );
        true
    }

    /// Replay the entrance reveal from the hidden state
    pub fn replay(&mut self) {
        if !self.is_disposed() {
            self.reveal.replay();
        }
    }

    /// Detach from every host source; later events and frames are no-ops
    pub fn dispose(&mut self) {
        if !self.liveness.is_alive() {
            return;
        }
        self.liveness.kill();
        self.reveal.dispose();
        self.scroll = None;
        self.buttons.clear();
        self.button_order.clear();
        self.image_hover = None;
        tracing::debug!("hero disposed");
    }
}

impl Drop for HeroScene {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn bind_image(
    pointer: &EventSource<PointerEvent>,
    preview: &Rc<RefCell<Presence>>,
    layout: &Rc<RefCell<HeroLayout>>,
    liveness: &Liveness,
    navigator: Rc<dyn Navigator>,
    content: &HeroContent,
) -> Subscription {
    let preview = Rc::downgrade(preview);
    let layout = Rc::downgrade(layout);
    let live = liveness.clone();
    let destination = content.image.destination.clone();

    pointer.subscribe(move |event: &PointerEvent| {
        if !live.is_alive() {
            return;
        }
        let (Some(preview), Some(layout)) = (preview.upgrade(), layout.upgrade()) else {
            return;
        };
        let inside = layout.borrow().image.contains(event.position);

        match event.event_type {
            event_types::ACTIVATE if inside => navigator.navigate(&destination),
            event_types::POINTER_ENTER | event_types::POINTER_MOVE
                if event.kind != PointerKind::Touch =>
            {
                let mut preview = preview.borrow_mut();
                if inside {
                    preview.show();
                } else {
                    preview.hide();
                }
            }
            event_types::POINTER_LEAVE => preview.borrow_mut().hide(),
            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn content() -> HeroContent {
        HeroContent::from_config(&SiteConfig::builtin().unwrap().hero).unwrap()
    }

    #[test]
    fn test_hero_spec_shape() {
        let spec = hero_spec(&content());
        // root + heading(6 words + image) + description + body + social(4)
        assert_eq!(spec.node_count(), 1 + 1 + 7 + 2 + 1 + 4);
        assert_eq!(spec.children[0].children[2].label, IMAGE);
        assert_eq!(spec.children[2].children[3].label, "link:About Me");
    }

    #[test]
    fn test_hero_timeline() {
        let mut tree = declare_variant_tree(hero_spec(&content()), MotionPolicy::full());
        tree.activate(0.0);
        let delay = |label: &str| tree.timing(tree.find(label).unwrap()).unwrap().delay_ms;

        assert_eq!(delay(HEADING), 0);
        assert_eq!(delay(&word_label(0, 0)), 200);
        assert_eq!(delay(&word_label(0, 1)), 280);
        // 200 + 2·80 + own 500
        assert_eq!(delay(IMAGE), 860);
        assert_eq!(delay(&word_label(1, 0)), 440);
        assert_eq!(delay(&word_label(1, 3)), 680);
        assert_eq!(delay(DESCRIPTION), 800);
        assert_eq!(delay(BODY), 900);
        assert_eq!(delay("link:ezDecode"), 1200);
        assert_eq!(delay("link:About Me"), 1500);
    }

    #[test]
    fn test_scroll_curves() {
        let curves = ScrollCurves::hero().unwrap();
        let start = curves.style_at(0.0);
        assert_eq!(start.opacity, 1.0);
        assert_eq!(start.scale, 1.0);
        assert_eq!(start.translate_y, 0.0);

        let half = curves.style_at(0.5);
        assert_eq!(half.opacity, 1.0);
        assert_eq!(half.translate_y, 50.0);

        let three_quarters = curves.style_at(0.75);
        assert!((three_quarters.opacity - 0.5).abs() < 1e-6);
        assert!((three_quarters.scale - 0.975).abs() < 1e-6);

        let end = curves.style_at(1.0);
        assert_eq!(end.opacity, 0.0);
        assert!((end.scale - 0.95).abs() < 1e-6);
        assert_eq!(end.translate_y, 100.0);
    }
}
