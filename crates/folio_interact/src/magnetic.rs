//! Magnetic pointer controls
//!
//! Interactive elements lean toward the pointer while it is within an
//! influence radius of their center, and spring back when it leaves:
//!
//! ```text
//! v      = pointer − center(bounds)
//! target = v · attraction(|v| / radius)   if |v| ≤ radius
//!        = 0                              otherwise
//! ```
//!
//! The attraction falloff is 1 at the center and 0 at the radius, so the
//! target is continuous across the boundary. A spring chases the target every
//! frame and the visible offset never leaves the radius.
//!
//! Hover also morphs the element from square corners and its rest color into
//! a pill in its own hover color.
//!
//! On touch devices (or when touch capability is unknown) magnetism and hover
//! styling are disabled; activation still reaches the callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use folio_animation::{Easing, Spring2D, SpringConfig, Tween, TIMINGS};
use folio_core::{
    clamp_frame_delta, event_types, Color, ConfigurationError, EventSource, EventType, FrameTick,
    Liveness, MotionPolicy, PointerEvent, PointerKind, Rect, Result, Subscription, Vec2,
};

/// Hover class of a magnetic element
///
/// `Rest` is the absence of any hover class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverState {
    #[default]
    Rest,
    Hovering,
    Active,
}

impl HoverState {
    /// Next state for an event, `None` if the event does not apply
    ///
    /// Pointer moves are classified by the controller into
    /// `POINTER_ENTER`/`POINTER_LEAVE` before reaching this table.
    pub fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (HoverState::Rest, event_types::POINTER_ENTER) => Some(HoverState::Hovering),
            (HoverState::Hovering, event_types::POINTER_LEAVE) => Some(HoverState::Rest),
            (HoverState::Hovering, event_types::POINTER_DOWN) => Some(HoverState::Active),
            (HoverState::Active, event_types::POINTER_UP) => Some(HoverState::Hovering),
            (HoverState::Active, event_types::POINTER_LEAVE) => Some(HoverState::Rest),
            _ => None,
        }
    }

    pub fn is_hovered(&self) -> bool {
        !matches!(self, HoverState::Rest)
    }
}

/// Falloff of the pull as the pointer moves from the center to the radius
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Attraction {
    /// `1 − t`
    #[default]
    Linear,
    /// `1 − easing(t)`
    Eased(Easing),
    /// Caller-supplied; must map [0, 1] into [0, 1] with `f(1) = 0`
    Custom(fn(f32) -> f32),
}

impl Attraction {
    /// Attraction at normalized distance `t`
    pub fn factor(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let factor = match self {
            Attraction::Linear => 1.0 - t,
            Attraction::Eased(easing) => 1.0 - easing.apply(t),
            Attraction::Custom(f) => f(t),
        };
        if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Reject functions that leave [0, 1] or pull at the boundary
    pub fn validate(self) -> Result<Self> {
        let Attraction::Custom(f) = self else {
            return Ok(self);
        };
        for i in 0..=8 {
            let t = i as f32 / 8.0;
            let value = f(t);
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::InvalidAttraction(format!(
                    "f({t}) = {value} is outside [0, 1]"
                )));
            }
        }
        let edge = f(1.0);
        if edge.abs() > 1e-6 {
            return Err(ConfigurationError::InvalidAttraction(format!(
                "f(1) = {edge}, must be 0 for a continuous boundary"
            )));
        }
        Ok(self)
    }
}

/// Per-instance magnetic configuration
#[derive(Clone)]
pub struct MagneticConfig {
    pub influence_radius: f32,
    pub spring: SpringConfig,
    pub attraction: Attraction,
    /// Hex color string, e.g. `#42cafd`
    pub hover_color: String,
    pub rest_color: Color,
    /// Corner radius while hovered
    pub pill_radius: f32,
    pub on_activate: Option<Rc<dyn Fn()>>,
}

impl MagneticConfig {
    pub fn new(influence_radius: f32, hover_color: impl Into<String>) -> Self {
        Self {
            influence_radius,
            spring: SpringConfig::magnetic(),
            attraction: Attraction::Linear,
            hover_color: hover_color.into(),
            rest_color: Color::WHITE,
            pill_radius: 9999.0,
            on_activate: None,
        }
    }

    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn attraction(mut self, attraction: Attraction) -> Self {
        self.attraction = attraction;
        self
    }

    pub fn rest_color(mut self, color: Color) -> Self {
        self.rest_color = color;
        self
    }

    pub fn pill_radius(mut self, radius: f32) -> Self {
        self.pill_radius = radius;
        self
    }

    pub fn on_activate<F: Fn() + 'static>(mut self, f: F) -> Self {
        self.on_activate = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for MagneticConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagneticConfig")
            .field("influence_radius", &self.influence_radius)
            .field("spring", &self.spring)
            .field("attraction", &self.attraction)
            .field("hover_color", &self.hover_color)
            .field("rest_color", &self.rest_color)
            .field("pill_radius", &self.pill_radius)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

/// Visual output of a magnetic element for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagneticFrame {
    pub offset: Vec2,
    pub hover: HoverState,
    pub border_radius: f32,
    pub color: Color,
}

#[derive(Debug)]
struct MagneticState {
    bounds: Rect,
    radius: f32,
    attraction: Attraction,
    spring: Spring2D,
    hover: HoverState,
    inside: bool,
    morph: Tween,
    rest_color: Color,
    hover_color: Color,
    pill_radius: f32,
    enabled: bool,
    animate_offset: bool,
}

impl MagneticState {
    fn transition(&mut self, event: EventType) {
        if let Some(next) = self.hover.on_event(event) {
            tracing::trace!(from = ?self.hover, to = ?next, "hover transition");
            self.hover = next;
            self.morph.retarget(if next.is_hovered() { 1.0 } else { 0.0 });
        }
    }

    fn target_for(&self, event: &PointerEvent) -> Option<(Vec2, bool)> {
        if !event.position.is_finite() {
            return None;
        }
        let v = event.position.offset_from(self.bounds.center());
        let distance = v.length();
        if distance > self.radius {
            return Some((Vec2::ZERO, false));
        }
        let factor = self.attraction.factor(distance / self.radius);
        Some((v * factor, true))
    }

    fn track(&mut self, event: &PointerEvent) {
        match self.target_for(event) {
            Some((target, inside)) => {
                self.set_target(target);
                self.inside = inside;
                self.transition(if inside {
                    event_types::POINTER_ENTER
                } else {
                    event_types::POINTER_LEAVE
                });
            }
            None => tracing::trace!("ignoring non-finite pointer position"),
        }
    }

    fn set_target(&mut self, target: Vec2) {
        if self.animate_offset {
            self.spring.set_target(target);
        }
    }

    /// Apply a pointer event; returns `true` for activations on the element
    fn apply(&mut self, event: &PointerEvent) -> bool {
        if event.event_type == event_types::ACTIVATE {
            return self.bounds.contains(event.position);
        }
        if !self.enabled || event.kind == PointerKind::Touch {
            return false;
        }

        match event.event_type {
            event_types::POINTER_ENTER | event_types::POINTER_MOVE => self.track(event),
            event_types::POINTER_LEAVE => {
                self.inside = false;
                self.set_target(Vec2::ZERO);
                self.transition(event_types::POINTER_LEAVE);
            }
            event_types::POINTER_DOWN => {
                if self.inside {
                    self.transition(event_types::POINTER_DOWN);
                }
            }
            event_types::POINTER_UP => self.transition(event_types::POINTER_UP),
            _ => {}
        }
        false
    }

    fn step(&mut self, dt_ms: f32) {
        if !self.enabled {
            return;
        }
        let dt_ms = clamp_frame_delta(dt_ms);
        if self.animate_offset {
            self.spring.step(dt_ms / 1000.0);
            self.spring.clamp_length(self.radius);
        }
        self.morph.advance(dt_ms);
    }

    fn frame(&self) -> MagneticFrame {
        let t = self.morph.value();
        MagneticFrame {
            offset: self.spring.value(),
            hover: self.hover,
            border_radius: self.pill_radius * t,
            color: Color::lerp(&self.rest_color, &self.hover_color, t),
        }
    }
}

/// Drives one magnetic element
///
/// Every instance has independent state: offset, spring velocity, hover
/// class and color morph.
pub struct MagneticController {
    state: Rc<RefCell<MagneticState>>,
    on_activate: Option<Rc<dyn Fn()>>,
    liveness: Liveness,
    bindings: Vec<Subscription>,
}

/// Create a controller for an element laid out at `bounds`
pub fn create_magnetic_controller(
    config: MagneticConfig,
    bounds: Rect,
    policy: MotionPolicy,
) -> Result<MagneticController> {
    MagneticController::new(config, bounds, policy)
}

impl MagneticController {
    pub fn new(config: MagneticConfig, bounds: Rect, policy: MotionPolicy) -> Result<Self> {
        let radius = config.influence_radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigurationError::InvalidInfluenceRadius(radius));
        }
        let spring = config.spring.validate()?;
        let attraction = config.attraction.validate()?;
        let hover_color = Color::parse_hex(&config.hover_color)?;

        let morph_ms = if policy.reduced_motion() {
            0
        } else {
            TIMINGS.hover_morph_ms
        };
        let enabled = policy.pointer_tracking();
        tracing::debug!(
            radius,
            enabled,
            reduced_motion = policy.reduced_motion(),
            "magnetic controller created"
        );

        let state = MagneticState {
            bounds,
            radius,
            attraction,
            spring: Spring2D::new(spring, Vec2::ZERO),
            hover: HoverState::Rest,
            inside: false,
            morph: Tween::new(0.0, morph_ms, TIMINGS.text_easing),
            rest_color: config.rest_color,
            hover_color,
            pill_radius: config.pill_radius,
            enabled,
            animate_offset: !policy.reduced_motion(),
        };

        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            on_activate: config.on_activate,
            liveness: Liveness::new(),
            bindings: Vec::new(),
        })
    }

    /// Current displacement from the element's layout position
    pub fn current_offset(&self) -> Vec2 {
        self.state.borrow().spring.value()
    }

    pub fn hover_state(&self) -> HoverState {
        self.state.borrow().hover
    }

    /// Whether magnetism and hover styling are active
    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    pub fn is_disposed(&self) -> bool {
        !self.liveness.is_alive()
    }

    pub fn bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    /// Update the layout rect; the center is always taken from layout, never
    /// from the displaced position.
    pub fn set_bounds(&self, bounds: Rect) {
        self.state.borrow_mut().bounds = bounds;
    }

    /// Whether the offset and the hover morph have come to rest
    pub fn is_settled(&self) -> bool {
        let state = self.state.borrow();
        state.spring.is_settled() && state.morph.is_done()
    }

    pub fn frame(&self) -> MagneticFrame {
        self.state.borrow().frame()
    }

    /// Feed one pointer event
    pub fn handle_pointer(&self, event: &PointerEvent) {
        dispatch_pointer(&self.state, self.on_activate.as_ref(), &self.liveness, event);
    }

    /// Advance the spring and the hover morph by `dt_ms`
    pub fn step(&self, dt_ms: f32) -> MagneticFrame {
        if !self.liveness.is_alive() {
            return self.frame();
        }
        let mut state = self.state.borrow_mut();
        state.step(dt_ms);
        state.frame()
    }

    /// Listen to a pointer source until disposed
    pub fn bind(&mut self, pointer: &EventSource<PointerEvent>) {
        let weak = Rc::downgrade(&self.state);
        let on_activate = self.on_activate.clone();
        let live = self.liveness.clone();
        let sub = pointer.subscribe(move |event: &PointerEvent| {
            if let Some(state) = Weak::upgrade(&weak) {
                dispatch_pointer(&state, on_activate.as_ref(), &live, event);
            }
        });
        self.bindings.push(sub);
    }

    /// Step on every frame of `frames` until disposed
    pub fn bind_frames(&mut self, frames: &EventSource<FrameTick>) {
        let weak = Rc::downgrade(&self.state);
        let live = self.liveness.clone();
        let sub = frames.subscribe(move |tick: &FrameTick| {
            if !live.is_alive() {
                return;
            }
            if let Some(state) = Weak::upgrade(&weak) {
                state.borrow_mut().step(tick.dt_ms);
            }
        });
        self.bindings.push(sub);
    }

    /// Release every listener; pending callbacks become no-ops
    pub fn dispose(&mut self) {
        if self.liveness.is_alive() {
            self.liveness.kill();
            self.bindings.clear();
            tracing::debug!("magnetic controller disposed");
        }
    }
}

impl Drop for MagneticController {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for MagneticController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagneticController")
            .field("state", &self.state)
            .field("alive", &self.liveness.is_alive())
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

fn dispatch_pointer(
    state: &RefCell<MagneticState>,
    on_activate: Option<&Rc<dyn Fn()>>,
    liveness: &Liveness,
    event: &PointerEvent,
) {
    if !liveness.is_alive() {
        return;
    }
    let activated = state.borrow_mut().apply(event);
    if activated {
        if let Some(callback) = on_activate.cloned() {
            tracing::debug!("magnetic element activated");
            callback();
        }
    }
}
