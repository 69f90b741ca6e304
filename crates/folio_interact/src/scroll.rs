//! Scroll progress tracking
//!
//! Turns page scroll into a normalized progress value for one tracked
//! region. Two [`Intersection`]s define where progress is 0 and where it is
//! 1, e.g. "region top meets viewport top" to "region bottom meets viewport
//! top":
//!
//! ```text
//! region_start = region.top + start.region·height − start.viewport·viewport_height
//! region_end   = region.top + end.region·height   − end.viewport·viewport_height
//! progress     = clamp((scroll_y − region_start) / (region_end − region_start), 0, 1)
//! ```
//!
//! Geometry is read from the current layout every time progress is
//! recomputed, so layout shifts and missed frames heal on the next tick.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{EventSource, ViewportEvent};
//! use folio_interact::{subscribe_progress, Anchors, RegionBounds};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let viewport = EventSource::<ViewportEvent>::new();
//! let latest = Rc::new(Cell::new(0.0));
//! let sink = Rc::clone(&latest);
//!
//! let binding = subscribe_progress(
//!     &viewport,
//!     || Some(RegionBounds::new(0.0, 800.0)),
//!     Anchors::TOP_TO_EXIT,
//!     move |sample| sink.set(sample.progress),
//! );
//!
//! viewport.emit(&ViewportEvent::scroll(1, 16.0, 400.0, 900.0));
//! assert_eq!(latest.get(), 0.5);
//! binding.unsubscribe();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{
    ConfigurationError, EventSource, FrameThrottle, FrameTick, Liveness, Result, Subscription,
    ViewportEvent,
};

/// A horizontal line on the region or the viewport, as a fraction of its height
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Start,
    Center,
    End,
    /// 0.0 = top, 1.0 = bottom
    Fraction(f32),
}

impl Edge {
    pub fn fraction(&self) -> f32 {
        match *self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
            Edge::Fraction(f) => f,
        }
    }
}

/// "`region` edge meets `viewport` edge"
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub region: Edge,
    pub viewport: Edge,
}

impl Intersection {
    pub const fn new(region: Edge, viewport: Edge) -> Self {
        Self { region, viewport }
    }
}

/// Scroll positions at which progress is 0 (`start`) and 1 (`end`)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchors {
    pub start: Intersection,
    pub end: Intersection,
}

impl Anchors {
    /// Region enters at the viewport bottom until its end leaves at the top
    pub const ENTER_TO_EXIT: Anchors = Anchors {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::End, Edge::Start),
    };

    /// Region top at viewport top until its end reaches the viewport top
    pub const TOP_TO_EXIT: Anchors = Anchors {
        start: Intersection::new(Edge::Start, Edge::Start),
        end: Intersection::new(Edge::End, Edge::Start),
    };

    /// Build anchors, rejecting non-finite fractions
    pub fn new(start: Intersection, end: Intersection) -> Result<Self> {
        for (name, edge) in [
            ("start.region", start.region),
            ("start.viewport", start.viewport),
            ("end.region", end.region),
            ("end.viewport", end.viewport),
        ] {
            if !edge.fraction().is_finite() {
                return Err(ConfigurationError::InvalidAnchor(format!(
                    "{name} is {:?}",
                    edge
                )));
            }
        }
        Ok(Self { start, end })
    }
}

/// Document-space vertical extent of a tracked region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionBounds {
    pub top: f32,
    pub height: f32,
}

impl RegionBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// Everything progress depends on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_y: f32,
    pub viewport_height: f32,
    pub region: RegionBounds,
}

/// Progress emitted to subscribers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSample {
    /// Always within [0, 1]
    pub progress: f32,
    pub timestamp_ms: f64,
}

/// Pure progress computation; `None` if the geometry is not finite
pub fn compute_progress(anchors: &Anchors, geometry: &ScrollGeometry) -> Option<f32> {
    let ScrollGeometry {
        scroll_y,
        viewport_height,
        region,
    } = *geometry;

    let scroll_at = |at: &Intersection| {
        region.top + at.region.fraction() * region.height - at.viewport.fraction() * viewport_height
    };
    let region_start = scroll_at(&anchors.start);
    let region_end = scroll_at(&anchors.end);

    if !scroll_y.is_finite() || !region_start.is_finite() || !region_end.is_finite() {
        return None;
    }

    let span = region_end - region_start;
    if span == 0.0 {
        // Zero-length region: a step at the anchor
        return Some(if scroll_y >= region_end { 1.0 } else { 0.0 });
    }

    Some(((scroll_y - region_start) / span).clamp(0.0, 1.0))
}

/// Reads the tracked region's current layout
///
/// Returns `None` while the region is not laid out (or already unmounted).
pub trait RegionProbe {
    fn bounds(&self) -> Option<RegionBounds>;
}

impl<F> RegionProbe for F
where
    F: Fn() -> Option<RegionBounds>,
{
    fn bounds(&self) -> Option<RegionBounds> {
        self()
    }
}

/// Progress state for one tracked region
#[derive(Debug)]
pub struct ScrollProgressTracker {
    anchors: Anchors,
    throttle: FrameThrottle,
    viewport: Option<(f32, f32)>,
    last: Option<ProgressSample>,
    listeners: EventSource<ProgressSample>,
}

impl ScrollProgressTracker {
    pub fn new(anchors: Anchors) -> Self {
        Self {
            anchors,
            throttle: FrameThrottle::new(),
            viewport: None,
            last: None,
            listeners: EventSource::new(),
        }
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    pub fn last_sample(&self) -> Option<ProgressSample> {
        self.last
    }

    /// Register a progress listener
    pub fn subscribe<F>(&self, on_update: F) -> Subscription
    where
        F: Fn(&ProgressSample) + 'static,
    {
        self.listeners.subscribe(on_update)
    }

    /// Listener registry, for publishing outside of a borrow of the tracker
    pub fn listeners(&self) -> EventSource<ProgressSample> {
        self.listeners.clone()
    }

    /// Record a viewport event and recompute if this frame has not run yet
    ///
    /// Returns the new sample when a recomputation happened. Later events in
    /// the same frame only update the remembered geometry; [`Self::flush`]
    /// applies it on a following frame.
    pub fn update(
        &mut self,
        event: &ViewportEvent,
        region: &dyn RegionProbe,
    ) -> Option<ProgressSample> {
        self.viewport = Some((event.scroll_y, event.viewport_height));
        self.throttle.mark_dirty();
        self.recompute(event.frame, event.timestamp_ms, region)
    }

    /// Recompute from the remembered geometry if an event is still pending
    pub fn flush(
        &mut self,
        frame: u64,
        timestamp_ms: f64,
        region: &dyn RegionProbe,
    ) -> Option<ProgressSample> {
        if !self.throttle.is_dirty() {
            return None;
        }
        self.recompute(frame, timestamp_ms, region)
    }

    /// Whether viewport geometry is waiting to be applied
    pub fn is_pending(&self) -> bool {
        self.throttle.is_dirty()
    }

    fn recompute(
        &mut self,
        frame: u64,
        timestamp_ms: f64,
        region: &dyn RegionProbe,
    ) -> Option<ProgressSample> {
        if !self.throttle.take(frame) {
            tracing::trace!(frame, "progress already computed this frame");
            return None;
        }

        let (scroll_y, viewport_height) = self.viewport?;
        let Some(region) = region.bounds() else {
            tracing::trace!("tracked region has no layout, retrying next frame");
            self.throttle.mark_dirty();
            return None;
        };
        let geometry = ScrollGeometry {
            scroll_y,
            viewport_height,
            region,
        };

        let Some(progress) = compute_progress(&self.anchors, &geometry) else {
            tracing::warn!(?geometry, "non-finite scroll geometry, waiting for next tick");
            return None;
        };

        let sample = ProgressSample {
            progress,
            timestamp_ms,
        };
        self.last = Some(sample);
        Some(sample)
    }
}

/// Live subscription created by [`subscribe_progress`]
///
/// Dropping the binding (or calling [`ProgressBinding::unsubscribe`])
/// detaches it from the viewport and silences its callback.
#[must_use = "dropping a ProgressBinding immediately unsubscribes it"]
pub struct ProgressBinding {
    tracker: Rc<RefCell<ScrollProgressTracker>>,
    region: Rc<dyn RegionProbe>,
    liveness: Liveness,
    subscriptions: Vec<Subscription>,
}

impl ProgressBinding {
    pub fn last_sample(&self) -> Option<ProgressSample> {
        self.tracker.borrow().last_sample()
    }

    pub fn is_active(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Apply viewport geometry that was throttled on an earlier frame
    ///
    /// Hosts call this once per frame tick. Listeners are notified when a
    /// pending event produced a new sample.
    pub fn on_frame(&self, tick: &FrameTick) -> Option<ProgressSample> {
        if !self.liveness.is_alive() {
            return None;
        }
        let (sample, listeners) = {
            let mut tracker = self.tracker.borrow_mut();
            (
                tracker.flush(tick.frame, tick.timestamp_ms, &*self.region),
                tracker.listeners(),
            )
        };
        if let Some(sample) = sample {
            listeners.emit(&sample);
        }
        sample
    }

    /// Detach from the viewport; safe to call during event delivery
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.liveness.is_alive() {
            self.liveness.kill();
            self.subscriptions.clear();
            tracing::debug!("scroll progress unsubscribed");
        }
    }
}

impl Drop for ProgressBinding {
    fn drop(&mut self) {
        self.release();
    }
}

/// Track `region` against the viewport and report progress to `on_update`
pub fn subscribe_progress<P, F>(
    viewport: &EventSource<ViewportEvent>,
    region: P,
    anchors: Anchors,
    on_update: F,
) -> ProgressBinding
where
    P: RegionProbe + 'static,
    F: Fn(&ProgressSample) + 'static,
{
    let tracker = Rc::new(RefCell::new(ScrollProgressTracker::new(anchors)));
    let region: Rc<dyn RegionProbe> = Rc::new(region);
    let liveness = Liveness::new();

    let update_sub = tracker.borrow().subscribe(on_update);

    let weak = Rc::downgrade(&tracker);
    let probe = Rc::clone(&region);
    let live = liveness.clone();
    let viewport_sub = viewport.subscribe(move |event: &ViewportEvent| {
        if !live.is_alive() {
            return;
        }
        let Some(tracker) = weak.upgrade() else {
            return;
        };
        let (sample, listeners) = {
            let mut tracker = tracker.borrow_mut();
            (tracker.update(event, &*probe), tracker.listeners())
        };
        if let Some(sample) = sample {
            listeners.emit(&sample);
        }
    });

    tracing::debug!(?anchors, "scroll progress subscribed");
    ProgressBinding {
        tracker,
        region,
        liveness,
        subscriptions: vec![viewport_sub, update_sub],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn geometry(scroll_y: f32) -> ScrollGeometry {
        ScrollGeometry {
            scroll_y,
            viewport_height: 900.0,
            region: RegionBounds::new(100.0, 800.0),
        }
    }

    #[test]
    fn test_top_to_exit_progress() {
        let anchors = Anchors::TOP_TO_EXIT;
        // region_start = 100, region_end = 900
        assert_eq!(compute_progress(&anchors, &geometry(0.0)), Some(0.0));
        assert_eq!(compute_progress(&anchors, &geometry(100.0)), Some(0.0));
        assert_eq!(compute_progress(&anchors, &geometry(500.0)), Some(0.5));
        assert_eq!(compute_progress(&anchors, &geometry(900.0)), Some(1.0));
        assert_eq!(compute_progress(&anchors, &geometry(5000.0)), Some(1.0));
    }

    #[test]
    fn test_enter_to_exit_progress() {
        let anchors = Anchors::ENTER_TO_EXIT;
        // region_start = 100 - 900 = -800, region_end = 900
        let p = compute_progress(&anchors, &geometry(50.0)).unwrap();
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_idempotent() {
        let anchors = Anchors::ENTER_TO_EXIT;
        let g = geometry(321.123);
        let a = compute_progress(&anchors, &g).unwrap();
        let b = compute_progress(&anchors, &g).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_degenerate_span() {
        let anchors = Anchors::TOP_TO_EXIT;
        let g = ScrollGeometry {
            scroll_y: 10.0,
            viewport_height: 900.0,
            region: RegionBounds::new(100.0, 0.0),
        };
        assert_eq!(compute_progress(&anchors, &g), Some(0.0));
        let g = ScrollGeometry {
            scroll_y: 100.0,
            ..g
        };
        assert_eq!(compute_progress(&anchors, &g), Some(1.0));
    }

    #[test]
    fn test_non_finite_geometry() {
        let g = ScrollGeometry {
            scroll_y: f32::NAN,
            ..geometry(0.0)
        };
        assert_eq!(compute_progress(&Anchors::TOP_TO_EXIT, &g), None);
    }

    #[test]
    fn test_anchor_validation() {
        let bad = Intersection::new(Edge::Fraction(f32::INFINITY), Edge::Start);
        assert!(Anchors::new(bad, Anchors::TOP_TO_EXIT.end).is_err());
        assert!(Anchors::new(Anchors::TOP_TO_EXIT.start, Anchors::TOP_TO_EXIT.end).is_ok());
    }

    #[test]
    fn test_tracker_throttles_per_frame() {
        let mut tracker = ScrollProgressTracker::new(Anchors::TOP_TO_EXIT);
        let region = || Some(RegionBounds::new(0.0, 1000.0));

        let first = tracker.update(&ViewportEvent::scroll(1, 0.0, 100.0, 800.0), &region);
        assert_eq!(first.map(|s| s.progress), Some(0.1));

        // Same frame: remembered, not recomputed
        let second = tracker.update(&ViewportEvent::scroll(1, 1.0, 200.0, 800.0), &region);
        assert!(second.is_none());
        assert_eq!(tracker.last_sample().unwrap().progress, 0.1);

        // Next frame picks up the latest geometry
        let third = tracker.update(&ViewportEvent::frame(2, 16.0, 300.0, 800.0), &region);
        assert_eq!(third.map(|s| s.progress), Some(0.3));
    }

    #[test]
    fn test_tracker_recovers_from_missing_layout() {
        let mut tracker = ScrollProgressTracker::new(Anchors::TOP_TO_EXIT);
        let laid_out = Rc::new(Cell::new(false));
        let probe_flag = Rc::clone(&laid_out);
        let region = move || probe_flag.get().then(|| RegionBounds::new(0.0, 1000.0));

        assert!(tracker
            .update(&ViewportEvent::scroll(1, 0.0, 500.0, 800.0), &region)
            .is_none());

        laid_out.set(true);
        let sample = tracker.update(&ViewportEvent::frame(2, 16.0, 500.0, 800.0), &region);
        assert_eq!(sample.map(|s| s.progress), Some(0.5));
    }

    #[test]
    fn test_flush_applies_same_frame_burst() {
        let mut tracker = ScrollProgressTracker::new(Anchors::TOP_TO_EXIT);
        let region = || Some(RegionBounds::new(0.0, 1000.0));

        tracker.update(&ViewportEvent::scroll(1, 0.0, 200.0, 800.0), &region);
        assert!(tracker
            .update(&ViewportEvent::scroll(1, 4.0, 600.0, 800.0), &region)
            .is_none());
        assert!(tracker.is_pending());

        // Still the same frame
        assert!(tracker.flush(1, 8.0, &region).is_none());

        let sample = tracker.flush(2, 16.0, &region).unwrap();
        assert_eq!(sample.progress, 0.6);
        assert_eq!(sample.timestamp_ms, 16.0);
        assert!(!tracker.is_pending());
        assert!(tracker.flush(3, 32.0, &region).is_none());
    }

    #[test]
    fn test_flush_retries_until_laid_out() {
        let mut tracker = ScrollProgressTracker::new(Anchors::TOP_TO_EXIT);
        let laid_out = Rc::new(Cell::new(false));
        let probe_flag = Rc::clone(&laid_out);
        let region = move || probe_flag.get().then(|| RegionBounds::new(0.0, 1000.0));

        tracker.update(&ViewportEvent::scroll(1, 0.0, 400.0, 800.0), &region);
        assert!(tracker.flush(2, 16.0, &region).is_none());
        assert!(tracker.is_pending());

        laid_out.set(true);
        assert_eq!(tracker.flush(3, 32.0, &region).map(|s| s.progress), Some(0.4));
    }

    #[test]
    fn test_binding_on_frame_notifies_pending_scroll() {
        let viewport = EventSource::<ViewportEvent>::new();
        let latest = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&latest);

        let binding = subscribe_progress(
            &viewport,
            || Some(RegionBounds::new(0.0, 1000.0)),
            Anchors::TOP_TO_EXIT,
            move |sample| sink.set(sample.progress),
        );

        viewport.emit(&ViewportEvent::scroll(1, 0.0, 200.0, 800.0));
        viewport.emit(&ViewportEvent::scroll(1, 2.0, 600.0, 800.0));
        assert_eq!(latest.get(), 0.2);

        assert!(binding.on_frame(&FrameTick::new(1, 8.0, 8.0)).is_none());
        let sample = binding.on_frame(&FrameTick::new(2, 16.0, 8.0));
        assert_eq!(sample.map(|s| s.progress), Some(0.6));
        assert_eq!(latest.get(), 0.6);
        assert!(binding.on_frame(&FrameTick::new(3, 32.0, 16.0)).is_none());
    }

    #[test]
    fn test_binding_emits_and_unsubscribes() {
        let viewport = EventSource::<ViewportEvent>::new();
        let hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hits);

        let binding = subscribe_progress(
            &viewport,
            || Some(RegionBounds::new(0.0, 1000.0)),
            Anchors::TOP_TO_EXIT,
            move |_| hits_in.set(hits_in.get() + 1),
        );
        assert_eq!(viewport.listener_count(), 1);

        viewport.emit(&ViewportEvent::scroll(1, 0.0, 250.0, 800.0));
        viewport.emit(&ViewportEvent::resize(2, 16.0, 250.0, 600.0));
        assert_eq!(hits.get(), 2);
        assert_eq!(binding.last_sample().unwrap().progress, 0.25);

        binding.unsubscribe();
        assert_eq!(viewport.listener_count(), 0);
        viewport.emit(&ViewportEvent::scroll(3, 32.0, 500.0, 800.0));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_binding_dropped_mid_dispatch() {
        let viewport = EventSource::<ViewportEvent>::new();
        let slot: Rc<RefCell<Option<ProgressBinding>>> = Rc::new(RefCell::new(None));

        // Registered first, so it runs before the tracker in the same dispatch
        let slot_in = Rc::clone(&slot);
        let _teardown = viewport.subscribe(move |_| {
            slot_in.borrow_mut().take();
        });

        let hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hits);
        *slot.borrow_mut() = Some(subscribe_progress(
            &viewport,
            || Some(RegionBounds::new(0.0, 1000.0)),
            Anchors::TOP_TO_EXIT,
            move |_| hits_in.set(hits_in.get() + 1),
        ));

        viewport.emit(&ViewportEvent::scroll(1, 0.0, 250.0, 800.0));
        assert_eq!(hits.get(), 0);
        assert_eq!(viewport.listener_count(), 1);
    }

    #[test]
    fn test_independent_regions() {
        let viewport = EventSource::<ViewportEvent>::new();
        let a = subscribe_progress(
            &viewport,
            || Some(RegionBounds::new(0.0, 1000.0)),
            Anchors::TOP_TO_EXIT,
            |_| {},
        );
        let b = subscribe_progress(
            &viewport,
            || Some(RegionBounds::new(500.0, 1000.0)),
            Anchors::TOP_TO_EXIT,
            |_| {},
        );

        viewport.emit(&ViewportEvent::scroll(1, 0.0, 750.0, 800.0));
        assert_eq!(a.last_sample().unwrap().progress, 0.75);
        assert_eq!(b.last_sample().unwrap().progress, 0.25);
    }
}
