//! Frame clock helpers
//!
//! The host calls into the interaction layer once per rendered frame. These
//! helpers turn raw host timestamps into bounded frame deltas and make sure
//! work scheduled from several events lands at most once per frame.

/// Largest frame delta handed to integrators, in milliseconds
///
/// A tab returning from the background can report a gap of several seconds;
/// integrating that in one step would teleport springs.
pub const MAX_FRAME_DELTA_MS: f32 = 64.0;

/// One tick of the host frame loop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    pub frame: u64,
    pub timestamp_ms: f64,
    /// Time since the previous tick, clamped to [`MAX_FRAME_DELTA_MS`]
    pub dt_ms: f32,
}

impl FrameTick {
    pub fn new(frame: u64, timestamp_ms: f64, dt_ms: f32) -> Self {
        Self {
            frame,
            timestamp_ms,
            dt_ms: clamp_frame_delta(dt_ms),
        }
    }

    pub fn dt_secs(&self) -> f32 {
        self.dt_ms / 1000.0
    }
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DELTA_MS]`
///
/// Negative or non-finite deltas (clock skew) become zero.
pub fn clamp_frame_delta(dt_ms: f32) -> f32 {
    if !dt_ms.is_finite() || dt_ms <= 0.0 {
        0.0
    } else {
        dt_ms.min(MAX_FRAME_DELTA_MS)
    }
}

/// Produces [`FrameTick`]s from raw host timestamps
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    frame: u64,
    last_timestamp_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next frame at `timestamp_ms`
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTick {
        let dt = match self.last_timestamp_ms {
            Some(last) => (timestamp_ms - last) as f32,
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        self.frame += 1;
        FrameTick::new(self.frame, timestamp_ms, dt)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Lets work run at most once per frame
///
/// Events mark the throttle dirty; [`FrameThrottle::take`] returns `true` for
/// the first call in a frame that finds it dirty.
#[derive(Clone, Debug, Default)]
pub struct FrameThrottle {
    last_run_frame: Option<u64>,
    dirty: bool,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Claim this frame's run if there is pending work and the frame is unused
    pub fn take(&mut self, frame: u64) -> bool {
        if !self.dirty || self.last_run_frame == Some(frame) {
            return false;
        }
        self.dirty = false;
        self.last_run_frame = Some(frame);
        true
    }
}
