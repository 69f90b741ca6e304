//! Timing table and reveal presets
//!
//! Every duration, delay, stagger interval and easing used by the site lives
//! in [`TIMINGS`]. Screens build their variant trees through the preset
//! constructors below instead of repeating literals.

use crate::easing::Easing;
use crate::variant::{Stagger, VariantSpec, VisualProps};

/// Timing of a stagger group
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerTiming {
    pub delay_children_ms: u32,
    pub interval_ms: u32,
}

impl StaggerTiming {
    pub fn to_stagger(self) -> Stagger {
        Stagger::new(self.delay_children_ms, self.interval_ms)
    }
}

/// Shared, read-only motion constants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingTable {
    /// Easing of every reveal
    pub reveal_easing: Easing,
    /// Easing of plain text fades that are not part of a reveal group
    pub text_easing: Easing,

    pub heading: StaggerTiming,
    pub word_duration_ms: u32,
    /// Blur radius words start from
    pub word_blur: f32,
    pub word_rise: f32,

    pub image_duration_ms: u32,
    pub image_delay_ms: u32,
    pub image_scale: f32,
    pub image_rotate: f32,

    pub description_delay_ms: u32,
    pub description_duration_ms: u32,
    pub description_rise: f32,
    /// Body copy delay relative to the description block
    pub body_delay_ms: u32,
    pub body_duration_ms: u32,
    pub body_rise: f32,

    pub social: StaggerTiming,
    pub button_duration_ms: u32,

    /// Hover preview enter/exit
    pub preview_duration_ms: u32,
    pub preview_rise: f32,
    pub preview_scale: f32,

    /// Border radius and color morph on hover
    pub hover_morph_ms: u32,
}

/// The site's motion constants
pub const TIMINGS: TimingTable = TimingTable {
    reveal_easing: Easing::EXPO_OUT,
    text_easing: Easing::EaseOut,

    heading: StaggerTiming {
        delay_children_ms: 200,
        interval_ms: 80,
    },
    word_duration_ms: 800,
    word_blur: 10.0,
    word_rise: 20.0,

    image_duration_ms: 1000,
    image_delay_ms: 500,
    image_scale: 0.8,
    image_rotate: -10.0,

    description_delay_ms: 800,
    description_duration_ms: 800,
    description_rise: 30.0,
    body_delay_ms: 100,
    body_duration_ms: 800,
    body_rise: 20.0,

    social: StaggerTiming {
        delay_children_ms: 1200,
        interval_ms: 100,
    },
    button_duration_ms: 600,

    preview_duration_ms: 200,
    preview_rise: 10.0,
    preview_scale: 0.95,

    hover_morph_ms: 200,
};

impl TimingTable {
    /// Container that only fades and staggers its children
    pub fn stagger_group(&self, label: &str, timing: StaggerTiming) -> VariantSpec {
        VariantSpec::new(label)
            .hidden(VisualProps::new().opacity(0.0))
            .visible(VisualProps::new().opacity(1.0))
            .duration_ms(0)
            .stagger(timing.to_stagger())
    }

    /// Headline word: blurred, transparent and lowered → sharp and in place
    pub fn word(&self, label: &str) -> VariantSpec {
        self.blur_rise(label, self.word_duration_ms)
    }

    /// Inline image: faded, shrunk and tilted → upright
    pub fn image(&self, label: &str) -> VariantSpec {
        VariantSpec::new(label)
            .hidden(
                VisualProps::new()
                    .opacity(0.0)
                    .scale(self.image_scale)
                    .rotate(self.image_rotate),
            )
            .visible(VisualProps::new().opacity(1.0).scale(1.0).rotate(0.0))
            .duration_ms(self.image_duration_ms)
            .delay_ms(self.image_delay_ms)
            .easing(self.reveal_easing)
    }

    /// Block that fades in while rising `rise` pixels
    pub fn fade_in_up(&self, label: &str, rise: f32, duration_ms: u32) -> VariantSpec {
        VariantSpec::new(label)
            .hidden(VisualProps::new().opacity(0.0).translate_y(rise))
            .visible(VisualProps::new().opacity(1.0).translate_y(0.0))
            .duration_ms(duration_ms)
            .easing(self.reveal_easing)
    }

    /// Social button wrapper
    pub fn button(&self, label: &str) -> VariantSpec {
        self.blur_rise(label, self.button_duration_ms)
    }

    /// Hidden and visible props of the hover preview
    pub fn preview_props(&self) -> (VisualProps, VisualProps) {
        (
            VisualProps::new()
                .opacity(0.0)
                .translate_y(self.preview_rise)
                .scale(self.preview_scale),
            VisualProps::new().opacity(1.0).translate_y(0.0).scale(1.0),
        )
    }

    fn blur_rise(&self, label: &str, duration_ms: u32) -> VariantSpec {
        VariantSpec::new(label)
            .hidden(
                VisualProps::new()
                    .blur(self.word_blur)
                    .opacity(0.0)
                    .translate_y(self.word_rise),
            )
            .visible(VisualProps::new().blur(0.0).opacity(1.0).translate_y(0.0))
            .duration_ms(duration_ms)
            .easing(self.reveal_easing)
    }
}
