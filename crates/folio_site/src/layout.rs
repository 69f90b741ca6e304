//! Hero layout
//!
//! The scene does not lay anything out; the host measures the page and
//! reports document-space rects here. Magnetic centers and the scroll region
//! are always read from these rects, never from displaced positions.

use folio_core::{Rect, Size};
use folio_interact::RegionBounds;

/// Measured geometry of the hero
#[derive(Clone, Debug, PartialEq)]
pub struct HeroLayout {
    /// Scroll-tracked region (the hero wrapper)
    pub region: RegionBounds,
    /// Inline headline image
    pub image: Rect,
    /// One rect per social button, in link order
    pub buttons: Vec<Rect>,
}

impl HeroLayout {
    /// Approximate desktop layout, used by the simulator
    pub fn synthetic(viewport: Size, button_count: usize) -> Self {
        const BUTTON_WIDTH: f32 = 170.0;
        const BUTTON_HEIGHT: f32 = 46.0;
        const GUTTER: f32 = 64.0;

        let vh = viewport.height;
        let row_y = vh * 0.62;
        let buttons = (0..button_count)
            .map(|i| {
                // Neighbouring buttons share a 1px border
                let x = GUTTER + i as f32 * (BUTTON_WIDTH - 1.0);
                Rect::new(x, row_y, BUTTON_WIDTH, BUTTON_HEIGHT)
            })
            .collect();

        Self {
            region: RegionBounds::new(0.0, vh * 0.8),
            image: Rect::new(GUTTER + 360.0, vh * 0.22, 90.0, 60.0),
            buttons,
        }
    }
}
