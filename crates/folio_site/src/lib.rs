//! Folio Site
//!
//! The landing hero, assembled from the interaction layer:
//!
//! - **Config**: TOML site configuration with a compiled-in default
//! - **Content**: validated headline, description and social links
//! - **Hero**: reveal tree, scroll-linked fade, magnetic buttons, image preview
//! - **Navigation**: host-provided dispatcher for link activations
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use folio_core::{EventSource, InputEnvironment, PointerEvent, Size, ViewportEvent};
//! use folio_site::{HeroContent, HeroHost, HeroLayout, HeroScene, SiteConfig, TracingNavigator};
//!
//! let config = SiteConfig::builtin().unwrap();
//! let content = HeroContent::from_config(&config.hero).unwrap();
//! let layout = HeroLayout::synthetic(Size::new(1280.0, 900.0), content.links.len());
//! let policy = config.interaction.policy(InputEnvironment::desktop());
//!
//! let viewport = EventSource::<ViewportEvent>::new();
//! let pointer = EventSource::<PointerEvent>::new();
//! let host = HeroHost {
//!     viewport: &viewport,
//!     pointer: &pointer,
//!     navigator: Rc::new(TracingNavigator),
//! };
//!
//! let mut hero = HeroScene::mount(content, &config.interaction, policy, layout, host).unwrap();
//! hero.on_frame(0.0);
//! let frame = hero.on_frame(16.0);
//! assert!(frame.visible_count() > 0);
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod hero;
pub mod layout;
pub mod navigation;

pub use config::{InteractionConfig, SiteConfig, DEFAULT_CONFIG};
pub use content::{HeadlineToken, HeroContent, HeroImage, SocialLink, TextLink};
pub use error::{Result, SiteError};
pub use hero::{
    hero_spec, ButtonFrame, HeroFrame, HeroHost, HeroScene, NodeStyle, ScrollCurves, ScrollStyle,
};
pub use layout::HeroLayout;
pub use navigation::{Destination, Navigator, RecordingNavigator, TracingNavigator};
