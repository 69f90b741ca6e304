//! Site configuration file handling
//!
//! The hero is described by one TOML document with two sections:
//! - `[hero]` - headline, description, preview copy and social links
//! - `[interaction]` - magnetic radius, spring and reduced-motion override
//!
//! A default document is compiled in; `SiteConfig::load` reads another one
//! from disk. Timing constants are not configurable here, they live in
//! [`folio_animation::TIMINGS`].

use std::fs;
use std::path::Path;

use folio_animation::SpringConfig;
use folio_core::{InputEnvironment, MotionPolicy};
use serde::Deserialize;

use crate::error::{Result, SiteError};

/// The hero shipped with the site
pub const DEFAULT_CONFIG: &str = include_str!("../assets/hero.toml");

/// Root of a site configuration document
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub hero: HeroConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

// =============================================================================
// [hero]
// =============================================================================

/// Raw hero content, validated by [`crate::HeroContent::from_config`]
#[derive(Debug, Clone, Deserialize)]
pub struct HeroConfig {
    /// Headline lines; the `{image}` token marks the inline image
    pub headline: Vec<String>,
    pub image: ImageConfig,
    pub description: String,
    #[serde(default)]
    pub description_link: Option<LinkConfig>,
    #[serde(default)]
    pub links: Vec<SocialLinkConfig>,
}

/// Inline headline image and its hover preview
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    pub alt: String,
    pub href: String,
    pub preview: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub href: String,
}

/// One magnetic social button
#[derive(Debug, Clone, Deserialize)]
pub struct SocialLinkConfig {
    pub label: String,
    pub href: String,
    /// Hex color shown while hovered
    pub hover_color: String,
}

// =============================================================================
// [interaction]
// =============================================================================

/// Magnetic tuning and motion overrides
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "default_influence_radius")]
    pub influence_radius: f32,
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default = "default_pill_radius")]
    pub pill_radius: f32,
    /// Force reduced motion on or off regardless of the host preference
    #[serde(default)]
    pub reduced_motion: Option<bool>,
}

fn default_influence_radius() -> f32 {
    120.0
}

fn default_stiffness() -> f32 {
    SpringConfig::magnetic().stiffness
}

fn default_damping() -> f32 {
    SpringConfig::magnetic().damping
}

fn default_mass() -> f32 {
    SpringConfig::magnetic().mass
}

fn default_pill_radius() -> f32 {
    9999.0
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            influence_radius: default_influence_radius(),
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            pill_radius: default_pill_radius(),
            reduced_motion: None,
        }
    }
}

impl InteractionConfig {
    /// Validated spring parameters
    pub fn spring(&self) -> Result<SpringConfig> {
        Ok(SpringConfig::new(self.stiffness, self.damping, self.mass).validate()?)
    }

    /// Freeze the motion policy for a mount, applying the override
    pub fn policy(&self, env: InputEnvironment) -> MotionPolicy {
        let env = match self.reduced_motion {
            Some(reduced) => env.with_reduced_motion(reduced),
            None => env,
        };
        MotionPolicy::from_environment(env)
    }
}

impl SiteConfig {
    /// Parse a configuration document
    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// The compiled-in hero
    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Load a configuration document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&source)?;
        tracing::debug!(
            path = %path.display(),
            links = config.hero.links.len(),
            "site configuration loaded"
        );
        Ok(config)
    }
}
