//! Validated hero content
//!
//! [`HeroContent`] is the typed, immutable form of the `[hero]` section.
//! Every string that carries meaning (link targets, hover colors, the image
//! token) is checked here, before anything is mounted.

use folio_core::Color;

use crate::config::{HeroConfig, LinkConfig};
use crate::error::{Result, SiteError};
use crate::navigation::Destination;

/// Placeholder for the inline image inside a headline line
pub const IMAGE_TOKEN: &str = "{image}";

/// One element of a headline line
#[derive(Clone, Debug, PartialEq)]
pub enum HeadlineToken {
    Word(String),
    Image,
}

/// Inline image with its hover preview
#[derive(Clone, Debug, PartialEq)]
pub struct HeroImage {
    pub alt: String,
    pub destination: Destination,
    pub preview: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextLink {
    pub label: String,
    pub destination: Destination,
}

/// A magnetic social button
#[derive(Clone, Debug, PartialEq)]
pub struct SocialLink {
    pub label: String,
    pub destination: Destination,
    /// Hex string as configured; known to parse
    pub hover_color: String,
}

/// Everything the hero displays
#[derive(Clone, Debug, PartialEq)]
pub struct HeroContent {
    pub lines: Vec<Vec<HeadlineToken>>,
    pub image: HeroImage,
    pub description: String,
    pub description_link: Option<TextLink>,
    pub links: Vec<SocialLink>,
}

impl HeroContent {
    pub fn from_config(config: &HeroConfig) -> Result<Self> {
        let lines: Vec<Vec<HeadlineToken>> = config
            .headline
            .iter()
            .map(|line| tokenize(line))
            .collect();

        if lines.is_empty() || lines.iter().any(|line| line.is_empty()) {
            return Err(SiteError::InvalidContent(
                "headline lines must not be empty".into(),
            ));
        }
        let images = lines
            .iter()
            .flatten()
            .filter(|token| matches!(token, HeadlineToken::Image))
            .count();
        if images > 1 {
            return Err(SiteError::InvalidContent(format!(
                "headline places the image {images} times"
            )));
        }

        let image = HeroImage {
            alt: config.image.alt.clone(),
            destination: Destination::parse(&config.image.href)?,
            preview: config.image.preview.clone(),
            tags: config.image.tags.clone(),
        };

        let description_link = config
            .description_link
            .as_ref()
            .map(text_link)
            .transpose()?;

        let mut links = Vec::with_capacity(config.links.len());
        for link in &config.links {
            let label = link.label.trim();
            if label.is_empty() {
                return Err(SiteError::InvalidContent("social link without label".into()));
            }
            if links.iter().any(|l: &SocialLink| l.label == label) {
                return Err(SiteError::InvalidContent(format!(
                    "duplicate social link '{label}'"
                )));
            }
            Color::parse_hex(&link.hover_color)?;
            links.push(SocialLink {
                label: label.to_string(),
                destination: Destination::parse(&link.href)?,
                hover_color: link.hover_color.clone(),
            });
        }

        Ok(Self {
            lines,
            image,
            description: config.description.clone(),
            description_link,
            links,
        })
    }

    pub fn word_count(&self) -> usize {
        self.lines
            .iter()
            .flatten()
            .filter(|token| matches!(token, HeadlineToken::Word(_)))
            .count()
    }

    pub fn has_image(&self) -> bool {
        self.lines
            .iter()
            .flatten()
            .any(|token| matches!(token, HeadlineToken::Image))
    }
}

fn tokenize(line: &str) -> Vec<HeadlineToken> {
    line.split_whitespace()
        .map(|word| {
            if word == IMAGE_TOKEN {
                HeadlineToken::Image
            } else {
                HeadlineToken::Word(word.to_string())
            }
        })
        .collect()
}

fn text_link(link: &LinkConfig) -> Result<TextLink> {
    Ok(TextLink {
        label: link.label.clone(),
        destination: Destination::parse(&link.href)?,
    })
}
