//! Navigation dispatch
//!
//! Link activations are handed to a [`Navigator`] owned by the host; the
//! scene never opens windows or changes routes itself.

use std::cell::RefCell;

use crate::error::{Result, SiteError};

/// Where an activated link goes
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    /// In-app route, e.g. `/vault`
    Route(String),
    /// External page, opened in a new tab
    External(String),
    /// `mailto:` address
    Mail(String),
}

impl Destination {
    /// Classify an href
    pub fn parse(href: &str) -> Result<Self> {
        let href = href.trim();
        if let Some(address) = href.strip_prefix("mailto:") {
            if address.is_empty() {
                return Err(SiteError::InvalidContent("empty mailto address".into()));
            }
            return Ok(Destination::Mail(address.to_string()));
        }
        if href.starts_with("https://") || href.starts_with("http://") {
            return Ok(Destination::External(href.to_string()));
        }
        if href.starts_with('/') {
            return Ok(Destination::Route(href.to_string()));
        }
        Err(SiteError::InvalidContent(format!(
            "unsupported link target '{href}'"
        )))
    }
}

/// Host navigation surface
pub trait Navigator {
    fn navigate(&self, destination: &Destination);
}

/// Logs navigations instead of performing them
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, destination: &Destination) {
        tracing::info!(?destination, "navigate");
    }
}

/// Remembers every navigation, in order
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Destination> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: &Destination) {
        self.visited.borrow_mut().push(destination.clone());
    }
}
