//! Scroll-position tracking for the navigation links.
//!
//! Sections are tested against a band derived from the viewport and a root margin.
//! With the default `-50% 0px -50% 0px` margin the band collapses to the viewport
//! midline. Entries are applied in the order reported: when several sections cross
//! in one batch, the last one wins.

use serde::{Deserialize, Serialize};

use super::href_fragment;
use crate::render::Document;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

/// A section's vertical extent in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Top and bottom root margins as fractions of viewport height; negative shrinks the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: f64,
    pub bottom: f64,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: -0.5,
            bottom: -0.5,
        }
    }
}

impl RootMargin {
    /// `(band_top, band_bottom)` in page coordinates. Never inverted.
    pub fn band(&self, viewport: &Viewport) -> (f64, f64) {
        let top = viewport.scroll_top - self.top * viewport.height;
        let bottom = viewport.scroll_top + viewport.height + self.bottom * viewport.height;
        if bottom < top {
            let mid = (top + bottom) / 2.0;
            (mid, mid)
        } else {
            (top, bottom)
        }
    }
}

impl SectionBounds {
    pub fn intersects(&self, band: (f64, f64)) -> bool {
        let (band_top, band_bottom) = band;
        self.height > 0.0 && self.top <= band_bottom && self.top + self.height > band_top
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveSectionTracker {
    margin: RootMargin,
    active: Option<String>,
}

impl ActiveSectionTracker {
    pub fn new(margin: RootMargin) -> Self {
        Self {
            margin,
            active: None,
        }
    }

    /// Continues from a previously reported active section.
    pub fn with_active(mut self, active: Option<String>) -> Self {
        self.active = active;
        self
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Processes one batch of entries; returns the active section afterwards.
    pub fn observe(&mut self, entries: &[SectionBounds], viewport: &Viewport) -> Option<&str> {
        let band = self.margin.band(viewport);
        for entry in entries {
            if entry.intersects(band) {
                self.active = Some(entry.id.clone());
            }
        }
        self.active()
    }

    /// Marks the link whose fragment names the active section; clears its siblings.
    pub fn apply(&self, doc: &mut Document) {
        let Some(active) = self.active() else {
            return;
        };
        doc.update_all(".nav-link", |link| {
            let on = link.attr("href").and_then(href_fragment) == Some(active);
            link.toggle_class("active", on);
        });
    }
}
