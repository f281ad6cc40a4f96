// Page interactivity: tab switching, mobile navigation, active-link tracking, footer year.
// Independent of data loading. Controllers are plain values owned by one render;
// nothing is registered globally, so there is nothing to tear down.

pub mod nav;
pub mod observer;
pub mod tabs;
pub mod year;

pub use nav::{NavState, NavToggle};
pub use observer::{ActiveSectionTracker, RootMargin, SectionBounds, Viewport};
pub use tabs::{TabSet, TabTransition};
pub use year::{current_year, stamp_year};

use crate::render::Document;

/// The section id a nav link points at: the part of its href after `#`.
pub(crate) fn href_fragment(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    TabClicked(String),
    NavToggled,
    NavLinkClicked,
    Intersections {
        entries: Vec<SectionBounds>,
        viewport: Viewport,
    },
}

/// All UI state for one page, attached to the markup it was read from.
#[derive(Debug, Clone)]
pub struct UiController {
    pub tabs: TabSet,
    pub nav: NavToggle,
    pub sections: ActiveSectionTracker,
}

impl UiController {
    pub fn attach(doc: &Document) -> Self {
        Self {
            tabs: TabSet::from_document(doc),
            nav: NavToggle::default(),
            sections: ActiveSectionTracker::default(),
        }
    }

    /// Returns `true` when the event changed state and the page needs rewriting.
    pub fn handle(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::TabClicked(panel) => self.tabs.activate(&panel) != TabTransition::Unchanged,
            UiEvent::NavToggled => {
                self.nav.toggle();
                true
            }
            UiEvent::NavLinkClicked => {
                let before = self.nav.state();
                before != self.nav.link_clicked()
            }
            UiEvent::Intersections { entries, viewport } => {
                let before = self.sections.active().map(str::to_string);
                let after = self.sections.observe(&entries, &viewport);
                before.as_deref() != after
            }
        }
    }

    pub fn apply(&self, doc: &mut Document) {
        self.tabs.apply(doc);
        self.nav.apply(doc);
        self.sections.apply(doc);
    }
}
