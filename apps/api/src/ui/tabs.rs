use crate::render::Document;

const ACTIVE: &str = "active";
const TAB_SELECTOR: &str = ".tab-link";
const PANEL_SELECTOR: &str = ".content-panel";

/// Exactly-one-active tab state, read from the page's markup.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSet {
    /// Panel ids in tab order, taken from each tab's `data-tab`.
    tabs: Vec<String>,
    active: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabTransition {
    /// Already active, or no such tab. Nothing to write.
    Unchanged,
    Switched { from: Option<String>, to: String },
}

impl TabSet {
    /// The initial active tab is whichever carries the `active` class; none is chosen here.
    pub fn from_document(doc: &Document) -> Self {
        let mut tabs = Vec::new();
        let mut active = None;
        for tab in doc.select_all(TAB_SELECTOR) {
            let Some(panel) = tab.attr("data-tab") else {
                continue;
            };
            if tab.has_class(ACTIVE) && active.is_none() {
                active = Some(tabs.len());
            }
            tabs.push(panel.to_string());
        }
        Self { tabs, active }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.tabs[i].as_str())
    }

    pub fn activate(&mut self, panel: &str) -> TabTransition {
        let Some(index) = self.tabs.iter().position(|t| t == panel) else {
            return TabTransition::Unchanged;
        };
        if self.active == Some(index) {
            return TabTransition::Unchanged;
        }
        let from = self.active().map(str::to_string);
        self.active = Some(index);
        TabTransition::Switched {
            from,
            to: panel.to_string(),
        }
    }

    /// Clears every tab and panel, then marks the active pair.
    pub fn apply(&self, doc: &mut Document) {
        let Some(active) = self.active() else {
            return;
        };
        doc.update_all(TAB_SELECTOR, |tab| {
            let on = tab.attr("data-tab") == Some(active);
            tab.toggle_class(ACTIVE, on);
        });
        doc.update_all(PANEL_SELECTOR, |panel| {
            let on = panel.id() == Some(active);
            panel.toggle_class(ACTIVE, on);
        });
    }
}
