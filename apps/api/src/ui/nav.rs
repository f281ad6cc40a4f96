use std::str::FromStr;

use super::href_fragment;
use crate::render::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    Open,
    #[default]
    Closed,
}

impl FromStr for NavState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(NavState::Open),
            "closed" => Ok(NavState::Closed),
            other => Err(format!("unknown nav state '{other}'")),
        }
    }
}

/// Mobile navigation menu. Starts closed on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavToggle {
    state: NavState,
}

impl NavToggle {
    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn toggle(&mut self) -> NavState {
        self.state = match self.state {
            NavState::Open => NavState::Closed,
            NavState::Closed => NavState::Open,
        };
        self.state
    }

    /// Following any navigation link closes the menu.
    pub fn link_clicked(&mut self) -> NavState {
        self.state = NavState::Closed;
        self.state
    }

    pub fn apply(&self, doc: &mut Document) {
        let open = self.state == NavState::Open;
        doc.update_all(".nav-links", |list| list.toggle_class("open", open));
        doc.update_all(".nav-toggle", |button| {
            button.set_attr("aria-expanded", open.to_string());
            button.set_attr("href", if open { "?nav=closed" } else { "?nav=open" });
        });
        // While the menu is open, following a link must also close it.
        doc.update_all(".nav-link", |link| {
            let Some(section) = link.attr("href").and_then(href_fragment) else {
                return;
            };
            let href = if open {
                format!("?nav=closed#{section}")
            } else {
                format!("#{section}")
            };
            link.set_attr("href", href);
        });
    }
}
