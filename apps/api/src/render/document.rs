use askama::Template;
use tracing::debug;

use super::node::{fragment_html, Element, Fragment, Node};
use super::selector::Selector;

const STYLESHEET: &str = "css/style.css";

/// The page model: a title plus a `<body>` tree that renderers and UI controllers write into.
/// A page whose data failed to load carries a [`LoadErrorView`] instead of a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    title: String,
    lang: String,
    body: Element,
    load_error: Option<LoadErrorView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadErrorView {
    pub message: String,
    /// Location the reader is told to check.
    pub data_path: String,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    lang: &'a str,
    title: &'a str,
    stylesheet: &'a str,
    body: String,
    load_error: Option<&'a LoadErrorView>,
}

impl Document {
    pub fn new(title: &str, body: Element) -> Self {
        Self {
            title: title.to_string(),
            lang: "en".to_string(),
            body,
            load_error: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn select(&self, selector: &str) -> Option<&Element> {
        let path = self.paths(&Selector::parse(selector), true).pop()?;
        self.element_at(&path)
    }

    pub fn select_all(&self, selector: &str) -> Vec<&Element> {
        self.paths(&Selector::parse(selector), false)
            .iter()
            .filter_map(|path| self.element_at(path))
            .collect()
    }

    pub fn select_mut(&mut self, selector: &str) -> Option<&mut Element> {
        let path = self.paths(&Selector::parse(selector), true).pop()?;
        self.element_at_mut(&path)
    }

    /// Applies `f` to every matching element; returns how many matched.
    pub fn update_all(&mut self, selector: &str, mut f: impl FnMut(&mut Element)) -> usize {
        let paths = self.paths(&Selector::parse(selector), false);
        for path in &paths {
            if let Some(el) = self.element_at_mut(path) {
                f(el);
            }
        }
        paths.len()
    }

    /// Replaces every child of the first matching container.
    /// Returns `false` and leaves the document untouched when no container matches.
    pub fn replace_children(&mut self, selector: &str, fragment: Fragment) -> bool {
        match self.select_mut(selector) {
            Some(container) => {
                container.children = fragment;
                true
            }
            None => {
                debug!("No container matches '{selector}', skipping");
                false
            }
        }
    }

    #[cfg(test)]
    pub fn replace_body(&mut self, fragment: Fragment) {
        self.body.children = fragment;
    }

    /// Drops the body and shows the load-error state in its place.
    pub fn set_load_error(&mut self, error: LoadErrorView) {
        self.body.children.clear();
        self.load_error = Some(error);
    }

    pub fn load_error(&self) -> Option<&LoadErrorView> {
        self.load_error.as_ref()
    }

    /// Renders the full page through the `page.html` template.
    /// The body is serialized from the node tree, which escapes all data on its own.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        PageTemplate {
            lang: &self.lang,
            title: &self.title,
            stylesheet: STYLESHEET,
            body: fragment_html(&self.body.children),
            load_error: self.load_error.as_ref(),
        }
        .render()
    }

    fn paths(&self, selector: &Selector, first_only: bool) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        collect_paths(
            &self.body,
            selector,
            &mut Vec::new(),
            &mut Vec::new(),
            &mut out,
            first_only,
        );
        out
    }

    fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let mut el = &self.body;
        for &i in path {
            el = match el.children.get(i)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(el)
    }

    fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut el = &mut self.body;
        for &i in path {
            el = match el.children.get_mut(i)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(el)
    }
}

/// Depth-first, document-order walk recording the child-index path of each match.
fn collect_paths<'a>(
    el: &'a Element,
    selector: &Selector,
    ancestors: &mut Vec<&'a Element>,
    path: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
    first_only: bool,
) {
    if first_only && !out.is_empty() {
        return;
    }
    if selector.matches(el, ancestors) {
        out.push(path.clone());
        if first_only {
            return;
        }
    }
    ancestors.push(el);
    for (i, child) in el.children.iter().enumerate() {
        if let Node::Element(child) = child {
            path.push(i);
            collect_paths(child, selector, ancestors, path, out, first_only);
            path.pop();
        }
    }
    ancestors.pop();
}
