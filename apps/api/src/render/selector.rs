use super::node::Element;

/// A minimal CSS selector: compounds of `tag`, `#id` and `.class`, joined by the
/// descendant combinator (whitespace). Enough to address every container on the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    steps: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(token: &str) -> Self {
        let mut compound = Compound::default();
        let mut kind = None;
        let mut name = String::new();
        for ch in token.chars() {
            match ch {
                '#' | '.' => {
                    compound.push(kind, std::mem::take(&mut name));
                    kind = Some(ch);
                }
                _ => name.push(ch),
            }
        }
        compound.push(kind, name);
        compound
    }

    fn push(&mut self, kind: Option<char>, name: String) {
        if name.is_empty() {
            return;
        }
        match kind {
            Some('#') => self.id = Some(name),
            Some(_) => self.classes.push(name),
            None => self.tag = Some(name.to_ascii_lowercase()),
        }
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty()
    }

    fn matches(&self, el: &Element) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c))
    }
}

impl Selector {
    pub fn parse(selector: &str) -> Self {
        Self {
            steps: selector.split_whitespace().map(Compound::parse).collect(),
        }
    }

    /// `ancestors` runs from the root down to the element's parent.
    pub fn matches(&self, el: &Element, ancestors: &[&Element]) -> bool {
        let Some((last, rest)) = self.steps.split_last() else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }
        let mut pending = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match pending.peek() {
                Some(step) if step.matches(ancestor) => {
                    pending.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        pending.peek().is_none()
    }
}
