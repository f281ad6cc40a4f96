use chrono::{Datelike, Local};

use crate::render::{Document, Node};

const YEAR_SELECTOR: &str = "#year";

/// Calendar year on the host clock, read once per render.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Writes `year` into the footer slot. Returns `false` if the page has no slot.
pub fn stamp_year(doc: &mut Document, year: i32) -> bool {
    doc.replace_children(YEAR_SELECTOR, vec![Node::text(year.to_string())])
}
