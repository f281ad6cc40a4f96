// Rendering: résumé data to markup, committed into a page model.
// Renderers are pure; fragments reach the page only through `Document::replace_children`.

pub mod document;
pub mod layout;
pub mod node;
pub mod page;
pub mod sections;
pub mod selector;

pub use document::Document;
pub use layout::{skeleton, PageVariant, DEFAULT_TITLE};
pub use node::{fragment_html, Node};
pub use page::{render_page, PageOptions};
pub use sections::{Section, SectionFault};
