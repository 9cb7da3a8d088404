//! Markup-translator boundary and HTML page assembly.
//!
//! `blocks` turns markdown into the flat block sequence the outline engine
//! consumes; `page` projects a prepared document into a standalone HTML
//! page. Markdown syntax itself is entirely `pulldown-cmark`'s business.

mod blocks;
mod page;
mod sanitize;

pub use blocks::markdown_blocks;
pub use page::{render_page, StyleAssets};
pub use sanitize::{escape_attr, escape_link, escape_text};
