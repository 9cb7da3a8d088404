use pulldown_cmark::escape::{escape_href, escape_html};

/// Escape text interpolated into HTML content.
pub fn escape_text(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = escape_html(out, text);
}

/// Escape text interpolated into a double-quoted attribute value.
pub fn escape_attr(out: &mut String, value: &str) {
    let _ = escape_html(out, value);
}

/// Escape a link target for an `href` attribute.
pub fn escape_link(out: &mut String, target: &str) {
    let _ = escape_href(out, target);
}
