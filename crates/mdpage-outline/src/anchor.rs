/// Derive a URL-safe anchor id from arbitrary text: every maximal run of
/// non-alphanumeric characters (Unicode-aware) collapses to a single `-`.
/// Case is preserved and nothing is trimmed beyond what collapsing
/// produces, so trailing punctuation leaves a trailing hyphen.
pub fn anchor_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut last_was_dash = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            id.push(ch);
            last_was_dash = false;
        } else if !last_was_dash {
            id.push('-');
            last_was_dash = true;
        }
    }

    id
}

/// Anchor for a numbered heading. Heading ids and table-of-contents links
/// both derive the id from the numbering label plus the heading text, so
/// the two call sites agree without sharing state.
pub fn heading_anchor(label: &str, text: &str) -> String {
    anchor_id(&format!("{label} {text}"))
}
