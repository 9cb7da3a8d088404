use crate::block::{Block, BlockId, NON_HEADING_LEVEL};

/// Number of counters a label can carry. Headings nested deeper than this
/// still get their own section in the tree; their labels reuse the fifth
/// counter.
const MAX_NUMBERED_LEVELS: usize = 5;

/// A heading paired with its rendered hierarchical number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberingEntry {
    pub block: BlockId,
    pub label: String,
}

/// Heading numbers for one document, in document order.
#[derive(Clone, Debug)]
pub struct Numbering {
    min_level: u8,
    entries: Vec<NumberingEntry>,
}

impl Numbering {
    /// Smallest raw heading level present, or [`NON_HEADING_LEVEL`] when the
    /// document has no headings.
    pub fn min_level(&self) -> u8 {
        self.min_level
    }

    pub fn entries(&self) -> &[NumberingEntry] {
        &self.entries
    }

    /// Label for a heading block. `None` for blocks that are not headings.
    pub fn label_for(&self, block: BlockId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.block == block)
            .map(|entry| entry.label.as_str())
    }
}

/// Assign a hierarchical number to every heading in document order.
///
/// Levels are normalized against the shallowest heading present, so a
/// document whose shallowest heading is `<h3>` still numbers from `1.`.
pub fn compute_numbering(blocks: &[Block]) -> Numbering {
    let min_level = blocks
        .iter()
        .map(|block| block.tag.heading_level())
        .min()
        .unwrap_or(NON_HEADING_LEVEL);

    let mut counters = [0u32; MAX_NUMBERED_LEVELS];
    let mut entries = Vec::new();

    for (id, block) in blocks.iter().enumerate() {
        let raw = block.tag.heading_level();
        if raw >= NON_HEADING_LEVEL {
            continue;
        }

        let level = usize::from(raw.saturating_sub(min_level)) + 1;
        let level = level.min(MAX_NUMBERED_LEVELS);

        counters[level - 1] += 1;
        for counter in counters.iter_mut().skip(level) {
            *counter = 0;
        }

        entries.push(NumberingEntry {
            block: id,
            label: render_label(&counters, level),
        });
    }

    Numbering { min_level, entries }
}

/// Render the active counters as a label. Top-level labels keep a closing
/// dot (`1.`), deeper labels are plain dot-joined (`1.1`, `1.2.3`).
fn render_label(counters: &[u32; MAX_NUMBERED_LEVELS], level: usize) -> String {
    let mut label = String::new();
    for counter in &counters[..level] {
        if !label.is_empty() {
            label.push('.');
        }
        label.push_str(&counter.to_string());
    }
    if level == 1 {
        label.push('.');
    }
    label
}
