use crate::anchor::heading_anchor;
use crate::block::Block;
use crate::numbering::Numbering;
use crate::sections::{SectionChild, SectionForest, SectionId};

/// Options governing a table-of-contents projection.
#[derive(Clone, Copy, Debug)]
pub struct TocProjection {
    /// Deepest normalized level included; anything deeper is cut with its
    /// whole subtree.
    pub depth: u8,
    /// Prefix entries with their heading numbers.
    pub numbered: bool,
    /// Point entries at the headings' generated anchors.
    pub linked: bool,
}

/// Nested list mirroring the section forest within the depth bound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TocTree {
    pub items: Vec<TocItem>,
}

/// One projected section. `entry` is `None` for synthetic placeholders:
/// they keep hosting their in-bound descendants but render no visible item
/// of their own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocItem {
    pub entry: Option<TocEntry>,
    pub children: Vec<TocItem>,
}

/// Visible content of a projected heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub text: String,
    pub number: Option<String>,
    pub anchor: Option<String>,
}

/// Project the forest into a table-of-contents tree. Read-only over the
/// forest; both projectors share the same one.
pub fn project_toc(
    forest: &SectionForest,
    blocks: &[Block],
    numbering: &Numbering,
    projection: &TocProjection,
) -> TocTree {
    TocTree {
        items: project_children(forest, blocks, numbering, projection, forest.root()),
    }
}

fn project_children(
    forest: &SectionForest,
    blocks: &[Block],
    numbering: &Numbering,
    projection: &TocProjection,
    children: &[SectionChild],
) -> Vec<TocItem> {
    children
        .iter()
        .filter_map(|child| match child {
            SectionChild::Section(id) => {
                project_section(forest, blocks, numbering, projection, *id)
            }
            SectionChild::Block(_) => None,
        })
        .collect()
}

fn project_section(
    forest: &SectionForest,
    blocks: &[Block],
    numbering: &Numbering,
    projection: &TocProjection,
    id: SectionId,
) -> Option<TocItem> {
    let section = forest.section(id);
    if section.level > projection.depth {
        return None;
    }

    let children = project_children(forest, blocks, numbering, projection, &section.children);

    let entry = section.block.map(|block| {
        let label = numbering.label_for(block).unwrap_or_default();
        let text = blocks[block].text.clone();
        TocEntry {
            number: projection.numbered.then(|| label.to_string()),
            anchor: projection.linked.then(|| heading_anchor(label, &text)),
            text,
        }
    });

    // A placeholder with nothing visible beneath it contributes nothing.
    if entry.is_none() && children.is_empty() {
        return None;
    }

    Some(TocItem { entry, children })
}
