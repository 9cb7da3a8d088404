use crate::block::{Block, BlockId, BlockTag};

/// Index of a section within its forest's arena.
pub type SectionId = usize;

/// Deepest normalized level the tree tracks.
const MAX_TREE_DEPTH: usize = 6;

/// Ordered child of a section (or of the virtual root).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionChild {
    Section(SectionId),
    Block(BlockId),
}

/// A node in the inferred hierarchy: a heading plus everything nested under
/// it. `block` is `None` for synthetic placeholders bridging a level gap.
#[derive(Clone, Debug)]
pub struct Section {
    pub block: Option<BlockId>,
    pub level: u8,
    pub children: Vec<SectionChild>,
}

impl Section {
    pub fn is_synthetic(&self) -> bool {
        self.block.is_none()
    }
}

/// Forest of sections backed by an index-addressed arena. The virtual
/// level-0 root holds pre-heading content and the top-level sections;
/// parent context during traversal comes from the walk itself, never from
/// owning back-pointers.
#[derive(Clone, Debug, Default)]
pub struct SectionForest {
    arena: Vec<Section>,
    root: Vec<SectionChild>,
}

impl SectionForest {
    pub fn section(&self, id: SectionId) -> &Section {
        &self.arena[id]
    }

    /// Children of the virtual root, in document order.
    pub fn root(&self) -> &[SectionChild] {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Heading blocks in the order the forest holds them.
    pub fn heading_blocks(&self) -> Vec<BlockId> {
        let mut headings = Vec::new();
        self.collect_headings(&self.root, &mut headings);
        headings
    }

    fn collect_headings(&self, children: &[SectionChild], headings: &mut Vec<BlockId>) {
        for child in children {
            if let SectionChild::Section(id) = child {
                let section = self.section(*id);
                headings.extend(section.block);
                self.collect_headings(&section.children, headings);
            }
        }
    }
}

/// Fold the flat sequence into a section forest.
///
/// Maintains one open section per normalized level. A heading that jumps
/// deeper than one level below the open path gets the gap bridged with
/// synthetic placeholders, so the resulting tree never skips a level. The
/// builder is total: any block sequence produces a valid forest.
pub fn build_forest(blocks: &[Block], min_level: u8) -> SectionForest {
    let mut forest = SectionForest::default();
    let mut open: [Option<SectionId>; MAX_TREE_DEPTH] = [None; MAX_TREE_DEPTH];

    for (id, block) in blocks.iter().enumerate() {
        match block.tag {
            BlockTag::Heading(raw) => {
                let level = normalized_level(raw, min_level);
                open_section(&mut forest, &mut open, id, level);
            }
            BlockTag::Other => attach_content(&mut forest, &open, id),
        }
    }

    forest
}

/// Levels renumbered so the shallowest heading present becomes 1. A
/// `min_level` of 7 (heading-free document) can never reach here, and the
/// saturating subtraction keeps the result positive regardless.
fn normalized_level(raw: u8, min_level: u8) -> usize {
    let level = usize::from(raw.saturating_sub(min_level)) + 1;
    level.min(MAX_TREE_DEPTH)
}

fn open_section(
    forest: &mut SectionForest,
    open: &mut [Option<SectionId>; MAX_TREE_DEPTH],
    block: BlockId,
    level: usize,
) {
    // Deepest ancestor still open above the new heading; 0 means the root.
    let (mut parent_level, mut parent) = (1..level)
        .rev()
        .find_map(|l| open[l - 1].map(|id| (l, Some(id))))
        .unwrap_or((0, None));

    // Bridge skipped levels so the tree stays strictly nested.
    while parent_level + 1 < level {
        parent_level += 1;
        let placeholder = attach_section(
            forest,
            parent,
            Section {
                block: None,
                level: parent_level as u8,
                children: Vec::new(),
            },
        );
        open[parent_level - 1] = Some(placeholder);
        parent = Some(placeholder);
    }

    let id = attach_section(
        forest,
        parent,
        Section {
            block: Some(block),
            level: level as u8,
            children: Vec::new(),
        },
    );
    open[level - 1] = Some(id);

    // Everything deeper is no longer on the active path.
    for slot in open.iter_mut().skip(level) {
        *slot = None;
    }
}

fn attach_section(
    forest: &mut SectionForest,
    parent: Option<SectionId>,
    section: Section,
) -> SectionId {
    let id = forest.arena.len();
    forest.arena.push(section);
    match parent {
        Some(parent) => forest.arena[parent].children.push(SectionChild::Section(id)),
        None => forest.root.push(SectionChild::Section(id)),
    }
    id
}

/// Non-heading content trails the most recently opened section; before the
/// first heading it belongs to the virtual root.
fn attach_content(
    forest: &mut SectionForest,
    open: &[Option<SectionId>; MAX_TREE_DEPTH],
    block: BlockId,
) {
    match open.iter().rev().flatten().next() {
        Some(&section) => forest.arena[section].children.push(SectionChild::Block(block)),
        None => forest.root.push(SectionChild::Block(block)),
    }
}
