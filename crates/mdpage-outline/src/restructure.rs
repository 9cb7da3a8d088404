use crate::block::BlockId;
use crate::sections::{SectionChild, SectionForest};

/// Body content after semantic restructuring. Sections become explicit
/// containers wrapping their heading and nested content; blocks owned by
/// the virtual root stay bare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyNode {
    Section {
        heading: Option<BlockId>,
        children: Vec<BodyNode>,
    },
    Block(BlockId),
}

/// Project the forest into a nested body replacing the flat sequence.
/// Purely structural: document order is preserved and no block is added or
/// dropped, only the nesting changes.
pub fn restructure(forest: &SectionForest) -> Vec<BodyNode> {
    forest
        .root()
        .iter()
        .map(|child| body_node(forest, child))
        .collect()
}

fn body_node(forest: &SectionForest, child: &SectionChild) -> BodyNode {
    match *child {
        SectionChild::Block(id) => BodyNode::Block(id),
        SectionChild::Section(id) => {
            let section = forest.section(id);
            BodyNode::Section {
                heading: section.block,
                children: section
                    .children
                    .iter()
                    .map(|child| body_node(forest, child))
                    .collect(),
            }
        }
    }
}
