/// Identity of a block: its index within the document's flat sequence.
pub type BlockId = usize;

/// Level reported for blocks that are not headings. Sits below every real
/// heading level so a heading-free document yields this as its minimum.
pub const NON_HEADING_LEVEL: u8 = 7;

/// Classification of a block element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockTag {
    /// A heading with its raw level (1..=6).
    Heading(u8),
    /// Any other block element.
    Other,
}

impl BlockTag {
    /// Raw heading level, or [`NON_HEADING_LEVEL`] for non-headings.
    pub fn heading_level(self) -> u8 {
        match self {
            BlockTag::Heading(level) => level,
            BlockTag::Other => NON_HEADING_LEVEL,
        }
    }

    pub fn is_heading(self) -> bool {
        matches!(self, BlockTag::Heading(_))
    }
}

/// One element of the flat sequence produced by the markup translator.
///
/// Headings carry their inner inline markup in `html` so a renderer can
/// rebuild the tag with extra attributes; other blocks carry the complete
/// element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub tag: BlockTag,
    pub html: String,
    /// Flattened text content, whitespace-collapsed.
    pub text: String,
}

impl Block {
    pub fn heading(level: u8, html: impl Into<String>, text: impl Into<String>) -> Self {
        Block {
            tag: BlockTag::Heading(level),
            html: html.into(),
            text: text.into(),
        }
    }

    pub fn other(html: impl Into<String>, text: impl Into<String>) -> Self {
        Block {
            tag: BlockTag::Other,
            html: html.into(),
            text: text.into(),
        }
    }
}
