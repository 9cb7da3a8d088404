//! Structural inference over flat block sequences.
//!
//! A markup translator hands over documents as a linear list of block
//! elements. This crate infers the hierarchy that list implies: it numbers
//! the headings, folds the sequence into a forest of sections (tolerating
//! skipped heading levels), and projects that forest into a table of
//! contents and a semantically nested body. Everything here is pure and
//! allocation-only; numbering and forest are derived once per document and
//! discarded with it.

mod anchor;
mod block;
mod numbering;
mod restructure;
mod sections;
mod toc;

pub use anchor::{anchor_id, heading_anchor};
pub use block::{Block, BlockId, BlockTag, NON_HEADING_LEVEL};
pub use numbering::{compute_numbering, Numbering, NumberingEntry};
pub use restructure::{restructure, BodyNode};
pub use sections::{build_forest, Section, SectionChild, SectionForest, SectionId};
pub use toc::{project_toc, TocEntry, TocItem, TocProjection, TocTree};
