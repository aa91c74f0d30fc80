//! Plain text extraction.

use crate::graph::BlockMap;
use crate::model::{Block, BlockType};

/// Resolve the display text of a block.
///
/// Uses the block's direct `text` field when non-empty; otherwise joins the
/// text of its WORD children with single spaces, in relationship-edge
/// order. This handles blocks whose content was only tokenized at the word
/// level. Dangling child ids are skipped.
pub fn block_text(map: &BlockMap, block: &Block) -> String {
    if !block.text.is_empty() {
        return block.text.clone();
    }

    let words: Vec<&str> = map
        .resolve(block.child_ids())
        .filter(|b| b.block_type == BlockType::Word && !b.text.is_empty())
        .map(|b| b.text.as_str())
        .collect();

    words.join(" ").trim().to_string()
}

/// Text of every LINE block, in source order.
pub fn lines(map: &BlockMap) -> Vec<String> {
    map.blocks_of_type(BlockType::Line)
        .filter(|b| !b.text.is_empty())
        .map(|b| b.text.clone())
        .collect()
}

/// All line text joined with newlines.
pub fn plain_text(map: &BlockMap) -> String {
    lines(map).join("\n")
}
