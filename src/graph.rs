//! Block graph normalization.
//!
//! The service's output is a graph walked via explicit id edges rather than
//! native references. [`BlockMap`] is the normalized form: a flat ordered
//! block list plus an id lookup, built once per document invocation and
//! read-only afterwards. Dangling ids resolve to `None` instead of failing;
//! the extractors skip them.

use std::collections::HashMap;

use crate::model::{AnalysisResponse, Block, BlockType};

/// Id-indexed view over the blocks of one or more analysis responses.
#[derive(Debug, Clone, Default)]
pub struct BlockMap {
    blocks: Vec<Block>,
    index: HashMap<String, usize>,
}

impl BlockMap {
    /// Build a lookup from a single response.
    pub fn from_response(response: &AnalysisResponse) -> Self {
        Self::from_blocks(response.blocks.iter().cloned())
    }

    /// Build a lookup from an ordered list of result pages.
    ///
    /// Page block lists are concatenated in page order. Ids are assumed
    /// globally unique across pages (the service guarantees this); no
    /// de-duplication is performed.
    pub fn from_pages(pages: &[AnalysisResponse]) -> Self {
        Self::from_blocks(pages.iter().flat_map(|p| p.blocks.iter().cloned()))
    }

    fn from_blocks(blocks: impl Iterator<Item = Block>) -> Self {
        let blocks: Vec<Block> = blocks.collect();
        let index = blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (block.id.clone(), i))
            .collect();
        Self { blocks, index }
    }

    /// Look up a block by id. Dangling ids return `None`.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.index.get(id).map(|&i| &self.blocks[i])
    }

    /// All blocks, in source order across all merged pages.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Blocks of the given type, in source order.
    pub fn blocks_of_type(&self, block_type: BlockType) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| b.block_type == block_type)
    }

    /// Resolve a list of ids to blocks, silently skipping dangling ids.
    pub fn resolve<'a, I>(&'a self, ids: I) -> impl Iterator<Item = &'a Block>
    where
        I: IntoIterator<Item = &'a str> + 'a,
    {
        ids.into_iter().filter_map(|id| self.get(id))
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the map holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
