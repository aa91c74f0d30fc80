//! Form key/value extraction from KEY_VALUE_SET blocks.

use std::collections::HashMap;

use super::text::block_text;
use crate::graph::BlockMap;
use crate::model::RelationshipType;

/// Extract form fields as a key/value text map.
///
/// For every KEY_VALUE_SET block tagged KEY: the key string is the block's
/// child WORD concatenation, and the value string comes from the first
/// resolvable block behind its VALUE edge (direct text, else child WORD
/// concatenation). Pairs where either side is empty are dropped. Duplicate
/// keys keep the last value seen; callers get no ordering guarantee.
pub fn form_fields(map: &BlockMap) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for key_block in map.blocks().iter().filter(|b| b.is_form_key()) {
        let key = block_text(map, key_block);
        if key.is_empty() {
            continue;
        }

        let value = map
            .resolve(key_block.related_ids(RelationshipType::Value))
            .next()
            .map(|value_block| block_text(map, value_block))
            .unwrap_or_default();
        if value.is_empty() {
            log::debug!("form key {:?} has no resolvable value", key);
            continue;
        }

        fields.insert(key, value);
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisResponse, Block, BlockType, EntityType, Relationship};

    fn word(id: &str, text: &str) -> Block {
        let mut block = Block::new(id, BlockType::Word);
        block.text = text.to_string();
        block
    }

    fn key_block(id: &str, word_ids: Vec<&str>, value_id: &str) -> Block {
        let mut block = Block::new(id, BlockType::KeyValueSet);
        block.entity_types.push(EntityType::Key);
        block.relationships.push(Relationship::child(word_ids));
        block.relationships.push(Relationship::value([value_id]));
        block
    }

    fn value_block(id: &str, word_ids: Vec<&str>) -> Block {
        let mut block = Block::new(id, BlockType::KeyValueSet);
        block.entity_types.push(EntityType::Value);
        block.relationships.push(Relationship::child(word_ids));
        block
    }

    fn map_of(blocks: Vec<Block>) -> BlockMap {
        BlockMap::from_response(&AnalysisResponse::with_blocks(blocks))
    }

    #[test]
    fn test_basic_field() {
        let map = map_of(vec![
            key_block("k", vec!["kw"], "v"),
            value_block("v", vec!["vw"]),
            word("kw", "Name"),
            word("vw", "Alice"),
        ]);

        let fields = form_fields(&map);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("Name").map(String::as_str), Some("Alice"));
    }

    #[test]
    fn test_multi_word_key_and_value() {
        let map = map_of(vec![
            key_block("k", vec!["kw1", "kw2"], "v"),
            value_block("v", vec!["vw1", "vw2"]),
            word("kw1", "Date"),
            word("kw2", "of Birth"),
            word("vw1", "1990-01-01"),
            word("vw2", "(approx)"),
        ]);

        let fields = form_fields(&map);
        assert_eq!(
            fields.get("Date of Birth").map(String::as_str),
            Some("1990-01-01 (approx)")
        );
    }

    #[test]
    fn test_value_with_direct_text() {
        let mut value = Block::new("v", BlockType::KeyValueSet);
        value.text = "direct".to_string();
        let map = map_of(vec![
            key_block("k", vec!["kw"], "v"),
            value,
            word("kw", "Field"),
        ]);

        let fields = form_fields(&map);
        assert_eq!(fields.get("Field").map(String::as_str), Some("direct"));
    }

    #[test]
    fn test_empty_key_or_value_dropped() {
        let map = map_of(vec![
            // Key resolves, value edge dangles.
            key_block("k1", vec!["kw1"], "ghost"),
            word("kw1", "Orphan"),
            // Value resolves, key has no words.
            key_block("k2", vec![], "v2"),
            value_block("v2", vec!["vw2"]),
            word("vw2", "unreachable"),
        ]);

        assert!(form_fields(&map).is_empty());
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let map = map_of(vec![
            key_block("k1", vec!["kw"], "v1"),
            key_block("k2", vec!["kw"], "v2"),
            value_block("v1", vec!["vw1"]),
            value_block("v2", vec!["vw2"]),
            word("kw", "Status"),
            word("vw1", "old"),
            word("vw2", "new"),
        ]);

        let fields = form_fields(&map);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("Status").map(String::as_str), Some("new"));
    }

    #[test]
    fn test_value_tagged_blocks_are_not_keys() {
        let map = map_of(vec![value_block("v", vec!["vw"]), word("vw", "loose")]);
        assert!(form_fields(&map).is_empty());
    }
}
