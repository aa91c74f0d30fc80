//! Block graph types.
//!
//! The analysis service reports document structure as a flat list of typed
//! blocks connected by id-based relationship edges, not as a tree. These
//! types mirror that wire shape; missing fields deserialize to empty
//! defaults so a partial or inconsistent payload never fails to parse.

use serde::{Deserialize, Serialize};

/// One node in the service's output graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Opaque identifier, unique within one analysis response.
    #[serde(default)]
    pub id: String,

    /// Block kind reported by the service.
    #[serde(default)]
    pub block_type: BlockType,

    /// Text payload (present on LINE/WORD/CELL leaf content).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// 1-based row position, present only on CELL blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column position, present only on CELL blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Tags such as KEY or VALUE, present only on KEY_VALUE_SET blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,

    /// Directed edges to other blocks in the same response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,

    /// Page number this block was found on (multi-page responses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Block {
    /// Create a block with the given id and type, everything else empty.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: String::new(),
            row_index: None,
            column_index: None,
            entity_types: Vec::new(),
            relationships: Vec::new(),
            page: None,
        }
    }

    /// Ids referenced by relationships of the given type, in edge order.
    pub fn related_ids(&self, kind: RelationshipType) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(move |r| r.relationship_type == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Ids referenced by CHILD relationships, in edge order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.related_ids(RelationshipType::Child)
    }

    /// Whether this block carries the given entity type tag.
    pub fn has_entity_type(&self, entity_type: EntityType) -> bool {
        self.entity_types.contains(&entity_type)
    }

    /// Check if this block is a TABLE.
    pub fn is_table(&self) -> bool {
        self.block_type == BlockType::Table
    }

    /// Check if this block is a CELL.
    pub fn is_cell(&self) -> bool {
        self.block_type == BlockType::Cell
    }

    /// Check if this block is a form key (KEY_VALUE_SET tagged KEY).
    pub fn is_form_key(&self) -> bool {
        self.block_type == BlockType::KeyValueSet && self.has_entity_type(EntityType::Key)
    }
}

/// Block kinds reported by the service.
///
/// The set is extensible on the service side; unrecognized kinds
/// deserialize to [`BlockType::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// A page of the document
    Page,
    /// A line of text
    Line,
    /// A single word
    Word,
    /// A detected table
    Table,
    /// A cell within a table
    Cell,
    /// A cell spanning multiple rows or columns
    MergedCell,
    /// A form key or value
    KeyValueSet,
    /// A checkbox or radio button
    SelectionElement,
    /// Any kind this version does not model
    #[default]
    #[serde(other)]
    Other,
}

/// Relationship edge kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Containment: table to cells, cell to words, key block to words
    Child,
    /// A key block's link to its value block
    Value,
    /// Any kind this version does not model
    #[default]
    #[serde(other)]
    Other,
}

/// Entity tags carried by KEY_VALUE_SET blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// The key side of a form field
    Key,
    /// The value side of a form field
    Value,
    /// Any tag this version does not model
    #[default]
    #[serde(other)]
    Other,
}

/// A directed, typed edge from one block to a list of other blocks by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Edge kind.
    #[serde(rename = "Type", default)]
    pub relationship_type: RelationshipType,

    /// Referenced block ids, in order.
    #[serde(rename = "Ids", default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a CHILD relationship to the given ids.
    pub fn child<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            relationship_type: RelationshipType::Child,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a VALUE relationship to the given ids.
    pub fn value<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            relationship_type: RelationshipType::Value,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_from_wire_json() {
        let json = r#"{
            "Id": "cell-1",
            "BlockType": "CELL",
            "RowIndex": 2,
            "ColumnIndex": 3,
            "Relationships": [{"Type": "CHILD", "Ids": ["w1", "w2"]}]
        }"#;

        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.id, "cell-1");
        assert_eq!(block.block_type, BlockType::Cell);
        assert_eq!(block.row_index, Some(2));
        assert_eq!(block.column_index, Some(3));
        assert!(block.text.is_empty());
        assert_eq!(block.child_ids().collect::<Vec<_>>(), vec!["w1", "w2"]);
    }

    #[test]
    fn test_missing_fields_default() {
        // A bare object still parses; everything defaults to empty.
        let block: Block = serde_json::from_str("{}").unwrap();
        assert!(block.id.is_empty());
        assert_eq!(block.block_type, BlockType::Other);
        assert!(block.relationships.is_empty());
        assert!(block.entity_types.is_empty());
    }

    #[test]
    fn test_unknown_block_type() {
        let block: Block =
            serde_json::from_str(r#"{"Id": "q1", "BlockType": "QUERY_RESULT"}"#).unwrap();
        assert_eq!(block.block_type, BlockType::Other);
    }

    #[test]
    fn test_key_value_set_wire_name() {
        let block: Block = serde_json::from_str(
            r#"{"Id": "k1", "BlockType": "KEY_VALUE_SET", "EntityTypes": ["KEY"]}"#,
        )
        .unwrap();
        assert!(block.is_form_key());
    }

    #[test]
    fn test_related_ids_preserves_edge_order() {
        let mut block = Block::new("t1", BlockType::Table);
        block.relationships.push(Relationship::child(["a", "b"]));
        block.relationships.push(Relationship::value(["v"]));
        block.relationships.push(Relationship::child(["c"]));

        let children: Vec<&str> = block.child_ids().collect();
        assert_eq!(children, vec!["a", "b", "c"]);

        let values: Vec<&str> = block.related_ids(RelationshipType::Value).collect();
        assert_eq!(values, vec!["v"]);
    }
}
