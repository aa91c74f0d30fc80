//! Table reconstruction from CELL block graphs.
//!
//! The service reports a table as a TABLE block whose CHILD edges point at
//! CELL blocks carrying 1-based row/column indices. Reconstruction walks
//! those edges and materializes a dense rectangular grid of cell text. Grid
//! dimensions are not known up front; rows grow lazily as cells are placed.

use serde::{Deserialize, Serialize};

use super::text::block_text;
use crate::graph::BlockMap;
use crate::model::{Block, BlockType};

/// A reconstructed table: rows of cell text.
///
/// Always rectangular; positions the service never reported hold empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    /// Rows of cell text, outer index = row, inner index = column.
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Cell text at 0-based (row, column), if in range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tab-separated representation, one line per row.
    pub fn to_tsv(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reconstruct the grid of a single TABLE block.
///
/// Pure function over the lookup: reconstructing the same table twice
/// yields identical grids. Never fails on malformed input; a TABLE block
/// with no resolvable CELL children produces an empty grid. If two cells
/// claim the same position, the later one in relationship-edge order wins.
pub fn reconstruct_table(map: &BlockMap, table: &Block) -> Grid {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for cell in map
        .resolve(table.child_ids())
        .filter(|b| b.block_type == BlockType::Cell)
    {
        // Indices are 1-based on the wire; convert exactly once here.
        let (row, column) = match (cell.row_index, cell.column_index) {
            (Some(r), Some(c)) if r >= 1 && c >= 1 => ((r - 1) as usize, (c - 1) as usize),
            _ => {
                log::debug!(
                    "skipping cell {} without valid grid position",
                    cell.id
                );
                continue;
            }
        };

        if rows.len() <= row {
            rows.resize_with(row + 1, Vec::new);
        }
        if rows[row].len() <= column {
            rows[row].resize(column + 1, String::new());
        }

        rows[row][column] = block_text(map, cell);
    }

    // Square off ragged rows so callers always see a rectangle.
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }

    log::debug!(
        "reconstructed table {}: {} rows x {} columns",
        table.id,
        rows.len(),
        width
    );

    Grid { rows }
}

/// Reconstruct every TABLE block in the lookup, in source order.
pub fn tables(map: &BlockMap) -> Vec<Grid> {
    map.blocks_of_type(BlockType::Table)
        .map(|table| reconstruct_table(map, table))
        .collect()
}
