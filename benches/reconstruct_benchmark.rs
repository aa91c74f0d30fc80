//! Benchmarks for table reconstruction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks test reconstruction over synthetic block graphs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docgrid::{AnalysisResponse, Block, BlockMap, BlockType, Relationship};

/// Creates a synthetic response with one table of the given dimensions.
///
/// Cells alternate between direct text and word-level tokenization so the
/// fallback path is exercised too.
fn create_table_response(rows: u32, columns: u32) -> AnalysisResponse {
    let mut blocks = Vec::new();
    let mut cell_ids = Vec::new();

    for r in 1..=rows {
        for c in 1..=columns {
            let cell_id = format!("cell-{}-{}", r, c);
            let mut cell = Block::new(&cell_id, BlockType::Cell);
            cell.row_index = Some(r);
            cell.column_index = Some(c);

            if (r + c) % 2 == 0 {
                cell.text = format!("value {}:{}", r, c);
            } else {
                let word_id = format!("word-{}-{}", r, c);
                cell.relationships
                    .push(Relationship::child([word_id.as_str()]));
                let mut word = Block::new(&word_id, BlockType::Word);
                word.text = format!("token {}:{}", r, c);
                blocks.push(word);
            }

            blocks.push(cell);
            cell_ids.push(cell_id);
        }
    }

    let mut table = Block::new("table", BlockType::Table);
    table.relationships.push(Relationship::child(cell_ids));
    blocks.push(table);

    AnalysisResponse::with_blocks(blocks)
}

/// Benchmark lookup construction at various graph sizes.
fn bench_block_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_map");

    for (rows, columns) in [(10, 5), (50, 10), (200, 20)] {
        let response = create_table_response(rows, columns);

        group.bench_function(format!("{}x{}", rows, columns), |b| {
            b.iter(|| BlockMap::from_response(black_box(&response)));
        });
    }

    group.finish();
}

/// Benchmark grid reconstruction at various table sizes.
fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    for (rows, columns) in [(10, 5), (50, 10), (200, 20)] {
        let response = create_table_response(rows, columns);
        let map = BlockMap::from_response(&response);

        group.bench_function(format!("{}x{}", rows, columns), |b| {
            b.iter(|| docgrid::tables(black_box(&map)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_map, bench_reconstruction);
criterion_main!(benches);
