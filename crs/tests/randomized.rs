//! Randomized operation sequences checked against an ordered-map model

use crs::{CrsMatrix, SparseMatrix, SparsityPattern};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const NUM_ROWS: usize = 12;
const NUM_COLUMNS: usize = 40;

type Model = Vec<BTreeMap<u32, i64>>;

fn assert_matches(matrix: &CrsMatrix<i64>, model: &Model) {
    assert_eq!(matrix.consistency_check(), Ok(()));
    for (row, expected) in model.iter().enumerate() {
        let columns: Vec<u32> = expected.keys().copied().collect();
        let entries: Vec<i64> = expected.values().copied().collect();
        assert_eq!(matrix.columns(row), columns.as_slice(), "row {row}");
        assert_eq!(matrix.entries(row), entries.as_slice(), "row {row}");
    }
    let total: usize = model.iter().map(BTreeMap::len).sum();
    assert_eq!(matrix.num_non_zeros(), total);
    assert_eq!(
        matrix.num_non_zeros(),
        (0..matrix.num_rows())
            .map(|row| matrix.num_non_zeros_in_row(row))
            .sum::<usize>()
    );
}

fn random_batch(rng: &mut StdRng, max_len: usize) -> (Vec<u32>, Vec<i64>) {
    let len = rng.gen_range(0..=max_len);
    let cols: Vec<u32> = (0..len)
        .map(|_| rng.gen_range(0..NUM_COLUMNS as u32))
        .collect();
    let values = (0..len).map(|_| rng.gen_range(-1000..1000)).collect();
    (cols, values)
}

/// First occurrence of each column wins, matching the batch insert contract
fn insert_into_model(model: &mut BTreeMap<u32, i64>, cols: &[u32], values: &[i64]) -> usize {
    let mut order: Vec<usize> = (0..cols.len()).collect();
    order.sort_by_key(|&i| cols[i]);
    let mut inserted = 0;
    for i in order {
        if !model.contains_key(&cols[i]) {
            model.insert(cols[i], values[i]);
            inserted += 1;
        }
    }
    inserted
}

#[test]
fn test_random_owner_operations() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut matrix = CrsMatrix::<i64>::new(NUM_ROWS, NUM_COLUMNS, 2).unwrap();
    let mut model: Model = vec![BTreeMap::new(); NUM_ROWS];

    for step in 0..2_000 {
        let row = rng.gen_range(0..NUM_ROWS);
        match rng.gen_range(0..8) {
            0 => {
                let col = rng.gen_range(0..NUM_COLUMNS as u32);
                let value = rng.gen_range(-1000..1000);
                let expected = !model[row].contains_key(&col);
                model[row].entry(col).or_insert(value);
                assert_eq!(matrix.insert_non_zero(row, col, value), Ok(expected));
            }
            1 => {
                let (cols, values) = random_batch(&mut rng, 8);
                let expected = insert_into_model(&mut model[row], &cols, &values);
                assert_eq!(matrix.insert_non_zeros(row, &cols, &values), Ok(expected));
            }
            2 => {
                let (mut cols, mut values) = random_batch(&mut rng, 8);
                sort_pairs(&mut cols, &mut values);
                let expected = insert_into_model(&mut model[row], &cols, &values);
                assert_eq!(
                    matrix.insert_non_zeros_sorted(row, &cols, &values),
                    Ok(expected)
                );
            }
            3 => {
                let col = rng.gen_range(0..NUM_COLUMNS as u32);
                let expected = model[row].remove(&col).is_some();
                assert_eq!(matrix.remove_non_zero(row, col), Ok(expected));
            }
            4 => {
                let (cols, _) = random_batch(&mut rng, 6);
                let mut unique = cols.clone();
                unique.sort_unstable();
                unique.dedup();
                let expected = unique
                    .iter()
                    .filter(|&&col| model[row].remove(&col).is_some())
                    .count();
                assert_eq!(matrix.remove_non_zeros(row, &cols), Ok(expected));
            }
            5 => {
                let (cols, values) = random_batch(&mut rng, 6);
                let mut expected = 0;
                for (col, value) in cols.iter().zip(&values) {
                    if let Some(entry) = model[row].get_mut(col) {
                        *entry += value;
                        expected += 1;
                    }
                }
                assert_eq!(matrix.add_to_row(row, &cols, &values), Ok(expected));
            }
            6 => {
                let capacity = rng.gen_range(0..NUM_COLUMNS + 5);
                matrix.set_row_capacity(row, capacity).unwrap();
                let keep = capacity.min(NUM_COLUMNS);
                while model[row].len() > keep {
                    model[row].pop_last();
                }
            }
            _ => {
                if step % 5 == 0 {
                    matrix.compress();
                }
            }
        }
        assert_matches(&matrix, &model);
    }
}

#[test]
fn test_random_parallel_style_assembly() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut matrix = CrsMatrix::<i64>::new(NUM_ROWS, NUM_COLUMNS, 0).unwrap();
    let mut model: Model = vec![BTreeMap::new(); NUM_ROWS];

    // Sizing pass through the owner, then filling through a view
    let mut patterns = Vec::new();
    for row in 0..NUM_ROWS {
        let mut cols: Vec<u32> = (0..NUM_COLUMNS as u32).collect();
        cols.shuffle(&mut rng);
        cols.truncate(rng.gen_range(0..10));
        matrix.reserve_non_zeros_in_row(row, cols.len()).unwrap();
        patterns.push(cols);
    }

    let mut view = matrix.to_view();
    for (mut handle, cols) in view.rows_mut().zip(&patterns) {
        let values: Vec<i64> = cols.iter().map(|&c| i64::from(c) * 10).collect();
        let row = handle.row();
        assert_eq!(handle.insert_non_zeros(cols, &values), Ok(cols.len()));
        insert_into_model(&mut model[row], cols, &values);
        assert_eq!(handle.len(), handle.capacity());
    }

    assert_matches(&matrix, &model);
}

/// Stable sort of a batch by column
fn sort_pairs(cols: &mut [u32], values: &mut [i64]) {
    let mut pairs: Vec<(u32, i64)> = cols.iter().copied().zip(values.iter().copied()).collect();
    pairs.sort_by_key(|&(col, _)| col);
    for (i, (col, value)) in pairs.into_iter().enumerate() {
        cols[i] = col;
        values[i] = value;
    }
}
