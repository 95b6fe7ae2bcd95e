//! End-to-end behaviour of the owning matrix and its views

use crs::{CrsConfig, CrsError, CrsMatrix, SparseMatrix, SparsityPattern};

fn scenario_one() -> CrsMatrix<f64> {
    let mut matrix = CrsMatrix::new(3, 3, 0).unwrap();
    let inserted = matrix
        .insert_non_zeros(0, &[0, 2, 1], &[1.0, 3.0, 2.0])
        .unwrap();
    assert_eq!(inserted, 3);
    matrix
}

#[test]
fn test_unsorted_batch_insert() {
    let matrix = scenario_one();
    assert_eq!(matrix.columns(0), &[0, 1, 2]);
    assert_eq!(matrix.entries(0), &[1.0, 2.0, 3.0]);
    assert_eq!(matrix.num_non_zeros_in_row(0), 3);
    assert!(matrix.empty_row(1));
    assert_eq!(matrix.consistency_check(), Ok(()));
}

#[test]
fn test_duplicate_insert_is_a_non_event() {
    let mut matrix = scenario_one();
    assert_eq!(matrix.insert_non_zero(0, 1, 9.0), Ok(false));
    assert_eq!(matrix.insert_non_zeros(0, &[1], &[9.0]), Ok(0));
    assert_eq!(matrix.insert_non_zeros_sorted(0, &[0, 2], &[9.0, 9.0]), Ok(0));
    assert_eq!(matrix.entries(0), &[1.0, 2.0, 3.0]);
    assert_eq!(matrix.num_non_zeros(), 3);
}

#[test]
fn test_remove_keeps_pairing() {
    let mut matrix = scenario_one();
    assert_eq!(matrix.remove_non_zero(0, 1), Ok(true));
    assert_eq!(matrix.columns(0), &[0, 2]);
    assert_eq!(matrix.entries(0), &[1.0, 3.0]);
    assert_eq!(matrix.num_non_zeros_in_row(0), 2);
    assert_eq!(matrix.remove_non_zero(0, 1), Ok(false));
}

#[test]
fn test_single_inserts_grow_geometrically() {
    let num_columns = 16;
    let mut matrix = CrsMatrix::<f64>::new(2, num_columns, 1).unwrap();
    matrix.insert_non_zero(1, 7, 7.0).unwrap();

    let mut capacities = vec![matrix.row_capacity(0)];
    for (i, col) in [9u32, 3, 12, 0, 5].into_iter().enumerate() {
        let required = i + 1;
        let before = matrix.row_capacity(0);
        assert_eq!(matrix.insert_non_zero(0, col, col as f64), Ok(true));
        let after = matrix.row_capacity(0);
        if after != before {
            assert!(after >= 2 * required);
            assert!(after <= num_columns);
            capacities.push(after);
        }
    }

    assert_eq!(capacities, vec![1, 4, 10]);
    assert!(matrix.row_capacity(0) >= 5);
    assert_eq!(matrix.columns(0), &[0, 3, 5, 9, 12]);
    assert_eq!(matrix.entries(0), &[0.0, 3.0, 5.0, 9.0, 12.0]);
    assert_eq!(matrix.columns(1), &[7]);
    assert_eq!(matrix.entries(1), &[7.0]);
}

#[test]
fn test_growth_factor_from_config() {
    let config = CrsConfig::new().with_growth_factor(1);
    let mut matrix = CrsMatrix::<i64>::with_config(1, 100, config).unwrap();
    for col in 0..5u32 {
        matrix.insert_non_zero(0, col, i64::from(col)).unwrap();
        assert_eq!(matrix.row_capacity(0), col as usize + 1);
    }
}

#[test]
fn test_compress_removes_slack_only() {
    let mut matrix = CrsMatrix::<f32>::new(4, 10, 3).unwrap();
    matrix.insert_non_zeros(0, &[8, 1], &[8.0, 1.0]).unwrap();
    matrix.insert_non_zeros(2, &[0, 9, 4, 2, 7], &[0.0, 9.0, 4.0, 2.0, 7.0]).unwrap();
    matrix.insert_non_zero(3, 6, 6.0).unwrap();

    let before: Vec<Vec<(u32, f32)>> = (0..4)
        .map(|row| matrix.row(row).iter().map(|(c, &v)| (c, v)).collect())
        .collect();

    matrix.compress();

    for row in 0..matrix.num_rows() {
        assert_eq!(matrix.row_capacity(row), matrix.num_non_zeros_in_row(row));
        let after: Vec<(u32, f32)> = matrix.row(row).iter().map(|(c, &v)| (c, v)).collect();
        assert_eq!(after, before[row]);
    }
    assert_eq!(matrix.non_zero_capacity(), matrix.num_non_zeros());
    assert_eq!(matrix.num_non_zeros(), 8);
    assert_eq!(matrix.consistency_check(), Ok(()));

    // Still growable after compression
    assert_eq!(matrix.insert_non_zero(1, 5, 5.0), Ok(true));
    assert_eq!(matrix.columns(2), &[0, 2, 4, 7, 9]);
}

#[test]
fn test_clone_is_independent() {
    let original = scenario_one();
    let mut copy = original.clone();
    copy.set_values(0, &[-1.0, -2.0, -3.0]).unwrap();
    copy.insert_non_zero(1, 2, 4.0).unwrap();
    copy.remove_non_zero(0, 0).unwrap();

    assert_eq!(original.columns(0), &[0, 1, 2]);
    assert_eq!(original.entries(0), &[1.0, 2.0, 3.0]);
    assert!(original.empty_row(1));
    assert_eq!(copy.entries(0), &[-2.0, -3.0]);
}

#[test]
fn test_take_empties_source() {
    let mut source = scenario_one();
    let moved = source.take();
    assert_eq!(moved.entries(0), &[1.0, 2.0, 3.0]);
    assert_eq!(source.num_rows(), 0);
    assert_eq!(source.non_zero_capacity(), 0);
    assert!(source.empty());
    drop(source);
}

#[test]
fn test_contract_violations() {
    let mut matrix = scenario_one();
    assert_eq!(
        matrix.insert_non_zero(3, 0, 1.0),
        Err(CrsError::RowOutOfBounds { row: 3, num_rows: 3 })
    );
    assert_eq!(
        matrix.insert_non_zeros(1, &[1, 3], &[1.0, 1.0]),
        Err(CrsError::ColumnOutOfBounds {
            column: 3,
            num_columns: 3
        })
    );
    assert!(matrix.empty_row(1));
    assert_eq!(
        matrix.remove_non_zeros_sorted(0, &[2, 0]),
        Err(CrsError::UnsortedInput)
    );
    assert_eq!(matrix.num_non_zeros(), 3);
    assert_eq!(matrix.get_element(5, 0), None);
    assert_eq!(matrix.get_columns(5), None);
}

#[test]
#[should_panic(expected = "tried to access row 3 of a matrix with 3 rows")]
fn test_row_accessor_panics_out_of_range() {
    let matrix = scenario_one();
    let _ = matrix.columns(3);
}

#[test]
fn test_column_shrink_needs_clearing() {
    let mut matrix = CrsMatrix::<f64>::new(2, 10, 2).unwrap();
    matrix.insert_non_zeros(0, &[1, 8], &[1.0, 8.0]).unwrap();
    matrix.insert_non_zero(1, 2, 2.0).unwrap();

    // Shrinking the column count leaves row 0 holding column 8
    matrix.resize(2, 5, 2).unwrap();
    assert_eq!(matrix.columns(0), &[1, 8]);
    assert_eq!(
        matrix.consistency_check(),
        Err(CrsError::ColumnOutOfBounds {
            column: 8,
            num_columns: 5
        })
    );

    matrix.clear_row(0).unwrap();
    assert_eq!(matrix.consistency_check(), Ok(()));
    assert_eq!(matrix.columns(1), &[2]);
}

#[test]
fn test_view_then_owner_growth() {
    let mut matrix = CrsMatrix::<f64>::new(2, 8, 1).unwrap();
    {
        let mut view = matrix.to_view();
        view.insert_non_zero(0, 3, 3.0).unwrap();
        assert!(matches!(
            view.insert_non_zero(0, 4, 4.0),
            Err(CrsError::CapacityExceeded { row: 0, .. })
        ));
    }
    // The owner may grow the row the view could not
    assert_eq!(matrix.insert_non_zero(0, 4, 4.0), Ok(true));
    assert_eq!(matrix.columns(0), &[3, 4]);

    let pattern = matrix.to_sparsity_pattern_view();
    assert_eq!(pattern.num_non_zeros(), 2);
    assert_eq!(pattern.consistency_check(), Ok(()));
}
