//! Structural consistency checks
//!
//! These verify the storage invariants of a CRS matrix: offsets start at
//! zero and never decrease, each row's size fits its capacity, and each
//! row's columns are strictly ascending and in range.

use crate::traits::{ColumnIndex, SparsityPattern};
use crate::{sorted, CrsError, Result};

/// Validate an offsets array against the buffer it partitions
///
/// On failure the reported row is the first row whose bounds are wrong.
pub fn validate_offsets(offsets: &[usize], buffer_len: usize) -> Result<()> {
    match offsets.first() {
        None => return Err(CrsError::InconsistentStructure { row: 0 }),
        Some(&first) if first != 0 => return Err(CrsError::InconsistentStructure { row: 0 }),
        Some(_) => {}
    }

    if let Some(row) = offsets.windows(2).position(|w| w[0] > w[1]) {
        return Err(CrsError::InconsistentStructure { row });
    }

    let num_rows = offsets.len() - 1;
    if offsets[num_rows] != buffer_len {
        return Err(CrsError::InconsistentStructure {
            row: num_rows.saturating_sub(1),
        });
    }

    Ok(())
}

/// Validate that every row's size fits its capacity
pub fn validate_sizes(offsets: &[usize], sizes: &[usize]) -> Result<()> {
    if offsets.len() != sizes.len() + 1 {
        return Err(CrsError::InconsistentStructure { row: 0 });
    }

    match sizes
        .iter()
        .enumerate()
        .position(|(row, &size)| size > offsets[row + 1] - offsets[row])
    {
        Some(row) => Err(CrsError::InconsistentStructure { row }),
        None => Ok(()),
    }
}

/// Validate the live columns of one row
pub fn validate_row_columns<C: ColumnIndex>(
    columns: &[C],
    row: usize,
    num_columns: usize,
) -> Result<()> {
    if !sorted::is_sorted_unique(columns) {
        return Err(CrsError::InconsistentStructure { row });
    }
    // Sorted, so only the last column can be the largest.
    match columns.last() {
        Some(c) if c.index() >= num_columns => Err(CrsError::ColumnOutOfBounds {
            column: c.index(),
            num_columns,
        }),
        _ => Ok(()),
    }
}

/// Validate every storage invariant of a matrix or view
pub fn consistency_check<M: SparsityPattern + ?Sized>(matrix: &M) -> Result<()> {
    validate_offsets(matrix.offsets(), matrix.column_buffer().len())?;
    validate_sizes(matrix.offsets(), matrix.sizes())?;
    (0..matrix.num_rows())
        .try_for_each(|row| validate_row_columns(matrix.columns(row), row, matrix.num_columns()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_offsets() {
        assert_eq!(validate_offsets(&[0, 2, 2, 5], 5), Ok(()));
        assert_eq!(validate_offsets(&[0], 0), Ok(()));
        assert_eq!(
            validate_offsets(&[1, 2], 2),
            Err(CrsError::InconsistentStructure { row: 0 })
        );
        assert_eq!(
            validate_offsets(&[0, 3, 2], 2),
            Err(CrsError::InconsistentStructure { row: 1 })
        );
        assert_eq!(
            validate_offsets(&[0, 2, 4], 5),
            Err(CrsError::InconsistentStructure { row: 1 })
        );
        assert!(validate_offsets(&[], 0).is_err());
    }

    #[test]
    fn test_validate_sizes() {
        assert_eq!(validate_sizes(&[0, 2, 5], &[2, 0]), Ok(()));
        assert_eq!(
            validate_sizes(&[0, 2, 5], &[1, 4]),
            Err(CrsError::InconsistentStructure { row: 1 })
        );
        assert!(validate_sizes(&[0, 2], &[1, 1]).is_err());
    }

    #[test]
    fn test_validate_row_columns() {
        assert_eq!(validate_row_columns::<u32>(&[0, 2, 7], 3, 8), Ok(()));
        assert_eq!(
            validate_row_columns::<u32>(&[0, 2, 2], 3, 8),
            Err(CrsError::InconsistentStructure { row: 3 })
        );
        assert_eq!(
            validate_row_columns::<u32>(&[1, 9], 0, 8),
            Err(CrsError::ColumnOutOfBounds {
                column: 9,
                num_columns: 8
            })
        );
    }
}
