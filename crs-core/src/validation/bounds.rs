//! Argument validation performed before any buffer mutation

use crate::traits::ColumnIndex;
use crate::{CrsError, Result};

/// Validate that `row` addresses an existing row
pub const fn check_row(row: usize, num_rows: usize) -> Result<()> {
    if row >= num_rows {
        return Err(CrsError::RowOutOfBounds { row, num_rows });
    }
    Ok(())
}

/// Validate that every column in `columns` is below `num_columns`
pub fn check_columns<C: ColumnIndex>(columns: &[C], num_columns: usize) -> Result<()> {
    match columns.iter().find(|c| c.index() >= num_columns) {
        Some(c) => Err(CrsError::ColumnOutOfBounds {
            column: c.index(),
            num_columns,
        }),
        None => Ok(()),
    }
}

/// Validate that a value slice pairs with a column slice
pub const fn check_paired(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(CrsError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Validate that `C` can enumerate the columns `[0, num_columns)`
pub fn check_column_type<C: ColumnIndex>(num_columns: usize) -> Result<()> {
    if num_columns > 0 && num_columns - 1 > C::MAX_INDEX {
        return Err(CrsError::ColumnTypeOverflow { num_columns });
    }
    Ok(())
}
