//! Error types for CRS operations

/// Errors that can occur during CRS operations
///
/// Mutating operations raise these before any buffer is touched, so a
/// rejected operation never leaves a partially mutated matrix behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsError {
    /// Row index outside `[0, num_rows)`
    RowOutOfBounds { row: usize, num_rows: usize },
    /// Column index outside `[0, num_columns)`
    ColumnOutOfBounds { column: usize, num_columns: usize },
    /// A handle without reallocation authority needed more room in a row
    CapacityExceeded {
        row: usize,
        required: usize,
        capacity: usize,
    },
    /// Paired slices (columns and values) of different lengths
    LengthMismatch { expected: usize, actual: usize },
    /// Input to a sorted entry point was not in ascending order
    UnsortedInput,
    /// The column count cannot be represented by the column index type
    ColumnTypeOverflow { num_columns: usize },
    /// Offsets, sizes or row columns violate the storage invariants
    InconsistentStructure { row: usize },
}

/// Broad classification of a [`CrsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller broke a precondition (bad index, bad slice lengths, unsorted input)
    ContractViolation,
    /// Operation needed storage growth the handle is not allowed to perform
    Capacity,
    /// Stored structure failed a consistency check
    Structure,
}

impl CrsError {
    /// Classify this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            CrsError::RowOutOfBounds { .. }
            | CrsError::ColumnOutOfBounds { .. }
            | CrsError::LengthMismatch { .. }
            | CrsError::UnsortedInput
            | CrsError::ColumnTypeOverflow { .. } => ErrorCategory::ContractViolation,
            CrsError::CapacityExceeded { .. } => ErrorCategory::Capacity,
            CrsError::InconsistentStructure { .. } => ErrorCategory::Structure,
        }
    }
}

impl core::fmt::Display for CrsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CrsError::RowOutOfBounds { row, num_rows } => {
                write!(f, "row {row} is out of bounds for a matrix with {num_rows} rows")
            }
            CrsError::ColumnOutOfBounds {
                column,
                num_columns,
            } => write!(
                f,
                "column {column} is out of bounds for a matrix with {num_columns} columns"
            ),
            CrsError::CapacityExceeded {
                row,
                required,
                capacity,
            } => write!(
                f,
                "row {row} needs capacity {required} but only has {capacity} and this handle cannot reallocate"
            ),
            CrsError::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
            CrsError::UnsortedInput => write!(f, "input must be in ascending column order"),
            CrsError::ColumnTypeOverflow { num_columns } => write!(
                f,
                "column index type cannot hold the column range [0, {num_columns})"
            ),
            CrsError::InconsistentStructure { row } => {
                write!(f, "inconsistent storage structure at row {row}")
            }
        }
    }
}

/// Result type for CRS operations
pub type Result<T> = core::result::Result<T, CrsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            CrsError::RowOutOfBounds { row: 3, num_rows: 2 }.category(),
            ErrorCategory::ContractViolation
        );
        assert_eq!(
            CrsError::CapacityExceeded {
                row: 0,
                required: 4,
                capacity: 2
            }
            .category(),
            ErrorCategory::Capacity
        );
        assert_eq!(
            CrsError::InconsistentStructure { row: 1 }.category(),
            ErrorCategory::Structure
        );
    }
}
