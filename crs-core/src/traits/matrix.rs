//! Read-only access traits shared by every CRS handle
//!
//! An implementor only exposes its raw index buffers; row boundaries,
//! counts and lookups are all derived here so the owner and every view
//! agree on them.

use super::element::{ColumnIndex, MatrixElement};
use crate::sorted;
use core::ops::Range;

/// Structure-only access to a CRS matrix
///
/// `offsets()` has `num_rows() + 1` entries and `sizes()` has `num_rows()`.
/// Row `r` occupies `offsets[r]..offsets[r + 1]` of the column buffer, of
/// which the first `sizes[r]` slots are live.
pub trait SparsityPattern {
    /// The integer type used to enumerate columns
    type Column: ColumnIndex;

    /// Row start positions, `num_rows() + 1` long
    fn offsets(&self) -> &[usize];

    /// Used length of each row
    fn sizes(&self) -> &[usize];

    /// The whole column buffer, slack included
    fn column_buffer(&self) -> &[Self::Column];

    /// Number of columns in the matrix
    fn num_columns(&self) -> usize;

    /// Number of rows in the matrix
    fn num_rows(&self) -> usize {
        self.sizes().len()
    }

    /// Total number of stored non-zeros
    fn num_non_zeros(&self) -> usize {
        self.sizes().iter().sum()
    }

    /// Number of stored non-zeros in `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    fn num_non_zeros_in_row(&self, row: usize) -> usize {
        assert_row(row, self.num_rows());
        self.sizes()[row]
    }

    /// Total capacity of the column/entry buffers
    fn non_zero_capacity(&self) -> usize {
        self.offsets().last().copied().unwrap_or(0)
    }

    /// Capacity of `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    fn row_capacity(&self, row: usize) -> usize {
        assert_row(row, self.num_rows());
        self.offsets()[row + 1] - self.offsets()[row]
    }

    /// True if no row holds a non-zero
    fn empty(&self) -> bool {
        self.num_non_zeros() == 0
    }

    /// True if `row` holds no non-zero
    fn empty_row(&self, row: usize) -> bool {
        self.num_non_zeros_in_row(row) == 0
    }

    /// True if `(row, col)` is not part of the structure
    fn empty_at(&self, row: usize, col: Self::Column) -> bool {
        !self.contains(row, col)
    }

    /// Live buffer positions of `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    fn row_range(&self, row: usize) -> Range<usize> {
        assert_row(row, self.num_rows());
        let start = self.offsets()[row];
        start..start + self.sizes()[row]
    }

    /// Column indices of `row`, strictly ascending
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    fn columns(&self, row: usize) -> &[Self::Column] {
        let range = self.row_range(row);
        &self.column_buffer()[range]
    }

    /// Column indices of `row`, or `None` if the row does not exist
    fn get_columns(&self, row: usize) -> Option<&[Self::Column]> {
        (row < self.num_rows()).then(|| self.columns(row))
    }

    /// True if `(row, col)` is part of the structure
    fn contains(&self, row: usize, col: Self::Column) -> bool {
        let columns = self.columns(row);
        sorted::contains(columns, columns.len(), &col)
    }
}

/// Structure plus entry access to a CRS matrix
pub trait SparseMatrix: SparsityPattern {
    /// The type of the stored entries
    type Element: MatrixElement;

    /// The whole entry buffer, slack included
    fn entry_buffer(&self) -> &[Self::Element];

    /// Matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    /// Entries of `row`, paired positionally with [`SparsityPattern::columns`]
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    fn entries(&self, row: usize) -> &[Self::Element] {
        let range = self.row_range(row);
        &self.entry_buffer()[range]
    }

    /// Entries of `row`, or `None` if the row does not exist
    fn get_entries(&self, row: usize) -> Option<&[Self::Element]> {
        (row < self.num_rows()).then(|| self.entries(row))
    }

    /// The entry stored at `(row, col)`
    ///
    /// Returns `None` if the position is not part of the structure or if
    /// `row` is out of bounds.
    fn get_element(&self, row: usize, col: Self::Column) -> Option<Self::Element> {
        let columns = self.get_columns(row)?;
        let pos = sorted::find(columns, columns.len(), &col);
        (pos < columns.len() && columns[pos] == col).then(|| self.entries(row)[pos])
    }

    /// Paired column/entry slices of `row`
    fn row(&self, row: usize) -> RowRef<'_, Self::Element, Self::Column> {
        RowRef {
            columns: self.columns(row),
            entries: self.entries(row),
        }
    }
}

/// Borrowed columns and entries of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRef<'a, T, C> {
    columns: &'a [C],
    entries: &'a [T],
}

impl<'a, T, C: Copy> RowRef<'a, T, C> {
    /// Pair two slices of equal length
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn new(columns: &'a [C], entries: &'a [T]) -> Self {
        assert_eq!(columns.len(), entries.len(), "row slices must be paired");
        Self { columns, entries }
    }

    /// Column indices of the row
    pub fn columns(&self) -> &'a [C] {
        self.columns
    }

    /// Entries of the row
    pub fn entries(&self) -> &'a [T] {
        self.entries
    }

    /// Number of non-zeros in the row
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if the row holds no non-zero
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(column, entry)` pairs in column order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (C, &'a T)> + 'a
    where
        C: 'a,
    {
        self.columns.iter().copied().zip(self.entries.iter())
    }
}

#[inline]
#[track_caller]
fn assert_row(row: usize, num_rows: usize) {
    assert!(
        row < num_rows,
        "tried to access row {row} of a matrix with {num_rows} rows"
    );
}
