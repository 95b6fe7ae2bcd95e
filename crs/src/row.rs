//! Per-row handles that never reallocate
//!
//! [`RowMut`] may change a row's structure within the capacity the row
//! already has; [`RowEntriesMut`] may only change values. Handles for
//! distinct rows borrow disjoint memory, so they can be used from
//! different threads at once.

use crate::callbacks::{self, RowStore};
use crs_core::sorted;
use crs_core::validation::{check_columns, check_paired};
use crs_core::{ColumnIndex, CrsError, MatrixElement, Result, RowRef};

/// Structural access to one row, bounded by its current capacity
#[derive(Debug)]
pub struct RowMut<'a, T, C = u32> {
    row: usize,
    num_columns: usize,
    columns: &'a mut [C],
    entries: &'a mut [T],
    size: &'a mut usize,
}

impl<'a, T: MatrixElement, C: ColumnIndex> RowMut<'a, T, C> {
    /// `columns` and `entries` span the row's whole capacity region.
    pub(crate) fn new(
        row: usize,
        num_columns: usize,
        columns: &'a mut [C],
        entries: &'a mut [T],
        size: &'a mut usize,
    ) -> Self {
        debug_assert_eq!(columns.len(), entries.len());
        debug_assert!(*size <= columns.len());
        Self {
            row,
            num_columns,
            columns,
            entries,
            size,
        }
    }

    /// Index of the row this handle addresses
    pub fn row(&self) -> usize {
        self.row
    }

    /// Number of non-zeros in the row
    pub fn len(&self) -> usize {
        *self.size
    }

    /// True if the row holds no non-zero
    pub fn is_empty(&self) -> bool {
        *self.size == 0
    }

    /// Room the row has before an insertion would fail
    pub fn capacity(&self) -> usize {
        self.columns.len()
    }

    /// Column indices of the row
    pub fn columns(&self) -> &[C] {
        &self.columns[..*self.size]
    }

    /// Entries of the row
    pub fn entries(&self) -> &[T] {
        &self.entries[..*self.size]
    }

    /// Mutable entries of the row
    pub fn entries_mut(&mut self) -> &mut [T] {
        &mut self.entries[..*self.size]
    }

    /// Paired view of the row
    pub fn as_row_ref(&self) -> RowRef<'_, T, C> {
        RowRef::new(self.columns(), self.entries())
    }

    /// Narrow to value-only access
    pub fn as_entries_mut(&mut self) -> RowEntriesMut<'_, T, C> {
        let size = *self.size;
        RowEntriesMut::new(
            self.num_columns,
            &self.columns[..size],
            &mut self.entries[..size],
        )
    }

    /// Insert `(col, value)`; `Ok(false)` if `col` is already present
    pub fn insert_non_zero(&mut self, col: C, value: T) -> Result<bool> {
        callbacks::insert_non_zero(self, col, value)
    }

    /// Insert a batch of pairs in any order; returns how many were new
    pub fn insert_non_zeros(&mut self, cols: &[C], values: &[T]) -> Result<usize> {
        callbacks::insert_non_zeros(self, cols, values)
    }

    /// Insert a batch of pairs whose columns are ascending
    pub fn insert_non_zeros_sorted(&mut self, cols: &[C], values: &[T]) -> Result<usize> {
        callbacks::insert_non_zeros_sorted(self, cols, values)
    }

    /// Remove `col`; `Ok(false)` if it was not present
    pub fn remove_non_zero(&mut self, col: C) -> Result<bool> {
        callbacks::remove_non_zero(self, col)
    }

    /// Remove columns given in any order; returns how many were present
    pub fn remove_non_zeros(&mut self, cols: &[C]) -> Result<usize> {
        callbacks::remove_non_zeros(self, cols)
    }

    /// Remove ascending columns; returns how many were present
    pub fn remove_non_zeros_sorted(&mut self, cols: &[C]) -> Result<usize> {
        callbacks::remove_non_zeros_sorted(self, cols)
    }

    /// Drop every non-zero, keeping the capacity
    pub fn clear(&mut self) {
        *self.size = 0;
    }
}

impl<T: MatrixElement, C: ColumnIndex> RowStore for RowMut<'_, T, C> {
    type Element = T;
    type Column = C;

    fn size(&self) -> usize {
        *self.size
    }

    fn capacity(&self) -> usize {
        self.columns.len()
    }

    fn num_columns(&self) -> usize {
        self.num_columns
    }

    fn parts_mut(&mut self) -> (&mut [C], &mut [T]) {
        (&mut *self.columns, &mut *self.entries)
    }

    fn grow(&mut self, required: usize) -> Result<()> {
        Err(CrsError::CapacityExceeded {
            row: self.row,
            required,
            capacity: self.columns.len(),
        })
    }

    fn set_size(&mut self, size: usize) {
        *self.size = size;
    }
}

/// Value-only access to one row
#[derive(Debug)]
pub struct RowEntriesMut<'a, T, C = u32> {
    num_columns: usize,
    columns: &'a [C],
    entries: &'a mut [T],
}

impl<'a, T: MatrixElement, C: ColumnIndex> RowEntriesMut<'a, T, C> {
    /// `columns` and `entries` cover exactly the live part of the row.
    pub(crate) fn new(num_columns: usize, columns: &'a [C], entries: &'a mut [T]) -> Self {
        debug_assert_eq!(columns.len(), entries.len());
        Self {
            num_columns,
            columns,
            entries,
        }
    }

    /// Number of non-zeros in the row
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if the row holds no non-zero
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column indices of the row
    pub fn columns(&self) -> &[C] {
        self.columns
    }

    /// Entries of the row
    pub fn entries(&self) -> &[T] {
        &*self.entries
    }

    /// Mutable entries of the row
    pub fn entries_mut(&mut self) -> &mut [T] {
        &mut *self.entries
    }

    /// Overwrite the entries positionally
    ///
    /// `values` must hold one value per non-zero, ordered like the columns.
    pub fn set_values(&mut self, values: &[T]) -> Result<()> {
        check_paired(self.entries.len(), values.len())?;
        self.entries.copy_from_slice(values);
        Ok(())
    }

    /// Set every entry of the row to `value`
    pub fn fill(&mut self, value: T) {
        self.entries.fill(value);
    }

    /// Add `values` into the entries at `cols`, given in any order
    ///
    /// Columns not present in the row are skipped. Returns how many values
    /// were accumulated.
    pub fn add_to_row(&mut self, cols: &[C], values: &[T]) -> Result<usize> {
        check_paired(cols.len(), values.len())?;
        check_columns(cols, self.num_columns)?;

        let size = self.columns.len();
        let mut matched = 0;
        for (col, &value) in cols.iter().zip(values) {
            let pos = sorted::find(self.columns, size, col);
            if pos < size && self.columns[pos] == *col {
                self.entries[pos] += value;
                matched += 1;
            }
        }
        Ok(matched)
    }

    /// Add `values` into the entries at the ascending `cols`
    ///
    /// Each lookup resumes where the previous one stopped. Columns not
    /// present in the row are skipped.
    pub fn add_to_row_sorted(&mut self, cols: &[C], values: &[T]) -> Result<usize> {
        check_paired(cols.len(), values.len())?;
        if !sorted::is_sorted(cols) {
            return Err(CrsError::UnsortedInput);
        }
        check_columns(cols, self.num_columns)?;

        let size = self.columns.len();
        let mut cursor = 0;
        let mut matched = 0;
        for (col, &value) in cols.iter().zip(values) {
            let pos = cursor + sorted::find(&self.columns[cursor..], size - cursor, col);
            if pos < size && self.columns[pos] == *col {
                self.entries[pos] += value;
                matched += 1;
            }
            cursor = pos;
        }
        Ok(matched)
    }
}
