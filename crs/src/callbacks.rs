//! Engine side of the sorted-set protocol
//!
//! The sorted-set algorithms in `crs_core::sorted` only ever touch a row's
//! columns. The callbacks here replay every move on the row's entries so
//! both buffers stay positionally paired. Rows are reached through
//! [`RowStore`], which is where the owning matrix and the non-owning
//! handles differ: only the owner can grow a row.

use crs_core::array;
use crs_core::sorted::{self, InsertCallbacks, RemoveCallbacks};
use crs_core::validation::{check_columns, check_paired};
use crs_core::{ColumnIndex, CrsError, MatrixElement, Result};

/// One row's storage as seen by structural mutations
pub(crate) trait RowStore {
    type Element: MatrixElement;
    type Column: ColumnIndex;

    /// Live entries in the row
    fn size(&self) -> usize;

    fn capacity(&self) -> usize;

    fn num_columns(&self) -> usize;

    /// Columns and entries of the row's whole capacity region
    fn parts_mut(&mut self) -> (&mut [Self::Column], &mut [Self::Element]);

    /// Make room for at least `required` entries or fail untouched
    fn grow(&mut self, required: usize) -> Result<()>;

    fn set_size(&mut self, size: usize);
}

/// Insertion callbacks bound to one row and one batch of values
pub(crate) struct EntryCallbacks<'s, S: RowStore> {
    store: &'s mut S,
    values: &'s [S::Element],
}

impl<'s, S: RowStore> EntryCallbacks<'s, S> {
    pub(crate) fn new(store: &'s mut S, values: &'s [S::Element]) -> Self {
        Self { store, values }
    }

    fn entries(&mut self) -> &mut [S::Element] {
        self.store.parts_mut().1
    }
}

impl<S: RowStore> InsertCallbacks for EntryCallbacks<'_, S> {
    type Value = S::Column;

    fn increment_size(&mut self, current: usize, n_to_add: usize) -> Result<()> {
        let required = current + n_to_add;
        if required > self.store.capacity() {
            self.store.grow(required)?;
        }
        Ok(())
    }

    fn set_storage(&mut self) -> &mut [S::Column] {
        self.store.parts_mut().0
    }

    fn insert(&mut self, pos: usize) {
        let size = self.store.size();
        let value = self.values[0];
        array::insert_at(self.entries(), size, pos, value);
    }

    fn set(&mut self, pos: usize, source: usize) {
        let value = self.values[source];
        self.entries()[pos] = value;
    }

    fn insert_batch(&mut self, n_left: usize, source: usize, pos: usize, prev_pos: usize) {
        let value = self.values[source];
        let entries = self.entries();
        array::shift_up(entries, pos..prev_pos, n_left);
        entries[pos + n_left - 1] = value;
    }
}

/// Removal callbacks bound to one row's entries
pub(crate) struct EntryRemoval<'a, T> {
    entries: &'a mut [T],
    size: usize,
}

impl<'a, T> EntryRemoval<'a, T> {
    pub(crate) fn new(entries: &'a mut [T], size: usize) -> Self {
        Self { entries, size }
    }
}

impl<T: Copy> RemoveCallbacks for EntryRemoval<'_, T> {
    fn remove(&mut self, pos: usize) {
        array::erase_at(self.entries, self.size, pos);
    }

    fn remove_batch(&mut self, n_removed: usize, cur_pos: usize, next_pos: usize) {
        array::shift_down(self.entries, cur_pos + 1..next_pos, n_removed);
    }
}

fn check_column<C: ColumnIndex>(col: C, num_columns: usize) -> Result<()> {
    if col.index() >= num_columns {
        return Err(CrsError::ColumnOutOfBounds {
            column: col.index(),
            num_columns,
        });
    }
    Ok(())
}

pub(crate) fn insert_non_zero<S: RowStore>(
    store: &mut S,
    col: S::Column,
    value: S::Element,
) -> Result<bool> {
    check_column(col, store.num_columns())?;
    let size = store.size();
    let values = [value];
    let inserted = sorted::insert(&mut EntryCallbacks::new(&mut *store, &values), size, col)?;
    if inserted {
        store.set_size(size + 1);
    }
    Ok(inserted)
}

pub(crate) fn insert_non_zeros_sorted<S: RowStore>(
    store: &mut S,
    cols: &[S::Column],
    values: &[S::Element],
) -> Result<usize> {
    check_paired(cols.len(), values.len())?;
    check_columns(cols, store.num_columns())?;
    let size = store.size();
    let inserted = sorted::insert_sorted(&mut EntryCallbacks::new(&mut *store, values), size, cols)?;
    store.set_size(size + inserted);
    Ok(inserted)
}

pub(crate) fn insert_non_zeros<S: RowStore>(
    store: &mut S,
    cols: &[S::Column],
    values: &[S::Element],
) -> Result<usize> {
    check_paired(cols.len(), values.len())?;
    check_columns(cols, store.num_columns())?;
    let mut cols = cols.to_vec();
    let mut values = values.to_vec();
    sorted::dual_sort(&mut cols, &mut values);
    insert_non_zeros_sorted(store, &cols, &values)
}

pub(crate) fn remove_non_zero<S: RowStore>(store: &mut S, col: S::Column) -> Result<bool> {
    check_column(col, store.num_columns())?;
    let size = store.size();
    let (columns, entries) = store.parts_mut();
    let removed = sorted::remove(columns, size, &col, &mut EntryRemoval::new(entries, size));
    if removed {
        store.set_size(size - 1);
    }
    Ok(removed)
}

pub(crate) fn remove_non_zeros_sorted<S: RowStore>(
    store: &mut S,
    cols: &[S::Column],
) -> Result<usize> {
    check_columns(cols, store.num_columns())?;
    let size = store.size();
    let (columns, entries) = store.parts_mut();
    let removed = sorted::remove_sorted(columns, size, cols, &mut EntryRemoval::new(entries, size))?;
    store.set_size(size - removed);
    Ok(removed)
}

pub(crate) fn remove_non_zeros<S: RowStore>(store: &mut S, cols: &[S::Column]) -> Result<usize> {
    check_columns(cols, store.num_columns())?;
    let cols = sorted::sorted_copy(cols);
    remove_non_zeros_sorted(store, &cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A row backed by plain vectors that grows by exactly what it needs.
    struct VecRow {
        columns: Vec<u32>,
        entries: Vec<f64>,
        size: usize,
        can_grow: bool,
        grown_to: Vec<usize>,
    }

    impl VecRow {
        fn new(capacity: usize, can_grow: bool) -> Self {
            Self {
                columns: vec![0; capacity],
                entries: vec![0.0; capacity],
                size: 0,
                can_grow,
                grown_to: Vec::new(),
            }
        }

        fn live(&self) -> (&[u32], &[f64]) {
            (&self.columns[..self.size], &self.entries[..self.size])
        }
    }

    impl RowStore for VecRow {
        type Element = f64;
        type Column = u32;

        fn size(&self) -> usize {
            self.size
        }

        fn capacity(&self) -> usize {
            self.columns.len()
        }

        fn num_columns(&self) -> usize {
            10
        }

        fn parts_mut(&mut self) -> (&mut [u32], &mut [f64]) {
            (&mut self.columns, &mut self.entries)
        }

        fn grow(&mut self, required: usize) -> Result<()> {
            if !self.can_grow {
                return Err(CrsError::CapacityExceeded {
                    row: 0,
                    required,
                    capacity: self.columns.len(),
                });
            }
            self.columns.resize(required, 0);
            self.entries.resize(required, 0.0);
            self.grown_to.push(required);
            Ok(())
        }

        fn set_size(&mut self, size: usize) {
            self.size = size;
        }
    }

    #[test]
    fn test_unsorted_batch_pairs_entries() {
        let mut row = VecRow::new(0, true);
        let inserted = insert_non_zeros(&mut row, &[0, 2, 1], &[1.0, 3.0, 2.0]).unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(row.live(), (&[0, 1, 2][..], &[1.0, 2.0, 3.0][..]));
        // One growth for the whole batch
        assert_eq!(row.grown_to, vec![3]);
    }

    #[test]
    fn test_single_insert_and_remove() {
        let mut row = VecRow::new(4, false);
        assert_eq!(insert_non_zero(&mut row, 5, 50.0), Ok(true));
        assert_eq!(insert_non_zero(&mut row, 1, 10.0), Ok(true));
        assert_eq!(insert_non_zero(&mut row, 5, 99.0), Ok(false));
        assert_eq!(row.live(), (&[1, 5][..], &[10.0, 50.0][..]));

        assert_eq!(remove_non_zero(&mut row, 1), Ok(true));
        assert_eq!(remove_non_zero(&mut row, 1), Ok(false));
        assert_eq!(row.live(), (&[5][..], &[50.0][..]));
    }

    #[test]
    fn test_batch_remove() {
        let mut row = VecRow::new(8, false);
        insert_non_zeros_sorted(&mut row, &[0, 1, 2, 3, 4], &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(remove_non_zeros(&mut row, &[4, 0, 9, 2]), Ok(3));
        assert_eq!(row.live(), (&[1, 3][..], &[1.0, 3.0][..]));
    }

    #[test]
    fn test_contract_violations_leave_row_untouched() {
        let mut row = VecRow::new(2, false);
        insert_non_zero(&mut row, 3, 3.0).unwrap();

        assert_eq!(
            insert_non_zero(&mut row, 10, 1.0),
            Err(CrsError::ColumnOutOfBounds {
                column: 10,
                num_columns: 10
            })
        );
        assert_eq!(
            insert_non_zeros(&mut row, &[1, 2], &[1.0]),
            Err(CrsError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            insert_non_zeros_sorted(&mut row, &[2, 1], &[2.0, 1.0]),
            Err(CrsError::UnsortedInput)
        );
        assert!(matches!(
            insert_non_zeros(&mut row, &[1, 2], &[1.0, 2.0]),
            Err(CrsError::CapacityExceeded { required: 3, .. })
        ));
        assert_eq!(row.live(), (&[3][..], &[3.0][..]));
    }
}
