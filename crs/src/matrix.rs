//! The owning compressed row storage matrix
//!
//! [`CrsMatrix`] is the only handle allowed to reallocate the column and
//! entry buffers. Everything that might move row contents (row growth,
//! explicit capacity changes, compression, dimension resize) goes through
//! `&mut self`, so the borrow checker rejects any outstanding row slice or
//! view at that point.

use crate::callbacks::{self, RowStore};
use crate::config::CrsConfig;
use crate::row::RowEntriesMut;
use crate::view::{CrsMatrixView, CrsMatrixViewConst, CrsMatrixViewSemiConst, SparsityPatternView};
use crs_core::validation::{self, check_column_type, check_row};
use crs_core::{
    array, BufferKind, ColumnIndex, MatrixElement, MemorySpace, ResidencyTracker, Result,
    SparseMatrix, SparsityPattern,
};
use std::mem;
use tracing::debug;

/// A sparse matrix in compressed row storage with per-row slack
///
/// Row `r` owns the buffer positions `offsets[r]..offsets[r + 1]`, of which
/// the first `sizes[r]` are live. Slack slots keep stale values and are
/// never exposed through any accessor.
///
/// Row slices borrow the matrix, so a structural change that may grow the
/// buffers cannot happen while one is alive:
///
/// ```compile_fail
/// use crs::{CrsMatrix, SparseMatrix};
///
/// let mut matrix = CrsMatrix::<f64>::new(1, 4, 1).unwrap();
/// let entries = matrix.entries(0);
/// matrix.insert_non_zero(0, 3, 1.0).unwrap();
/// println!("{entries:?}");
/// ```
#[derive(Debug, Clone)]
pub struct CrsMatrix<T, C = u32> {
    // Field order is drop order: entries are released before the index buffers.
    entries: Vec<T>,
    columns: Vec<C>,
    sizes: Vec<usize>,
    offsets: Vec<usize>,
    num_columns: usize,
    config: CrsConfig,
}

impl<T: MatrixElement, C: ColumnIndex> CrsMatrix<T, C> {
    /// Create a matrix whose rows each start with `initial_row_capacity` slots
    ///
    /// The row capacity is clamped to `num_columns`.
    pub fn new(num_rows: usize, num_columns: usize, initial_row_capacity: usize) -> Result<Self> {
        Self::with_config(
            num_rows,
            num_columns,
            CrsConfig::default().with_initial_row_capacity(initial_row_capacity),
        )
    }

    /// Create a matrix using `config` for naming, growth and row capacity
    pub fn with_config(num_rows: usize, num_columns: usize, config: CrsConfig) -> Result<Self> {
        let mut matrix = Self {
            config,
            ..Self::default()
        };
        let initial_row_capacity = matrix.config.initial_row_capacity;
        matrix.resize(num_rows, num_columns, initial_row_capacity)?;
        Ok(matrix)
    }

    pub fn config(&self) -> &CrsConfig {
        &self.config
    }

    /// Logical name used for residency bookkeeping
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.name = name.into();
    }

    /// Move the contents out, leaving an empty matrix with the same config
    pub fn take(&mut self) -> Self {
        let empty = Self {
            config: self.config.clone(),
            ..Self::default()
        };
        mem::replace(self, empty)
    }

    /// Insert `(col, value)` into `row`, growing the row if needed
    ///
    /// Returns `Ok(false)` and leaves the stored value untouched if `col`
    /// is already present.
    pub fn insert_non_zero(&mut self, row: usize, col: C, value: T) -> Result<bool> {
        callbacks::insert_non_zero(&mut self.owned_row(row)?, col, value)
    }

    /// Insert pairs given in any order; returns how many were new
    ///
    /// Pairs are sorted by column as a unit first. If a column repeats
    /// within the batch, its first value is the one inserted.
    pub fn insert_non_zeros(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        callbacks::insert_non_zeros(&mut self.owned_row(row)?, cols, values)
    }

    /// Insert pairs whose columns are ascending; returns how many were new
    pub fn insert_non_zeros_sorted(
        &mut self,
        row: usize,
        cols: &[C],
        values: &[T],
    ) -> Result<usize> {
        callbacks::insert_non_zeros_sorted(&mut self.owned_row(row)?, cols, values)
    }

    /// Remove `col` from `row`; `Ok(false)` if it was not present
    pub fn remove_non_zero(&mut self, row: usize, col: C) -> Result<bool> {
        callbacks::remove_non_zero(&mut self.owned_row(row)?, col)
    }

    /// Remove columns given in any order; returns how many were present
    pub fn remove_non_zeros(&mut self, row: usize, cols: &[C]) -> Result<usize> {
        callbacks::remove_non_zeros(&mut self.owned_row(row)?, cols)
    }

    /// Remove ascending columns; returns how many were present
    pub fn remove_non_zeros_sorted(&mut self, row: usize, cols: &[C]) -> Result<usize> {
        callbacks::remove_non_zeros_sorted(&mut self.owned_row(row)?, cols)
    }

    /// Drop every non-zero of `row`, keeping its capacity
    pub fn clear_row(&mut self, row: usize) -> Result<()> {
        check_row(row, self.num_rows())?;
        self.sizes[row] = 0;
        Ok(())
    }

    /// Mutable entries of `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    pub fn entries_mut(&mut self, row: usize) -> &mut [T] {
        let range = self.row_range(row);
        &mut self.entries[range]
    }

    /// Value-only handle on `row`
    pub fn row_entries_mut(&mut self, row: usize) -> Result<RowEntriesMut<'_, T, C>> {
        check_row(row, self.num_rows())?;
        let range = self.row_range(row);
        Ok(RowEntriesMut::new(
            self.num_columns,
            &self.columns[range.clone()],
            &mut self.entries[range],
        ))
    }

    /// Overwrite the entries of `row` positionally
    pub fn set_values(&mut self, row: usize, values: &[T]) -> Result<()> {
        self.row_entries_mut(row)?.set_values(values)
    }

    /// Set every stored entry to `value`
    pub fn fill_values(&mut self, value: T) {
        for row in 0..self.num_rows() {
            self.entries_mut(row).fill(value);
        }
    }

    /// Accumulate `values` into the existing non-zeros of `row` at `cols`
    ///
    /// Columns may come in any order; those not present are skipped.
    /// Returns how many values were accumulated.
    pub fn add_to_row(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        self.row_entries_mut(row)?.add_to_row(cols, values)
    }

    /// Like [`add_to_row`](Self::add_to_row) for ascending `cols`
    pub fn add_to_row_sorted(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        self.row_entries_mut(row)?.add_to_row_sorted(cols, values)
    }

    /// Change the capacity of `row`, clamped to the number of columns
    ///
    /// Shrinking below the row's size truncates its trailing non-zeros.
    /// Later rows are shifted to make or close the room.
    pub fn set_row_capacity(&mut self, row: usize, capacity: usize) -> Result<()> {
        check_row(row, self.num_rows())?;
        self.apply_row_capacity(row, capacity.min(self.num_columns));
        Ok(())
    }

    /// Make sure `row` can hold at least `count` non-zeros
    pub fn reserve_non_zeros_in_row(&mut self, row: usize, count: usize) -> Result<()> {
        check_row(row, self.num_rows())?;
        let target = count.min(self.num_columns);
        if target > self.row_capacity(row) {
            self.apply_row_capacity(row, target);
        }
        Ok(())
    }

    /// Reserve buffer room for `total` non-zeros across the matrix
    ///
    /// No row capacity changes, but row growth up to that total will not
    /// reallocate the column and entry buffers.
    pub fn reserve_non_zeros(&mut self, total: usize) {
        let additional = total.saturating_sub(self.columns.len());
        self.columns.reserve(additional);
        self.entries.reserve(additional);
        debug!(total, reserved = self.reserved_non_zeros(), "reserved non-zeros");
    }

    /// Non-zeros the buffers can hold before reallocating
    pub fn reserved_non_zeros(&self) -> usize {
        self.columns.capacity().min(self.entries.capacity())
    }

    /// Remove the slack of every row
    ///
    /// Afterwards each row's capacity equals its size. Rows are moved down
    /// in place; nothing is allocated.
    pub fn compress(&mut self) {
        let num_rows = self.num_rows();
        let before = self.non_zero_capacity();
        let mut write = 0;
        for row in 0..num_rows {
            let start = self.offsets[row];
            let live = start..start + self.sizes[row];
            array::shift_down(&mut self.columns, live.clone(), start - write);
            array::shift_down(&mut self.entries, live, start - write);
            self.offsets[row] = write;
            write += self.sizes[row];
        }
        self.offsets[num_rows] = write;
        self.columns.truncate(write);
        self.entries.truncate(write);
        debug!(before, after = write, "compressed matrix");
    }

    /// Change the dimensions of the matrix
    ///
    /// New rows start empty with `min(initial_row_capacity, num_columns)`
    /// slots. Dropped rows release their storage. Existing rows keep their
    /// contents even if they hold columns at or past the new `num_columns`;
    /// clear such rows first with [`clear_row`](Self::clear_row) when
    /// shrinking the column count.
    pub fn resize(
        &mut self,
        num_rows: usize,
        num_columns: usize,
        initial_row_capacity: usize,
    ) -> Result<()> {
        check_column_type::<C>(num_columns)?;

        let old_rows = self.num_rows();
        if num_rows < old_rows {
            let end = self.offsets[num_rows];
            self.offsets.truncate(num_rows + 1);
            self.sizes.truncate(num_rows);
            self.columns.truncate(end);
            self.entries.truncate(end);
        } else if num_rows > old_rows {
            let capacity = initial_row_capacity.min(num_columns);
            let start = self.non_zero_capacity();
            let added = num_rows - old_rows;
            self.offsets.extend((1..=added).map(|i| start + i * capacity));
            self.sizes.resize(num_rows, 0);
            self.columns.resize(start + added * capacity, C::default());
            self.entries.resize(start + added * capacity, T::default());
        }

        debug!(
            old_rows,
            num_rows,
            old_columns = self.num_columns,
            num_columns,
            "resized matrix"
        );
        self.num_columns = num_columns;
        Ok(())
    }

    /// Structure and values, without growth
    pub fn to_view(&mut self) -> CrsMatrixView<'_, T, C> {
        CrsMatrixView::new(
            &self.offsets,
            &mut self.sizes,
            &mut self.columns,
            &mut self.entries,
            self.num_columns,
        )
    }

    /// Values only
    pub fn to_view_semi_const(&mut self) -> CrsMatrixViewSemiConst<'_, T, C> {
        CrsMatrixViewSemiConst::new(
            &self.offsets,
            &self.sizes,
            &self.columns,
            &mut self.entries,
            self.num_columns,
        )
    }

    /// Read-only
    pub fn to_view_const(&self) -> CrsMatrixViewConst<'_, T, C> {
        CrsMatrixViewConst::new(
            &self.offsets,
            &self.sizes,
            &self.columns,
            &self.entries,
            self.num_columns,
        )
    }

    /// Read-only structure
    pub fn to_sparsity_pattern_view(&self) -> SparsityPatternView<'_, C> {
        SparsityPatternView::new(&self.offsets, &self.sizes, &self.columns, self.num_columns)
    }

    /// Verify the storage invariants
    pub fn consistency_check(&self) -> Result<()> {
        validation::consistency_check(self)
    }

    /// Logical name of one of the four buffers
    pub fn buffer_name(&self, kind: BufferKind) -> String {
        format!("{}{}", self.config.name, kind.suffix())
    }

    /// Raw bytes of one of the four buffers, slack included
    pub fn buffer_bytes(&self, kind: BufferKind) -> &[u8] {
        match kind {
            BufferKind::Offsets => bytemuck::cast_slice(&self.offsets),
            BufferKind::Sizes => bytemuck::cast_slice(&self.sizes),
            BufferKind::Columns => bytemuck::cast_slice(&self.columns),
            BufferKind::Entries => bytemuck::cast_slice(&self.entries),
        }
    }

    fn reserved_bytes(&self, kind: BufferKind) -> usize {
        match kind {
            BufferKind::Offsets => self.offsets.capacity() * mem::size_of::<usize>(),
            BufferKind::Sizes => self.sizes.capacity() * mem::size_of::<usize>(),
            BufferKind::Columns => self.columns.capacity() * mem::size_of::<C>(),
            BufferKind::Entries => self.entries.capacity() * T::size_bytes(),
        }
    }

    /// Report the four buffers and their sizes to `tracker`
    pub fn register_buffers<R: ResidencyTracker + ?Sized>(&self, tracker: &mut R) {
        for &kind in BufferKind::RELEASE_ORDER.iter().rev() {
            let name = self.buffer_name(kind);
            tracker.reserve(&name, self.reserved_bytes(kind));
            tracker.resize(&name, self.buffer_bytes(kind).len());
        }
    }

    /// Make all four buffers available in `space`
    ///
    /// Call [`compress`](Self::compress) first to avoid moving slack.
    pub fn move_to<R: ResidencyTracker + ?Sized>(&self, space: MemorySpace, tracker: &mut R) {
        for &kind in BufferKind::RELEASE_ORDER.iter().rev() {
            let bytes = self.buffer_bytes(kind);
            tracker.move_to(&self.buffer_name(kind), bytes, space);
        }
        debug!(
            name = %self.config.name,
            ?space,
            non_zeros = self.num_non_zeros(),
            capacity = self.non_zero_capacity(),
            "moved matrix buffers"
        );
    }

    /// Tell `tracker` the buffers are gone, entries first
    pub fn release_buffers<R: ResidencyTracker + ?Sized>(&self, tracker: &mut R) {
        for kind in BufferKind::RELEASE_ORDER {
            tracker.free(&self.buffer_name(kind));
        }
    }

    fn owned_row(&mut self, row: usize) -> Result<OwnedRow<'_, T, C>> {
        check_row(row, self.num_rows())?;
        Ok(OwnedRow { matrix: self, row })
    }

    /// Set the capacity of `row` without clamping, moving later rows
    fn apply_row_capacity(&mut self, row: usize, capacity: usize) {
        let old = self.row_capacity(row);
        if capacity == old {
            return;
        }

        let num_rows = self.num_rows();
        if capacity > old {
            let delta = capacity - old;
            let len = self.columns.len();
            self.columns.resize(len + delta, C::default());
            self.entries.resize(len + delta, T::default());
            for later in (row + 1..num_rows).rev() {
                let start = self.offsets[later];
                let live = start..start + self.sizes[later];
                array::shift_up(&mut self.columns, live.clone(), delta);
                array::shift_up(&mut self.entries, live, delta);
            }
            for offset in &mut self.offsets[row + 1..] {
                *offset += delta;
            }
        } else {
            let delta = old - capacity;
            self.sizes[row] = self.sizes[row].min(capacity);
            for later in row + 1..num_rows {
                let start = self.offsets[later];
                let live = start..start + self.sizes[later];
                array::shift_down(&mut self.columns, live.clone(), delta);
                array::shift_down(&mut self.entries, live, delta);
            }
            for offset in &mut self.offsets[row + 1..] {
                *offset -= delta;
            }
            let len = self.columns.len() - delta;
            self.columns.truncate(len);
            self.entries.truncate(len);
        }

        debug!(row, old, capacity, "row capacity changed");
    }
}

impl<T, C> Default for CrsMatrix<T, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            columns: Vec::new(),
            sizes: Vec::new(),
            offsets: vec![0],
            num_columns: 0,
            config: CrsConfig::default(),
        }
    }
}

impl<T: MatrixElement, C: ColumnIndex> SparsityPattern for CrsMatrix<T, C> {
    type Column = C;

    fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    fn column_buffer(&self) -> &[C] {
        &self.columns
    }

    fn num_columns(&self) -> usize {
        self.num_columns
    }
}

impl<T: MatrixElement, C: ColumnIndex> SparseMatrix for CrsMatrix<T, C> {
    type Element = T;

    fn entry_buffer(&self) -> &[T] {
        &self.entries
    }
}

/// One row of the owner; the only row store allowed to grow
struct OwnedRow<'m, T, C> {
    matrix: &'m mut CrsMatrix<T, C>,
    row: usize,
}

impl<T: MatrixElement, C: ColumnIndex> RowStore for OwnedRow<'_, T, C> {
    type Element = T;
    type Column = C;

    fn size(&self) -> usize {
        self.matrix.sizes[self.row]
    }

    fn capacity(&self) -> usize {
        self.matrix.row_capacity(self.row)
    }

    fn num_columns(&self) -> usize {
        self.matrix.num_columns
    }

    fn parts_mut(&mut self) -> (&mut [C], &mut [T]) {
        let range = self.matrix.offsets[self.row]..self.matrix.offsets[self.row + 1];
        (
            &mut self.matrix.columns[range.clone()],
            &mut self.matrix.entries[range],
        )
    }

    fn grow(&mut self, required: usize) -> Result<()> {
        let capacity = self
            .matrix
            .config
            .growth
            .grown_capacity(required, self.matrix.num_columns);
        debug!(row = self.row, required, capacity, "growing row");
        self.matrix.apply_row_capacity(self.row, capacity);
        Ok(())
    }

    fn set_size(&mut self, size: usize) {
        self.matrix.sizes[self.row] = size;
    }
}
