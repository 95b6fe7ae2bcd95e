//! Non-owning views of a [`CrsMatrix`](crate::CrsMatrix)
//!
//! Each view borrows the owner's buffers with fewer rights than the one it
//! was narrowed from:
//!
//! | view                        | structure       | entries   |
//! |-----------------------------|-----------------|-----------|
//! | [`CrsMatrixView`]           | within capacity | mutable   |
//! | [`CrsMatrixViewSemiConst`]  | read-only       | mutable   |
//! | [`CrsMatrixViewConst`]      | read-only       | read-only |
//! | [`SparsityPatternView`]     | read-only       | hidden    |
//!
//! Narrowing never copies. No view can reallocate, so an insertion that
//! needs more room than a row has fails with `CapacityExceeded`.

use crate::row::{RowEntriesMut, RowMut};
use crs_core::validation::{self, check_row};
use crs_core::{ColumnIndex, MatrixElement, Result, SparseMatrix, SparsityPattern};
use std::mem;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Structure and values of a matrix, bounded by existing row capacity
#[derive(Debug)]
pub struct CrsMatrixView<'a, T, C = u32> {
    offsets: &'a [usize],
    sizes: &'a mut [usize],
    columns: &'a mut [C],
    entries: &'a mut [T],
    num_columns: usize,
}

/// Values of a matrix; the structure is read-only
#[derive(Debug)]
pub struct CrsMatrixViewSemiConst<'a, T, C = u32> {
    offsets: &'a [usize],
    sizes: &'a [usize],
    columns: &'a [C],
    entries: &'a mut [T],
    num_columns: usize,
}

/// Read-only matrix
#[derive(Debug, Clone, Copy)]
pub struct CrsMatrixViewConst<'a, T, C = u32> {
    offsets: &'a [usize],
    sizes: &'a [usize],
    columns: &'a [C],
    entries: &'a [T],
    num_columns: usize,
}

/// Read-only non-zero pattern, without entries
#[derive(Debug, Clone, Copy)]
pub struct SparsityPatternView<'a, C = u32> {
    offsets: &'a [usize],
    sizes: &'a [usize],
    columns: &'a [C],
    num_columns: usize,
}

impl<'a, T: MatrixElement, C: ColumnIndex> CrsMatrixView<'a, T, C> {
    pub(crate) fn new(
        offsets: &'a [usize],
        sizes: &'a mut [usize],
        columns: &'a mut [C],
        entries: &'a mut [T],
        num_columns: usize,
    ) -> Self {
        Self {
            offsets,
            sizes,
            columns,
            entries,
            num_columns,
        }
    }

    /// Structural handle on `row`, limited to its capacity
    pub fn row_mut(&mut self, row: usize) -> Result<RowMut<'_, T, C>> {
        check_row(row, self.num_rows())?;
        let region = self.offsets[row]..self.offsets[row + 1];
        Ok(RowMut::new(
            row,
            self.num_columns,
            &mut self.columns[region.clone()],
            &mut self.entries[region],
            &mut self.sizes[row],
        ))
    }

    /// Value-only handle on `row`
    pub fn row_entries_mut(&mut self, row: usize) -> Result<RowEntriesMut<'_, T, C>> {
        check_row(row, self.num_rows())?;
        let live = self.row_range(row);
        Ok(RowEntriesMut::new(
            self.num_columns,
            &self.columns[live.clone()],
            &mut self.entries[live],
        ))
    }

    /// Structural handles on every row, in row order
    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = RowMut<'_, T, C>> {
        self.split_rows().into_iter()
    }

    /// Structural handles on every row, processed in parallel
    #[cfg(feature = "rayon")]
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = RowMut<'_, T, C>> {
        self.split_rows().into_par_iter()
    }

    fn split_rows(&mut self) -> Vec<RowMut<'_, T, C>> {
        let num_columns = self.num_columns;
        let mut columns: &mut [C] = &mut *self.columns;
        let mut entries: &mut [T] = &mut *self.entries;
        let mut rows = Vec::with_capacity(self.sizes.len());
        for (row, (size, bounds)) in self
            .sizes
            .iter_mut()
            .zip(self.offsets.windows(2))
            .enumerate()
        {
            let capacity = bounds[1] - bounds[0];
            let (row_columns, rest) = mem::take(&mut columns).split_at_mut(capacity);
            columns = rest;
            let (row_entries, rest) = mem::take(&mut entries).split_at_mut(capacity);
            entries = rest;
            rows.push(RowMut::new(row, num_columns, row_columns, row_entries, size));
        }
        rows
    }

    pub fn insert_non_zero(&mut self, row: usize, col: C, value: T) -> Result<bool> {
        self.row_mut(row)?.insert_non_zero(col, value)
    }

    pub fn insert_non_zeros(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        self.row_mut(row)?.insert_non_zeros(cols, values)
    }

    pub fn insert_non_zeros_sorted(
        &mut self,
        row: usize,
        cols: &[C],
        values: &[T],
    ) -> Result<usize> {
        self.row_mut(row)?.insert_non_zeros_sorted(cols, values)
    }

    pub fn remove_non_zero(&mut self, row: usize, col: C) -> Result<bool> {
        self.row_mut(row)?.remove_non_zero(col)
    }

    pub fn remove_non_zeros(&mut self, row: usize, cols: &[C]) -> Result<usize> {
        self.row_mut(row)?.remove_non_zeros(cols)
    }

    pub fn remove_non_zeros_sorted(&mut self, row: usize, cols: &[C]) -> Result<usize> {
        self.row_mut(row)?.remove_non_zeros_sorted(cols)
    }

    pub fn clear_row(&mut self, row: usize) -> Result<()> {
        self.row_mut(row)?.clear();
        Ok(())
    }

    /// Mutable entries of `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    pub fn entries_mut(&mut self, row: usize) -> &mut [T] {
        let live = self.row_range(row);
        &mut self.entries[live]
    }

    pub fn set_values(&mut self, row: usize, values: &[T]) -> Result<()> {
        self.row_entries_mut(row)?.set_values(values)
    }

    pub fn fill_values(&mut self, value: T) {
        for row in 0..self.num_rows() {
            self.entries_mut(row).fill(value);
        }
    }

    pub fn add_to_row(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        self.row_entries_mut(row)?.add_to_row(cols, values)
    }

    pub fn add_to_row_sorted(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        self.row_entries_mut(row)?.add_to_row_sorted(cols, values)
    }

    pub fn to_view_semi_const(&mut self) -> CrsMatrixViewSemiConst<'_, T, C> {
        CrsMatrixViewSemiConst::new(
            self.offsets,
            &*self.sizes,
            &*self.columns,
            &mut *self.entries,
            self.num_columns,
        )
    }

    pub fn to_view_const(&self) -> CrsMatrixViewConst<'_, T, C> {
        CrsMatrixViewConst::new(
            self.offsets,
            &*self.sizes,
            &*self.columns,
            &*self.entries,
            self.num_columns,
        )
    }

    pub fn to_sparsity_pattern_view(&self) -> SparsityPatternView<'_, C> {
        SparsityPatternView::new(self.offsets, &*self.sizes, &*self.columns, self.num_columns)
    }

    pub fn into_view_semi_const(self) -> CrsMatrixViewSemiConst<'a, T, C> {
        CrsMatrixViewSemiConst::new(
            self.offsets,
            self.sizes,
            self.columns,
            self.entries,
            self.num_columns,
        )
    }

    pub fn into_view_const(self) -> CrsMatrixViewConst<'a, T, C> {
        self.into_view_semi_const().into_view_const()
    }

    pub fn into_sparsity_pattern_view(self) -> SparsityPatternView<'a, C> {
        SparsityPatternView::new(self.offsets, self.sizes, self.columns, self.num_columns)
    }

    pub fn consistency_check(&self) -> Result<()> {
        validation::consistency_check(self)
    }
}

impl<'a, T: MatrixElement, C: ColumnIndex> CrsMatrixViewSemiConst<'a, T, C> {
    pub(crate) fn new(
        offsets: &'a [usize],
        sizes: &'a [usize],
        columns: &'a [C],
        entries: &'a mut [T],
        num_columns: usize,
    ) -> Self {
        Self {
            offsets,
            sizes,
            columns,
            entries,
            num_columns,
        }
    }

    /// Value-only handle on `row`
    pub fn row_entries_mut(&mut self, row: usize) -> Result<RowEntriesMut<'_, T, C>> {
        check_row(row, self.num_rows())?;
        let live = self.row_range(row);
        Ok(RowEntriesMut::new(
            self.num_columns,
            &self.columns[live.clone()],
            &mut self.entries[live],
        ))
    }

    /// Value-only handles on every row, in row order
    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = RowEntriesMut<'_, T, C>> {
        self.split_rows().into_iter()
    }

    /// Value-only handles on every row, processed in parallel
    ///
    /// Suited to accumulation where each row is owned by one task.
    #[cfg(feature = "rayon")]
    pub fn par_rows_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = RowEntriesMut<'_, T, C>> {
        self.split_rows().into_par_iter()
    }

    fn split_rows(&mut self) -> Vec<RowEntriesMut<'_, T, C>> {
        let num_columns = self.num_columns;
        let columns = self.columns;
        let mut entries: &mut [T] = &mut *self.entries;
        let mut rows = Vec::with_capacity(self.sizes.len());
        for (&size, bounds) in self.sizes.iter().zip(self.offsets.windows(2)) {
            let (row_entries, rest) = mem::take(&mut entries).split_at_mut(bounds[1] - bounds[0]);
            entries = rest;
            rows.push(RowEntriesMut::new(
                num_columns,
                &columns[bounds[0]..bounds[0] + size],
                &mut row_entries[..size],
            ));
        }
        rows
    }

    /// Mutable entries of `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    pub fn entries_mut(&mut self, row: usize) -> &mut [T] {
        let live = self.row_range(row);
        &mut self.entries[live]
    }

    pub fn set_values(&mut self, row: usize, values: &[T]) -> Result<()> {
        self.row_entries_mut(row)?.set_values(values)
    }

    pub fn fill_values(&mut self, value: T) {
        for row in 0..self.num_rows() {
            self.entries_mut(row).fill(value);
        }
    }

    pub fn add_to_row(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        self.row_entries_mut(row)?.add_to_row(cols, values)
    }

    pub fn add_to_row_sorted(&mut self, row: usize, cols: &[C], values: &[T]) -> Result<usize> {
        self.row_entries_mut(row)?.add_to_row_sorted(cols, values)
    }

    pub fn to_view_const(&self) -> CrsMatrixViewConst<'_, T, C> {
        CrsMatrixViewConst::new(
            self.offsets,
            self.sizes,
            self.columns,
            &*self.entries,
            self.num_columns,
        )
    }

    pub fn to_sparsity_pattern_view(&self) -> SparsityPatternView<'a, C> {
        SparsityPatternView::new(self.offsets, self.sizes, self.columns, self.num_columns)
    }

    pub fn into_view_const(self) -> CrsMatrixViewConst<'a, T, C> {
        CrsMatrixViewConst::new(
            self.offsets,
            self.sizes,
            self.columns,
            self.entries,
            self.num_columns,
        )
    }

    pub fn consistency_check(&self) -> Result<()> {
        validation::consistency_check(self)
    }
}

impl<'a, T: MatrixElement, C: ColumnIndex> CrsMatrixViewConst<'a, T, C> {
    pub(crate) fn new(
        offsets: &'a [usize],
        sizes: &'a [usize],
        columns: &'a [C],
        entries: &'a [T],
        num_columns: usize,
    ) -> Self {
        Self {
            offsets,
            sizes,
            columns,
            entries,
            num_columns,
        }
    }

    pub fn to_sparsity_pattern_view(&self) -> SparsityPatternView<'a, C> {
        SparsityPatternView::new(self.offsets, self.sizes, self.columns, self.num_columns)
    }

    pub fn consistency_check(&self) -> Result<()> {
        validation::consistency_check(self)
    }
}

impl<'a, C: ColumnIndex> SparsityPatternView<'a, C> {
    pub(crate) fn new(
        offsets: &'a [usize],
        sizes: &'a [usize],
        columns: &'a [C],
        num_columns: usize,
    ) -> Self {
        Self {
            offsets,
            sizes,
            columns,
            num_columns,
        }
    }

    pub fn consistency_check(&self) -> Result<()> {
        validation::consistency_check(self)
    }
}

impl<'a, T: MatrixElement, C: ColumnIndex> From<CrsMatrixView<'a, T, C>>
    for CrsMatrixViewSemiConst<'a, T, C>
{
    fn from(view: CrsMatrixView<'a, T, C>) -> Self {
        view.into_view_semi_const()
    }
}

impl<'a, T: MatrixElement, C: ColumnIndex> From<CrsMatrixView<'a, T, C>>
    for CrsMatrixViewConst<'a, T, C>
{
    fn from(view: CrsMatrixView<'a, T, C>) -> Self {
        view.into_view_const()
    }
}

impl<'a, T: MatrixElement, C: ColumnIndex> From<CrsMatrixViewSemiConst<'a, T, C>>
    for CrsMatrixViewConst<'a, T, C>
{
    fn from(view: CrsMatrixViewSemiConst<'a, T, C>) -> Self {
        view.into_view_const()
    }
}

impl<'a, T: MatrixElement, C: ColumnIndex> From<CrsMatrixViewConst<'a, T, C>>
    for SparsityPatternView<'a, C>
{
    fn from(view: CrsMatrixViewConst<'a, T, C>) -> Self {
        view.to_sparsity_pattern_view()
    }
}

macro_rules! impl_matrix_traits {
    ($($view:ident),*) => {
        $(
            impl<T: MatrixElement, C: ColumnIndex> SparsityPattern for $view<'_, T, C> {
                type Column = C;

                fn offsets(&self) -> &[usize] {
                    self.offsets
                }

                fn sizes(&self) -> &[usize] {
                    &*self.sizes
                }

                fn column_buffer(&self) -> &[C] {
                    &*self.columns
                }

                fn num_columns(&self) -> usize {
                    self.num_columns
                }
            }

            impl<T: MatrixElement, C: ColumnIndex> SparseMatrix for $view<'_, T, C> {
                type Element = T;

                fn entry_buffer(&self) -> &[T] {
                    &*self.entries
                }
            }
        )*
    };
}

impl_matrix_traits!(CrsMatrixView, CrsMatrixViewSemiConst, CrsMatrixViewConst);

impl<C: ColumnIndex> SparsityPattern for SparsityPatternView<'_, C> {
    type Column = C;

    fn offsets(&self) -> &[usize] {
        self.offsets
    }

    fn sizes(&self) -> &[usize] {
        self.sizes
    }

    fn column_buffer(&self) -> &[C] {
        self.columns
    }

    fn num_columns(&self) -> usize {
        self.num_columns
    }
}
