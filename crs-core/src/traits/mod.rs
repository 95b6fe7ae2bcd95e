//! Abstract interfaces shared by CRS handles
//!
//! Traits here are pure interfaces; the owning matrix and its views live in
//! the `crs` crate.

pub mod backend;
pub mod element;
pub mod matrix;

pub use backend::{BufferKind, MemorySpace, ResidencyTracker};
pub use element::{ColumnIndex, DataType, MatrixElement};
pub use matrix::{RowRef, SparseMatrix, SparsityPattern};
