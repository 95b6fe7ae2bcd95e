//! CRS - Dynamically growable compressed row storage sparse matrices
//!
//! This library provides a sparse matrix that keeps per-row slack, so
//! non-zeros can be inserted and removed row by row while the column and
//! entry buffers stay positionally paired and each row stays sorted.
//!
//! ## Architecture
//!
//! - **crs-core**: allocation-free building blocks (traits, sorted-set
//!   algorithms, shifting primitives, growth policy, validation)
//! - **crs**: the owning matrix, its views, per-row handles and residency
//!   bookkeeping
//!
//! ## Quick Start
//!
//! ```rust
//! use crs::{CrsMatrix, SparseMatrix, SparsityPattern};
//!
//! fn example() -> crs::Result<()> {
//!     let mut matrix = CrsMatrix::<f64>::new(3, 3, 0)?;
//!     matrix.insert_non_zeros(0, &[0, 2, 1], &[1.0, 3.0, 2.0])?;
//!     assert_eq!(matrix.columns(0), &[0, 1, 2]);
//!     assert_eq!(matrix.entries(0), &[1.0, 2.0, 3.0]);
//!
//!     // Duplicates are reported, not overwritten
//!     assert!(!matrix.insert_non_zero(0, 1, 9.0)?);
//!
//!     // Pre-size rows, then fill them through a view that cannot reallocate
//!     matrix.reserve_non_zeros_in_row(1, 2)?;
//!     let mut view = matrix.to_view();
//!     view.insert_non_zeros_sorted(1, &[0, 2], &[4.0, 5.0])?;
//!
//!     matrix.compress();
//!     assert_eq!(matrix.non_zero_capacity(), matrix.num_non_zeros());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Owning and borrowed handles**: growth is only possible through
//!   [`CrsMatrix`]; views narrow rights down to a structure-only pattern
//! - **Batched sorted insertion**: one shift per insertion point
//! - **Parallel rows** (`rayon`): disjoint per-row handles on views
//! - **Configuration** (`serde`): [`CrsConfig`] round-trips through JSON

pub use crs_core::{
    // Core traits
    ColumnIndex, DataType, MatrixElement, RowRef, SparseMatrix, SparsityPattern,
    // Growth and residency
    BufferKind, GrowthPolicy, MemorySpace, ResidencyTracker,
    // Error handling
    CrsError, ErrorCategory, Result,
};

mod callbacks;
pub mod config;
pub mod matrix;
pub mod residency;
pub mod row;
pub mod view;

pub use config::CrsConfig;
pub use matrix::CrsMatrix;
pub use residency::{BufferRecord, HostRegistry};
pub use row::{RowEntriesMut, RowMut};
pub use view::{CrsMatrixView, CrsMatrixViewConst, CrsMatrixViewSemiConst, SparsityPatternView};
