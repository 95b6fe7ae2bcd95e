//! Validation utilities for CRS handles
//!
//! Pure checks with no side effects: argument bounds checks performed
//! before any mutation, and whole-structure consistency checks.

pub mod bounds;
pub mod structure;

pub use bounds::{check_column_type, check_columns, check_paired, check_row};
pub use structure::{consistency_check, validate_offsets, validate_row_columns, validate_sizes};
