#![no_std]

//! CRS Core - Compressed Row Storage building blocks
//!
//! This crate provides the allocation-free pieces a compressed row storage
//! engine is assembled from: read-only access traits, element and column
//! type constraints, slice shifting primitives, the callback-driven sorted
//! set algorithms, the row growth policy and structural validation.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod array;
pub mod capacity;
pub mod error;
pub mod sorted;
pub mod traits;
pub mod validation;

pub use capacity::GrowthPolicy;
pub use error::*;
pub use sorted::{InsertCallbacks, RemoveCallbacks};
pub use traits::*;
pub use validation::consistency_check;
