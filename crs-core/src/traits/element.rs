//! Entry and column index type constraints
//!
//! Both buffers of a CRS matrix are plain-old-data so the owner can hand
//! them to a residency tracker as raw bytes.

use bytemuck::Pod;
use core::fmt::Debug;
use core::ops::AddAssign;

/// Data types that can be stored as matrix entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    F32 = 0,
    F64 = 1,
    I32 = 2,
    I64 = 3,
    U32 = 4,
    U64 = 5,
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U32 => write!(f, "u32"),
            DataType::U64 => write!(f, "u64"),
        }
    }
}

impl DataType {
    /// Get the size in bytes for this data type
    pub const fn size_bytes(&self) -> usize {
        match self {
            DataType::F32 | DataType::I32 | DataType::U32 => 4,
            DataType::F64 | DataType::I64 | DataType::U64 => 8,
        }
    }
}

/// Trait for types that can be stored as matrix entries
///
/// Entries must be:
/// - Pod: copied bitwise and viewable as bytes for residency moves
/// - Default: used to fill slack that readers never observe
/// - AddAssign: accumulated in place by `add_to_row`
pub trait MatrixElement: Pod + Default + PartialEq + Debug + Send + Sync + AddAssign {
    /// Get the [`DataType`] tag for this element type
    fn data_type() -> DataType;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }
}

macro_rules! impl_matrix_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl MatrixElement for $ty {
                fn data_type() -> DataType {
                    DataType::$tag
                }
            }
        )*
    };
}

impl_matrix_element!(
    f32 => F32,
    f64 => F64,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
);

/// Trait for the unsigned integers used to enumerate columns
pub trait ColumnIndex: Pod + Default + Ord + Debug + Send + Sync {
    /// Largest column index representable by this type
    const MAX_INDEX: usize;

    /// Widen to `usize`
    fn index(self) -> usize;

    /// Narrow from `usize`, `None` if the value does not fit
    fn from_index(index: usize) -> Option<Self>;
}

macro_rules! impl_column_index {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ColumnIndex for $ty {
                const MAX_INDEX: usize = if (<$ty>::MAX as u128) > (usize::MAX as u128) {
                    usize::MAX
                } else {
                    <$ty>::MAX as usize
                };

                #[inline]
                fn index(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_index(index: usize) -> Option<Self> {
                    <$ty>::try_from(index).ok()
                }
            }
        )*
    };
}

impl_column_index!(u16, u32, u64, usize);
