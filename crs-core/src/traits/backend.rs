//! Residency collaborator interface
//!
//! The engine never decides where its buffers live. It only reports buffer
//! lifetimes and hands raw bytes to a tracker at the synchronization points
//! the owner exposes. Buffers are identified by a logical name that exists
//! purely for bookkeeping.

/// Execution context a buffer can be resident in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemorySpace {
    Host,
    Accelerator,
}

/// The four buffers backing a CRS matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Offsets,
    Sizes,
    Columns,
    Entries,
}

impl BufferKind {
    /// Release order used by owners: entries first, index buffers last
    pub const RELEASE_ORDER: [BufferKind; 4] = [
        BufferKind::Entries,
        BufferKind::Columns,
        BufferKind::Sizes,
        BufferKind::Offsets,
    ];

    /// Suffix appended to a matrix name to form the buffer's logical name
    pub const fn suffix(&self) -> &'static str {
        match self {
            BufferKind::Offsets => "/offsets",
            BufferKind::Sizes => "/sizes",
            BufferKind::Columns => "/columns",
            BufferKind::Entries => "/entries",
        }
    }
}

/// Trait for trackers that mirror buffer residency and data motion
///
/// Implementations may allocate device memory, copy bytes, or only record
/// bookkeeping. Correctness of the matrix never depends on them.
pub trait ResidencyTracker {
    /// A buffer named `name` now needs room for `bytes` bytes
    fn reserve(&mut self, name: &str, bytes: usize);

    /// The live length of buffer `name` changed to `bytes` bytes
    fn resize(&mut self, name: &str, bytes: usize);

    /// Make the contents of buffer `name` available in `space`
    fn move_to(&mut self, name: &str, data: &[u8], space: MemorySpace);

    /// Buffer `name` is released
    fn free(&mut self, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_order_starts_with_entries() {
        assert_eq!(BufferKind::RELEASE_ORDER[0], BufferKind::Entries);
        assert_eq!(BufferKind::RELEASE_ORDER[3], BufferKind::Offsets);
        assert_eq!(BufferKind::Columns.suffix(), "/columns");
    }
}
