//! In-process residency bookkeeping
//!
//! [`HostRegistry`] is a [`ResidencyTracker`] that keeps everything on the
//! host: it records which space each named buffer was last moved to, how
//! large it is and how often it moved, and keeps a byte mirror of the last
//! move. Useful for tests and for inspecting what an accelerator runtime
//! would have been asked to do.

use crs_core::{MemorySpace, ResidencyTracker};
use hashbrown::HashMap;

/// What the registry knows about one logical buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferRecord {
    pub space: MemorySpace,
    pub reserved_bytes: usize,
    pub live_bytes: usize,
    pub moves: usize,
    pub mirror: Vec<u8>,
}

impl Default for BufferRecord {
    fn default() -> Self {
        Self {
            space: MemorySpace::Host,
            reserved_bytes: 0,
            live_bytes: 0,
            moves: 0,
            mirror: Vec::new(),
        }
    }
}

/// Host-only [`ResidencyTracker`] keyed by logical buffer name
#[derive(Debug, Default)]
pub struct HostRegistry {
    records: HashMap<String, BufferRecord>,
    freed: Vec<String>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record of a live buffer
    pub fn get(&self, name: &str) -> Option<&BufferRecord> {
        self.records.get(name)
    }

    /// Number of live buffers
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names passed to `free`, oldest first
    pub fn freed(&self) -> &[String] {
        &self.freed
    }

    /// Total live bytes resident in `space`
    pub fn resident_bytes(&self, space: MemorySpace) -> usize {
        self.records
            .values()
            .filter(|record| record.space == space)
            .map(|record| record.live_bytes)
            .sum()
    }
}

impl ResidencyTracker for HostRegistry {
    fn reserve(&mut self, name: &str, bytes: usize) {
        let record = self.records.entry_ref(name).or_default();
        record.reserved_bytes = record.reserved_bytes.max(bytes);
    }

    fn resize(&mut self, name: &str, bytes: usize) {
        let record = self.records.entry_ref(name).or_default();
        record.live_bytes = bytes;
        record.reserved_bytes = record.reserved_bytes.max(bytes);
    }

    fn move_to(&mut self, name: &str, data: &[u8], space: MemorySpace) {
        let record = self.records.entry_ref(name).or_default();
        record.space = space;
        record.live_bytes = data.len();
        record.reserved_bytes = record.reserved_bytes.max(data.len());
        record.moves += 1;
        record.mirror.clear();
        record.mirror.extend_from_slice(data);
    }

    fn free(&mut self, name: &str) {
        if self.records.remove(name).is_some() {
            self.freed.push(name.to_owned());
        }
    }
}
