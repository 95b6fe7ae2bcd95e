//! Sorted-set insertion and removal over a slice, driven by callbacks
//!
//! A set is the first `size` elements of a storage slice, kept strictly
//! ascending. The algorithms here only know about that one slice. Every
//! structural change is reported through [`InsertCallbacks`] or
//! [`RemoveCallbacks`] so a caller can mirror it on a second, parallel
//! buffer without ever materializing (value, payload) pairs.
//!
//! Insertion protocol, in call order:
//!
//! 1. `increment_size(size, n)` once, before any slot is written. The
//!    callee may reallocate; storage is always re-fetched afterwards.
//! 2. For a single insert, `insert(pos)` after the value landed at `pos`.
//! 3. For a batch into an empty set, `set(pos, source)` per placed value.
//! 4. For a batch into a non-empty set, `insert_batch(n_left, source, pos,
//!    prev_pos)` per inserted value, largest first. The callee moves its
//!    `pos..prev_pos` block up by `n_left` in one shift and writes the
//!    payload for `source` at `pos + n_left - 1`.

use crate::array;
use crate::error::{CrsError, Result};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Callbacks invoked while inserting into a sorted set
pub trait InsertCallbacks {
    /// Element type of the set
    type Value: Ord + Copy;

    /// Up to `n_to_add` elements are about to be added to a set of `current`
    /// elements. Must make `set_storage()` at least `current + n_to_add`
    /// long or fail without touching anything.
    fn increment_size(&mut self, current: usize, n_to_add: usize) -> Result<()>;

    /// The storage backing the set
    fn set_storage(&mut self) -> &mut [Self::Value];

    /// A single value was inserted at `pos`
    fn insert(&mut self, _pos: usize) {}

    /// The slot `pos` of an empty set was filled from batch index `source`
    fn set(&mut self, _pos: usize, _source: usize) {}

    /// Batch index `source` was inserted at `pos + n_left - 1` after the
    /// block `pos..prev_pos` moved up by `n_left`
    fn insert_batch(&mut self, _n_left: usize, _source: usize, _pos: usize, _prev_pos: usize) {}
}

/// Callbacks invoked while removing from a sorted set
pub trait RemoveCallbacks {
    /// The element at `pos` was erased and everything after it moved down one
    fn remove(&mut self, _pos: usize) {}

    /// The block `cur_pos + 1..next_pos` moved down by `n_removed`
    fn remove_batch(&mut self, _n_removed: usize, _cur_pos: usize, _next_pos: usize) {}
}

/// Callbacks that mirror nothing
impl RemoveCallbacks for () {}

/// Position of the first element of `values[..size]` not less than `value`
#[inline]
pub fn find<V: Ord>(values: &[V], size: usize, value: &V) -> usize {
    values[..size].partition_point(|v| v < value)
}

/// True if `value` is in `values[..size]`
#[inline]
pub fn contains<V: Ord>(values: &[V], size: usize, value: &V) -> bool {
    let pos = find(values, size, value);
    pos < size && values[pos] == *value
}

/// True if `values` is non-decreasing
#[inline]
pub fn is_sorted<V: Ord>(values: &[V]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// True if `values` is strictly ascending
#[inline]
pub fn is_sorted_unique<V: Ord>(values: &[V]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// Insert `value` into a set of `size` elements
///
/// Returns `Ok(false)` without calling back if the value is already present.
pub fn insert<CB: InsertCallbacks>(callbacks: &mut CB, size: usize, value: CB::Value) -> Result<bool> {
    let pos = {
        let storage = callbacks.set_storage();
        let pos = find(storage, size, &value);
        if pos < size && storage[pos] == value {
            return Ok(false);
        }
        pos
    };

    callbacks.increment_size(size, 1)?;
    array::insert_at(callbacks.set_storage(), size, pos, value);
    callbacks.insert(pos);
    Ok(true)
}

/// Insert the non-decreasing `values` into a set of `size` elements
///
/// Values already present, and repeats within `values`, are skipped; of a
/// repeated run the first occurrence is the one inserted. Returns the number
/// of values inserted.
pub fn insert_sorted<CB: InsertCallbacks>(
    callbacks: &mut CB,
    size: usize,
    values: &[CB::Value],
) -> Result<usize> {
    if !is_sorted(values) {
        return Err(CrsError::UnsortedInput);
    }

    let n_to_insert = {
        let storage: &[CB::Value] = callbacks.set_storage();
        values
            .iter()
            .enumerate()
            .filter(|&(i, v)| (i == 0 || values[i - 1] != *v) && !contains(storage, size, v))
            .count()
    };
    if n_to_insert == 0 {
        return Ok(0);
    }

    callbacks.increment_size(size, n_to_insert)?;

    if size == 0 {
        let mut cur = 0;
        for (i, &value) in values.iter().enumerate() {
            if i > 0 && values[i - 1] == value {
                continue;
            }
            callbacks.set_storage()[cur] = value;
            callbacks.set(cur, i);
            cur += 1;
        }
        return Ok(n_to_insert);
    }

    let mut n_left = n_to_insert;
    let mut prev_pos = size;
    for i in (0..values.len()).rev() {
        let value = values[i];
        if i > 0 && values[i - 1] == value {
            continue;
        }

        let storage = callbacks.set_storage();
        let pos = find(storage, prev_pos, &value);
        if pos < prev_pos && storage[pos] == value {
            continue;
        }

        array::shift_up(storage, pos..prev_pos, n_left);
        storage[pos + n_left - 1] = value;
        callbacks.insert_batch(n_left, i, pos, prev_pos);

        n_left -= 1;
        prev_pos = pos;
        if n_left == 0 {
            break;
        }
    }

    Ok(n_to_insert)
}

/// Remove `value` from the set `storage[..size]`
///
/// Returns `false` without calling back if the value is absent.
pub fn remove<V: Ord + Copy, CB: RemoveCallbacks>(
    storage: &mut [V],
    size: usize,
    value: &V,
    callbacks: &mut CB,
) -> bool {
    let pos = find(storage, size, value);
    if pos == size || storage[pos] != *value {
        return false;
    }

    array::erase_at(storage, size, pos);
    callbacks.remove(pos);
    true
}

/// Remove the non-decreasing `values` from the set `storage[..size]`
///
/// Absent values and repeats are skipped. Each surviving block is moved
/// exactly once. Returns the number of values removed.
pub fn remove_sorted<V: Ord + Copy, CB: RemoveCallbacks>(
    storage: &mut [V],
    size: usize,
    values: &[V],
    callbacks: &mut CB,
) -> Result<usize> {
    if !is_sorted(values) {
        return Err(CrsError::UnsortedInput);
    }

    let first = values
        .iter()
        .enumerate()
        .find_map(|(i, v)| {
            let pos = find(storage, size, v);
            (pos < size && storage[pos] == *v).then_some((i, pos))
        });
    let Some((mut cur_value, mut cur_pos)) = first else {
        return Ok(0);
    };

    let mut n_removed = 0;
    loop {
        let mut next = None;
        for j in cur_value + 1..values.len() {
            if values[j] == values[j - 1] {
                continue;
            }
            let pos = cur_pos + find(&storage[cur_pos..], size - cur_pos, &values[j]);
            if pos < size && storage[pos] == values[j] {
                next = Some((j, pos));
                break;
            }
        }
        let next_pos = next.map_or(size, |(_, pos)| pos);

        n_removed += 1;
        array::shift_down(storage, cur_pos + 1..next_pos, n_removed);
        callbacks.remove_batch(n_removed, cur_pos, next_pos);

        match next {
            Some((j, pos)) => {
                cur_value = j;
                cur_pos = pos;
            }
            None => break,
        }
    }

    Ok(n_removed)
}

/// Sort `keys` ascending and apply the same permutation to `values`
///
/// The sort is stable, so among equal keys the original order is kept.
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[cfg(feature = "alloc")]
pub fn dual_sort<K: Ord + Copy, T: Copy>(keys: &mut [K], values: &mut [T]) {
    assert_eq!(keys.len(), values.len(), "dual_sort needs paired slices");
    if is_sorted(keys) {
        return;
    }

    let mut permutation: Vec<usize> = (0..keys.len()).collect();
    permutation.sort_by_key(|&i| keys[i]);

    let sorted_keys: Vec<K> = permutation.iter().map(|&i| keys[i]).collect();
    let sorted_values: Vec<T> = permutation.iter().map(|&i| values[i]).collect();
    keys.copy_from_slice(&sorted_keys);
    values.copy_from_slice(&sorted_values);
}

/// Return an ascending copy of `values`
#[cfg(feature = "alloc")]
pub fn sorted_copy<V: Ord + Copy>(values: &[V]) -> Vec<V> {
    let mut copy = values.to_vec();
    copy.sort_unstable();
    copy
}
