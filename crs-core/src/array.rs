//! Element shifting primitives over one contiguous buffer
//!
//! The engine applies the same primitive to the column buffer and to the
//! entry buffer, which is what keeps the two positionally paired. None of
//! these functions allocate; callers guarantee the buffer is long enough.

use core::ops::Range;

/// Move the elements in `range` up by `n` positions
///
/// Afterwards `buf[range.start + n..range.end + n]` holds the old contents
/// of `buf[range]`. The vacated slots keep stale values.
///
/// # Panics
///
/// Panics if `range.end + n > buf.len()`.
#[inline]
pub fn shift_up<T: Copy>(buf: &mut [T], range: Range<usize>, n: usize) {
    if n == 0 || range.is_empty() {
        return;
    }
    assert!(
        range.end + n <= buf.len(),
        "cannot shift {range:?} up by {n} in a buffer of length {}",
        buf.len()
    );
    let dest = range.start + n;
    buf.copy_within(range, dest);
}

/// Move the elements in `range` down by `n` positions
///
/// Afterwards `buf[range.start - n..range.end - n]` holds the old contents
/// of `buf[range]`.
///
/// # Panics
///
/// Panics if `n > range.start` or `range.end > buf.len()`.
#[inline]
pub fn shift_down<T: Copy>(buf: &mut [T], range: Range<usize>, n: usize) {
    if n == 0 || range.is_empty() {
        return;
    }
    assert!(
        n <= range.start,
        "cannot shift {range:?} down by {n}"
    );
    let dest = range.start - n;
    buf.copy_within(range, dest);
}

/// Insert `value` at `pos` in the first `size` elements of `buf`
///
/// # Panics
///
/// Panics if `pos > size` or `size >= buf.len()`.
#[inline]
pub fn insert_at<T: Copy>(buf: &mut [T], size: usize, pos: usize, value: T) {
    assert!(pos <= size, "insert position {pos} past size {size}");
    assert!(size < buf.len(), "no room to insert into buffer of length {}", buf.len());
    shift_up(buf, pos..size, 1);
    buf[pos] = value;
}

/// Remove the element at `pos` from the first `size` elements of `buf`
///
/// # Panics
///
/// Panics if `pos >= size` or `size > buf.len()`.
#[inline]
pub fn erase_at<T: Copy>(buf: &mut [T], size: usize, pos: usize) {
    assert!(pos < size, "erase position {pos} past size {size}");
    assert!(size <= buf.len());
    shift_down(buf, pos + 1..size, 1);
}
