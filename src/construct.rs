//! Helpers for bulk construction: removing duplicates and turning an ascending sequence into a
//! height-balanced tree in a single pass.

use log::trace;

use crate::tree::{Link, Node};

/// Removes duplicate values, keeping the first occurrence of each and otherwise preserving the
/// order of `values`.
///
/// Already sorted input (the common case) is handled with a plain `dedup`. Anything else falls
/// back to a stable sort of indices so that we only need `Ord` and never `Clone` or `Hash`.
pub(crate) fn dedup<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    let before = values.len();
    if first_unsorted(&values).is_none() {
        values.dedup();
    } else {
        let mut order: Vec<usize> = (0..values.len()).collect();
        // `sort_by` is stable so equal values stay in their original relative order and the
        // first index of each run is the first occurrence.
        order.sort_by(|&a, &b| values[a].cmp(&values[b]));

        let mut keep = vec![false; values.len()];
        let mut run_start: Option<usize> = None;
        for ix in order {
            match run_start {
                Some(start) if values[start] == values[ix] => {}
                _ => {
                    keep[ix] = true;
                    run_start = Some(ix);
                }
            }
        }

        values = values
            .into_iter()
            .zip(keep)
            .filter_map(|(value, keep)| keep.then(|| value))
            .collect();
    }

    trace!(
        "dropped {} duplicate(s), {} value(s) remain",
        before - values.len(),
        values.len()
    );
    values
}

/// Returns the index of the first value that is smaller than its predecessor, if any.
pub(crate) fn first_unsorted<T: Ord>(values: &[T]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| pair[0] > pair[1])
        .map(|ix| ix + 1)
}

/// Builds a height-balanced subtree out of `values`, which must already be ascending and free of
/// duplicates for the result to be a valid BST.
///
/// Each subtree root is the middle element `floor((start + end) / 2)` of its inclusive index
/// range, so for an even-sized range the left side gets the smaller half.
pub(crate) fn build_balanced<T>(values: Vec<T>) -> Link<T> {
    let len = values.len();
    trace!("building balanced tree from {} value(s)", len);
    build_range(&mut values.into_iter(), len)
}

/// Consumes exactly `len` values from `values` in order and returns them as a balanced subtree.
/// The left subtree is built first so that values come off the iterator in in-order sequence.
fn build_range<T, I>(values: &mut I, len: usize) -> Link<T>
where
    I: Iterator<Item = T>,
{
    if len == 0 {
        return None;
    }

    let left_len = (len - 1) / 2;
    let left = build_range(values, left_len);
    let value = match values.next() {
        Some(value) => value,
        None => unreachable!("balanced builder was handed fewer values than its length"),
    };
    let right = build_range(values, len - 1 - left_len);

    Some(Box::new(Node { value, left, right }))
}
