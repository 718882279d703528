//! Merge sort augmented to count, for every element, the strictly lesser elements after it.

#![cfg(feature = "alloc")]

use crate::indexed::{Indexed, index_elements};
use alloc::vec::Vec;
use log::{debug, log_enabled, Level};
use ndarray::{s, Array1, ArrayView1, ArrayViewMut1, Axis};

/// Stack space left before [`recurse`] asks for more.
#[cfg(feature = "stacker")]
const RED_ZONE: usize = 64 * 1024;
/// Stack space allocated whenever [`recurse`] runs out of it.
#[cfg(feature = "stacker")]
const STACK_SIZE: usize = 1024 * 1024;

/// Counts for every element of `v` how many elements after it are strictly less, which is
/// *O*(*n* \* log(*n*)) worst-case.
///
/// Element `a` is strictly less than element `b` if `is_less(a, b)` holds. The counts are indexed
/// by position in `v`. Neither `v` nor its order is modified.
pub fn merge_count<T, F>(v: ArrayView1<'_, T>, mut is_less: F) -> Array1<usize>
where
	F: FnMut(&T, &T) -> bool,
{
	let len = v.len();
	let mut counts = Array1::<usize>::zeros(len);
	let mut elements = index_elements(v);

	recurse(
		elements.view_mut(),
		&mut is_less,
		&mut |index: usize, n: usize| counts[index] += n,
	);

	if log_enabled!(Level::Debug) {
		debug!("counted {} inversions among {len} elements", counts.sum());
	}
	counts
}

/// Sorts `v` by value recursively while handing every cross-partition count to `tally`.
///
/// The left half gets the extra element of odd-length ranges. Both halves are resolved before
/// they are merged.
pub fn recurse<T, F, G>(mut v: ArrayViewMut1<'_, Indexed<'_, T>>, is_less: &mut F, tally: &mut G)
where
	F: FnMut(&T, &T) -> bool,
	G: FnMut(usize, usize),
{
	let len = v.len();

	// Zero or one element is sorted and has nothing to its right.
	if len < 2 {
		return;
	}

	let mid = len - len / 2;

	let mut halves = || {
		let (left, right) = v.view_mut().split_at(Axis(0), mid);
		recurse(left, is_less, tally);
		recurse(right, is_less, tally);
	};
	#[cfg(feature = "stacker")]
	stacker::maybe_grow(RED_ZONE, STACK_SIZE, &mut halves);
	#[cfg(not(feature = "stacker"))]
	halves();

	merge(v, mid, is_less, tally);
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]` into `v[..]`.
///
/// Every element of the left run passes to `tally` its original index together with the number
/// of elements of the right run that were placed before it. These are exactly the elements of
/// the right run that are strictly less. Equal elements prefer the left run and therefore never
/// count.
pub fn merge<T, F, G>(
	mut v: ArrayViewMut1<'_, Indexed<'_, T>>,
	mid: usize,
	is_less: &mut F,
	tally: &mut G,
) where
	F: FnMut(&T, &T) -> bool,
	G: FnMut(usize, usize),
{
	let len = v.len();
	debug_assert!(mid <= len);

	let mut merged = Vec::with_capacity(len);
	let mut left = 0;
	let mut right = mid;
	let mut right_placed = 0;

	while left < mid && right < len {
		if is_less(v[right].value, v[left].value) {
			merged.push(v[right]);
			right_placed += 1;
			right += 1;
		} else {
			if right_placed > 0 {
				tally(v[left].index, right_placed);
			}
			merged.push(v[left]);
			left += 1;
		}
	}

	// All of the right run placed so far precedes what is left of the left run.
	for element in v.slice(s![left..mid]) {
		if right_placed > 0 {
			tally(element.index, right_placed);
		}
		merged.push(*element);
	}
	// Nothing of the left run remains to be counted against.
	merged.extend(v.slice(s![right..]).iter().copied());

	for (slot, element) in v.iter_mut().zip(merged) {
		*slot = element;
	}
}
