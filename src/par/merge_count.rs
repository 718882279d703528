//! Merge count evaluating both halves of every large enough range in parallel.

use crate::{
	indexed::{Indexed, index_elements},
	merge_count::{merge, recurse as sequential},
};
use core::sync::atomic::{AtomicUsize, Ordering::Relaxed};
use log::{debug, log_enabled, trace, Level};
use ndarray::{Array1, ArrayView1, ArrayViewMut1, Axis};

/// Ranges up to this length are resolved sequentially. This number is as small as possible but so
/// that the overhead of Rayon's task scheduling is still negligible.
const MAX_SEQUENTIAL: usize = 2000;

/// Counts in parallel for every element of `v` how many elements after it are strictly less,
/// which is *O*(*n* \* log(*n*)) worst-case.
///
/// Element `a` is strictly less than element `b` if `is_less(a, b)` holds. The counts are indexed
/// by position in `v`. Neither `v` nor its order is modified.
pub fn par_merge_count<T, F>(v: ArrayView1<'_, T>, is_less: F) -> Array1<usize>
where
	T: Sync,
	F: Fn(&T, &T) -> bool + Sync,
{
	let len = v.len();
	// Halves touch interleaved original positions, hence one atomic slot per position.
	let counts = (0..len).map(|_| AtomicUsize::new(0)).collect::<Vec<_>>();
	let mut elements = index_elements(v);

	trace!("merging ranges longer than {MAX_SEQUENTIAL} elements in parallel");
	recurse(elements.view_mut(), &is_less, &counts);

	let counts = counts
		.into_iter()
		.map(AtomicUsize::into_inner)
		.collect::<Array1<usize>>();
	if log_enabled!(Level::Debug) {
		debug!("counted {} inversions among {len} elements", counts.sum());
	}
	counts
}

/// Sorts `v` by value recursively while adding every cross-partition count to `counts`.
///
/// Halves are resolved by [`rayon::join`] unless `v` is short enough to be resolved sequentially.
fn recurse<T, F>(mut v: ArrayViewMut1<'_, Indexed<'_, T>>, is_less: &F, counts: &[AtomicUsize])
where
	T: Sync,
	F: Fn(&T, &T) -> bool + Sync,
{
	let len = v.len();
	let mut less = |a: &T, b: &T| is_less(a, b);
	let mut tally = |index: usize, n: usize| {
		counts[index].fetch_add(n, Relaxed);
	};

	if len <= MAX_SEQUENTIAL {
		sequential(v, &mut less, &mut tally);
		return;
	}

	// Same split as the sequential recursion.
	let mid = len - len / 2;
	let (left, right) = v.view_mut().split_at(Axis(0), mid);
	rayon::join(
		|| recurse(left, is_less, counts),
		|| recurse(right, is_less, counts),
	);

	merge(v, mid, &mut less, &mut tally);
}

#[cfg(test)]
mod test {
	use super::par_merge_count;
	use crate::merge_count::merge_count;
	use ndarray::{arr1, Array1};
	use quickcheck_macros::quickcheck;
	use rand::Rng;

	#[test]
	fn scenarios() {
		let count = |xs: &[i32]| par_merge_count(Array1::from_vec(xs.to_vec()).view(), i32::lt);
		assert_eq!(count(&[5, 2, 6, 1]), arr1(&[2usize, 1, 1, 0]));
		assert_eq!(count(&[-1, -2]), arr1(&[1usize, 0]));
		assert_eq!(count(&[]), Array1::<usize>::zeros(0));
		assert_eq!(count(&[1, 1, 1]), arr1(&[0usize, 0, 0]));
	}

	#[cfg_attr(miri, ignore)]
	#[quickcheck]
	fn sequentially_counted(xs: Vec<u32>) {
		let array = Array1::from_vec(xs);
		assert_eq!(
			par_merge_count(array.view(), u32::lt),
			merge_count(array.view(), u32::lt)
		);
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn parallel() {
		let rng = &mut rand::rng();

		for len in [1_999, 2_000, 2_001, 10_000, 50_000] {
			let limit: u32 = rng.random_range(1..1_000);
			let array = (0..len)
				.map(|_| rng.random_range(0..limit))
				.collect::<Array1<u32>>();
			assert_eq!(
				par_merge_count(array.view(), u32::lt),
				merge_count(array.view(), u32::lt)
			);
		}
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn descending() {
		let len = 20_000;
		let array = (0..len).rev().collect::<Array1<usize>>();
		let counts = par_merge_count(array.view(), usize::lt);
		assert_eq!(counts, array);
		assert_eq!(counts.sum(), len * (len - 1) / 2);
	}
}
