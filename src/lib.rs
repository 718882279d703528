//! Counts for every element of a 1-dimensional array or (sub)view with arbitrary memory layout
//! (e.g., non-contiguous) how many elements positioned after it are strictly smaller, the
//! per-element breakdown of its [inversions]. Counting is done by an augmented [merge sort] that
//! never exposes or modifies the order of the input.
//!
//! # Example
//!
//! ```
//! use ndarray_inversions::{ndarray::{arr1, arr2}, Inversions1Ext};
//!
//! let v = arr1(&[5, 2, 6, 1]);
//! // 5 precedes 2 and 1, 2 precedes 1, 6 precedes 1, 1 precedes nothing.
//! assert_eq!(v.count_smaller_after(), arr1(&[2, 1, 1, 0]));
//! assert_eq!(v.count_inversions(), 4);
//!
//! // 2-dimensional array of 3 rows and 3 columns.
//! let m = arr2(&[[3, 9, 0],
//!                [2, 8, 0],
//!                [1, 7, 0]]);
//!
//! // Columns are non-contiguous due to row-major memory layout.
//! assert_eq!(m.column(0).count_smaller_after(), arr1(&[2, 1, 0]));
//! // Ties never count.
//! assert_eq!(m.column(2).count_smaller_after(), arr1(&[0, 0, 0]));
//! ```
//!
//! # Current Implementation
//!
//! Complexities where *n* is the length of the (sub)view.
//!
//! | Resource | Complexity | Counting          |
//! |----------|------------|-------------------|
//! | Time     | Best       | *O*(*n* log *n*)  |
//! | Time     | Average    | *O*(*n* log *n*)  |
//! | Time     | Worst      | *O*(*n* log *n*)  |
//! | Space    | Worst      | *O*(*n*)          |
//!
//! [inversions]: https://en.wikipedia.org/wiki/Inversion_(discrete_mathematics)
//! [merge sort]: https://en.wikipedia.org/wiki/Merge_sort
//!
//! # Features
//!
//!   * `alloc` for counting, which requires working buffers. Enabled by `std`.
//!   * `std` for `ndarray/std`. Enabled by `default`, `stacker`, or `rayon`.
//!   * `stacker` for growing the stack on demand while recursing. Enabled by `default`.
//!   * `rayon` for parallel `par_count*`.
//!
//! # Logging
//!
//! Counting reports the number of elements and inversions at [`log::Level::Debug`] via the [`log`]
//! facade. No logger is installed by this crate.

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
mod indexed;
mod merge_count;

#[cfg(feature = "rayon")]
mod par;
#[cfg(feature = "rayon")]
use par::merge_count::par_merge_count;

#[cfg(feature = "alloc")]
use crate::merge_count::merge_count;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use core::cmp::Ordering::{self, Less};
#[cfg(feature = "alloc")]
use ndarray::{Array1, ArrayView1};
use ndarray::{ArrayBase, Data, Ix1};

pub use crate::error::Error;
pub use ndarray;

/// Counts for every element of `sequence` how many elements positioned after it are strictly
/// smaller.
///
/// The returned vector has the length of `sequence`. Its element at position `k` is the number of
/// positions `m > k` with `sequence[m] < sequence[k]`. An empty `sequence` is valid and results in
/// an empty vector.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `sequence` is absent.
///
/// # Examples
///
/// ```
/// use ndarray_inversions::{count_smaller_after_self, Error};
///
/// assert_eq!(count_smaller_after_self(Some(&[5, 2, 6, 1][..])), Ok(vec![2, 1, 1, 0]));
/// assert_eq!(count_smaller_after_self::<i32>(Some(&[])), Ok(vec![]));
/// assert_eq!(count_smaller_after_self::<i32>(None), Err(Error::InvalidArgument));
/// ```
#[cfg(feature = "alloc")]
pub fn count_smaller_after_self<A>(sequence: Option<&[A]>) -> Result<Vec<usize>, Error>
where
	A: Ord,
{
	let sequence = sequence.ok_or(Error::InvalidArgument)?;
	Ok(ArrayView1::from(sequence).count_smaller_after().to_vec())
}

/// Extension trait for 1-dimensional [`ArrayBase<S, Ix1>`](`ArrayBase`) array or (sub)view with
/// arbitrary memory layout (e.g., non-contiguous) providing methods counting [inversions].
///
/// [inversions]: https://en.wikipedia.org/wiki/Inversion_(discrete_mathematics)
pub trait Inversions1Ext<A, S>
where
	S: Data<Elem = A>,
{
	/// Counts in parallel for every element how many elements after it are strictly smaller.
	///
	/// Neither the array nor its order is modified. Equal elements never count.
	///
	/// # Current Implementation
	///
	/// The current algorithm is a top-down merge sort over the elements paired with their
	/// positions. Whenever an element of the left run gets merged, all elements of the right run
	/// merged before it are strictly smaller and positioned after it. Both runs of long enough
	/// ranges are sorted in parallel before they are merged.
	///
	/// It allocates a working buffer and counts the size of `self`.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// let v = arr1(&[3, 2, 1]);
	///
	/// assert_eq!(v.par_count_smaller_after(), arr1(&[2, 1, 0]));
	/// ```
	#[cfg(feature = "rayon")]
	fn par_count_smaller_after(&self) -> Array1<usize>
	where
		A: Ord + Sync;
	/// Counts in parallel for every element how many elements after it are strictly smaller with a
	/// comparator function.
	///
	/// Element `b` after element `a` counts if `compare(a, b)` returns [`Greater`].
	///
	/// The comparator function must define a total ordering for the elements in the array.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// let v = arr1(&[1.0, 3.0, 2.0, 0.5]);
	///
	/// // Counts strictly greater elements after each element.
	/// assert_eq!(v.par_count_smaller_after_by(|a, b| f64::total_cmp(b, a)), arr1(&[2, 0, 0, 0]));
	/// ```
	///
	/// [`Greater`]: Ordering::Greater
	#[cfg(feature = "rayon")]
	fn par_count_smaller_after_by<F>(&self, compare: F) -> Array1<usize>
	where
		A: Sync,
		F: Fn(&A, &A) -> Ordering + Sync;
	/// Counts in parallel for every element how many elements after it have a strictly smaller
	/// key.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// let v = arr1(&[-5i32, 4, 1, -3, 2]);
	///
	/// assert_eq!(v.par_count_smaller_after_by_key(|k| k.abs()), arr1(&[4, 3, 0, 1, 0]));
	/// ```
	#[cfg(feature = "rayon")]
	fn par_count_smaller_after_by_key<K, F>(&self, f: F) -> Array1<usize>
	where
		A: Sync,
		K: Ord,
		F: Fn(&A) -> K + Sync;
	/// Counts in parallel the pairs of elements where the earlier one is strictly greater than the
	/// later one.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// let v = arr1(&[5, 2, 6, 1]);
	///
	/// assert_eq!(v.par_count_inversions(), 4);
	/// ```
	#[cfg(feature = "rayon")]
	fn par_count_inversions(&self) -> usize
	where
		A: Ord + Sync;

	/// Counts for every element how many elements after it are strictly smaller.
	///
	/// Neither the array nor its order is modified. Equal elements never count.
	///
	/// # Current Implementation
	///
	/// The current algorithm is a top-down merge sort over the elements paired with their
	/// positions. Whenever an element of the left run gets merged, all elements of the right run
	/// merged before it are strictly smaller and positioned after it.
	///
	/// It allocates a working buffer and counts the size of `self` as well as a temporary buffer
	/// per merge.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// let v = arr1(&[-1, -2]);
	///
	/// assert_eq!(v.count_smaller_after(), arr1(&[1, 0]));
	/// ```
	#[cfg(feature = "alloc")]
	fn count_smaller_after(&self) -> Array1<usize>
	where
		A: Ord;
	/// Counts for every element how many elements after it are strictly smaller with a comparator
	/// function.
	///
	/// Element `b` after element `a` counts if `compare(a, b)` returns [`Greater`].
	///
	/// The comparator function must define a total ordering for the elements in the array. If
	/// the ordering is not total, the counts are unspecified.
	///
	/// For example, while [`f64`] doesn't implement [`Ord`] because `NaN != NaN`, we can use
	/// `total_cmp` as our comparator function when we know the array doesn't contain a `NaN`.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// let v = arr1(&[5.0, 4.0, 1.0, 3.0, 2.0]);
	///
	/// assert_eq!(v.count_smaller_after_by(|a, b| f64::total_cmp(a, b)), arr1(&[4, 3, 0, 1, 0]));
	/// ```
	///
	/// [`Greater`]: Ordering::Greater
	#[cfg(feature = "alloc")]
	fn count_smaller_after_by<F>(&self, compare: F) -> Array1<usize>
	where
		F: FnMut(&A, &A) -> Ordering;
	/// Counts for every element how many elements after it have a strictly smaller key.
	///
	/// The key function is called *O*(*n* \* log(*n*)) times.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// let v = arr1(&["ccc", "a", "bb", "d"]);
	///
	/// assert_eq!(v.count_smaller_after_by_key(|s| s.len()), arr1(&[3, 0, 1, 0]));
	/// ```
	#[cfg(feature = "alloc")]
	fn count_smaller_after_by_key<K, F>(&self, f: F) -> Array1<usize>
	where
		K: Ord,
		F: FnMut(&A) -> K;
	/// Counts the pairs of elements where the earlier one is strictly greater than the later one.
	///
	/// This is the sum of [`count_smaller_after`](Inversions1Ext::count_smaller_after).
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_inversions::{ndarray::arr1, Inversions1Ext};
	///
	/// assert_eq!(arr1(&[1, 2, 3]).count_inversions(), 0);
	/// assert_eq!(arr1(&[3, 2, 1]).count_inversions(), 3);
	/// ```
	#[cfg(feature = "alloc")]
	fn count_inversions(&self) -> usize
	where
		A: Ord;
	/// Counts the pairs of elements where the earlier one is strictly greater than the later one
	/// with a comparator function.
	///
	/// See [`count_smaller_after_by`](Inversions1Ext::count_smaller_after_by).
	#[cfg(feature = "alloc")]
	fn count_inversions_by<F>(&self, compare: F) -> usize
	where
		F: FnMut(&A, &A) -> Ordering;
	/// Counts the pairs of elements where the earlier one has a strictly greater key than the
	/// later one.
	///
	/// See [`count_smaller_after_by_key`](Inversions1Ext::count_smaller_after_by_key).
	#[cfg(feature = "alloc")]
	fn count_inversions_by_key<K, F>(&self, f: F) -> usize
	where
		K: Ord,
		F: FnMut(&A) -> K;
}

impl<A, S> Inversions1Ext<A, S> for ArrayBase<S, Ix1>
where
	S: Data<Elem = A>,
{
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_count_smaller_after(&self) -> Array1<usize>
	where
		A: Ord + Sync,
	{
		par_merge_count(self.view(), A::lt)
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_count_smaller_after_by<F>(&self, compare: F) -> Array1<usize>
	where
		A: Sync,
		F: Fn(&A, &A) -> Ordering + Sync,
	{
		par_merge_count(self.view(), |a: &A, b: &A| compare(a, b) == Less)
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_count_smaller_after_by_key<K, F>(&self, f: F) -> Array1<usize>
	where
		A: Sync,
		K: Ord,
		F: Fn(&A) -> K + Sync,
	{
		par_merge_count(self.view(), |a: &A, b: &A| f(a).lt(&f(b)))
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_count_inversions(&self) -> usize
	where
		A: Ord + Sync,
	{
		self.par_count_smaller_after().sum()
	}

	#[cfg(feature = "alloc")]
	#[inline]
	fn count_smaller_after(&self) -> Array1<usize>
	where
		A: Ord,
	{
		merge_count(self.view(), A::lt)
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn count_smaller_after_by<F>(&self, mut compare: F) -> Array1<usize>
	where
		F: FnMut(&A, &A) -> Ordering,
	{
		merge_count(self.view(), |a: &A, b: &A| compare(a, b) == Less)
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn count_smaller_after_by_key<K, F>(&self, mut f: F) -> Array1<usize>
	where
		K: Ord,
		F: FnMut(&A) -> K,
	{
		merge_count(self.view(), |a: &A, b: &A| f(a).lt(&f(b)))
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn count_inversions(&self) -> usize
	where
		A: Ord,
	{
		self.count_smaller_after().sum()
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn count_inversions_by<F>(&self, compare: F) -> usize
	where
		F: FnMut(&A, &A) -> Ordering,
	{
		self.count_smaller_after_by(compare).sum()
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn count_inversions_by_key<K, F>(&self, f: F) -> usize
	where
		K: Ord,
		F: FnMut(&A) -> K,
	{
		self.count_smaller_after_by_key(f).sum()
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{count_smaller_after_self, Error, Inversions1Ext};
	use ndarray::{arr1, Array1};
	use quickcheck_macros::quickcheck;

	#[test]
	fn absent() {
		assert_eq!(count_smaller_after_self::<i64>(None), Err(Error::InvalidArgument));
		assert_eq!(
			Error::InvalidArgument.to_string(),
			"invalid argument: input sequence is absent"
		);
	}

	#[test]
	fn scenarios() {
		let count = |xs: &[i64]| count_smaller_after_self(Some(xs));
		assert_eq!(count(&[5, 2, 6, 1]), Ok(vec![2, 1, 1, 0]));
		assert_eq!(count(&[-1, -2]), Ok(vec![1, 0]));
		assert_eq!(count(&[3, 2, 1]), Ok(vec![2, 1, 0]));
		assert_eq!(count(&[]), Ok(vec![]));
		assert_eq!(count(&[7]), Ok(vec![0]));
		assert_eq!(count(&[1, 1, 1]), Ok(vec![0, 0, 0]));
	}

	#[quickcheck]
	fn unmodified(xs: Vec<i64>) {
		let copy = xs.clone();
		let counts = count_smaller_after_self(Some(xs.as_slice())).unwrap();
		assert_eq!(xs, copy);
		assert_eq!(counts.len(), xs.len());
	}

	#[quickcheck]
	fn descending(len: u8) {
		let v = (0..len as usize).rev().collect::<Array1<usize>>();
		assert_eq!(v.count_smaller_after(), v);
		let n = len as usize;
		assert_eq!(v.count_inversions(), n * n.saturating_sub(1) / 2);
	}

	#[quickcheck]
	fn reversed_comparator(xs: Vec<i16>) {
		let v = Array1::from_vec(xs.clone());
		let greater = v.count_smaller_after_by(|a, b| b.cmp(a));
		let negated = xs.iter().map(|&x| -(x as i32)).collect::<Array1<i32>>();
		assert_eq!(greater, negated.count_smaller_after());
		assert_eq!(v.count_inversions_by_key(|&x| -(x as i32)), greater.sum());
	}

	#[test]
	fn by_key() {
		let v = arr1(&[(1, 'd'), (0, 'c'), (1, 'b'), (0, 'a')]);
		assert_eq!(v.count_smaller_after_by_key(|p| p.0), arr1(&[2usize, 0, 1, 0]));
		assert_eq!(v.count_inversions_by(|a, b| a.1.cmp(&b.1)), 6);
	}

	#[test]
	fn slice_view() {
		let v = arr1(&[9, 1, 8, 2, 7, 3]);
		let odd = v.slice(ndarray::s![1..;2]);
		assert_eq!(odd.count_smaller_after(), arr1(&[0usize, 0, 0]));
		let even = v.slice(ndarray::s![..;2]);
		assert_eq!(even.count_smaller_after(), arr1(&[2usize, 1, 0]));
	}

	#[cfg(feature = "rayon")]
	#[quickcheck]
	fn parallel(xs: Vec<i32>) {
		let v = Array1::from_vec(xs);
		assert_eq!(v.par_count_smaller_after(), v.count_smaller_after());
		assert_eq!(v.par_count_inversions(), v.count_inversions());
		assert_eq!(
			v.par_count_smaller_after_by(|a, b| b.cmp(a)),
			v.count_smaller_after_by(|a, b| b.cmp(a))
		);
		assert_eq!(
			v.par_count_smaller_after_by_key(|x| x / 3),
			v.count_smaller_after_by_key(|x| x / 3)
		);
	}
}
