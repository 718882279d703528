//! Elements paired with their position in the input.

#![cfg(feature = "alloc")]

use ndarray::{Array1, ArrayView1};

/// Value of the input borrowed together with its original position.
#[derive(Debug)]
pub struct Indexed<'a, T> {
	pub value: &'a T,
	pub index: usize,
}

// Derived impls would needlessly require `T: Clone`.
impl<T> Clone for Indexed<'_, T> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Indexed<'_, T> {}

/// Builds the working buffer in a single left-to-right pass, one element per position.
pub fn index_elements<T>(v: ArrayView1<'_, T>) -> Array1<Indexed<'_, T>> {
	v.into_iter()
		.enumerate()
		.map(|(index, value)| Indexed { value, index })
		.collect()
}
