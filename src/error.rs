//! Errors raised at the boundary of the slice-based entry points.

use thiserror::Error;

/// Errors of [`count_smaller_after_self`](crate::count_smaller_after_self).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
	/// The input sequence is absent (as opposed to merely empty).
	#[error("invalid argument: input sequence is absent")]
	InvalidArgument,
}
