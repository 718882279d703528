//! Parallel counterparts of the sequential algorithms, built on [`rayon`].

pub mod merge_count;
