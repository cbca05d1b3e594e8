//! Distance matrices.
//!
//! Provides a dense, precomputed Manhattan distance matrix.

mod matrix;

pub use matrix::DistanceMatrix;
