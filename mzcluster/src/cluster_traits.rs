/*! Traits and error types shared by the clustering machinery */
use thiserror::Error;

use crate::distance::ClusterId;

/// An error that might occur while building or running a clustering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusteringError {
    #[error("Invalid dimension: expected {expected} entries, found {found}")]
    InvalidDimension { expected: usize, found: usize },
    #[error("Distance matrix is not symmetric at ({row}, {col}): {upper} != {lower}")]
    AsymmetricInput {
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },
    #[error("Distance at ({row}, {col}) must be finite and non-negative, found {value}")]
    InvalidDistance { row: usize, col: usize, value: f64 },
    #[error("Weight for item {index} must be finite and positive, found {value}")]
    InvalidWeight { index: usize, value: f64 },
    #[error("At least one item is required to build a clustering")]
    InsufficientData,
    #[error("Cluster {0} is not an active member of the distance matrix")]
    InvalidIndex(ClusterId),
    #[error("Fewer than two active clusters remain in the distance matrix")]
    EmptyMatrix,
    #[error("Clustering was cancelled after {merges} merges")]
    Cancelled { merges: usize },
}

/// The distance update rule applied when two clusters are merged.
///
/// Given clusters `A` and `B` being merged into `AB`, and some other active
/// cluster `C`, compute the distance between `AB` and `C` from the prior
/// distances and the cluster sizes. Every member of the Lance–Williams family
/// can be written this way.
pub trait LinkageStrategy {
    /// Compute the distance from the merged cluster `AB` to `C`.
    ///
    /// # Arguments
    /// - `dist_ac`: The distance between `A` and `C` before the merge
    /// - `dist_bc`: The distance between `B` and `C` before the merge
    /// - `dist_ab`: The distance at which `A` and `B` were merged
    /// - `size_a`, `size_b`, `size_c`: The sizes (or summed leaf weights) of each cluster
    fn distance_to_merged(
        &self,
        dist_ac: f64,
        dist_bc: f64,
        dist_ab: f64,
        size_a: f64,
        size_b: f64,
        size_c: f64,
    ) -> f64;

    /// Whether merge distances produced by this strategy never decrease
    /// as the clustering proceeds.
    fn is_monotonic(&self) -> bool {
        true
    }
}

impl<F> LinkageStrategy for F
where
    F: Fn(f64, f64, f64, f64, f64, f64) -> f64,
{
    fn distance_to_merged(
        &self,
        dist_ac: f64,
        dist_bc: f64,
        dist_ab: f64,
        size_a: f64,
        size_b: f64,
        size_c: f64,
    ) -> f64 {
        (self)(dist_ac, dist_bc, dist_ab, size_a, size_b, size_c)
    }
}
