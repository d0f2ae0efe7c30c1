//! High level APIs for running a clustering in one call
use crate::algorithm::{ClusteringAlgorithm, Dendrogram};
use crate::cluster_traits::{ClusteringError, LinkageStrategy};
use crate::node::ClusterNode;

/// A single-shot hierarchical clustering of the items described by `matrix`.
///
/// # Arguments
/// - `matrix`: A square, symmetric matrix of non-negative distances between items
/// - `labels`: The name of each item, in the same order as the rows of `matrix`
/// - `strategy`: The linkage method used to compute distances to newly merged clusters,
///   either a [`Linkage`](crate::linkage::Linkage) or any other [`LinkageStrategy`]
///
/// Returns the root of the dendrogram. Internal nodes are labeled by joining their
/// children's labels with a comma.
///
/// # Note
/// To keep the merge history, choose a different labeling scheme, or support cancellation,
/// build a [`ClusteringAlgorithm`] instead.
///
/// # See also
/// [`ClusteringAlgorithm::perform_clustering`]
pub fn perform_clustering<R: AsRef<[f64]>, S: AsRef<str>, L: LinkageStrategy>(
    matrix: &[R],
    labels: &[S],
    strategy: L,
) -> Result<ClusterNode, ClusteringError> {
    ClusteringAlgorithm::new(strategy).perform_clustering(matrix, labels)
}

/// A single-shot hierarchical clustering where each item carries a positive weight
/// which takes the place of its size in the linkage recurrence.
///
/// With every weight equal to `1.0` this is identical to [`perform_clustering`].
///
/// # See also
/// [`ClusteringAlgorithm::cluster_weighted`]
pub fn perform_weighted_clustering<R: AsRef<[f64]>, S: AsRef<str>, L: LinkageStrategy>(
    matrix: &[R],
    labels: &[S],
    weights: &[f64],
    strategy: L,
) -> Result<ClusterNode, ClusteringError> {
    ClusteringAlgorithm::new(strategy)
        .cluster_weighted(matrix, labels, weights)
        .map(Dendrogram::into_root)
}
