//! Hierarchical agglomerative clustering over a precomputed distance matrix.
//!
//! Starting from one cluster per item, the two closest clusters are merged
//! repeatedly until a single root remains. The distance from each new cluster
//! to the others is derived by a [`LinkageStrategy`], and the merge history is
//! returned as a tree of [`ClusterNode`]s.
//!
//! ```rust
//! use mzcluster::{perform_clustering, Linkage};
//!
//! let distances = vec![
//!     vec![0.0, 1.0, 4.0, 5.0],
//!     vec![1.0, 0.0, 4.0, 5.0],
//!     vec![4.0, 4.0, 0.0, 2.0],
//!     vec![5.0, 5.0, 2.0, 0.0],
//! ];
//! let root = perform_clustering(&distances, &["A", "B", "C", "D"], Linkage::Single).unwrap();
//! assert_eq!(root.distance(), 4.0);
//! assert_eq!(root.leaf_labels(), vec!["A", "B", "C", "D"]);
//! ```
pub mod algorithm;
pub mod api;
pub mod cluster_traits;
pub mod distance;
pub mod linkage;
pub mod node;

pub use crate::algorithm::{
    ClusteringAlgorithm, ClusteringParams, ClusteringRun, ClusteringState, Dendrogram,
    MergeLabeling, MergeStep,
};
pub use crate::api::{perform_clustering, perform_weighted_clustering};
pub use crate::cluster_traits::{ClusteringError, LinkageStrategy};
pub use crate::distance::{ClusterId, ClusterPair, DistanceMatrix};
pub use crate::linkage::{Linkage, LinkageParseError};
pub use crate::node::ClusterNode;
