//! The agglomerative merge loop
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cluster_traits::{ClusteringError, LinkageStrategy};
use crate::distance::{ClusterId, DistanceMatrix, SYMMETRY_TOLERANCE};
use crate::linkage::Linkage;
use crate::node::ClusterNode;

/// How internal nodes are labeled as they are created
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeLabeling {
    /// Join the left and right child labels with a comma, e.g. `"A,B"`
    #[default]
    Concatenate,
    /// Number merges in the order they happen, starting from `"clstr#1"`
    Sequential,
}

impl MergeLabeling {
    /// Build the label for the `step`-th merge (1-based) of `left` and `right`
    pub fn label(&self, step: usize, left: &ClusterNode, right: &ClusterNode) -> String {
        match self {
            MergeLabeling::Concatenate => format!("{},{}", left.label(), right.label()),
            MergeLabeling::Sequential => format!("clstr#{step}"),
        }
    }
}

/// A serializable description of how to run a clustering with one of the
/// built-in linkage methods
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusteringParams {
    pub linkage: Linkage,
    pub labeling: MergeLabeling,
    /// The tolerance used when checking the input matrix for symmetry,
    /// scaled by the magnitude of the compared entries
    pub symmetry_tolerance: f64,
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            linkage: Linkage::default(),
            labeling: MergeLabeling::default(),
            symmetry_tolerance: SYMMETRY_TOLERANCE,
        }
    }
}

impl ClusteringParams {
    pub fn new(linkage: Linkage) -> Self {
        Self {
            linkage,
            ..Default::default()
        }
    }

    pub fn with_labeling(mut self, labeling: MergeLabeling) -> Self {
        self.labeling = labeling;
        self
    }

    pub fn with_symmetry_tolerance(mut self, symmetry_tolerance: f64) -> Self {
        self.symmetry_tolerance = symmetry_tolerance;
        self
    }
}

/// One merge in the clustering history, in the manner of a row of a SciPy
/// linkage matrix
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStep {
    /// The merged cluster that comes first in input order
    pub left: ClusterId,
    pub right: ClusterId,
    /// The id assigned to the new cluster
    pub merged: ClusterId,
    pub distance: f64,
    /// The size (or summed weight) of the new cluster
    pub size: f64,
}

/// The complete result of a clustering: the tree and the order it was built in
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dendrogram {
    pub root: ClusterNode,
    pub steps: Vec<MergeStep>,
}

impl Dendrogram {
    pub fn new(root: ClusterNode, steps: Vec<MergeStep>) -> Self {
        Self { root, steps }
    }

    pub fn root(&self) -> &ClusterNode {
        &self.root
    }

    pub fn into_root(self) -> ClusterNode {
        self.root
    }

    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    pub fn n_items(&self) -> usize {
        self.steps.len() + 1
    }

    /// The distance of every merge, in the order they were performed
    pub fn heights(&self) -> Vec<f64> {
        self.steps.iter().map(|step| step.distance).collect()
    }

    /// Undo the last `k - 1` merges, producing `k` clusters from left to right.
    ///
    /// `k` is clamped to the range `1..=n_items`.
    pub fn cut_to_k(&self, k: usize) -> Vec<&ClusterNode> {
        let n = self.n_items();
        let k = k.clamp(1, n);
        let first_undone = n + (n - k);
        let mut clusters = Vec::with_capacity(k);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.children() {
                Some((left, right)) if node.id().index() >= first_undone => {
                    stack.push(right);
                    stack.push(left);
                }
                _ => clusters.push(node),
            }
        }
        clusters
    }

    /// Assign each input item the number of its flat cluster when the tree is
    /// cut at `threshold`, numbering clusters from left to right
    pub fn assignments_at(&self, threshold: f64) -> Vec<usize> {
        let mut assignments = vec![0; self.n_items()];
        for (cluster, node) in self.root.cut_at_distance(threshold).into_iter().enumerate() {
            for index in node.leaf_indices() {
                assignments[index] = cluster;
            }
        }
        assignments
    }
}

/// Relative slack allowed before a merge below a child's height counts as an
/// inversion, absorbing rounding in the linkage recurrences
const INVERSION_TOLERANCE: f64 = 1e-12;

fn is_inversion(distance: f64, child_height: f64) -> bool {
    distance < child_height - INVERSION_TOLERANCE * child_height.abs().max(1.0)
}

/// The phases of a [`ClusteringRun`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusteringState {
    /// Leaves have been created and the distance matrix populated
    Initialized,
    /// At least one merge has been performed and more remain
    Merging,
    /// A single cluster remains
    Done,
}

/// An in-progress clustering which owns its own copy of the distance matrix.
///
/// Each call to [`ClusteringRun::step`] performs exactly one merge, so a caller
/// can interleave its own bookkeeping (progress reporting, cancellation) between
/// merges.
#[derive(Debug)]
pub struct ClusteringRun<'a, L: LinkageStrategy> {
    linkage: &'a L,
    labeling: MergeLabeling,
    matrix: DistanceMatrix,
    nodes: Vec<Option<ClusterNode>>,
    steps: Vec<MergeStep>,
    n_items: usize,
    state: ClusteringState,
}

impl<'a, L: LinkageStrategy> ClusteringRun<'a, L> {
    fn new(
        linkage: &'a L,
        labeling: MergeLabeling,
        matrix: DistanceMatrix,
        leaves: Vec<ClusterNode>,
    ) -> Self {
        let n_items = leaves.len();
        let mut nodes = Vec::with_capacity(2 * n_items - 1);
        nodes.extend(leaves.into_iter().map(Some));
        nodes.resize(2 * n_items - 1, None);
        let state = if n_items == 1 {
            ClusteringState::Done
        } else {
            ClusteringState::Initialized
        };
        Self {
            linkage,
            labeling,
            matrix,
            nodes,
            steps: Vec::with_capacity(n_items - 1),
            n_items,
            state,
        }
    }

    pub fn state(&self) -> ClusteringState {
        self.state
    }

    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// The merges performed so far
    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    /// The number of clusters not yet absorbed into a merge
    pub fn active_clusters(&self) -> usize {
        self.matrix.len()
    }

    fn node(&self, id: ClusterId) -> Result<&ClusterNode, ClusteringError> {
        self.nodes
            .get(id.index())
            .and_then(|node| node.as_ref())
            .ok_or(ClusteringError::InvalidIndex(id))
    }

    fn take_node(&mut self, id: ClusterId) -> Result<ClusterNode, ClusteringError> {
        self.nodes
            .get_mut(id.index())
            .and_then(|node| node.take())
            .ok_or(ClusteringError::InvalidIndex(id))
    }

    /// Merge the closest pair of active clusters.
    ///
    /// Returns `None` once a single cluster remains.
    pub fn step(&mut self) -> Result<Option<MergeStep>, ClusteringError> {
        if self.state == ClusteringState::Done {
            return Ok(None);
        }
        self.state = ClusteringState::Merging;

        let pair = self.matrix.find_closest_pair()?;
        let merged_id = ClusterId(self.n_items + self.steps.len());

        let (size_a, size_b) = (self.node(pair.first)?.size(), self.node(pair.second)?.size());
        let mut new_distances = Vec::with_capacity(self.matrix.len() - 2);
        for other in self.matrix.active_ids() {
            if other == pair.first || other == pair.second {
                continue;
            }
            let dist_ac = self.matrix.distance_between(pair.first, other)?;
            let dist_bc = self.matrix.distance_between(pair.second, other)?;
            let size_c = self.node(other)?.size();
            let distance = self.linkage.distance_to_merged(
                dist_ac,
                dist_bc,
                pair.distance,
                size_a,
                size_b,
                size_c,
            );
            new_distances.push((other, distance));
        }
        self.matrix
            .remove_and_insert(pair.first, pair.second, merged_id, &new_distances)?;

        let left = self.take_node(pair.first)?;
        let right = self.take_node(pair.second)?;
        if is_inversion(pair.distance, left.distance().max(right.distance())) {
            if self.linkage.is_monotonic() {
                tracing::warn!(
                    "Merge of {} and {} at {} is below a child's formation distance",
                    pair.first,
                    pair.second,
                    pair.distance
                );
            } else {
                tracing::debug!(
                    "Inversion merging {} and {} at {}",
                    pair.first,
                    pair.second,
                    pair.distance
                );
            }
        }

        let label = self.labeling.label(self.steps.len() + 1, &left, &right);
        let node = ClusterNode::merge(merged_id, left, right, pair.distance, label);
        let step = MergeStep {
            left: pair.first,
            right: pair.second,
            merged: merged_id,
            distance: pair.distance,
            size: node.size(),
        };
        tracing::trace!(
            "Merged {} and {} into {} at {:.4} (size {})",
            step.left,
            step.right,
            step.merged,
            step.distance,
            step.size
        );
        self.nodes[merged_id.index()] = Some(node);
        self.steps.push(step);

        if self.matrix.len() == 1 {
            self.state = ClusteringState::Done;
        }
        Ok(Some(step))
    }

    /// Perform any remaining merges and return the finished tree
    pub fn finish(mut self) -> Result<Dendrogram, ClusteringError> {
        while self.step()?.is_some() {}
        let root_id = self
            .matrix
            .active_ids()
            .next()
            .ok_or(ClusteringError::EmptyMatrix)?;
        let root = self.take_node(root_id)?;
        Ok(Dendrogram::new(root, self.steps))
    }
}

/// A hierarchical agglomerative clustering engine with a fixed linkage
/// strategy and labeling scheme.
///
/// The engine holds no per-run state, so one instance may be shared between
/// threads and used on independent inputs concurrently.
#[derive(Debug, Clone)]
pub struct ClusteringAlgorithm<L: LinkageStrategy = Linkage> {
    linkage: L,
    labeling: MergeLabeling,
    symmetry_tolerance: f64,
    cancellation: Option<Arc<AtomicBool>>,
}

impl Default for ClusteringAlgorithm<Linkage> {
    fn default() -> Self {
        Self::from_params(ClusteringParams::default())
    }
}

impl ClusteringAlgorithm<Linkage> {
    pub fn from_params(params: ClusteringParams) -> Self {
        Self::new(params.linkage)
            .with_labeling(params.labeling)
            .with_symmetry_tolerance(params.symmetry_tolerance)
    }
}

impl<L: LinkageStrategy> ClusteringAlgorithm<L> {
    pub fn new(linkage: L) -> Self {
        Self {
            linkage,
            labeling: MergeLabeling::default(),
            symmetry_tolerance: SYMMETRY_TOLERANCE,
            cancellation: None,
        }
    }

    pub fn with_labeling(mut self, labeling: MergeLabeling) -> Self {
        self.labeling = labeling;
        self
    }

    pub fn with_symmetry_tolerance(mut self, symmetry_tolerance: f64) -> Self {
        self.symmetry_tolerance = symmetry_tolerance;
        self
    }

    /// Stop with [`ClusteringError::Cancelled`] if `flag` is set. The flag is
    /// checked once before every merge.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub fn linkage(&self) -> &L {
        &self.linkage
    }

    pub fn labeling(&self) -> MergeLabeling {
        self.labeling
    }

    /// Validate the input and create the leaves, without merging anything yet.
    ///
    /// The caller's matrix is copied and never modified.
    pub fn start<R: AsRef<[f64]>, S: AsRef<str>>(
        &self,
        matrix: &[R],
        labels: &[S],
    ) -> Result<ClusteringRun<'_, L>, ClusteringError> {
        self.start_inner(matrix, labels, None)
    }

    /// As [`ClusteringAlgorithm::start`], but each leaf counts as `weights[i]`
    /// items when computing linkage distances
    pub fn start_weighted<R: AsRef<[f64]>, S: AsRef<str>>(
        &self,
        matrix: &[R],
        labels: &[S],
        weights: &[f64],
    ) -> Result<ClusteringRun<'_, L>, ClusteringError> {
        self.start_inner(matrix, labels, Some(weights))
    }

    fn start_inner<R: AsRef<[f64]>, S: AsRef<str>>(
        &self,
        matrix: &[R],
        labels: &[S],
        weights: Option<&[f64]>,
    ) -> Result<ClusteringRun<'_, L>, ClusteringError> {
        let n = matrix.len();
        if labels.len() != n {
            return Err(ClusteringError::InvalidDimension {
                expected: n,
                found: labels.len(),
            });
        }
        if n == 0 {
            return Err(ClusteringError::InsufficientData);
        }
        if let Some(weights) = weights {
            if weights.len() != n {
                return Err(ClusteringError::InvalidDimension {
                    expected: n,
                    found: weights.len(),
                });
            }
            if let Some((index, value)) = weights
                .iter()
                .copied()
                .enumerate()
                .find(|(_, w)| !(w.is_finite() && *w > 0.0))
            {
                return Err(ClusteringError::InvalidWeight { index, value });
            }
        }

        let ids: Vec<ClusterId> = (0..n).map(ClusterId).collect();
        let distances = DistanceMatrix::with_tolerance(matrix, &ids, self.symmetry_tolerance)?;

        let leaves = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let weight = weights.map(|w| w[i]).unwrap_or(1.0);
                ClusterNode::weighted_leaf(label.as_ref(), i, weight)
            })
            .collect();

        Ok(ClusteringRun::new(
            &self.linkage,
            self.labeling,
            distances,
            leaves,
        ))
    }

    fn drive(&self, mut run: ClusteringRun<'_, L>) -> Result<Dendrogram, ClusteringError> {
        while run.state() != ClusteringState::Done {
            if let Some(flag) = self.cancellation.as_ref() {
                if flag.load(Ordering::Relaxed) {
                    let merges = run.steps().len();
                    tracing::debug!("Clustering cancelled after {merges} merges");
                    return Err(ClusteringError::Cancelled { merges });
                }
            }
            run.step()?;
        }
        let dendrogram = run.finish()?;
        tracing::debug!(
            "Clustered {} items, root formed at {}",
            dendrogram.n_items(),
            dendrogram.root.distance()
        );
        Ok(dendrogram)
    }

    /// Cluster the items described by `matrix`, returning the tree along with
    /// the merge history.
    ///
    /// # Arguments
    /// - `matrix`: A square, symmetric matrix of non-negative distances
    /// - `labels`: One label per row of `matrix`. Duplicates are allowed.
    ///
    /// # Errors
    /// Input is fully validated before any merge is performed. A mismatch between
    /// `labels` and `matrix` or a non-square `matrix` yields [`ClusteringError::InvalidDimension`],
    /// an empty input [`ClusteringError::InsufficientData`], and an asymmetric one
    /// [`ClusteringError::AsymmetricInput`].
    #[tracing::instrument(level = "debug", skip_all, fields(n_items = matrix.len()))]
    pub fn cluster<R: AsRef<[f64]>, S: AsRef<str>>(
        &self,
        matrix: &[R],
        labels: &[S],
    ) -> Result<Dendrogram, ClusteringError> {
        let run = self.start(matrix, labels)?;
        self.drive(run)
    }

    /// As [`ClusteringAlgorithm::cluster`], but seeding each leaf with a positive weight
    /// that stands in for its size in the linkage recurrence.
    #[tracing::instrument(level = "debug", skip_all, fields(n_items = matrix.len()))]
    pub fn cluster_weighted<R: AsRef<[f64]>, S: AsRef<str>>(
        &self,
        matrix: &[R],
        labels: &[S],
        weights: &[f64],
    ) -> Result<Dendrogram, ClusteringError> {
        let run = self.start_weighted(matrix, labels, weights)?;
        self.drive(run)
    }

    /// Cluster the items described by `matrix` and return the root of the tree
    pub fn perform_clustering<R: AsRef<[f64]>, S: AsRef<str>>(
        &self,
        matrix: &[R],
        labels: &[S],
    ) -> Result<ClusterNode, ClusteringError> {
        self.cluster(matrix, labels).map(Dendrogram::into_root)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn example() -> (Vec<Vec<f64>>, Vec<&'static str>) {
        let matrix = vec![
            vec![0.0, 1.0, 4.0, 5.0],
            vec![1.0, 0.0, 4.0, 5.0],
            vec![4.0, 4.0, 0.0, 2.0],
            vec![5.0, 5.0, 2.0, 0.0],
        ];
        (matrix, vec!["A", "B", "C", "D"])
    }

    #[test_log::test]
    fn test_single_linkage_example() -> Result<(), ClusteringError> {
        let (matrix, labels) = example();
        let dendrogram = ClusteringAlgorithm::new(Linkage::Single).cluster(&matrix, &labels)?;

        let steps = dendrogram.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!((steps[0].left, steps[0].right), (ClusterId(0), ClusterId(1)));
        assert_eq!(steps[0].merged, ClusterId(4));
        assert_eq!(steps[0].distance, 1.0);
        assert_eq!((steps[1].left, steps[1].right), (ClusterId(2), ClusterId(3)));
        assert_eq!(steps[1].distance, 2.0);
        assert_eq!((steps[2].left, steps[2].right), (ClusterId(4), ClusterId(5)));
        assert_eq!(steps[2].distance, 4.0);
        assert_eq!(steps[2].size, 4.0);

        let root = dendrogram.root();
        assert_eq!(root.distance(), 4.0);
        assert_eq!(root.label(), "A,B,C,D");
        assert_eq!(root.internal_count(), 3);
        assert_eq!(root.leaf_labels(), vec!["A", "B", "C", "D"]);
        assert_eq!(root.left().unwrap().label(), "A,B");
        assert_eq!(root.right().unwrap().label(), "C,D");
        Ok(())
    }

    #[test]
    fn test_complete_and_average() -> Result<(), ClusteringError> {
        let (matrix, labels) = example();
        let complete = ClusteringAlgorithm::new(Linkage::Complete).cluster(&matrix, &labels)?;
        assert_eq!(complete.heights(), vec![1.0, 2.0, 5.0]);

        let average = ClusteringAlgorithm::new(Linkage::Average).cluster(&matrix, &labels)?;
        assert_eq!(average.heights(), vec![1.0, 2.0, 4.5]);

        let weighted = ClusteringAlgorithm::new(Linkage::Weighted).cluster(&matrix, &labels)?;
        assert_eq!(weighted.heights(), vec![1.0, 2.0, 4.5]);
        Ok(())
    }

    #[test]
    fn test_single_item() -> Result<(), ClusteringError> {
        let algorithm: ClusteringAlgorithm = ClusteringAlgorithm::default();
        let run = algorithm.start(&[vec![0.0]], &["only"])?;
        assert_eq!(run.state(), ClusteringState::Done);

        let dendrogram = run.finish()?;
        assert!(dendrogram.root().is_leaf());
        assert_eq!(dendrogram.root().label(), "only");
        assert_eq!(dendrogram.root().distance(), 0.0);
        assert!(dendrogram.steps().is_empty());
        assert_eq!(dendrogram.n_items(), 1);
        Ok(())
    }

    #[test]
    fn test_input_errors() {
        let algorithm: ClusteringAlgorithm = ClusteringAlgorithm::default();
        let empty: Vec<Vec<f64>> = Vec::new();
        let no_labels: Vec<&str> = Vec::new();
        assert_eq!(
            algorithm.cluster(&empty, &no_labels),
            Err(ClusteringError::InsufficientData)
        );

        let (matrix, _) = example();
        assert_eq!(
            algorithm.cluster(&matrix, &["A", "B", "C"]),
            Err(ClusteringError::InvalidDimension {
                expected: 4,
                found: 3
            })
        );

        let (matrix, labels) = example();
        assert!(matches!(
            algorithm.cluster_weighted(&matrix, &labels, &[1.0, 1.0, 0.0, 1.0]),
            Err(ClusteringError::InvalidWeight { index: 2, .. })
        ));
        assert!(matches!(
            algorithm.cluster_weighted(&matrix, &labels, &[1.0, 1.0]),
            Err(ClusteringError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_stepwise() -> Result<(), ClusteringError> {
        let (matrix, labels) = example();
        let algorithm = ClusteringAlgorithm::new(Linkage::Single);
        let mut run = algorithm.start(&matrix, &labels)?;
        assert_eq!(run.state(), ClusteringState::Initialized);
        assert_eq!(run.active_clusters(), 4);

        let step = run.step()?.unwrap();
        assert_eq!(step.merged, ClusterId(4));
        assert_eq!(run.state(), ClusteringState::Merging);
        assert_eq!(run.active_clusters(), 3);

        run.step()?;
        run.step()?;
        assert_eq!(run.state(), ClusteringState::Done);
        assert!(run.step()?.is_none());

        let dendrogram = run.finish()?;
        assert_eq!(dendrogram.root().id(), ClusterId(6));
        Ok(())
    }

    #[test]
    fn test_sequential_labels() -> Result<(), ClusteringError> {
        let (matrix, labels) = example();
        let params =
            ClusteringParams::new(Linkage::Single).with_labeling(MergeLabeling::Sequential);
        let root = ClusteringAlgorithm::from_params(params).perform_clustering(&matrix, &labels)?;
        let internal: Vec<_> = root
            .iter()
            .filter(|n| !n.is_leaf())
            .map(|n| n.label().to_string())
            .collect();
        assert_eq!(internal, vec!["clstr#3", "clstr#1", "clstr#2"]);
        Ok(())
    }

    #[test]
    fn test_inversion_tolerance() {
        assert!(!is_inversion(4.0, 4.0));
        assert!(!is_inversion(4.5, 4.0));
        assert!(!is_inversion(4.0 - 1e-15, 4.0));
        assert!(!is_inversion(1e9 - 1e-4, 1e9));
        assert!(is_inversion(3.9, 4.0));
        assert!(is_inversion(3.0f64.sqrt() / 2.0, 1.0));
        assert!(is_inversion(1e6 - 1.0, 1e6));
    }

    #[test]
    fn test_cancellation() {
        let (matrix, labels) = example();
        let flag = Arc::new(AtomicBool::new(true));
        let algorithm = ClusteringAlgorithm::new(Linkage::Single).with_cancellation(flag.clone());
        assert_eq!(
            algorithm.cluster(&matrix, &labels),
            Err(ClusteringError::Cancelled { merges: 0 })
        );
        flag.store(false, Ordering::Relaxed);
        assert!(algorithm.cluster(&matrix, &labels).is_ok());
    }

    #[test]
    fn test_custom_strategy() -> Result<(), ClusteringError> {
        let (matrix, labels) = example();
        let single = |d_ac: f64, d_bc: f64, _d_ab: f64, _n_a: f64, _n_b: f64, _n_c: f64| {
            d_ac.min(d_bc)
        };
        let custom = ClusteringAlgorithm::new(single).cluster(&matrix, &labels)?;
        let builtin = ClusteringAlgorithm::new(Linkage::Single).cluster(&matrix, &labels)?;
        assert_eq!(custom, builtin);
        Ok(())
    }

    #[test]
    fn test_cuts() -> Result<(), ClusteringError> {
        let (matrix, labels) = example();
        let dendrogram = ClusteringAlgorithm::new(Linkage::Single).cluster(&matrix, &labels)?;
        assert_eq!(dendrogram.assignments_at(1.5), vec![0, 0, 1, 2]);
        assert_eq!(dendrogram.assignments_at(3.0), vec![0, 0, 1, 1]);
        assert_eq!(dendrogram.assignments_at(10.0), vec![0, 0, 0, 0]);

        let labels_of = |k| -> Vec<String> {
            dendrogram
                .cut_to_k(k)
                .into_iter()
                .map(|n| n.label().to_string())
                .collect()
        };
        assert_eq!(labels_of(1), vec!["A,B,C,D"]);
        assert_eq!(labels_of(2), vec!["A,B", "C,D"]);
        assert_eq!(labels_of(3), vec!["A,B", "C", "D"]);
        assert_eq!(labels_of(4), vec!["A", "B", "C", "D"]);
        assert_eq!(labels_of(10).len(), 4);
        Ok(())
    }
}
