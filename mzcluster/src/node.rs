//! The dendrogram tree produced by agglomerative clustering
use std::fmt::Display;

use crate::distance::ClusterId;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum NodeKind {
    Leaf { index: usize },
    Merge { children: Box<(ClusterNode, ClusterNode)> },
}

/// A node in a dendrogram.
///
/// A leaf stands for exactly one input item and was formed at distance zero.
/// An internal node owns the two clusters that were merged to form it, in input
/// order. Nodes are immutable once built and hold no reference to their parent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterNode {
    id: ClusterId,
    label: String,
    distance: f64,
    size: f64,
    kind: NodeKind,
}

impl ClusterNode {
    /// Create a leaf for the item at `index` in the input
    pub fn leaf(label: impl Into<String>, index: usize) -> Self {
        Self::weighted_leaf(label, index, 1.0)
    }

    /// Create a leaf that counts as `weight` items when computing linkage distances
    pub fn weighted_leaf(label: impl Into<String>, index: usize, weight: f64) -> Self {
        Self {
            id: ClusterId(index),
            label: label.into(),
            distance: 0.0,
            size: weight,
            kind: NodeKind::Leaf { index },
        }
    }

    /// Create an internal node, taking ownership of both children
    pub fn merge(
        id: ClusterId,
        left: ClusterNode,
        right: ClusterNode,
        distance: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            distance,
            size: left.size + right.size,
            kind: NodeKind::Merge {
                children: Box::new((left, right)),
            },
        }
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The distance at which this cluster was formed, zero for leaves
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The number of items in this cluster, or their summed weight
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// The input index of a leaf's item
    pub fn index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Leaf { index } => Some(index),
            NodeKind::Merge { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(&ClusterNode, &ClusterNode)> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Merge { children } => Some((&children.0, &children.1)),
        }
    }

    pub fn left(&self) -> Option<&ClusterNode> {
        self.children().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&ClusterNode> {
        self.children().map(|(_, right)| right)
    }

    /// Visit this node and its descendants in pre-order, left before right
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![self] }
    }

    /// Iterate over the leaves below this node from left to right
    pub fn leaves(&self) -> impl Iterator<Item = &ClusterNode> {
        self.iter().filter(|node| node.is_leaf())
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn internal_count(&self) -> usize {
        self.iter().filter(|node| !node.is_leaf()).count()
    }

    pub fn leaf_labels(&self) -> Vec<&str> {
        self.leaves().map(|node| node.label()).collect()
    }

    pub fn leaf_indices(&self) -> Vec<usize> {
        self.leaves().filter_map(|node| node.index()).collect()
    }

    /// Find a leaf by label.
    ///
    /// Labels need not be unique, in which case the first match in pre-order is returned.
    pub fn find_leaf(&self, label: &str) -> Option<&ClusterNode> {
        self.leaves().find(|node| node.label == label)
    }

    /// The number of edges on the longest path from this node down to a leaf
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((left, right)) = node.children() {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
        }
        deepest
    }

    /// Whether every internal node was formed at a distance no smaller than
    /// either of its children
    pub fn is_monotonic(&self) -> bool {
        self.iter().all(|node| match node.children() {
            Some((left, right)) => {
                node.distance >= left.distance && node.distance >= right.distance
            }
            None => true,
        })
    }

    /// Cut the tree into flat clusters.
    ///
    /// Returns the largest subtrees formed at a distance no greater than `threshold`,
    /// from left to right. Leaves are always kept whole.
    pub fn cut_at_distance(&self, threshold: f64) -> Vec<&ClusterNode> {
        let mut clusters = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node.children() {
                Some((left, right)) if node.distance > threshold => {
                    stack.push(right);
                    stack.push(left);
                }
                _ => clusters.push(node),
            }
        }
        clusters
    }
}

/// A pre-order traversal over a [`ClusterNode`] tree
#[derive(Debug, Clone)]
pub struct PreOrderIter<'a> {
    stack: Vec<&'a ClusterNode>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a ClusterNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some((left, right)) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

impl<'a> IntoIterator for &'a ClusterNode {
    type Item = &'a ClusterNode;

    type IntoIter = PreOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the tree one node per line, indented by depth
impl Display for ClusterNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            write!(f, "{:width$}{}", "", node.label, width = depth * 2)?;
            match node.children() {
                Some((left, right)) => {
                    writeln!(f, " distance: {:.3}", node.distance)?;
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
                None => writeln!(f, " (leaf)")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn example_tree() -> ClusterNode {
        let ab = ClusterNode::merge(
            ClusterId(4),
            ClusterNode::leaf("A", 0),
            ClusterNode::leaf("B", 1),
            1.0,
            "A,B",
        );
        let cd = ClusterNode::merge(
            ClusterId(5),
            ClusterNode::leaf("C", 2),
            ClusterNode::leaf("D", 3),
            2.0,
            "C,D",
        );
        ClusterNode::merge(ClusterId(6), ab, cd, 4.0, "A,B,C,D")
    }

    #[test]
    fn test_accessors() {
        let leaf = ClusterNode::leaf("A", 0);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.distance(), 0.0);
        assert_eq!(leaf.index(), Some(0));
        assert!(leaf.children().is_none());
        assert_eq!(leaf.leaf_count(), 1);
        assert_eq!(leaf.depth(), 0);

        let root = example_tree();
        assert!(!root.is_leaf());
        assert_eq!(root.index(), None);
        assert_eq!(root.size(), 4.0);
        assert_eq!(root.id(), ClusterId(6));
        let (left, right) = root.children().unwrap();
        assert_eq!(left.label(), "A,B");
        assert_eq!(right.label(), "C,D");
        assert_eq!(root.left().unwrap().distance(), 1.0);
        assert_eq!(root.right().unwrap().distance(), 2.0);
    }

    #[test]
    fn test_traversal() {
        let root = example_tree();
        let labels: Vec<_> = root.iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["A,B,C,D", "A,B", "A", "B", "C,D", "C", "D"]);
        assert_eq!(root.leaf_labels(), vec!["A", "B", "C", "D"]);
        assert_eq!(root.leaf_indices(), vec![0, 1, 2, 3]);
        assert_eq!(root.leaf_count(), 4);
        assert_eq!(root.internal_count(), 3);
        assert_eq!(root.depth(), 2);
        assert_eq!(root.find_leaf("C").and_then(|n| n.index()), Some(2));
        assert!(root.find_leaf("A,B").is_none());
        assert!(root.is_monotonic());
    }

    #[test]
    fn test_cut() {
        let root = example_tree();
        fn labels(nodes: Vec<&ClusterNode>) -> Vec<String> {
            nodes.iter().map(|n| n.label().to_string()).collect()
        }
        assert_eq!(labels(root.cut_at_distance(0.5)), vec!["A", "B", "C", "D"]);
        assert_eq!(labels(root.cut_at_distance(1.0)), vec!["A,B", "C", "D"]);
        assert_eq!(labels(root.cut_at_distance(3.0)), vec!["A,B", "C,D"]);
        assert_eq!(labels(root.cut_at_distance(4.0)), vec!["A,B,C,D"]);
        assert_eq!(root.cut_at_distance(-1.0).len(), 4);
    }

    #[test]
    fn test_inversion() {
        let inner = ClusterNode::merge(
            ClusterId(3),
            ClusterNode::leaf("A", 0),
            ClusterNode::leaf("B", 1),
            2.0,
            "A,B",
        );
        let root = ClusterNode::merge(ClusterId(4), inner, ClusterNode::leaf("C", 2), 1.5, "A,B,C");
        assert!(!root.is_monotonic());
    }

    #[test]
    fn test_display() {
        let rendered = example_tree().to_string();
        let expected = "\
A,B,C,D distance: 4.000
  A,B distance: 1.000
    A (leaf)
    B (leaf)
  C,D distance: 2.000
    C (leaf)
    D (leaf)
";
        assert_eq!(rendered, expected);
    }
}
