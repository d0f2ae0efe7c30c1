//! Pairwise distance storage over the set of active clusters
use std::fmt::Display;

use itertools::Itertools;

use crate::cluster_traits::ClusteringError;

/// The default absolute tolerance (scaled by the magnitude of the entries
/// being compared) used when checking an input matrix for symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// An opaque handle for a cluster.
///
/// Leaves take the index of their item in the input, and the k-th merge
/// (counting from zero) of an `N` item clustering is assigned `N + k`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterId(pub usize);

impl ClusterId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for ClusterId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// The closest pair of active clusters in a [`DistanceMatrix`]. `first` always
/// precedes `second` in input order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterPair {
    pub first: ClusterId,
    pub second: ClusterId,
    pub distance: f64,
}

#[inline]
fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    n * i - (i * (i + 1)) / 2 + (j - i - 1)
}

/// A symmetric distance matrix over the currently active clusters.
///
/// Storage is the condensed upper triangle of the original `N x N` matrix.
/// Each cluster occupies one *slot*; when two clusters merge, the new cluster
/// takes over the lower of their two slots and the other slot is vacated, so
/// a slot's position is always the lowest original index of any item in the
/// cluster occupying it. Scanning slots in order therefore visits clusters in
/// their original input order, which is what makes [`DistanceMatrix::find_closest_pair`]
/// deterministic.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    condensed: Vec<f64>,
    slots: Vec<Option<ClusterId>>,
    positions: Vec<Option<usize>>,
    active: usize,
}

impl DistanceMatrix {
    /// Build a matrix from an `N x N` array, assigning `ids[i]` to row `i`.
    ///
    /// The upper triangle is stored; the diagonal is ignored. Every id, including
    /// those later passed to [`DistanceMatrix::remove_and_insert`], must be below
    /// `2 * N`, which is enough for the `N - 1` merges of a full clustering.
    pub fn new<R: AsRef<[f64]>>(matrix: &[R], ids: &[ClusterId]) -> Result<Self, ClusteringError> {
        Self::with_tolerance(matrix, ids, SYMMETRY_TOLERANCE)
    }

    pub fn with_tolerance<R: AsRef<[f64]>>(
        matrix: &[R],
        ids: &[ClusterId],
        tolerance: f64,
    ) -> Result<Self, ClusteringError> {
        let n = matrix.len();
        if ids.len() != n {
            return Err(ClusteringError::InvalidDimension {
                expected: n,
                found: ids.len(),
            });
        }
        if let Some(row) = matrix.iter().map(|row| row.as_ref()).find(|row| row.len() != n) {
            return Err(ClusteringError::InvalidDimension {
                expected: n,
                found: row.len(),
            });
        }

        let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for (i, j) in (0..n).tuple_combinations() {
            let upper = matrix[i].as_ref()[j];
            let lower = matrix[j].as_ref()[i];
            check_distance(i, j, upper)?;
            check_distance(j, i, lower)?;
            let scale = upper.abs().max(lower.abs()).max(1.0);
            if (upper - lower).abs() > tolerance * scale {
                return Err(ClusteringError::AsymmetricInput {
                    row: i,
                    col: j,
                    upper,
                    lower,
                });
            }
            // Normalize -0.0 so the closest pair search sees a single zero
            condensed.push(upper + 0.0);
        }

        let mut positions = vec![None; 2 * n];
        for (slot, id) in ids.iter().enumerate() {
            match positions.get_mut(id.0) {
                Some(position) if position.is_none() => *position = Some(slot),
                _ => return Err(ClusteringError::InvalidIndex(*id)),
            }
        }

        Ok(Self {
            condensed,
            slots: ids.iter().copied().map(Some).collect(),
            positions,
            active: n,
        })
    }

    /// The number of active clusters
    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    pub fn contains(&self, id: ClusterId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Iterate over the active cluster ids in input order
    pub fn active_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.slots.iter().flatten().copied()
    }

    fn slot_of(&self, id: ClusterId) -> Option<usize> {
        self.positions.get(id.0).copied().flatten()
    }

    fn get_slots(&self, i: usize, j: usize) -> f64 {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.condensed[condensed_index(self.slots.len(), i, j)]
    }

    /// Look up the distance between two distinct active clusters
    pub fn distance_between(&self, i: ClusterId, j: ClusterId) -> Result<f64, ClusteringError> {
        let slot_i = self.slot_of(i).ok_or(ClusteringError::InvalidIndex(i))?;
        let slot_j = self.slot_of(j).ok_or(ClusteringError::InvalidIndex(j))?;
        if slot_i == slot_j {
            return Err(ClusteringError::InvalidIndex(j));
        }
        Ok(self.get_slots(slot_i, slot_j))
    }

    /// Find the active pair with the smallest distance.
    ///
    /// Ties are broken in favor of the lowest `(first, second)` pair in input
    /// order, where a merged cluster is ordered by the earliest item it holds.
    pub fn find_closest_pair(&self) -> Result<ClusterPair, ClusteringError> {
        if self.active < 2 {
            return Err(ClusteringError::EmptyMatrix);
        }
        let n = self.slots.len();
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..(n - 1) {
            if self.slots[i].is_none() {
                continue;
            }
            let offset = condensed_index(n, i, i + 1);
            for j in (i + 1)..n {
                if self.slots[j].is_none() {
                    continue;
                }
                let d = self.condensed[offset + (j - i - 1)];
                let replace = match best {
                    Some((_, _, best_d)) => d.total_cmp(&best_d).is_lt(),
                    None => true,
                };
                if replace {
                    best = Some((i, j, d));
                }
            }
        }
        match best {
            Some((i, j, distance)) => match (self.slots[i], self.slots[j]) {
                (Some(first), Some(second)) => Ok(ClusterPair {
                    first,
                    second,
                    distance,
                }),
                _ => Err(ClusteringError::EmptyMatrix),
            },
            None => Err(ClusteringError::EmptyMatrix),
        }
    }

    /// Retire `retired_a` and `retired_b` and insert `new_id` in their place.
    ///
    /// `new_distances` must hold exactly one distance for every other active
    /// cluster, and `new_id` must be below twice the original number of rows.
    /// Nothing is modified if any argument is invalid.
    pub fn remove_and_insert(
        &mut self,
        retired_a: ClusterId,
        retired_b: ClusterId,
        new_id: ClusterId,
        new_distances: &[(ClusterId, f64)],
    ) -> Result<(), ClusteringError> {
        let slot_a = self
            .slot_of(retired_a)
            .ok_or(ClusteringError::InvalidIndex(retired_a))?;
        let slot_b = self
            .slot_of(retired_b)
            .ok_or(ClusteringError::InvalidIndex(retired_b))?;
        if slot_a == slot_b {
            return Err(ClusteringError::InvalidIndex(retired_b));
        }
        if new_id.0 >= self.positions.len() || self.contains(new_id) {
            return Err(ClusteringError::InvalidIndex(new_id));
        }
        if new_distances.len() != self.active - 2 {
            return Err(ClusteringError::InvalidDimension {
                expected: self.active - 2,
                found: new_distances.len(),
            });
        }

        let mut seen = vec![false; self.slots.len()];
        let mut targets = Vec::with_capacity(new_distances.len());
        for (other, distance) in new_distances.iter().copied() {
            let slot = match self.slot_of(other) {
                Some(slot) if slot != slot_a && slot != slot_b && !seen[slot] => slot,
                _ => return Err(ClusteringError::InvalidIndex(other)),
            };
            seen[slot] = true;
            targets.push((slot, distance + 0.0));
        }

        let (keep, vacate) = if slot_a < slot_b {
            (slot_a, slot_b)
        } else {
            (slot_b, slot_a)
        };
        let n = self.slots.len();
        for (slot, distance) in targets {
            let (i, j) = if slot < keep { (slot, keep) } else { (keep, slot) };
            self.condensed[condensed_index(n, i, j)] = distance;
        }

        self.positions[retired_a.0] = None;
        self.positions[retired_b.0] = None;
        self.positions[new_id.0] = Some(keep);
        self.slots[keep] = Some(new_id);
        self.slots[vacate] = None;
        self.active -= 1;
        Ok(())
    }
}

fn check_distance(row: usize, col: usize, value: f64) -> Result<(), ClusteringError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ClusteringError::InvalidDistance { row, col, value })
    }
}
