//! The built-in linkage methods
//!
//! Each method is a parameterization of the Lance–Williams recurrence, which
//! expresses the distance from a freshly merged cluster `AB` to some other
//! cluster `C` in terms of the distances known before the merge:
//!
//! ```math
//! d(AB, C) = \alpha_A d(A, C) + \alpha_B d(B, C) + \beta d(A, B) + \gamma |d(A, C) - d(B, C)|
//! ```
//!
//! | Linkage | Update | Monotonic |
//! |---------|--------|-----------|
//! | Single | $`\min(d_{AC}, d_{BC})`$ | yes |
//! | Complete | $`\max(d_{AC}, d_{BC})`$ | yes |
//! | Average (UPGMA) | $`\frac{n_A d_{AC} + n_B d_{BC}}{n_A + n_B}`$ | yes |
//! | Weighted (WPGMA) | $`\frac{d_{AC} + d_{BC}}{2}`$ | yes |
//! | Ward | variance increase | yes |
//! | Centroid | distance between centroids | no |
//! | Median | distance between WPGMA centroids | no |
//!
//! Ward, centroid and median linkage are only meaningful for Euclidean
//! distances. They apply the recurrence to squared distances and report the
//! result in the units of the input.
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::cluster_traits::LinkageStrategy;

/// A linkage method from the Lance–Williams family
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Linkage {
    /// The minimum distance between any two members
    Single,
    /// The maximum distance between any two members
    Complete,
    /// The mean distance between all pairs of members (UPGMA)
    #[default]
    Average,
    /// The mean of the two merged clusters' distances, ignoring their sizes (WPGMA)
    Weighted,
    /// The increase in within-cluster variance
    Ward,
    /// The distance between cluster centroids (UPGMC)
    Centroid,
    /// The distance between cluster midpoints (WPGMC)
    Median,
}

impl Linkage {
    pub const ALL: [Linkage; 7] = [
        Linkage::Single,
        Linkage::Complete,
        Linkage::Average,
        Linkage::Weighted,
        Linkage::Ward,
        Linkage::Centroid,
        Linkage::Median,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
            Linkage::Weighted => "weighted",
            Linkage::Ward => "ward",
            Linkage::Centroid => "centroid",
            Linkage::Median => "median",
        }
    }
}

#[inline]
fn clamped_sqrt(value: f64) -> f64 {
    value.max(0.0).sqrt()
}

impl LinkageStrategy for Linkage {
    #[inline]
    fn distance_to_merged(
        &self,
        dist_ac: f64,
        dist_bc: f64,
        dist_ab: f64,
        size_a: f64,
        size_b: f64,
        size_c: f64,
    ) -> f64 {
        match self {
            Linkage::Single => dist_ac.min(dist_bc),
            Linkage::Complete => dist_ac.max(dist_bc),
            Linkage::Average => (size_a * dist_ac + size_b * dist_bc) / (size_a + size_b),
            Linkage::Weighted => (dist_ac + dist_bc) / 2.0,
            Linkage::Ward => {
                let total = size_a + size_b + size_c;
                clamped_sqrt(
                    ((size_a + size_c) * dist_ac * dist_ac
                        + (size_b + size_c) * dist_bc * dist_bc
                        - size_c * dist_ab * dist_ab)
                        / total,
                )
            }
            Linkage::Centroid => {
                let merged = size_a + size_b;
                clamped_sqrt(
                    (size_a * dist_ac * dist_ac + size_b * dist_bc * dist_bc) / merged
                        - (size_a * size_b * dist_ab * dist_ab) / (merged * merged),
                )
            }
            Linkage::Median => clamped_sqrt(
                0.5 * dist_ac * dist_ac + 0.5 * dist_bc * dist_bc - 0.25 * dist_ab * dist_ab,
            ),
        }
    }

    fn is_monotonic(&self) -> bool {
        !matches!(self, Linkage::Centroid | Linkage::Median)
    }
}

impl Display for Linkage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown linkage method {0:?}")]
pub struct LinkageParseError(pub String);

impl FromStr for Linkage {
    type Err = LinkageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "min" => Ok(Linkage::Single),
            "complete" | "max" => Ok(Linkage::Complete),
            "average" | "upgma" | "mean" => Ok(Linkage::Average),
            "weighted" | "wpgma" => Ok(Linkage::Weighted),
            "ward" => Ok(Linkage::Ward),
            "centroid" | "upgmc" => Ok(Linkage::Centroid),
            "median" | "wpgmc" => Ok(Linkage::Median),
            _ => Err(LinkageParseError(s.to_string())),
        }
    }
}
