//! A basic demonstration of how to use [`mzcluster::ClusteringAlgorithm`]

use mzcluster::{ClusteringAlgorithm, ClusteringError, Linkage, MergeLabeling};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ClusteringError> {
    // Show the per-merge trace when run with RUST_LOG=trace
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Distances between five samples, e.g. one minus a normalized alignment score.
    // Computing these is up to the caller.
    let labels = ["QC_1", "QC_2", "Blank", "Treated_1", "Treated_2"];
    let distances = vec![
        vec![0.00, 0.12, 0.81, 0.45, 0.47],
        vec![0.12, 0.00, 0.79, 0.44, 0.49],
        vec![0.81, 0.79, 0.00, 0.90, 0.88],
        vec![0.45, 0.44, 0.90, 0.00, 0.20],
        vec![0.47, 0.49, 0.88, 0.20, 0.00],
    ];

    // Complete linkage keeps clusters compact. Every merge is labeled by joining
    // its children's names.
    let algorithm = ClusteringAlgorithm::new(Linkage::Complete)
        .with_labeling(MergeLabeling::Concatenate);
    let dendrogram = algorithm.cluster(&distances, &labels)?;

    println!("{}", dendrogram.root());

    for step in dendrogram.steps() {
        println!(
            "{} + {} -> {} at {:.3} ({} items)",
            step.left, step.right, step.merged, step.distance, step.size
        );
    }

    // Cut into flat groups below a distance of 0.5
    for (i, group) in dendrogram.root().cut_at_distance(0.5).iter().enumerate() {
        println!("group {i}: {:?}", group.leaf_labels());
    }
    Ok(())
}
