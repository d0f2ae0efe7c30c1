#![allow(dead_code)]

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Points scattered uniformly over a 100 x 100 square, reproducible from `seed`
pub fn random_points(n: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.random::<f64>() * 100.0, rng.random::<f64>() * 100.0])
        .collect()
}

pub fn euclidean_matrix(points: &[[f64; 2]]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = points[i][0] - points[j][0];
            let dy = points[i][1] - points[j][1];
            let d = (dx * dx + dy * dy).sqrt();
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    matrix
}

pub fn condensed(matrix: &[Vec<f64>]) -> Vec<f64> {
    let n = matrix.len();
    let mut values = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            values.push(matrix[i][j]);
        }
    }
    values
}

pub fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item{i}")).collect()
}

pub fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

pub fn assert_all_close(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (x - y).abs() <= tolerance * x.abs().max(1.0),
            "Mismatch at {i}: {x} != {y}"
        );
    }
}
