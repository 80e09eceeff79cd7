//! Seeded stratified splitting and minority oversampling.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Group sample indices by label, in label order.
fn by_label(labels: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(idx);
    }
    groups
}

/// Split sample indices into `(train, test)`, preserving class balance.
///
/// Each class contributes `round(len * test_fraction)` samples to the test
/// side, but always keeps at least one sample on the training side. Both
/// returned lists are sorted.
pub fn stratified_split(labels: &[usize], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for (_, mut indices) in by_label(labels) {
        indices.shuffle(&mut rng);
        let n_test = ((indices.len() as f64) * test_fraction).round() as usize;
        let n_test = n_test.min(indices.len() - 1);

        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    tracing::debug!("Stratified split: {} training, {} held out", train.len(), test.len());

    (train, test)
}

/// Resample `indices` so every class matches the largest one, when the
/// largest/smallest class ratio exceeds `max_ratio`.
///
/// Returns the original indices unchanged otherwise.
pub fn oversample(indices: &[usize], labels: &[usize], max_ratio: f64, seed: u64) -> Vec<usize> {
    let subset: Vec<usize> = indices.iter().map(|&i| labels[i]).collect();
    let groups = by_label(&subset);
    if groups.len() < 2 {
        return indices.to_vec();
    }

    let largest = groups.values().map(Vec::len).max().unwrap_or(0);
    let smallest = groups.values().map(Vec::len).min().unwrap_or(0);
    if smallest == 0 || (largest as f64) / (smallest as f64) <= max_ratio {
        return indices.to_vec();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut resampled = indices.to_vec();
    for positions in groups.values() {
        for _ in positions.len()..largest {
            let pick = positions[rng.gen_range(0..positions.len())];
            resampled.push(indices[pick]);
        }
    }

    tracing::debug!(
        "Oversampled {} -> {} samples (class ratio {:.1})",
        indices.len(),
        resampled.len(),
        largest as f64 / smallest as f64
    );

    resampled
}
