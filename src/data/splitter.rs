// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples and splits them into a training set (used to
// fit the tree) and a held-out test set (used for accuracy).
//
// Stratified: each class is split on its own, so the class
// proportions of both sets follow the full dataset. Every class
// keeps at least one row in the training set, otherwise the tree
// could never predict it.
//
// Seeded with `random_state` so the same dataset always produces
// the same split (and the same logged accuracy).

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Randomly split `samples` into (train, test), stratified by `labels`.
///
/// `labels[i]` is the class of `samples[i]`; both slices must have
/// the same length.
///
/// ```ignore
/// let (train, test) = stratified_split(rows, &targets, 0.3, 42);
/// ```
pub fn stratified_split<T>(
    samples:   Vec<T>,
    labels:    &[usize],
    test_size: f64,
    seed:      u64,
) -> (Vec<T>, Vec<T>) {
    assert_eq!(samples.len(), labels.len(), "one label per sample");

    let mut rng = StdRng::seed_from_u64(seed);

    // Group sample indices by class; BTreeMap keeps class order stable
    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    let mut train_idx = Vec::with_capacity(samples.len());
    let mut test_idx  = Vec::new();

    for indices in by_class.values_mut() {
        indices.shuffle(&mut rng);

        let n      = indices.len();
        let n_test = ((n as f64) * test_size).round() as usize;
        let n_test = n_test.min(n.saturating_sub(1));

        test_idx.extend_from_slice(&indices[..n_test]);
        train_idx.extend_from_slice(&indices[n_test..]);
    }

    // Interleave classes again
    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    let mut slots: Vec<Option<T>> = samples.into_iter().map(Some).collect();
    let mut take = |ids: &[usize]| -> Vec<T> {
        ids.iter().filter_map(|&i| slots[i].take()).collect()
    };
    let train = take(&train_idx);
    let test  = take(&test_idx);

    tracing::debug!(
        "Stratified split: {} train, {} test over {} classes",
        train.len(),
        test.len(),
        by_class.len(),
    );

    (train, test)
}
