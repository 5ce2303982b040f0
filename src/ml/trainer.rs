// ============================================================
// Layer 5 — Training
// ============================================================
// Fit the pipeline on the training split and score it on the
// held-out split:
//
//   accuracy = correct predictions / test rows
//
// An empty test split (tiny datasets) scores against the training
// rows instead, so a metric is always logged.

use crate::domain::error::PredictorResult;
use crate::ml::features::FeatureRow;
use crate::ml::pipeline::{Pipeline, TreeParams};

/// Outcome of one fit.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub pipeline:   Pipeline,
    pub accuracy:   f64,
    pub train_rows: usize,
    pub test_rows:  usize,
}

pub fn run_training(
    train:     (&[FeatureRow], &[usize]),
    test:      (&[FeatureRow], &[usize]),
    n_classes: usize,
    params:    &TreeParams,
) -> PredictorResult<TrainingOutcome> {
    let (train_x, train_y) = train;
    let (test_x, test_y)   = test;

    tracing::info!(
        "Fitting decision tree: max_depth={} min_samples_leaf={}",
        params.max_depth,
        params.min_samples_leaf
    );
    let pipeline = Pipeline::fit(train_x, train_y, n_classes, params)?;

    let (eval_x, eval_y) = if test_x.is_empty() {
        tracing::warn!("Empty test split, scoring on the training rows");
        (train_x, train_y)
    } else {
        (test_x, test_y)
    };

    let predicted = pipeline.predict_rows(eval_x)?;
    let accuracy  = accuracy_score(eval_y, &predicted);

    tracing::info!("Model accuracy: {:.2}", accuracy);

    Ok(TrainingOutcome {
        pipeline,
        accuracy,
        train_rows: train_x.len(),
        test_rows:  test_x.len(),
    })
}

/// Fraction of positions where `truth` and `predicted` agree.
pub fn accuracy_score(truth: &[usize], predicted: &[usize]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    correct as f64 / truth.len() as f64
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::PredictionRequest;

    #[test]
    fn test_accuracy_score() {
        assert_eq!(accuracy_score(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75);
        assert_eq!(accuracy_score(&[], &[]), 0.0);
    }

    #[test]
    fn test_separable_data_scores_perfectly() {
        let row = |c: &str, n: &str, a: i64| FeatureRow::from(&PredictionRequest::new(c, n, a));
        let train_x = vec![
            row("Inter Miami", "Argentina", 38),
            row("Inter Miami", "Argentina", 39),
            row("Liverpool", "Egypt", 31),
            row("Liverpool", "Egypt", 33),
        ];
        let test_x = vec![row("Inter Miami", "Argentina", 37), row("Liverpool", "Egypt", 32)];

        let outcome = run_training(
            (train_x.as_slice(), &[0, 0, 1, 1][..]),
            (test_x.as_slice(), &[0, 1][..]),
            2,
            &TreeParams::default(),
        )
        .unwrap();

        assert_eq!(outcome.accuracy, 1.0);
        assert_eq!(outcome.train_rows, 4);
        assert_eq!(outcome.test_rows, 2);
    }
}
