//! Black-box probabilistic classifiers over dense feature matrices.

use std::fmt::Debug;

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::TrainingError;
use crate::models::config::{ClassifierKind, TrainingConfig};

/// A fit/predict classifier with probability output.
///
/// Labels are class indices in `0..n_classes`.
pub trait Classifier: Debug + Send + Sync {
    /// Human-readable model name.
    fn name(&self) -> &'static str;

    /// Fit on rows of `x` with labels `y`.
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[usize], n_classes: usize) -> Result<(), TrainingError>;

    /// Class probabilities, one row per sample.
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Array2<f64>;

    /// Most probable class per sample.
    fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<usize> {
        self.predict_proba(x).rows().into_iter().map(|row| argmax(row.iter())).collect()
    }
}

/// Build an unfitted classifier of the given kind.
pub fn build_classifier(kind: ClassifierKind, config: &TrainingConfig) -> Box<dyn Classifier> {
    match kind {
        ClassifierKind::LogisticRegression => Box::new(
            LogisticRegression::new()
                .with_epochs(config.epochs)
                .with_learning_rate(config.learning_rate),
        ),
        ClassifierKind::NaiveBayes => Box::new(NaiveBayes::new()),
        ClassifierKind::NearestCentroid => Box::new(NearestCentroid::new()),
    }
}

/// Index of the largest value; first wins on ties.
pub fn argmax<'a>(values: impl Iterator<Item = &'a f64>) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (idx, &value) in values.enumerate() {
        if value > best.1 {
            best = (idx, value);
        }
    }
    best.0
}

/// Row-wise softmax, in place.
fn softmax_rows(scores: &mut Array2<f64>) {
    for mut row in scores.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        if sum > 0.0 {
            row /= sum;
        }
    }
}

fn check_input(name: &str, x: &ArrayView2<'_, f64>, y: &[usize], n_classes: usize) -> Result<(), TrainingError> {
    let fail = |reason: String| TrainingError::Fit {
        model: name.to_string(),
        reason,
    };

    if x.nrows() == 0 {
        return Err(fail("no samples".to_string()));
    }
    if x.nrows() != y.len() {
        return Err(fail(format!("{} rows but {} labels", x.nrows(), y.len())));
    }
    if let Some(&bad) = y.iter().find(|&&label| label >= n_classes) {
        return Err(fail(format!("label {bad} out of range for {n_classes} classes")));
    }
    Ok(())
}

fn one_hot(y: &[usize], n_classes: usize) -> Array2<f64> {
    let mut encoded = Array2::zeros((y.len(), n_classes));
    for (row, &label) in y.iter().enumerate() {
        encoded[[row, label]] = 1.0;
    }
    encoded
}

/// Multinomial logistic regression trained by batch gradient descent.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    epochs: usize,
    learning_rate: f64,
    l2: f64,
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.5,
            l2: 1e-4,
            weights: Array2::zeros((0, 0)),
            bias: Array1::zeros(0),
        }
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs.max(1);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    fn scores(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        x.dot(&self.weights) + &self.bias
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &'static str {
        "Logistic Regression"
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[usize], n_classes: usize) -> Result<(), TrainingError> {
        check_input(self.name(), &x, y, n_classes)?;

        let n = x.nrows() as f64;
        let targets = one_hot(y, n_classes);
        self.weights = Array2::zeros((x.ncols(), n_classes));
        self.bias = Array1::zeros(n_classes);

        for _ in 0..self.epochs {
            let mut probs = self.scores(x);
            softmax_rows(&mut probs);
            let error = probs - &targets;

            let grad_w = x.t().dot(&error) / n + &self.weights * self.l2;
            let grad_b = error.sum_axis(Axis(0)) / n;

            self.weights.scaled_add(-self.learning_rate, &grad_w);
            self.bias.scaled_add(-self.learning_rate, &grad_b);
        }

        Ok(())
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut probs = self.scores(x);
        softmax_rows(&mut probs);
        probs
    }
}

/// Multinomial naive Bayes with additive smoothing.
///
/// Expects non-negative features (counts or TF-IDF weights).
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    alpha: f64,
    class_log_prior: Array1<f64>,
    feature_log_prob: Array2<f64>,
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            class_log_prior: Array1::zeros(0),
            feature_log_prob: Array2::zeros((0, 0)),
        }
    }
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for NaiveBayes {
    fn name(&self) -> &'static str {
        "Naive Bayes"
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[usize], n_classes: usize) -> Result<(), TrainingError> {
        check_input(self.name(), &x, y, n_classes)?;
        if x.iter().any(|&v| v < 0.0) {
            return Err(TrainingError::Fit {
                model: self.name().to_string(),
                reason: "negative feature values".to_string(),
            });
        }

        let n_features = x.ncols();
        let mut class_counts = vec![0usize; n_classes];
        let mut feature_sums = Array2::<f64>::zeros((n_classes, n_features));

        for (row, &label) in x.rows().into_iter().zip(y) {
            class_counts[label] += 1;
            let mut sums = feature_sums.row_mut(label);
            sums += &row;
        }

        let total = y.len() as f64;
        self.class_log_prior = class_counts
            .iter()
            .map(|&count| {
                // Absent classes get a vanishing but finite prior.
                (count.max(1) as f64 / total).ln() - if count == 0 { 1e3 } else { 0.0 }
            })
            .collect();

        feature_sums += self.alpha;
        for mut row in feature_sums.rows_mut() {
            let norm = row.sum().ln();
            row.mapv_inplace(|v| v.ln() - norm);
        }
        self.feature_log_prob = feature_sums;

        Ok(())
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut joint = x.dot(&self.feature_log_prob.t()) + &self.class_log_prior;
        softmax_rows(&mut joint);
        joint
    }
}

/// Cosine nearest-centroid classifier with softmax-scaled similarities.
#[derive(Debug, Clone)]
pub struct NearestCentroid {
    temperature: f64,
    centroids: Array2<f64>,
}

impl NearestCentroid {
    pub fn new() -> Self {
        Self {
            temperature: 0.1,
            centroids: Array2::zeros((0, 0)),
        }
    }
}

impl Default for NearestCentroid {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for NearestCentroid {
    fn name(&self) -> &'static str {
        "Nearest Centroid"
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[usize], n_classes: usize) -> Result<(), TrainingError> {
        check_input(self.name(), &x, y, n_classes)?;

        let mut centroids = Array2::<f64>::zeros((n_classes, x.ncols()));
        for (row, &label) in x.rows().into_iter().zip(y) {
            let mut centroid = centroids.row_mut(label);
            centroid += &row;
        }
        for mut centroid in centroids.rows_mut() {
            let norm = centroid.dot(&centroid).sqrt();
            if norm > 0.0 {
                centroid /= norm;
            }
        }
        self.centroids = centroids;

        Ok(())
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut similarity = x.dot(&self.centroids.t());
        for (mut sims, row) in similarity.rows_mut().into_iter().zip(x.rows()) {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                sims /= norm;
            }
        }
        similarity /= self.temperature;
        softmax_rows(&mut similarity);
        similarity
    }
}
