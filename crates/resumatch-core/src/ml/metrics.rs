//! Accuracy and per-class precision/recall/F1.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scores for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples of this class.
    pub support: usize,
}

/// Evaluation of predictions against ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl ClassificationReport {
    /// Compare `predicted` with `actual`; `labels[i]` names class `i`.
    ///
    /// Undefined precision/recall (zero denominators) count as 0.
    pub fn compute(actual: &[usize], predicted: &[usize], labels: &[String]) -> Self {
        let correct = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();

        let classes = labels
            .iter()
            .enumerate()
            .map(|(class, label)| {
                let tp = actual.iter().zip(predicted).filter(|&(&a, &p)| a == class && p == class).count();
                let predicted_n = predicted.iter().filter(|&&p| p == class).count();
                let support = actual.iter().filter(|&&a| a == class).count();

                let precision = ratio(tp, predicted_n);
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        Self {
            accuracy: ratio(correct, actual.len()),
            classes,
        }
    }

    /// Unweighted mean F1 over classes with support.
    pub fn macro_f1(&self) -> f64 {
        let supported: Vec<_> = self.classes.iter().filter(|c| c.support > 0).collect();
        if supported.is_empty() {
            return 0.0;
        }
        supported.iter().map(|c| c.f1).sum::<f64>() / supported.len() as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.classes.iter().map(|c| c.label.len()).max().unwrap_or(0).max(12);

        writeln!(f, "{:>width$} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }
        let total: usize = self.classes.iter().map(|c| c.support).sum();
        writeln!(f)?;
        writeln!(f, "{:>width$} {:>9} {:>9} {:>9.2} {:>9}", "accuracy", "", "", self.accuracy, total)?;
        write!(f, "{:>width$} {:>9} {:>9} {:>9.2} {:>9}", "macro f1", "", "", self.macro_f1(), total)
    }
}
