//! Held-out classification report for bootstrap training

use ctistream_core::Label;

/// Precision/recall/F1 for one class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics over a held-out split
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub cti: ClassMetrics,
    pub non_cti: ClassMetrics,
}

impl ClassificationReport {
    /// Compute metrics from paired truth/prediction sequences.
    pub fn compute(truth: &[Label], predicted: &[Label]) -> Self {
        Self {
            cti: class_metrics(truth, predicted, Label::Cti),
            non_cti: class_metrics(truth, predicted, Label::NonCti),
        }
    }
}

fn class_metrics(truth: &[Label], predicted: &[Label], class: Label) -> ClassMetrics {
    let mut true_positive = 0usize;
    let mut false_positive = 0usize;
    let mut false_negative = 0usize;
    let mut support = 0usize;

    for (&t, &p) in truth.iter().zip(predicted) {
        if t == class {
            support += 1;
        }
        match (t == class, p == class) {
            (true, true) => true_positive += 1,
            (false, true) => false_positive += 1,
            (true, false) => false_negative += 1,
            (false, false) => {}
        }
    }

    let precision = ratio(true_positive, true_positive + false_positive);
    let recall = ratio(true_positive, true_positive + false_negative);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics {
        precision,
        recall,
        f1,
        support,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl std::fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>10} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1", "support"
        )?;
        for (name, m) in [("CTI", &self.cti), ("Non-CTI", &self.non_cti)] {
            writeln!(
                f,
                "{:>10} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
