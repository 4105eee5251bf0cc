//! Train-or-load CTI classifier
//!
//! Two reachable states: Untrained (no persisted artifacts) and Ready.
//! `load_or_bootstrap` checks the store first and only falls back to
//! bootstrap training on the candidate corpus when nothing is
//! persisted. A cold start therefore yields a model trained on
//! heuristic (noisy) labels; this is a documented quality caveat of
//! bootstrap training, not a defect.

use crate::heuristic::HeuristicLabeler;
use crate::model::LogisticRegression;
use crate::report::ClassificationReport;
use crate::store::ModelStore;
use crate::vectorizer::TfIdfVectorizer;
use ctistream_core::{Error, Label, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

/// Vocabulary cap for the bootstrap vectorizer
const MAX_FEATURES: usize = 1000;

/// Held-out fraction of the bootstrap corpus
const TEST_FRACTION: f64 = 0.2;

/// Seed for the reproducible train/test split
const SPLIT_SEED: u64 = 42;

/// A ready-to-predict classifier (vectorizer + model loaded in memory)
pub struct CtiClassifier {
    vectorizer: TfIdfVectorizer,
    model: LogisticRegression,
}

impl CtiClassifier {
    /// Load the persisted artifacts, or bootstrap-train on `candidates`
    /// when no model has been persisted yet.
    ///
    /// Bootstrap training heuristic-labels the candidates, fits the
    /// vectorizer and model on an 80/20 split, logs the held-out
    /// classification report, and persists both artifacts so the next
    /// invocation loads directly.
    pub fn load_or_bootstrap(store: &ModelStore, candidates: &[String]) -> Result<Self> {
        if store.exists() {
            let (vectorizer, model) = store.load()?;
            info!(dir = %store.dir().display(), "loaded persisted classifier");
            return Ok(Self { vectorizer, model });
        }

        warn!("no persisted classifier found, bootstrap training on heuristic labels");
        Self::bootstrap(store, candidates)
    }

    fn bootstrap(store: &ModelStore, candidates: &[String]) -> Result<Self> {
        if candidates.is_empty() {
            return Err(Error::model_unavailable(
                "bootstrap training needs a non-empty candidate set",
            ));
        }

        let labeler = HeuristicLabeler::new()?;
        let labels = labeler.label_all(candidates);

        let mut vectorizer = TfIdfVectorizer::new(MAX_FEATURES);
        vectorizer.fit(candidates);
        let features = vectorizer.transform_all(candidates);

        let (train_idx, test_idx) = train_test_split(candidates.len());
        let train_features: Vec<Vec<f64>> =
            train_idx.iter().map(|&i| features[i].clone()).collect();
        let train_labels: Vec<Label> = train_idx.iter().map(|&i| labels[i]).collect();

        let model = LogisticRegression::fit(&train_features, &train_labels);

        if test_idx.is_empty() {
            info!(
                samples = candidates.len(),
                "corpus too small for a held-out split, trained on all samples"
            );
        } else {
            let test_truth: Vec<Label> = test_idx.iter().map(|&i| labels[i]).collect();
            let test_predicted: Vec<Label> =
                test_idx.iter().map(|&i| model.predict(&features[i])).collect();
            let report = ClassificationReport::compute(&test_truth, &test_predicted);
            info!(
                held_out = test_idx.len(),
                vocabulary = vectorizer.vocabulary_size(),
                "bootstrap classification report:\n{report}"
            );
        }

        store.save(&vectorizer, &model)?;
        info!(dir = %store.dir().display(), "persisted bootstrap classifier artifacts");

        Ok(Self { vectorizer, model })
    }

    /// Predict labels for a batch of messages.
    ///
    /// Length- and order-preserving; deterministic for identical
    /// persisted model state.
    pub fn predict(&self, messages: &[String]) -> Vec<Label> {
        self.model.predict_all(&self.vectorizer.transform_all(messages))
    }
}

/// Seeded shuffle of `0..n` split into (train, test) index sets.
///
/// The test set gets `TEST_FRACTION` of the samples rounded down; for
/// tiny corpora it may be empty, in which case training uses everything.
fn train_test_split(n: usize) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = rand::rngs::StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let test_len = (n as f64 * TEST_FRACTION) as usize;
    let test = indices.split_off(n - test_len);
    (indices, test)
}
