//! ctistream Classifiers
//!
//! Binary CTI / Non-CTI text classification with a bootstrap-training
//! fallback for cold starts.
//!
//! The model is deliberately boring: a bag-of-words TF-IDF vectorizer
//! with a capped vocabulary feeding a logistic-regression head. On a
//! cold start the corpus is labeled by a fixed keyword heuristic and
//! the fitted artifacts are persisted, so later runs load directly.

pub mod classifier;
pub mod heuristic;
pub mod model;
pub mod report;
pub mod store;
pub mod vectorizer;

pub use classifier::CtiClassifier;
pub use heuristic::{HeuristicLabeler, CTI_KEYWORDS};
pub use model::LogisticRegression;
pub use report::{ClassMetrics, ClassificationReport};
pub use store::ModelStore;
pub use vectorizer::TfIdfVectorizer;
