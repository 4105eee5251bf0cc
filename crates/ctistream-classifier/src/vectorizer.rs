//! Bag-of-words TF-IDF vectorizer with a fixed vocabulary cap

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// TF-IDF vectorizer for text feature extraction.
///
/// Fitted on the bootstrap corpus; the vocabulary is capped at
/// `max_features` terms, selected by document frequency with an
/// alphabetical tie-break so fitting is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> feature index
    vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature index
    idf: Vec<f64>,

    /// Vocabulary cap applied during fit
    max_features: usize,

    /// Number of documents seen during fit
    n_documents: usize,
}

impl TfIdfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            max_features,
            n_documents: 0,
        }
    }

    /// Fit the vocabulary and IDF weights on the given corpus.
    pub fn fit(&mut self, documents: &[String]) {
        self.n_documents = documents.len();

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: std::collections::HashSet<String> = tokenize(doc).collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary: highest document frequency first,
        // alphabetical tie-break for determinism.
        let mut terms: Vec<(String, usize)> = document_frequency.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(self.max_features);

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, (term, df)) in terms.into_iter().enumerate() {
            // Smoothed IDF: ln((1 + N) / (1 + df)) + 1
            idf.push(((1.0 + self.n_documents as f64) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
    }

    /// Transform a document into an L2-normalized TF-IDF vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.vocabulary.len()];
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }

    /// Transform a batch of documents.
    pub fn transform_all(&self, documents: &[String]) -> Vec<Vec<f64>> {
        documents.iter().map(|d| self.transform(d)).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Lowercased alphanumeric tokens of length >= 2.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_lowercase())
}
