//! Persistence for the trained vectorizer and model artifacts
//!
//! Two opaque artifact slots at fixed locations under a model
//! directory. The store is checked with `exists()` before the
//! load-or-bootstrap branch; a missing artifact is a state, not an
//! error to catch.

use crate::model::LogisticRegression;
use crate::vectorizer::TfIdfVectorizer;
use ctistream_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
const MODEL_FILE: &str = "cti_classifier_model.json";

/// Filesystem store for the two classifier artifacts
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Both artifacts are present.
    pub fn exists(&self) -> bool {
        self.vectorizer_path().is_file() && self.model_path().is_file()
    }

    /// Load the persisted (vectorizer, model) pair.
    pub fn load(&self) -> Result<(TfIdfVectorizer, LogisticRegression)> {
        let vectorizer = serde_json::from_str(&fs::read_to_string(self.vectorizer_path())?)?;
        let model = serde_json::from_str(&fs::read_to_string(self.model_path())?)?;
        Ok((vectorizer, model))
    }

    /// Persist both artifacts, creating the store directory if needed.
    pub fn save(&self, vectorizer: &TfIdfVectorizer, model: &LogisticRegression) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.vectorizer_path(), serde_json::to_string(vectorizer)?)?;
        fs::write(self.model_path(), serde_json::to_string(model)?)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
