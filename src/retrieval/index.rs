// src/retrieval/index.rs
//! Brute-force cosine index over the embedded exercise catalog.
//!
//! The corpus is small (a catalog file, not a datastore), so search is a
//! normalized dot product against every entry. The index is built once at
//! startup and never mutated; refresh means building a new one with
//! `from_catalog_file` and swapping the `Arc`.

use std::path::Path;

use thiserror::Error;

use crate::model::{GenerativeModel, ModelError};
use crate::retrieval::catalog::{load_catalog, CatalogError, ExerciseRecord};

/// Number of nearest exercises pulled into the workout plan prompt.
pub const RETRIEVAL_K: usize = 12;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to embed catalog: {0}")]
    Embedding(#[from] ModelError),
}

struct IndexEntry {
    record: ExerciseRecord,
    vector: Vec<f32>,
}

pub struct ExerciseIndex {
    entries: Vec<IndexEntry>,
}

impl ExerciseIndex {
    /// Embed every record once and keep the normalized vectors alongside.
    pub async fn build(
        model: &dyn GenerativeModel,
        records: Vec<ExerciseRecord>,
    ) -> Result<Self, IndexError> {
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let mut vector = model.embed(&record.embedding_text()).await?;
            normalize(&mut vector);
            entries.push(IndexEntry { record, vector });
        }
        Ok(Self { entries })
    }

    /// Load the catalog file and build the index. Also the documented
    /// refresh procedure: call again and swap the result in.
    pub async fn from_catalog_file(
        model: &dyn GenerativeModel,
        path: &Path,
    ) -> Result<Self, IndexError> {
        let records = load_catalog(path)?;
        Self::build(model, records).await
    }

    /// Embed the query and return the top-k records by cosine similarity.
    pub async fn search(
        &self,
        model: &dyn GenerativeModel,
        query: &str,
        k: usize,
    ) -> Result<Vec<&ExerciseRecord>, ModelError> {
        let mut query_vector = model.embed(query).await?;
        normalize(&mut query_vector);
        Ok(self
            .top_k(&query_vector, k)
            .into_iter()
            .map(|entry| &entry.record)
            .collect())
    }

    fn top_k(&self, query: &[f32], k: usize) -> Vec<&IndexEntry> {
        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| (dot(&entry.vector, query), entry))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(k).map(|(_, entry)| entry).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(vector: &mut [f32]) {
    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for value in vector.iter_mut() {
            *value /= magnitude;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ExerciseRecord {
        ExerciseRecord {
            name: name.to_string(),
            target_muscle: "Chest".to_string(),
            description: "test".to_string(),
            difficulty: "Beginner".to_string(),
            exercise_type: "Strength".to_string(),
            image_url: String::new(),
            video_url: String::new(),
        }
    }

    fn index_with(vectors: Vec<(&str, Vec<f32>)>) -> ExerciseIndex {
        ExerciseIndex {
            entries: vectors
                .into_iter()
                .map(|(name, mut vector)| {
                    normalize(&mut vector);
                    IndexEntry {
                        record: record(name),
                        vector,
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn test_aligned_vectors_rank_above_orthogonal() {
        let index = index_with(vec![
            ("orthogonal", vec![0.0, 1.0, 0.0]),
            ("aligned", vec![1.0, 0.0, 0.0]),
            ("opposed", vec![-1.0, 0.0, 0.0]),
        ]);

        let mut query = vec![1.0, 0.0, 0.0];
        normalize(&mut query);

        let top = index.top_k(&query, 3);
        assert_eq!(top[0].record.name, "aligned");
        assert_eq!(top[1].record.name, "orthogonal");
        assert_eq!(top[2].record.name, "opposed");
    }

    #[test]
    fn test_k_caps_results() {
        let index = index_with(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.9, 0.1]),
            ("c", vec![0.0, 1.0]),
        ]);

        let query = vec![1.0, 0.0];
        assert_eq!(index.top_k(&query, 2).len(), 2);
        // k larger than the corpus returns everything, no padding
        assert_eq!(index.top_k(&query, 10).len(), 3);
    }

    #[tokio::test]
    async fn test_build_embeds_every_record() {
        let model = crate::model::mock::MockModel::replying("unused");
        let index = ExerciseIndex::build(&model, vec![record("Push-up"), record("Squat")])
            .await
            .unwrap();
        assert_eq!(index.len(), 2);

        let hits = index.search(&model, "chest workout", RETRIEVAL_K).await.unwrap();
        assert_eq!(hits.len(), 2);
    }
}
