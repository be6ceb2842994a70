use std::collections::HashMap;

use super::model::{EssayDocument, EssayPoint, RetrievedEssay};
use crate::retrieval::{EssayIndex, RetrievalError, WriteConsistency};

/// In-memory index with brute-force cosine search, for tests.
#[derive(Default)]
pub struct MockEssayIndex {
    collections: std::sync::RwLock<HashMap<String, MockCollection>>,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<u64, StoredEssay>,
}

#[derive(Clone)]
struct StoredEssay {
    vector: Vec<f32>,
    document: EssayDocument,
}

impl MockEssayIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }
}

impl EssayIndex for MockEssayIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), RetrievalError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| RetrievalError::CreateCollectionFailed {
                    collection: name.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        collections.entry(name.to_string()).or_insert(MockCollection {
            vector_size,
            points: HashMap::new(),
        });

        Ok(())
    }

    async fn upsert(
        &self,
        collection: &str,
        points: Vec<EssayPoint>,
        _consistency: WriteConsistency,
    ) -> Result<(), RetrievalError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| RetrievalError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| RetrievalError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(RetrievalError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.insert(
                point.id,
                StoredEssay {
                    vector: point.vector,
                    document: point.document,
                },
            );
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> Result<Vec<RetrievedEssay>, RetrievalError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| RetrievalError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| RetrievalError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        let mut results: Vec<RetrievedEssay> = coll
            .points
            .iter()
            .map(|(&id, p)| RetrievedEssay {
                id,
                score: cosine_similarity(&query, &p.vector),
                band: p.document.band.clone(),
                content: p.document.content.clone(),
            })
            .filter(|hit| hit.score >= score_threshold)
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(limit as usize);
        Ok(results)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
