use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use std::collections::HashMap;

use super::error::RetrievalError;
use super::model::{EssayPoint, RetrievedEssay};
use crate::retrieval::WriteConsistency;

/// Minimal async interface the scorer and the ingestor depend on.
pub trait EssayIndex: Send + Sync {
    /// Ensures a collection exists.
    fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<(), RetrievalError>> + Send;

    /// Upserts essay points.
    fn upsert(
        &self,
        collection: &str,
        points: Vec<EssayPoint>,
        consistency: WriteConsistency,
    ) -> impl std::future::Future<Output = Result<(), RetrievalError>> + Send;

    /// Searches for similar essays, keeping only hits at or above
    /// `score_threshold`.
    fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> impl std::future::Future<Output = Result<Vec<RetrievedEssay>, RetrievalError>> + Send;
}

#[derive(Clone)]
/// Qdrant-backed essay index.
pub struct QdrantEssayIndex {
    client: Qdrant,
    url: String,
}

impl QdrantEssayIndex {
    /// Creates an index client for `url`.
    pub async fn new(url: &str) -> Result<Self, RetrievalError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| RetrievalError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), RetrievalError> {
        self.client
            .health_check()
            .await
            .map_err(|e| RetrievalError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Creates a collection with cosine distance.
    pub async fn create_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), RetrievalError> {
        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| RetrievalError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn ensure_collection_inner(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), RetrievalError> {
        let exists = self.client.collection_exists(name).await.map_err(|e| {
            RetrievalError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            }
        })?;

        if !exists {
            self.create_collection(name, vector_size).await?;
        }

        Ok(())
    }

    async fn upsert_inner(
        &self,
        collection: &str,
        points: Vec<EssayPoint>,
        consistency: WriteConsistency,
    ) -> Result<(), RetrievalError> {
        if points.is_empty() {
            return Ok(());
        }

        let qdrant_points: Vec<PointStruct> = points
            .into_iter()
            .map(|p| {
                let doc = p.document;
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("content".to_string(), doc.content.into());
                payload.insert("band".to_string(), doc.band.into());
                payload.insert("question".to_string(), doc.question.into());
                payload.insert("topic".to_string(), doc.topic.into());
                payload.insert("word_count".to_string(), (doc.word_count as i64).into());
                payload.insert("source_line".to_string(), (doc.source_line as i64).into());

                PointStruct::new(p.id, p.vector, payload)
            })
            .collect();

        self.client
            .upsert_points(
                UpsertPointsBuilder::new(collection, qdrant_points).wait(consistency.into()),
            )
            .await
            .map_err(|e| RetrievalError::UpsertFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn search_inner(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> Result<Vec<RetrievedEssay>, RetrievalError> {
        let search_builder = SearchPointsBuilder::new(collection, query, limit)
            .with_payload(true)
            .score_threshold(score_threshold);

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| RetrievalError::SearchFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        let results = search_result
            .result
            .into_iter()
            .filter_map(RetrievedEssay::from_scored_point)
            .collect();

        Ok(results)
    }
}

impl EssayIndex for QdrantEssayIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), RetrievalError> {
        self.ensure_collection_inner(name, vector_size).await
    }

    async fn upsert(
        &self,
        collection: &str,
        points: Vec<EssayPoint>,
        consistency: WriteConsistency,
    ) -> Result<(), RetrievalError> {
        self.upsert_inner(collection, points, consistency).await
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> Result<Vec<RetrievedEssay>, RetrievalError> {
        self.search_inner(collection, query, limit, score_threshold)
            .await
    }
}
