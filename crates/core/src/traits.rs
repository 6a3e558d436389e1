use crate::error::{KgError, SearchError};
use crate::models::{DocumentChunk, KgEntity, KgRelationship, ScoredChunk};
use async_trait::async_trait;

#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn collection_exists(&self, collection: &str) -> Result<bool, SearchError>;

    async fn create_collection(
        &self,
        collection: &str,
        vector_size: usize,
    ) -> Result<(), SearchError>;

    async fn delete_collection(&self, collection: &str) -> Result<(), SearchError>;

    async fn upsert_chunks(
        &self,
        collection: &str,
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
    ) -> Result<(), SearchError>;

    /// Nearest-neighbor lookup. A missing collection yields an empty list,
    /// not an error, so callers can fall through to the no-context path.
    async fn similar_chunks(
        &self,
        collection: &str,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, SearchError>;
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn entities_matching(&self, keyword: &str, limit: i64)
        -> Result<Vec<KgEntity>, KgError>;

    async fn relationships_for(
        &self,
        entity_id: i64,
        limit: i64,
    ) -> Result<Vec<KgRelationship>, KgError>;
}
