pub mod chat;
pub mod chunking;
pub mod embeddings;
pub mod error;
pub mod extractor;
pub mod generation;
pub mod ingest;
pub mod kg;
pub mod models;
pub mod stores;
pub mod traits;

pub use chat::{AnswerCoordinator, EmptyContextPolicy, DEFAULT_TOP_K};
pub use chunking::split_text;
pub use embeddings::{Embedder, GeminiEmbedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{ChatError, EmbedError, GenerateError, IngestError, KgError, SearchError};
pub use extractor::{LopdfExtractor, PageText, PdfExtractor};
pub use generation::{GeminiGenerator, TextGenerator};
pub use ingest::{IngestionPipeline, COLLECTION_PREFIX};
pub use kg::{KnowledgeGraphNavigator, PostgresGraph};
pub use models::{
    ChunkMetadata, DocumentChunk, EntityMatch, IngestionReport, KgEntity, KgRelationship,
    ScoredChunk, SplitterConfig, SubQuery, SubQueryResult, UploadMetadata, UploadedFile,
};
pub use stores::QdrantStore;
pub use traits::{EntityStore, VectorIndex};
