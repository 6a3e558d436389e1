use serde::{Deserialize, Serialize};

/// Optional form fields accompanying an upload. Missing values fall back to
/// the placeholder strings stored with every chunk.
#[derive(Debug, Clone, Default)]
pub struct UploadMetadata {
    pub patient_name: Option<String>,
    pub report_type: Option<String>,
    pub duration: Option<String>,
}

/// One uploaded PDF, already read off the wire.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub file_name: String,
    pub patient_name: String,
    pub report_type: String,
    pub duration: String,
    pub upload_date: String,
    pub page: u32,
}

impl ChunkMetadata {
    pub fn new(file_name: &str, page: u32, metadata: &UploadMetadata, upload_date: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            patient_name: metadata
                .patient_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            report_type: metadata
                .report_type
                .clone()
                .unwrap_or_else(|| "General".to_string()),
            duration: metadata
                .duration
                .clone()
                .unwrap_or_else(|| "Not specified".to_string()),
            upload_date: upload_date.to_string(),
            page,
        }
    }
}

/// A split text span with its provenance, ready to be embedded and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// A similarity-search hit returned from the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub text: String,
    pub score: f64,
    pub file_name: String,
}

/// Outcome of one upload session.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub collection_name: String,
    pub files_processed: Vec<String>,
    pub total_chunks: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1_000,
            chunk_overlap: 200,
        }
    }
}

/// Row from the read-only entity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KgEntity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub entity_type: Option<String>,
}

/// Relationship row joined with both endpoint entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KgRelationship {
    pub id: i64,
    pub from_entity_id: i64,
    pub to_entity_id: i64,
    pub relationship_type: Option<String>,
    pub from_entity: KgEntity,
    pub to_entity: KgEntity,
}

/// An entity together with its related rows, accumulated during keyword search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMatch {
    pub entity: KgEntity,
    pub relationships: Vec<KgRelationship>,
}

/// One decomposed fragment of a larger question, tagged with a category label
/// used to filter knowledge-graph results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubQuery {
    pub query: String,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubQueryResult {
    #[serde(rename = "subQuery")]
    pub sub_query: String,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub entities: Vec<EntityMatch>,
}
