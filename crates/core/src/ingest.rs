use crate::chunking::split_text;
use crate::embeddings::Embedder;
use crate::error::IngestError;
use crate::extractor::{LopdfExtractor, PdfExtractor};
use crate::models::{
    ChunkMetadata, DocumentChunk, IngestionReport, SplitterConfig, UploadMetadata, UploadedFile,
};
use crate::traits::VectorIndex;
use chrono::Utc;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

pub const COLLECTION_PREFIX: &str = "medical-reports";

/// Turns one upload session into a freshly named vector-store collection:
/// temp file, page extraction, chunking, embedding, upsert. Files are
/// processed sequentially; one failing file aborts the whole batch.
pub struct IngestionPipeline<E, V>
where
    E: Embedder,
    V: VectorIndex,
{
    extractor: Box<dyn PdfExtractor>,
    splitter: SplitterConfig,
    embedder: E,
    vector: V,
}

impl<E, V> IngestionPipeline<E, V>
where
    E: Embedder,
    V: VectorIndex,
{
    pub fn new(embedder: E, vector: V) -> Self {
        Self {
            extractor: Box::new(LopdfExtractor),
            splitter: SplitterConfig::default(),
            embedder,
            vector,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn PdfExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_splitter(mut self, splitter: SplitterConfig) -> Self {
        self.splitter = splitter;
        self
    }

    pub async fn ingest(
        &self,
        files: &[UploadedFile],
        metadata: &UploadMetadata,
    ) -> Result<IngestionReport, IngestError> {
        if files.is_empty() {
            return Err(IngestError::NoFilesUploaded);
        }

        let collection_name = format!("{}-{}", COLLECTION_PREFIX, Uuid::new_v4());

        // Collision handling, not idempotent update: a pre-existing collection
        // of the same name is dropped before anything is written.
        if self.vector.collection_exists(&collection_name).await? {
            info!(collection = %collection_name, "deleting colliding collection");
            self.vector.delete_collection(&collection_name).await?;
        }

        let mut chunks = Vec::new();
        for file in files {
            let upload_date = Utc::now().to_rfc3339();
            chunks.extend(self.chunk_file(file, metadata, &upload_date)?);
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        self.vector
            .create_collection(&collection_name, self.embedder.dimensions())
            .await?;
        self.vector
            .upsert_chunks(&collection_name, &chunks, &embeddings)
            .await?;

        info!(
            collection = %collection_name,
            files = files.len(),
            chunks = chunks.len(),
            "upload session ingested"
        );

        Ok(IngestionReport {
            collection_name,
            files_processed: files.iter().map(|file| file.file_name.clone()).collect(),
            total_chunks: chunks.len(),
        })
    }

    fn chunk_file(
        &self,
        file: &UploadedFile,
        metadata: &UploadMetadata,
        upload_date: &str,
    ) -> Result<Vec<DocumentChunk>, IngestError> {
        // The temp file is unlinked on drop, on success and failure alike.
        let mut temp = NamedTempFile::new()?;
        temp.write_all(&file.bytes)?;
        temp.flush()?;

        let pages = self.extractor.extract_pages(temp.path())?;

        let mut chunks = Vec::new();
        for page in pages {
            for text in split_text(&page.text, self.splitter) {
                chunks.push(DocumentChunk {
                    text,
                    metadata: ChunkMetadata::new(&file.file_name, page.number, metadata, upload_date),
                });
            }
        }

        Ok(chunks)
    }
}
