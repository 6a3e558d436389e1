use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("no PDF files uploaded")]
    NoFilesUploaded,

    #[error("embedding error: {0}")]
    Embed(#[from] EmbedError),

    #[error("vector store error: {0}")]
    Store(#[from] SearchError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("search request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding api returned {status}: {details}")]
    Api { status: u16, details: String },

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative api returned {status}: {details}")]
    Api { status: u16, details: String },

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no relevant content found")]
    NoRelevantContent,

    #[error("embedding error: {0}")]
    Embed(#[from] EmbedError),

    #[error("vector store error: {0}")]
    Search(#[from] SearchError),

    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
}

#[derive(Debug, Error)]
pub enum KgError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
