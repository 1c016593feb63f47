pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// A file picked by the user, held in memory until it is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Why a call to the Document Service failed. Keeps the root cause for logs;
/// users only ever see the generic workflow message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Body returned by the store endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResponse {
    pub filename: String,
}

/// Body sent to the query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest<'a> {
    pub file_name: &'a str,
    pub question: &'a str,
}

/// Body returned by the query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// The remote backend that stores documents and answers questions about them.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Store a file. Returns the identifier to use for later queries.
    async fn store(&self, file: &SelectedFile) -> Result<String, ServiceError>;

    /// Ask a question about a previously stored file.
    async fn query(&self, file_ref: &str, question: &str) -> Result<String, ServiceError>;
}
