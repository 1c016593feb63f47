use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

use crate::consts::{ASK_PATH, PDF_MIME, UPLOAD_PATH};

use super::{
    DocumentService, QueryRequest, QueryResponse, SelectedFile, ServiceError, StoreResponse,
};

/// Talks to the Document Service over HTTP.
pub struct HttpDocumentService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDocumentService {
    /// Build a client for `base_url`. With `timeout = None` requests wait
    /// until the transport resolves.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into a [`ServiceError::Status`].
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    async fn store(&self, file: &SelectedFile) -> Result<String, ServiceError> {
        let url = self.endpoint(UPLOAD_PATH);
        debug!(%url, name = %file.name, bytes = file.len(), "uploading file");

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part("file", part);

        let resp = self.client.post(&url).multipart(form).send().await?;
        let resp = Self::check(resp).await?;

        let body: StoreResponse = resp
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        if body.filename.is_empty() {
            return Err(ServiceError::Malformed("empty filename".to_string()));
        }
        Ok(body.filename)
    }

    async fn query(&self, file_ref: &str, question: &str) -> Result<String, ServiceError> {
        let url = self.endpoint(ASK_PATH);
        debug!(%url, file_ref, "asking question");

        let resp = self
            .client
            .post(&url)
            .json(&QueryRequest {
                file_name: file_ref,
                question,
            })
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let body: QueryResponse = resp
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;
        Ok(body.answer)
    }
}

/// Strip whitespace and trailing slashes so endpoint paths join cleanly.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/"),
            "http://localhost:8000"
        );
        assert_eq!(normalize_base_url("http://host//"), "http://host");
        assert_eq!(normalize_base_url("  http://host  "), "http://host");
    }

    #[test]
    fn endpoints_join_paths() {
        let svc = HttpDocumentService::new("http://localhost:8000/", None).unwrap();
        assert_eq!(svc.base_url(), "http://localhost:8000");
        assert_eq!(svc.endpoint(UPLOAD_PATH), "http://localhost:8000/upload/");
        assert_eq!(svc.endpoint(ASK_PATH), "http://localhost:8000/ask/");
    }

    #[test]
    fn builds_with_timeout() {
        let svc = HttpDocumentService::new("http://host", Some(Duration::from_secs(5)));
        assert!(svc.is_ok());
    }
}
