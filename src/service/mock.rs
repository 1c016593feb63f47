use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DocumentService, SelectedFile, ServiceError};

/// A scripted Document Service for tests. Replies are popped in order.
#[derive(Default)]
pub struct MockDocumentService {
    stores: Mutex<VecDeque<Result<String, ServiceError>>>,
    queries: Mutex<VecDeque<Result<String, ServiceError>>>,
    store_calls: AtomicUsize,
    query_calls: AtomicUsize,
    last_query: Mutex<Option<(String, String)>>,
}

impl MockDocumentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next `store` call.
    pub fn push_store(self, reply: Result<String, ServiceError>) -> Self {
        self.stores.lock().unwrap().push_back(reply);
        self
    }

    /// Queue a reply for the next `query` call.
    pub fn push_query(self, reply: Result<String, ServiceError>) -> Self {
        self.queries.lock().unwrap().push_back(reply);
        self
    }

    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// The `(file_ref, question)` pair of the most recent query.
    pub fn last_query(&self) -> Option<(String, String)> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentService for MockDocumentService {
    async fn store(&self, _file: &SelectedFile) -> Result<String, ServiceError> {
        let n = self.store_calls.fetch_add(1, Ordering::SeqCst);
        self.stores.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ServiceError::Connection(format!(
                "MockDocumentService: no store reply (called {} times)",
                n + 1
            )))
        })
    }

    async fn query(&self, file_ref: &str, question: &str) -> Result<String, ServiceError> {
        let n = self.query_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some((file_ref.to_string(), question.to_string()));
        self.queries.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ServiceError::Connection(format!(
                "MockDocumentService: no query reply (called {} times)",
                n + 1
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_fails() {
        let svc = MockDocumentService::new()
            .push_store(Ok("one.pdf".to_string()))
            .push_store(Ok("two.pdf".to_string()));
        let file = SelectedFile::new("x.pdf", b"%PDF".to_vec());

        assert_eq!(svc.store(&file).await.unwrap(), "one.pdf");
        assert_eq!(svc.store(&file).await.unwrap(), "two.pdf");
        assert!(svc.store(&file).await.is_err());
        assert_eq!(svc.store_calls(), 3);
    }

    #[tokio::test]
    async fn records_last_query() {
        let svc = MockDocumentService::new().push_query(Ok("42".to_string()));
        svc.query("a.pdf", "total?").await.unwrap();
        assert_eq!(
            svc.last_query(),
            Some(("a.pdf".to_string(), "total?".to_string()))
        );
        assert_eq!(svc.query_calls(), 1);
    }
}
