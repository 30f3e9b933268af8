//! Scripted explain client for tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use lucid_protocols::ExplainRequest;

use crate::client::{ExplainClient, Explanation};
use crate::error::ExplainError;

type Script = dyn Fn(&ExplainRequest, usize) -> (Duration, Result<Explanation, ExplainError>)
    + Send
    + Sync;

/// Answers each request from a script given the request and its call index.
pub struct MockClient {
    script: Box<Script>,
    requests: Mutex<Vec<ExplainRequest>>,
}

impl MockClient {
    pub fn new(
        script: impl Fn(&ExplainRequest, usize) -> (Duration, Result<Explanation, ExplainError>)
            + Send
            + Sync
            + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Echo the text back immediately.
    pub fn echo() -> Arc<Self> {
        Self::new(|request, _| {
            (
                Duration::ZERO,
                Ok(Explanation::new(format!("explained: {}", request.text))),
            )
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<ExplainRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ExplainClient for MockClient {
    async fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ExplainError> {
        let index = {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            requests.len() - 1
        };
        let (delay, result) = (self.script)(request, index);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
