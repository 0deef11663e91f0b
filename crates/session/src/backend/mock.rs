//! Mock Session Backend Implementation
//!
//! Returns a fixed outcome and counts how often it was asked.
//! Thread-safe via `Arc<AtomicUsize>`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::backend::SessionBackend;
use crate::error::SessionError;

#[derive(Debug, Clone)]
enum MockOutcome {
    Token(String),
    SignedOut,
    Failure(String),
}

/// Mock session backend for tests and local development.
#[derive(Debug, Clone)]
pub struct MockSessionBackend {
    outcome: MockOutcome,
    calls: Arc<AtomicUsize>,
}

impl MockSessionBackend {
    fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A device with a persisted token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Token(token.into()))
    }

    /// A device with no previous session
    pub fn signed_out() -> Self {
        Self::with_outcome(MockOutcome::SignedOut)
    }

    /// A check that fails, e.g. unreadable secure storage
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Failure(reason.into()))
    }

    /// Number of `check_auth` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SessionBackend for MockSessionBackend {
    async fn check_auth(&self) -> Result<Option<String>, SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(outcome = ?self.outcome, "Mock session backend: check_auth");

        match &self.outcome {
            MockOutcome::Token(token) => Ok(Some(token.clone())),
            MockOutcome::SignedOut => Ok(None),
            MockOutcome::Failure(reason) => Err(SessionError::Unavailable(reason.clone())),
        }
    }
}
