//! Concurrent batch validation over a lookup transport.

use std::sync::{Arc, Mutex};

use futures::{StreamExt, future, stream};
use tower::Service;
use tracing::{debug, info};

use crate::validation::{
    address::{AddressRecord, Cep},
    error::ValidationError,
    outcome::{BatchReport, Outcome},
    tokenizer::tokenize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
}

/// Guard for the idle/running transition, resets to idle on drop so the
/// validator recovers even when a run future is dropped mid-flight.
struct RunGuard {
    state: Arc<Mutex<RunState>>,
}

impl RunGuard {
    fn acquire(state: Arc<Mutex<RunState>>) -> Result<Self, ValidationError> {
        let mut slot = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if *slot == RunState::Running {
            return Err(ValidationError::BatchAlreadyRunning);
        }
        *slot = RunState::Running;
        drop(slot);
        Ok(Self { state })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut slot = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = RunState::Idle;
    }
}

/// Batch validator generic over the lookup transport.
///
/// Issues one independent lookup per well-formed candidate token, all
/// dispatched concurrently, and joins them into a [`BatchReport`] once every
/// lookup has settled. There is no streaming of partial results and no
/// cancellation of an in-flight run.
///
/// ## Failure isolation
///
/// A malformed token, an unknown code or a transport failure only affects
/// its own outcome. The run itself fails only when another run is already
/// in flight on the same validator.
///
/// ## Concurrency
///
/// By default the fan-out is unbounded, one in-flight request per token.
/// [`BatchValidator::with_concurrency_limit`] caps the number of concurrent
/// lookups while preserving positional outcome order.
#[derive(Clone)]
pub struct BatchValidator<L> {
    lookup: L,
    run_state: Arc<Mutex<RunState>>,
    concurrency_limit: Option<usize>,
}

impl<L> BatchValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup, run_state: Arc::new(Mutex::new(RunState::Idle)), concurrency_limit: None }
    }

    /// Caps the number of concurrent in-flight lookups.
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(limit.max(1));
        self
    }
}

impl<L> BatchValidator<L>
where
    L: Service<Cep, Response = AddressRecord, Error = ValidationError> + Clone + Send + 'static,
    L::Future: Send,
{
    /// Validates a raw text blob and classifies every candidate token.
    ///
    /// Tokens whose digit-only form is not exactly 8 characters are
    /// classified invalid without a lookup. All other tokens are resolved
    /// concurrently, outcomes are collected positionally so report order
    /// matches token order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BatchAlreadyRunning`] when another run is
    /// in flight on this validator (or any of its clones). Per-token lookup
    /// failures never surface here, they become invalid outcomes.
    pub async fn run(&self, input: &str) -> Result<BatchReport, ValidationError> {
        let _guard = RunGuard::acquire(self.run_state.clone())?;

        let tokens = tokenize(input);
        info!(tokens = tokens.len(), "starting batch run");

        let lookups = tokens.into_iter().map(|token| {
            let mut lookup = self.lookup.clone();
            async move {
                let code = match Cep::from_token(&token) {
                    Ok(code) => code,
                    Err(error) => {
                        debug!(%error, "token skipped without lookup");
                        return Outcome::invalid(token);
                    }
                };
                match lookup.call(code).await {
                    Ok(record) => Outcome::valid(token, record),
                    Err(error) => {
                        debug!(%error, "lookup classified invalid");
                        Outcome::invalid(token)
                    }
                }
            }
        });

        let outcomes = match self.concurrency_limit {
            Some(limit) => stream::iter(lookups).buffered(limit).collect::<Vec<_>>().await,
            None => future::join_all(lookups).await,
        };

        let report = BatchReport::new(outcomes);
        info!(valid = report.valid_count(), invalid = report.invalid_count(), "batch run settled");
        Ok(report)
    }
}
