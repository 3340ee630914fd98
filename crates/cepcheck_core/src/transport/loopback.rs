//! Loopback transport for in-process lookups.
//!
//! Serves records out of an in-memory table keyed by the digit-only code,
//! for unit and integration tests and for demos that must not reach the
//! network. An optional fixed delay simulates lookup latency so concurrency
//! behavior (fan-out, re-entrancy guarding) can be exercised.

use std::{future::Future, pin::Pin, sync::Arc, task::Poll, time::Duration};

use dashmap::DashMap;
use tower::Service;

use crate::validation::{
    address::{AddressRecord, Cep},
    error::ValidationError,
};

/// In-process lookup service backed by a shared record table.
///
/// Cloning is cheap and all clones share the same table, mirroring how the
/// HTTP transport clones share one connection pool.
#[derive(Clone, Default)]
pub struct LookupLoopback {
    records: Arc<DashMap<String, AddressRecord>>,
    delay: Option<Duration>,
}

impl LookupLoopback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fixed artificial delay to every lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Registers a record under the given normalized code.
    pub fn register(&self, code: &Cep, record: AddressRecord) {
        self.records.insert(code.digits().to_string(), record);
    }
}

impl Service<Cep> for LookupLoopback {
    type Response = AddressRecord;
    type Error = ValidationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, code: Cep) -> Self::Future {
        let this = self.clone();
        Box::pin(async move {
            if let Some(delay) = this.delay {
                tokio::time::sleep(delay).await;
            }
            this.records
                .get(code.digits())
                .map(|record| record.value().clone())
                .ok_or(ValidationError::UnknownCode(code))
        })
    }
}
