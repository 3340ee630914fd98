//! HTTP transport for the public ViaCEP lookup service.
//!
//! One GET per code, `{base_url}/{code}/json/`. A successful reply is a
//! JSON body with the address attributes, or `{"erro": true}` when the code
//! is unrecognized. Non-2xx statuses and network failures are reported as
//! transport errors, the batch layer treats both the same as a not-found
//! reply.

use std::{future::Future, pin::Pin, task::Poll};

use tower::Service;
use tracing::debug;

use crate::validation::{
    address::{AddressRecord, Cep},
    error::ValidationError,
};

/// Base URL of the public ViaCEP API.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

fn lookup_url(base_url: &str, code: &str) -> String {
    format!("{}/{}/json/", base_url.trim_end_matches('/'), code)
}

/// HTTP client service for code lookups.
///
/// The underlying [`reqwest::Client`] holds a connection pool, so cloning
/// this service for every token in a batch reuses the same connections.
#[derive(Clone)]
pub struct HttpLookup {
    client: reqwest::Client,
    base_url: String,
}

impl Default for HttpLookup {
    fn default() -> Self {
        Self { client: reqwest::Client::new(), base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl HttpLookup {
    /// Points the client at another base URL, e.g. a mirror of the lookup
    /// service or a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Service<Cep> for HttpLookup {
    type Response = AddressRecord;
    type Error = ValidationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, code: Cep) -> Self::Future {
        let this = self.clone();
        Box::pin(async move {
            let url = lookup_url(&this.base_url, code.digits());
            debug!(%code, %url, "issuing lookup");
            let response = this
                .client
                .get(&url)
                .send()
                .await
                .map_err(|_| ValidationError::TransportFailure(code.clone()))?;
            if !response.status().is_success() {
                return Err(ValidationError::TransportFailure(code));
            }
            let record: AddressRecord = response
                .json()
                .await
                .map_err(|_| ValidationError::InvalidResponseBody(code.clone()))?;
            if record.erro {
                return Err(ValidationError::UnknownCode(code));
            }
            Ok(record)
        })
    }
}
