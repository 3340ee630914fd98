use std::{future::Future, pin::Pin, task::Poll};

use tower::Service;

use crate::validation::{
    address::{AddressRecord, Cep},
    error::ValidationError,
};

/// Transport that resolves every code as unknown.
#[derive(Clone, Default)]
pub struct LookupNop;

impl Service<Cep> for LookupNop {
    type Response = AddressRecord;
    type Error = ValidationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, code: Cep) -> Self::Future {
        Box::pin(async move { Err(ValidationError::UnknownCode(code)) })
    }
}
