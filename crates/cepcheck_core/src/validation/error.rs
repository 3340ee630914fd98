use thiserror::Error;

use crate::validation::address::Cep;

/// Validation failure modes.
///
/// Every variant except [`ValidationError::BatchAlreadyRunning`] is caught
/// by the batch layer and collapsed into an invalid outcome, so a single
/// token failure never aborts a run. There are no retries.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Validation error, malformed code (input: {0})")]
    MalformedCode(String),

    #[error("Validation error, code not found (cep: {0})")]
    UnknownCode(Cep),

    #[error("Validation error, lookup transport failure (cep: {0})")]
    TransportFailure(Cep),

    #[error("Validation error, undecodable lookup response (cep: {0})")]
    InvalidResponseBody(Cep),

    #[error("Validation error, a batch run is already in flight")]
    BatchAlreadyRunning,
}
