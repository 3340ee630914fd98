//! Batch validation module.
//!
//! Turns one raw text blob into one classified report, in three stages:
//!
//! ### Input normalization
//! [`tokenizer::tokenize`] splits the blob on newlines, commas and
//! semicolons into ordered candidate tokens, trimmed and with empties
//! dropped. No deduplication, every surviving token gets an outcome.
//!
//! ### Code normalization
//! [`address::Cep`] strips non-digit characters from a token and accepts
//! only exact 8-digit forms. Tokens that fail normalization are classified
//! invalid without ever reaching a transport.
//!
//! ### Concurrent lookup and classification
//! [`batch::BatchValidator`] dispatches one independent lookup per
//! normalized code, joins all of them, and collects outcomes positionally
//! so report order always matches input order. Lookup failures of any kind
//! collapse into invalid outcomes, a run always completes with a full
//! report.
//!
//! Runs are guarded by an explicit idle/running state transition, starting
//! a second run while one is in flight fails fast with
//! [`error::ValidationError::BatchAlreadyRunning`].

pub mod address;
pub mod batch;
pub mod error;
pub mod outcome;
pub mod tokenizer;

/// Production validator stack backed by the HTTP lookup transport.
pub type HttpValidatorStack = batch::BatchValidator<crate::transport::http::HttpLookup>;

/// Initialize a validator wired to the public lookup service.
pub fn init_validator() -> HttpValidatorStack {
    batch::BatchValidator::new(crate::transport::http::HttpLookup::default())
}

/// Initialize a validator with a custom lookup transport.
///
/// The generic parameter `L` allows alternative transports to be plugged in,
/// such as the loopback table for tests or an HTTP client pointed at a
/// mirror of the lookup service.
pub fn init_validator_with_lookup<L>(lookup: L) -> batch::BatchValidator<L>
where
    L: tower::Service<
            address::Cep,
            Response = address::AddressRecord,
            Error = error::ValidationError,
        > + Clone
        + Send
        + 'static,
    L::Future: Send,
{
    batch::BatchValidator::new(lookup)
}
