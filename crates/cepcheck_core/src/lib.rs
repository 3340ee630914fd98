//! Batch CEP validation library.
//!
//! cepcheck takes a free-text batch of candidate postal codes, normalizes
//! each token to its digit-only form, resolves well-formed codes against a
//! lookup transport concurrently, and classifies every token into exactly
//! one of two groups: valid (found, carrying the service's address record)
//! or invalid (malformed, unknown, or unreachable).
//!
//! The lookup seam is a [`tower::Service`] keyed by normalized code, so the
//! production HTTP client, the in-process loopback table, and the nop
//! transport are interchangeable, see [`transport`].

pub mod transport;
pub mod validation;

#[cfg(test)]
mod tests;
