//! Lookup transport implementations.
//!
//! A transport is any [`tower::Service`] that resolves a normalized
//! [`Cep`](crate::validation::address::Cep) into an
//! [`AddressRecord`](crate::validation::address::AddressRecord), failing
//! with a [`ValidationError`](crate::validation::error::ValidationError)
//! when the code is unknown or unreachable.
//!
//! ## Implementations
//!
//! - [`http::HttpLookup`]: production client for the public ViaCEP HTTP API
//! - [`loopback::LookupLoopback`]: in-process record table for tests and
//!   demos, with optional latency simulation
//! - [`nop::LookupNop`]: resolves every code as unknown

pub mod http;
pub mod loopback;
pub mod nop;
