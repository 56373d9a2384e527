//! Organization/network lookups and resource fetchers for the Meraki Dashboard API.
//!
//! Every operation takes an explicit [`api::http::Client`] that carries the API key. The
//! [`api::chain`] module composes them into the resolve-then-fetch sequences.

pub mod api;
