//! HTTP surface of the clima gateway.
//!
//! This crate focuses on:
//! - Validating inbound query parameters
//! - Delegating to the provider client in `clima-core`
//! - Translating provider failures into the service's error responses

pub mod routes;
