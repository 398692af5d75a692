//! Integration tests for Leadcrew
//!
//! These tests drive the full router with `axum-test` and stand in for the
//! upstream services with `wiremock`.

mod backend_client;
mod dashboard;
mod leads;
