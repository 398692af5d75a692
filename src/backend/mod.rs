//! Lead-generation backend integration module
//!
//! Provides the client for the crew backend and its data models.

pub mod client;
pub mod models;

pub use client::BackendClient;
pub use models::*;
