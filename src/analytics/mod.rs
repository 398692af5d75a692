//! Analytics service integration module

pub mod client;

pub use client::{AnalyticsClient, TrackingOutcome};
