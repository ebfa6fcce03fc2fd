//! Shared EC2 auto-remediation domain primitives.
//!
//! This crate owns the response contract, configuration validation, and
//! notification content. It intentionally excludes AWS SDK and Lambda runtime
//! concerns, which live in `remediation_lambda`.

pub mod config;
pub mod contract;
pub mod error;
