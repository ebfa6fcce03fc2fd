//! AWS-oriented adapters and handlers for alert-driven EC2 remediation.
//!
//! This crate owns runtime integration details (Lambda handler, collaborator
//! traits, logging setup). Contracts and configuration validation live in
//! `remediation_core`.

pub mod adapters;
pub mod handlers;
pub mod logging;
