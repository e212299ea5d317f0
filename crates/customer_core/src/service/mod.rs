//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level flows.
//! - Keep the CLI decoupled from storage details.

pub mod demo_runner;
