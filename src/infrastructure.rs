//! Infrastructure layer
//!
//! This module handles everything outside the feed itself:
//! - CLI argument processing
//! - Layered configuration
//! - Session replay against in-memory collaborators

pub mod cli;
pub mod config;
pub mod replay;
