//! Core Elm Architecture implementation
//!
//! This module contains the core components of the Elm architecture:
//! - Messages delivered by the UI event loop
//! - Per-feed state and its update logic
//! - Commands describing side effects for the controller to execute

pub mod cmd;
pub mod msg;
pub mod state;
pub mod update;
