//! Integration layer
//!
//! Connects the pure feed reducer to the host application's collaborators
//! and executes the commands it emits.

pub mod collaborators;
pub mod controller;

pub use collaborators::{FeedSource, Navigator, ViewportSurface};
pub use controller::FeedController;
