//! Domain logic
//!
//! This module contains the pure, UI-independent parts of a feed:
//! - Items, votes and the subjects feeds are scoped to
//! - Ordered, deduplicated collections
//! - The projection engine
//! - Viewport snapshots and their store

pub mod collections;
pub mod error;
pub mod item;
pub mod projection;
pub mod snapshot;
pub mod source;
pub mod subject;
