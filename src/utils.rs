//! Common utilities
//!
//! Process-level helpers used by the binary:
//! - Logging configuration
//! - Panic handling
//! - Data / config directory resolution and the version string

pub mod logging;
pub mod panic;
pub mod paths;

pub use logging::initialize_logging;
pub use panic::initialize_panic_handler;
pub use paths::{get_config_dir, get_data_dir, version};
