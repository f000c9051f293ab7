//! component-mpa library
//!
//! Multi-page application mode for the Component build tool: page
//! discovery, per-page entries and HTML document descriptors, applied to
//! the host's build configuration as an ordered pipeline.

pub mod assets;
pub mod cli;
pub mod compose;
pub mod config;
pub mod entry;
pub mod error;
pub mod pipeline;
pub mod select;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use error::{MpaError, Result};
pub use pipeline::{BuildConfig, MpaPlugin};
