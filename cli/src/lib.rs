//! Terminal front-end for the learning-resource catalog.
//!
//! Executes `catalog-core` requests with a blocking ureq agent and renders
//! the list and detail views as text.

pub mod args;
pub mod cache_file;
pub mod commands;
pub mod render;
pub mod transport;

pub use args::{Cli, Commands};
pub use cache_file::CacheFile;
pub use transport::UreqTransport;
