//! postpage - Single-page static site generator
//!
//! Reads a directory of plain-text posts and renders them into one HTML page
//! through a small `{{ key | filter }}` template engine.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::SiteError;
