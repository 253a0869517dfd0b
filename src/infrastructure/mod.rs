//! Infrastructure layer - File system I/O

pub mod repository;

pub use repository::{PostEntry, SiteRepository};
