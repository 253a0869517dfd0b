//! Application layer - Use cases and orchestration

pub mod build_site;
pub mod render_template;

pub use build_site::{BuildOptions, BuildSiteService};
pub use render_template::{parse_variable, render_template};
