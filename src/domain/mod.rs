//! Domain layer - Template engine and post model

pub mod filters;
pub mod post;
pub mod template;
pub mod value;

pub use filters::FilterRegistry;
pub use post::Post;
pub use template::{load_template, Reference, Segment, Template};
pub use value::{Filter, Value, Variables};
