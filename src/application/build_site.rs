//! Site build use case
//!
//! Orchestrates the full workflow of turning a posts directory into one page.

use crate::domain::{load_template, FilterRegistry, Value, Variables};
use crate::error::Result;
use crate::infrastructure::SiteRepository;
use std::path::PathBuf;

pub const PAGE_TEMPLATE: &str = "page.html";
pub const POST_TEMPLATE: &str = "post.html";
pub const OUTPUT_FILE: &str = "index.html";

/// Options for a site build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory holding `*.txt` post files
    pub posts_dir: PathBuf,

    /// Directory that receives `index.html`
    pub output_dir: PathBuf,

    /// Directory with `page.html` / `post.html` overrides
    pub template_dir: Option<PathBuf>,

    /// Descend into subdirectories of `posts_dir`
    pub recursive: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            posts_dir: PathBuf::from("posts"),
            output_dir: PathBuf::from("_site"),
            template_dir: None,
            recursive: false,
        }
    }
}

/// Service for building the site
pub struct BuildSiteService {
    repository: SiteRepository,
    options: BuildOptions,
}

impl BuildSiteService {
    pub fn new(options: BuildOptions) -> Self {
        let repository = SiteRepository::new(options.posts_dir.clone(), options.output_dir.clone());
        BuildSiteService {
            repository,
            options,
        }
    }

    /// Render the page without writing it
    pub fn render(&self) -> Result<String> {
        // 1. Load templates; syntax errors surface before any post is read
        let template_dir = self.options.template_dir.as_deref();
        let page = load_template(template_dir, PAGE_TEMPLATE)?;
        let post = load_template(template_dir, POST_TEMPLATE)?;

        // 2. Read every post into a record
        let entries = self.repository.list_posts(self.options.recursive)?;
        let posts = entries
            .iter()
            .map(|entry| self.repository.read_post(entry).map(|p| Value::from(&p)))
            .collect::<Result<Vec<_>>>()?;

        // 3. Render the page; postify-each renders the posts
        let registry = FilterRegistry::builtin(post);
        let variables = Variables::new()
            .with("posts", posts)
            .with_filters(&registry);

        page.apply(&variables)
    }

    /// Execute the build
    ///
    /// Returns the path to the written page.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The posts directory does not exist
    /// - A template is malformed or references a missing variable or filter
    /// - A post timestamp is malformed
    /// - File I/O fails
    ///
    /// Nothing is written when rendering fails.
    pub fn execute(&self) -> Result<PathBuf> {
        let html = self.render()?;
        let path = self.repository.write_output_atomic(OUTPUT_FILE, &html)?;
        tracing::info!(path = %path.display(), bytes = html.len(), "wrote page");
        Ok(path)
    }
}
