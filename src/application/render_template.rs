//! Render a single template file use case

use crate::domain::{FilterRegistry, Template, Variables};
use crate::error::{Result, SiteError};
use std::path::Path;

/// Parse a `KEY=VALUE` command-line variable
pub fn parse_variable(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| SiteError::InvalidVariable(input.to_string()))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(SiteError::InvalidVariable(input.to_string()));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Render `path` with text variables plus the built-in filters
pub fn render_template(path: &Path, variables: &[(String, String)]) -> Result<String> {
    let template = Template::from_file(path)?;
    let registry = FilterRegistry::builtin(Template::from_builtin("post.html")?);

    let mut vars = Variables::new();
    for (key, value) in variables {
        vars.insert(key.as_str(), value.as_str());
    }

    template.apply(&vars.with_filters(&registry))
}
