//! Template system for page generation
//!
//! Templates are plain text with `{{ key | filter | filter }}` references.
//! A template is parsed once and can be applied to any number of
//! [`Variables`] mappings.

use crate::domain::value::{Value, Variables};
use crate::error::{Result, SiteError};
use std::fs;
use std::ops::Range;
use std::path::Path;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

// Built-in template constants
const PAGE_TEMPLATE: &str = r#"<!doctype html>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>
* { background: #fafaff; }
main {
    font-family: helvetica, sans-serif;
    font-size: 1.3rem;
    max-width: 60ch;
    margin: 0 auto;
}
section {
    border: 1px solid #000;
    border-radius: 0.25em;
}
h2 { font-size: 2rem; }
ul {
    list-style: none;
    margin: 0;
    padding: 0;
}
a, a:visited { color: #166491; }
a:active, a:focus, a:hover{ color: #2197db; }
</style>
<main>
<h1>Recent Updates for @duckinator</h1>

{{ posts | postify-each | join-lines }}
</main>
"#;
const POST_TEMPLATE: &str = r#"<section>
<p>{{ text }}</p>
<time datetime="{{ datetime }}">{{ datetime | friendly-datetime }}</time>
</section>
"#;

/// A `{{ ... }}` reference: the variable key and its filter chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub key: String,
    pub filters: Vec<String>,
    /// Byte range of the whole reference, delimiters included
    pub span: Range<usize>,
}

/// One literal-text or variable-reference unit of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Reference(Reference),
}

/// A parsed template
#[derive(Debug, Clone)]
pub struct Template {
    content: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text
    pub fn new(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        let segments = parse(&content)?;
        Ok(Template { content, segments })
    }

    /// Create template from built-in template name
    pub fn from_builtin(template_name: &str) -> Result<Self> {
        let content = match template_name {
            "page.html" => PAGE_TEMPLATE,
            "post.html" => POST_TEMPLATE,
            _ => {
                return Err(SiteError::Template(format!(
                    "Unknown template: {}",
                    template_name
                )))
            }
        };

        Template::new(content)
    }

    /// Create template from custom template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SiteError::Template(format!(
                "Failed to read template file {}: {}",
                path.display(),
                e
            ))
        })?;

        Template::new(content)
    }

    pub fn source(&self) -> &str {
        &self.content
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the template against a variable mapping.
    ///
    /// Each reference looks up its key, then pipes the value through every
    /// filter in order. Filters are looked up in the same mapping.
    pub fn apply(&self, variables: &Variables) -> Result<String> {
        let mut output = String::with_capacity(self.content.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Reference(reference) => {
                    let value = evaluate(reference, variables)?;
                    output.push_str(&value.to_string());
                }
            }
        }

        Ok(output)
    }
}

fn evaluate(reference: &Reference, variables: &Variables) -> Result<Value> {
    let mut value = variables
        .get(&reference.key)
        .cloned()
        .ok_or_else(|| SiteError::MissingVariable(reference.key.clone()))?;

    for name in &reference.filters {
        let filter = variables
            .get(name)
            .ok_or_else(|| SiteError::MissingFilter(name.clone()))?
            .as_filter()?;
        value = filter.call(value)?;
    }

    Ok(value)
}

/// Split template text into literal and reference segments.
///
/// The output always ends with a literal, which may be empty.
fn parse(text: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;

    while let Some(found) = text[literal_start..].find(OPEN) {
        let open = literal_start + found;
        segments.push(Segment::Literal(text[literal_start..open].to_string()));

        let body_start = open + OPEN.len();
        let body_end = text[body_start..]
            .find(CLOSE)
            .map(|i| body_start + i)
            .ok_or(SiteError::UnterminatedReference { offset: open })?;
        let end = body_end + CLOSE.len();

        let mut pieces = text[body_start..body_end].split('|').map(str::trim);
        let key = pieces.next().unwrap_or_default().to_string();
        let filters = pieces.map(str::to_string).collect();

        segments.push(Segment::Reference(Reference {
            key,
            filters,
            span: open..end,
        }));

        literal_start = end;
    }

    segments.push(Segment::Literal(text[literal_start..].to_string()));
    Ok(segments)
}

/// Load template from a custom directory or fall back to built-in
pub fn load_template(template_dir: Option<&Path>, template_name: &str) -> Result<Template> {
    if let Some(dir) = template_dir {
        let custom_path = dir.join(template_name);
        if custom_path.exists() {
            tracing::debug!(path = %custom_path.display(), "using custom template");
            return Template::from_file(&custom_path);
        }
    }

    tracing::debug!(template = template_name, "using built-in template");
    Template::from_builtin(template_name)
}
