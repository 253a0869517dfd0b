//! Post records built from source files

use crate::domain::value::{Value, Variables};
use std::path::Path;

/// Extension of post source files
pub const POST_EXTENSION: &str = "txt";

/// A single post: its timestamp and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub datetime: String,
    pub text: String,
}

impl Post {
    pub fn new(datetime: impl Into<String>, text: impl Into<String>) -> Self {
        Post {
            datetime: datetime.into(),
            text: text.into(),
        }
    }

    /// Derive the timestamp from a post file name.
    ///
    /// `2021-03-05_09.07.00.txt` becomes `2021-03-05 09:07:00`. The result
    /// is not validated here; `friendly-datetime` rejects bad shapes at
    /// render time.
    pub fn datetime_from_path(path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        Some(stem.replace('.', ":").replace('_', " "))
    }

    /// Check whether a path looks like a post source file
    pub fn is_post_file(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(POST_EXTENSION)
    }

    /// The record exposed to post templates
    pub fn to_variables(&self) -> Variables {
        Variables::new()
            .with("datetime", self.datetime.as_str())
            .with("text", self.text.as_str())
    }
}

impl From<&Post> for Value {
    fn from(post: &Post) -> Self {
        Value::Record(post.to_variables())
    }
}
