//! File system repository

use crate::domain::Post;
use crate::error::{Result, SiteError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Represents a post source file with its derived timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub path: PathBuf,
    pub datetime: String,
}

impl PostEntry {
    pub fn new(path: PathBuf, datetime: String) -> Self {
        PostEntry { path, datetime }
    }
}

/// File system access for a site build: post sources in, one page out
#[derive(Debug, Clone)]
pub struct SiteRepository {
    pub posts_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl SiteRepository {
    pub fn new(posts_dir: PathBuf, output_dir: PathBuf) -> Self {
        SiteRepository {
            posts_dir,
            output_dir,
        }
    }

    fn post_entry_from_path(path: &Path) -> Option<PostEntry> {
        if !Post::is_post_file(path) {
            return None;
        }
        let datetime = Post::datetime_from_path(path)?;
        Some(PostEntry::new(path.to_path_buf(), datetime))
    }

    fn collect_root_post_entries(&self) -> Result<Vec<PostEntry>> {
        let entries = fs::read_dir(&self.posts_dir)?;
        let mut posts = Vec::new();

        for entry in entries {
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(post) = Self::post_entry_from_path(&path) {
                posts.push(post);
            }
        }

        Ok(posts)
    }

    fn collect_recursive_post_entries(&self) -> Vec<PostEntry> {
        let mut posts = Vec::new();

        let walker = WalkDir::new(&self.posts_dir)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                if !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !name.starts_with('.'))
            });

        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(post) = Self::post_entry_from_path(entry.path()) {
                posts.push(post);
            }
        }

        posts
    }

    /// List post files, newest first (ties broken by path)
    pub fn list_posts(&self, recursive: bool) -> Result<Vec<PostEntry>> {
        if !self.posts_dir.is_dir() {
            return Err(SiteError::PostsDirectoryNotFound(self.posts_dir.clone()));
        }

        let mut posts = if recursive {
            self.collect_recursive_post_entries()
        } else {
            self.collect_root_post_entries()?
        };

        // The timestamp pattern is fixed-width, so string order is time order
        posts.sort_by(|a, b| {
            b.datetime
                .cmp(&a.datetime)
                .then_with(|| a.path.cmp(&b.path))
        });

        for post in &posts {
            tracing::debug!(path = %post.path.display(), datetime = %post.datetime, "found post");
        }

        Ok(posts)
    }

    /// Read a post source file into a post record
    pub fn read_post(&self, entry: &PostEntry) -> Result<Post> {
        let text = fs::read_to_string(&entry.path)?;
        Ok(Post::new(entry.datetime.clone(), text))
    }

    /// Write a file into the output directory using a best-effort atomic
    /// replace: write to a temp file in the same directory, then rename
    /// into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove
    /// the destination first.
    pub fn write_output_atomic(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(filename);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!("{}.postpage-tmp-{}", filename, std::process::id());
        let tmp_path = path.with_file_name(tmp_name);

        if let Err(e) = Self::replace_with(&tmp_path, &path, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(path)
    }

    fn replace_with(tmp_path: &Path, path: &Path, content: &str) -> Result<()> {
        fs::write(tmp_path, content)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(tmp_path, path)?;
        Ok(())
    }
}
