//! Code for locating post source files and the in-memory representation of parsed posts.

use crate::{frontmatter::deserialize_date, OUTPUT_POSTS_DIR, POST_EXTENSION};
use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use glob::{glob, Pattern};
use jiff::Timestamp;
use serde::Deserialize;
use std::{fs::read, io::Cursor};

#[cfg_attr(test, derive(PartialEq))]
#[derive(Clone, Debug, Deserialize)]
pub struct PostMetadata {
    /// Always replaced by the file stem once the post is loaded.
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Timestamp,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A fully converted post. The content is trusted HTML and is inserted into templates as-is.
#[derive(Clone, Debug)]
pub struct PostRecord {
    pub metadata: PostMetadata,
    pub content: String,
    pub page: &'static str,
}

impl PostRecord {
    pub const PAGE: &'static str = "post";

    #[must_use]
    pub fn new(metadata: PostMetadata, content: String) -> Self {
        Self {
            metadata,
            content,
            page: Self::PAGE,
        }
    }

    /// Link to the rendered post, relative to the site root.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{OUTPUT_POSTS_DIR}/{}.html", self.metadata.slug)
    }
}

/// Finds every post source file directly inside `posts_dir` and returns their slugs in path order.
/// Nested directories are not searched.
///
/// # Errors
/// This function returns an error if the directory cannot be read or a file name is not valid UTF-8.
pub fn discover_posts(posts_dir: &Utf8Path) -> Result<Vec<String>> {
    let pattern = format!("{}/*.{POST_EXTENSION}", Pattern::escape(posts_dir.as_str()));

    let mut slugs = Vec::new();

    for entry in glob(&pattern).context("failed to build post glob pattern")? {
        let path = entry.context("failed to access entry in posts directory")?;
        let path = Utf8PathBuf::try_from(path).context("post path is not valid UTF-8")?;

        if !path.is_file() || path.extension() != Some(POST_EXTENSION) {
            continue;
        }

        let slug = path
            .file_stem()
            .ok_or_else(|| anyhow!("post path {path:?} has no file name"))?;

        slugs.push(slug.to_owned());
    }

    Ok(slugs)
}

/// Reads the entire source of the post identified by `slug` into memory.
///
/// # Errors
/// This function returns an error if the file does not exist or cannot be read.
pub fn read_post(posts_dir: &Utf8Path, slug: &str) -> Result<Cursor<Vec<u8>>> {
    let path = post_path(posts_dir, slug);
    let bytes = read(&path).with_context(|| format!("failed to read post at {path:?}"))?;

    Ok(Cursor::new(bytes))
}

pub(crate) fn post_path(posts_dir: &Utf8Path, slug: &str) -> Utf8PathBuf {
    posts_dir.join(format!("{slug}.{POST_EXTENSION}"))
}
