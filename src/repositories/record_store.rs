// src/repositories/record_store.rs
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::models::post::Post;

/// Posts shipped with the binary, seeded when no file is configured.
const BUILTIN_POSTS: &str = include_str!("../../data/blog_posts.json");

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid post list in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads the post list, from `path` when given, otherwise the built-in one.
/// Order is preserved exactly as written.
pub fn load_posts(path: Option<&Path>) -> Result<Vec<Post>, RecordError> {
    let posts = match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| RecordError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_posts(&raw, &path.display().to_string())?
        }
        None => parse_posts(BUILTIN_POSTS, "built-in list")?,
    };

    for slug in duplicate_slugs(&posts) {
        warn!("Slug \"{}\" appears more than once; the server decides which insert wins", slug);
    }

    info!("Loaded {} blog posts", posts.len());
    Ok(posts)
}

fn parse_posts(raw: &str, origin: &str) -> Result<Vec<Post>, RecordError> {
    serde_json::from_str(raw).map_err(|source| RecordError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn duplicate_slugs(posts: &[Post]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut dups = Vec::new();
    for post in posts {
        if !seen.insert(post.slug.as_str()) && !dups.contains(&post.slug.as_str()) {
            dups.push(post.slug.as_str());
        }
    }
    dups
}
