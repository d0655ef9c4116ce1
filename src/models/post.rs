// src/models/post.rs
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("static slug pattern"));
static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("static strip pattern"));
static SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static space pattern"));
static DASHES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("static dash pattern"));

/// One row of the `blog_posts` table, field names as PostgREST expects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub meta_description: String,
    pub featured_image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_published: bool,
}

impl Post {
    /// Checks the fields the remote table needs before anything is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }

        if self.slug.trim().is_empty() {
            return Err(format!("Slug cannot be empty (try \"{}\")", slugify(&self.title)));
        }

        if !SLUG_RE.is_match(&self.slug) {
            return Err(format!(
                "Invalid slug \"{}\": only lowercase letters, digits and hyphens are allowed (try \"{}\")",
                self.slug,
                slugify(&self.slug)
            ));
        }

        if self.content.trim().is_empty() {
            return Err("Content cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Turns free text into a URL slug accepted by [`Post::validate`].
/// Underscores are dropped along with other punctuation.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lower, "");
    let dashed = SPACE_RE.replace_all(stripped.trim(), "-");
    let collapsed = DASHES_RE.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}
