// src/repositories/blog_post_repository.rs
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use urlencoding::encode;

use crate::models::post::Post;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("supabase error: {0}")]
    Supabase(String),
    #[error("credential is not a valid header value: {0}")]
    InvalidKey(#[from] InvalidHeaderValue),
}

/// Raw result of an insert. Status is left for the caller to judge.
#[derive(Debug, Clone)]
pub struct InsertResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Client for one table exposed through Supabase (PostgREST)
#[derive(Debug, Clone)]
pub struct BlogPostRepository {
    client: Client,
    base_rest_url: String, // e.g. https://xyz.supabase.co/rest/v1
    table: String,
    headers: HeaderMap,
}

impl BlogPostRepository {
    pub fn new(
        client: Client,
        supabase_url: &str,
        table: &str,
        api_key: &str,
    ) -> Result<Self, RepoError> {
        let trimmed = supabase_url.trim().trim_end_matches('/');
        let base_rest_url = if trimmed.ends_with("/rest/v1") {
            trimmed.to_string()
        } else {
            format!("{}/rest/v1", trimmed)
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(api_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))?,
        );

        Ok(Self {
            client,
            base_rest_url,
            table: table.to_string(),
            headers,
        })
    }

    pub fn table_url(&self) -> String {
        format!("{}/{}", self.base_rest_url, self.table)
    }

    /// POST one row with `Prefer: return=minimal`; a successful insert answers 201 with no body.
    pub async fn insert(&self, post: &Post) -> Result<InsertResponse, RepoError> {
        let resp = self
            .client
            .post(self.table_url())
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .json(post)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        Ok(InsertResponse { status, body })
    }

    /// Whether a row with this slug is already stored.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        // PostgREST filter: ?slug=eq.<slug>&select=slug
        let url = format!("{}?slug=eq.{}&select=slug", self.table_url(), encode(slug));

        let resp = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(RepoError::Supabase(format!(
                "{} -> {}",
                status.as_u16(),
                text
            )));
        }

        let rows: Vec<Value> = serde_json::from_str(&text)?;
        Ok(!rows.is_empty())
    }
}
