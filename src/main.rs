// src/main.rs
mod config;
mod dtos;
mod models;
mod repositories;
mod services;

use anyhow::{Context, Result};
use log::info;
use reqwest::Client;

use crate::config::{Config, mask_key};
use crate::dtos::post_dtos::summary;
use crate::repositories::blog_post_repository::BlogPostRepository;
use crate::repositories::record_store::load_posts;
use crate::services::publisher::Publisher;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cfg = Config::from_env()?;

    info!("Supabase URL: {}", cfg.supabase_url);
    info!("Supabase Key: {}", mask_key(&cfg.supabase_key));

    let http_client = Client::builder()
        .user_agent(concat!("blog-seeder/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build http client")?;

    let repo = BlogPostRepository::new(http_client, &cfg.supabase_url, &cfg.table, &cfg.supabase_key)?;
    info!("Target table: {}", repo.table_url());

    let posts = load_posts(cfg.posts_file.as_deref())?;
    Publisher::new(repo)
        .skip_existing(cfg.skip_existing)
        .publish_all(&posts, |record| println!("{}", record))
        .await;

    println!("{}", summary(&cfg.blog_page_url));
    Ok(())
}
