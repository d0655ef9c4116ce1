// src/services/publisher.rs
use log::{debug, info, warn};
use reqwest::StatusCode;

use crate::dtos::post_dtos::{PublishOutcome, PublishRecord, PublishReport};
use crate::models::post::Post;
use crate::repositories::blog_post_repository::BlogPostRepository;

/// Sends posts one at a time, in order, never retrying.
#[derive(Debug, Clone)]
pub struct Publisher {
    repo: BlogPostRepository,
    skip_existing: bool,
}

impl Publisher {
    pub fn new(repo: BlogPostRepository) -> Self {
        Self {
            repo,
            skip_existing: false,
        }
    }

    pub fn skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    /// `on_record` sees each result as soon as its request completes.
    pub async fn publish_all(
        &self,
        posts: &[Post],
        mut on_record: impl FnMut(&PublishRecord),
    ) -> PublishReport {
        let mut report = PublishReport::default();
        for (i, post) in posts.iter().enumerate() {
            debug!("Publishing {}/{}: {}", i + 1, posts.len(), post.slug);
            let outcome = self.publish(post).await;
            let record = PublishRecord {
                slug: post.slug.clone(),
                title: post.title.clone(),
                outcome,
            };
            on_record(&record);
            report.records.push(record);
        }
        info!(
            "Publish finished: {} created, {} failed, {} skipped",
            report.created(),
            report.failed(),
            report.skipped()
        );
        report
    }

    pub async fn publish(&self, post: &Post) -> PublishOutcome {
        if let Err(reason) = post.validate() {
            warn!("Not sending \"{}\": {}", post.title, reason);
            return PublishOutcome::Invalid { reason };
        }

        if self.skip_existing {
            match self.repo.slug_exists(&post.slug).await {
                Ok(true) => {
                    info!("Slug {} already stored, skipping", post.slug);
                    return PublishOutcome::Skipped;
                }
                Ok(false) => {}
                // the insert itself will tell whether the row is new
                Err(e) => warn!("Existence check for {} failed: {}", post.slug, e),
            }
        }

        match self.repo.insert(post).await {
            Ok(resp) if resp.status == StatusCode::CREATED => PublishOutcome::Created,
            Ok(resp) => {
                warn!("Insert of {} answered {}", post.slug, resp.status);
                PublishOutcome::Rejected {
                    status: resp.status.as_u16(),
                    body: resp.body,
                }
            }
            Err(e) => {
                warn!("Insert of {} failed: {}", post.slug, e);
                PublishOutcome::TransportFailed {
                    error: e.to_string(),
                }
            }
        }
    }
}
