use std::fmt;

use serde::Serialize;

/// What happened to a single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    Created,
    Rejected { status: u16, body: String },
    TransportFailed { error: String },
    Invalid { reason: String },
    Skipped,
}

impl PublishOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, PublishOutcome::Created)
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PublishOutcome::Rejected { .. }
                | PublishOutcome::TransportFailed { .. }
                | PublishOutcome::Invalid { .. }
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishRecord {
    pub slug: String,
    pub title: String,
    #[serde(flatten)]
    pub outcome: PublishOutcome,
}

/// Console lines for one post; failures carry status and body on their own lines.
impl fmt::Display for PublishRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            PublishOutcome::Created => write!(f, "Successfully added blog post: {}", self.title),
            PublishOutcome::Rejected { status, body } => {
                writeln!(f, "Failed to add blog post: {}", self.title)?;
                writeln!(f, "Status code: {}", status)?;
                write!(f, "Response: {}", body)
            }
            PublishOutcome::TransportFailed { error } => {
                writeln!(f, "Failed to add blog post: {}", self.title)?;
                write!(f, "Request error: {}", error)
            }
            PublishOutcome::Invalid { reason } => {
                writeln!(f, "Failed to add blog post: {}", self.title)?;
                write!(f, "Not sent: {}", reason)
            }
            PublishOutcome::Skipped => write!(
                f,
                "Skipped blog post: {} (slug \"{}\" already exists)",
                self.title, self.slug
            ),
        }
    }
}

/// Per-post results in submission order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublishReport {
    pub records: Vec<PublishRecord>,
}

impl PublishReport {
    pub fn created(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_created()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == PublishOutcome::Skipped)
            .count()
    }
}

/// Closing lines printed after every post has been tried.
pub fn summary(blog_page_url: &str) -> String {
    format!(
        "\nAll blog posts have been added. Please check your Supabase database or visit the blog page.\n\
         Remember to visit {} to see the blog section with your new posts!",
        blog_page_url
    )
}
