pub mod blog_post_repository;
pub mod record_store;
