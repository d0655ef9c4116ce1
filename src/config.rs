use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

pub const DEFAULT_TABLE: &str = "blog_posts";
pub const DEFAULT_BLOG_PAGE_URL: &str = "https://www.ai-coloringpage.com/blog";

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    pub table: String,
    pub posts_file: Option<PathBuf>,
    pub blog_page_url: String,
    pub skip_existing: bool,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let supabase_url = non_empty("SUPABASE_URL").context("SUPABASE_URL not set")?;
        let supabase_key = non_empty("SUPABASE_KEY")
            .or_else(|| non_empty("SUPABASE_SERVICE_ROLE_KEY"))
            .or_else(|| non_empty("SUPABASE_ANON_KEY"))
            .context("SUPABASE_KEY not set (SUPABASE_SERVICE_ROLE_KEY or SUPABASE_ANON_KEY also accepted)")?;

        let skip_existing = match non_empty("SKIP_EXISTING") {
            None => false,
            Some(v) => parse_flag(&v).with_context(|| format!("SKIP_EXISTING has invalid value {:?}", v))?,
        };

        Ok(Self {
            supabase_url,
            supabase_key,
            table: non_empty("BLOG_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            posts_file: non_empty("BLOG_POSTS_FILE").map(PathBuf::from),
            blog_page_url: non_empty("BLOG_PAGE_URL").unwrap_or_else(|| DEFAULT_BLOG_PAGE_URL.to_string()),
            skip_existing,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("expected true/false"),
    }
}

pub fn mask_key(k: &str) -> String {
    if k.len() <= 8 || !k.is_ascii() {
        "[REDACTED]".to_string()
    } else {
        format!("{}***{}", &k[..4], &k[k.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "secret-key-value"),
        ]))
        .unwrap();
        assert_eq!(cfg.table, "blog_posts");
        assert_eq!(cfg.blog_page_url, "https://www.ai-coloringpage.com/blog");
        assert!(cfg.posts_file.is_none());
        assert!(!cfg.skip_existing);
    }

    #[test]
    fn key_falls_back_to_service_role_then_anon() {
        let cfg = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "  "),
            ("SUPABASE_ANON_KEY", "anon"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ]))
        .unwrap();
        assert_eq!(cfg.supabase_key, "service");

        let cfg = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(cfg.supabase_key, "anon");
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[("SUPABASE_KEY", "k")])).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[("SUPABASE_URL", "https://abc.supabase.co")])).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_KEY"));
    }

    #[test]
    fn optional_settings_are_read() {
        let cfg = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "k"),
            ("BLOG_TABLE", "posts_staging"),
            ("BLOG_POSTS_FILE", "seed/posts.json"),
            ("BLOG_PAGE_URL", "https://example.com/blog"),
            ("SKIP_EXISTING", "Yes"),
        ]))
        .unwrap();
        assert_eq!(cfg.table, "posts_staging");
        assert_eq!(cfg.posts_file, Some(PathBuf::from("seed/posts.json")));
        assert_eq!(cfg.blog_page_url, "https://example.com/blog");
        assert!(cfg.skip_existing);
    }

    #[test]
    fn bad_flag_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "k"),
            ("SKIP_EXISTING", "maybe"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SKIP_EXISTING"));
    }

    #[test]
    fn masks_keys() {
        assert_eq!(mask_key("short"), "[REDACTED]");
        assert_eq!(mask_key("eyJhbGciOiJIUzI1NiJ9.payload.sig_A"), "eyJh***ig_A");
    }
}
