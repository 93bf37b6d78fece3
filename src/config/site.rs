//! Site configuration (_config.yml)

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub github_url: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub notes_dir: String,

    // Writing
    pub date_format: String,
    pub listing_excerpt_length: usize,
    pub post_excerpt_length: usize,
    pub words_per_minute: usize,
    /// Render detail pages for non-draft posts dated in the future
    pub future: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Home page & feed
    pub home_notes: usize,
    pub feed_limit: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),

            url: "http://example.com".to_string(),
            github_url: "https://github.com/sijakubo".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            notes_dir: "notes".to_string(),

            date_format: "DD MMMM, YYYY".to_string(),
            listing_excerpt_length: 300,
            post_excerpt_length: 160,
            words_per_minute: 265,
            future: false,
            highlight: HighlightConfig::default(),

            home_notes: 5,
            feed_limit: 20,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configured IANA timezone, falling back to UTC
    pub fn tz(&self) -> Tz {
        match self.timezone.trim() {
            "" => Tz::UTC,
            name => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!("Unknown timezone {:?}, using UTC", name);
                Tz::UTC
            }),
        }
    }

    /// Route of the notes index, always with leading and trailing slash
    pub fn notes_route(&self) -> String {
        let dir = self.notes_dir.trim_matches('/');
        if dir.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", dir)
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_number: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
