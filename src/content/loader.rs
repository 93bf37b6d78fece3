//! Content loader - loads notes from the source directory

use anyhow::Result;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentStore, Document, FrontMatter, MarkdownRenderer};
use crate::helpers::{count_words, format_date, parse_date_in, time_to_read};
use crate::Site;

/// Loads notes from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let highlight = &site.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);
        Self { site, renderer }
    }

    /// Load every note into a store
    pub fn load_store(&self) -> Result<ContentStore> {
        let documents = self.load_documents()?;
        Ok(ContentStore::with_timezone(documents, self.site.config.tz()))
    }

    /// Load all markdown documents under the source directory
    pub fn load_documents(&self) -> Result<Vec<Document>> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_document(path) {
                    Ok(doc) => documents.push(doc),
                    Err(e) => {
                        tracing::warn!("Failed to load note {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(documents)
    }

    /// Load a single note from a file
    fn load_document(&self, path: &Path) -> Result<Document> {
        let content = fs::read_to_string(path)?;
        let source = path
            .strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        self.parse_document(&source, &content)
    }

    /// Build a document from its relative source path and file content
    pub fn parse_document(&self, source: &str, content: &str) -> Result<Document> {
        let config = &self.site.config;
        let (fm, body) = FrontMatter::parse(content)?;

        let title = fm.title.unwrap_or_else(|| {
            Path::new(source)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let date = fm
            .date
            .as_deref()
            .map(|raw| match parse_date_in(raw, &config.tz()) {
                Some(dt) => format_date(&dt, &config.date_format),
                None => raw.to_string(),
            })
            .unwrap_or_default();

        let slug = slug_for_source(source);
        let path = fm
            .path
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| slug.clone());

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let html = self.renderer.render(&full_md)?;
        let full_text = MarkdownRenderer::plain_text(&full_md);
        let plain_text = match excerpt_md {
            Some(excerpt) => MarkdownRenderer::plain_text(&excerpt),
            None => full_text.clone(),
        };

        let mut doc = Document::new(id_for_source(source), title, path);
        doc.date = date;
        doc.raw_date = fm.date;
        doc.slug = slug;
        doc.draft = fm.draft;
        doc.description = fm.description;
        doc.time_to_read = time_to_read(count_words(&full_text), config.words_per_minute);
        doc.plain_text = plain_text;
        doc.html = html;
        doc.source = source.to_string();
        doc.extra = fm.extra;

        tracing::debug!("Loaded {} -> {}", doc.source, doc.path);
        Ok(doc)
    }
}

/// Stable identifier derived from the relative source path
fn id_for_source(source: &str) -> String {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Route derived from the file location, e.g. `notes/My Note.md` -> `/notes/my-note/`.
/// `index.md` takes its directory's route.
fn slug_for_source(source: &str) -> String {
    let without_ext = source
        .trim_end_matches(".md")
        .trim_end_matches(".markdown");

    let mut parts: Vec<String> = without_ext
        .split('/')
        .filter(|part| !part.is_empty())
        .map(slug::slugify)
        .collect();

    if parts.last().map(|p| p == "index").unwrap_or(false) {
        parts.pop();
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Dot- and underscore-prefixed entries are not content
fn is_hidden(name: Option<&str>) -> bool {
    name.map(|n| n.starts_with('.') || n.starts_with('_'))
        .unwrap_or(false)
}
