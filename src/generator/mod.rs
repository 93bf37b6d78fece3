//! Generator module - writes the static site using the built-in templates

use anyhow::{Context as _, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{ContentQuery, ContentStore};
use crate::helpers::{
    absolutize_urls, date_xml, escape_xml, full_url_for, parse_date_in, route_for,
};
use crate::notes::{is_past_dated, lookup, notes_listing, ListingEntry, PostPage};
use crate::templates::{SiteData, TemplateRenderer, STYLESHEET};
use crate::Site;

/// Summary of one generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub listed: usize,
    pub pages: usize,
    pub hidden: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    site_data: SiteData,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let site_data = SiteData::from_config(&site.config);

        Ok(Self {
            site: site.clone(),
            renderer,
            site_data,
        })
    }

    /// Generate the entire site as of `now`
    pub fn generate(&self, store: &ContentStore, now: &DateTime<Tz>) -> Result<GenerateReport> {
        fs::create_dir_all(&self.site.public_dir)?;

        let config = &self.site.config;
        let entries: Vec<ListingEntry> =
            notes_listing(store, now, config.listing_excerpt_length).collect();

        self.generate_notes_index(&entries)?;
        let (pages, hidden) = self.generate_post_pages(store, now)?;
        self.generate_home_page(&entries)?;
        self.generate_not_found_page()?;
        self.generate_atom_feed(store, &entries, now)?;
        self.write_file(Path::new("css/style.css"), STYLESHEET)?;
        let assets = self.copy_source_assets()?;

        Ok(GenerateReport {
            listed: entries.len(),
            pages,
            hidden,
            assets,
        })
    }

    /// Generate the notes index
    fn generate_notes_index(&self, entries: &[ListingEntry]) -> Result<()> {
        let html = self.renderer.render_notes(&self.site_data, entries)?;
        let route = self.site.config.notes_route();
        self.write_file(&output_path_for(&route), &html)?;
        tracing::info!("Generated notes index with {} entries", entries.len());
        Ok(())
    }

    /// Generate one page per routable note.
    /// Returns (pages written, notes held back)
    fn generate_post_pages(&self, store: &ContentStore, now: &DateTime<Tz>) -> Result<(usize, usize)> {
        let config = &self.site.config;
        let mut written = 0;
        let mut hidden = 0;

        for doc in store.published() {
            if !config.future && !is_past_dated(doc, now) {
                tracing::debug!("Holding back {} ({:?})", doc.path, doc.raw_date);
                hidden += 1;
                continue;
            }

            let resolved = lookup(store, &doc.path, now, config.future)?;
            if !std::ptr::eq(resolved, doc) {
                tracing::warn!("{} is shadowed by {} at {}", doc.source, resolved.source, doc.path);
                hidden += 1;
                continue;
            }

            let post = PostPage::new(doc, config.post_excerpt_length);
            let html = self.renderer.render_post(&self.site_data, &post)?;

            let output_path = output_path_for(&post.path);
            self.write_file(&output_path, &html)
                .with_context(|| format!("Failed to write note {}", doc.source))?;
            tracing::debug!("Generated note: {:?}", output_path);
            written += 1;
        }

        tracing::info!("Generated {} note pages", written);
        Ok((written, hidden))
    }

    /// Generate the home page with the latest notes
    fn generate_home_page(&self, entries: &[ListingEntry]) -> Result<()> {
        let latest = &entries[..entries.len().min(self.site.config.home_notes)];
        let html = self.renderer.render_home(&self.site_data, latest)?;
        self.write_file(Path::new("index.html"), &html)
    }

    fn generate_not_found_page(&self) -> Result<()> {
        let html = self.renderer.render_not_found(&self.site_data)?;
        self.write_file(Path::new("404.html"), &html)
    }

    /// Generate the Atom feed from the listing
    fn generate_atom_feed(
        &self,
        store: &ContentStore,
        entries: &[ListingEntry],
        now: &DateTime<Tz>,
    ) -> Result<()> {
        let config = &self.site.config;
        let base_url = config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, "atom.xml")
        ));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!("  <updated>{}</updated>\n", date_xml(now)));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for entry in entries.iter().take(config.feed_limit) {
            let doc = lookup(store, &entry.path, now, false)?;
            let url = full_url_for(config, &entry.path);
            let published = doc
                .raw_date
                .as_deref()
                .and_then(|raw| parse_date_in(raw, &now.timezone()))
                .map(|dt| date_xml(&dt))
                .unwrap_or_else(|| date_xml(now));
            let content = strip_invalid_xml_chars(&absolutize_urls(&doc.html, base_url));

            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&entry.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", url));
            feed.push_str(&format!("    <id>{}</id>\n", url));
            feed.push_str(&format!("    <published>{}</published>\n", published));
            feed.push_str(&format!("    <updated>{}</updated>\n", published));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&entry.excerpt)
            ));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                content.replace("]]>", "]]]]><![CDATA[>")
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        self.write_file(Path::new("atom.xml"), &feed)?;
        tracing::info!("Generated atom.xml");
        Ok(())
    }

    /// Copy non-markdown files from the source directory.
    /// Returns the number of files copied
    fn copy_source_assets(&self) -> Result<usize> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e
                        .file_name()
                        .to_str()
                        .map(|n| n.starts_with('.') || n.starts_with('_'))
                        .unwrap_or(false)
            })
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }

    /// Write a file below the public directory
    fn write_file(&self, relative: &Path, content: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(())
    }
}

/// Output file for a route, relative to the public directory
fn output_path_for(route: &str) -> PathBuf {
    let route = route_for(route);
    let clean = route.trim_start_matches('/');
    if route.ends_with('/') {
        Path::new(clean).join("index.html")
    } else {
        PathBuf::from(clean)
    }
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for() {
        assert_eq!(output_path_for("/"), PathBuf::from("index.html"));
        assert_eq!(
            output_path_for("/notes/hello"),
            Path::new("notes/hello").join("index.html")
        );
        assert_eq!(output_path_for("/feed.xml"), PathBuf::from("feed.xml"));
        assert_eq!(
            output_path_for("/notes/rust-1.75-release"),
            Path::new("notes/rust-1.75-release").join("index.html")
        );
    }

    #[test]
    fn test_strip_invalid_xml_chars() {
        assert_eq!(strip_invalid_xml_chars("a\u{0001}b\nc"), "ab\nc");
    }
}
