//! Built-in templates using the Tera template engine
//!
//! All templates are embedded in the binary. Each `render_*` method is a pure
//! function from pipeline output to a full HTML document.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::escape_html;
use crate::notes::{Header, ListingEntry, NavLink, PostPage};

/// Stylesheet written to `css/style.css`
pub const STYLESHEET: &str = include_str!("default/style.css");

/// Template renderer with the embedded default theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped with `html_escape`; note bodies are inserted raw
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("default/layout.html")),
            ("notes.html", include_str!("default/notes.html")),
            ("post.html", include_str!("default/post.html")),
            ("home.html", include_str!("default/home.html")),
            ("404.html", include_str!("default/404.html")),
            // Partials
            ("partials/seo.html", include_str!("default/partials/seo.html")),
            (
                "partials/header.html",
                include_str!("default/partials/header.html"),
            ),
            (
                "partials/macros.html",
                include_str!("default/partials/macros.html"),
            ),
        ])?;

        tera.register_filter("html_escape", html_escape_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the navigation bar alone
    pub fn render_header(&self, header: &Header) -> Result<String> {
        let mut context = Context::new();
        context.insert("nav_links", &header.links());
        self.render("partials/header.html", &context)
    }

    /// Render the notes index
    pub fn render_notes(&self, site: &SiteData, entries: &[ListingEntry]) -> Result<String> {
        let mut context = self.base_context(site, "Notes", &site.description);
        context.insert("entries", entries);
        self.render("notes.html", &context)
    }

    /// Render a single note
    pub fn render_post(&self, site: &SiteData, post: &PostPage) -> Result<String> {
        let mut context = self.base_context(site, &post.title, &post.description);
        context.insert("post", post);
        self.render("post.html", &context)
    }

    /// Render the home page with the latest notes
    pub fn render_home(&self, site: &SiteData, entries: &[ListingEntry]) -> Result<String> {
        let mut context = self.base_context(site, "", &site.description);
        context.insert("entries", entries);
        self.render("home.html", &context)
    }

    /// Render the not-found page
    pub fn render_not_found(&self, site: &SiteData) -> Result<String> {
        let context = self.base_context(site, "404: Not found", &site.description);
        self.render("404.html", &context)
    }

    fn base_context(&self, site: &SiteData, page_title: &str, page_description: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("nav_links", &site.nav_links);
        context.insert("page_title", page_title);
        context.insert("page_description", page_description);
        context
    }
}

/// Tera filter: escape HTML text without touching slashes
fn html_escape_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("html_escape", "value", String, value);
    Ok(tera::Value::String(escape_html(&s)))
}

/// Site-wide data every page sees
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub notes_route: String,
    pub nav_links: Vec<NavLink>,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            notes_route: config.notes_route(),
            nav_links: Header::from_config(config).links().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteData {
        SiteData::from_config(&SiteConfig {
            title: "Field Notes".to_string(),
            description: "Things I learned".to_string(),
            ..Default::default()
        })
    }

    fn entry(id: &str, title: &str) -> ListingEntry {
        ListingEntry {
            id: id.to_string(),
            path: format!("/notes/{}", id),
            title: title.to_string(),
            date: "01 January, 2020".to_string(),
            time_to_read: 2,
            excerpt: format!("About {}", title),
        }
    }

    #[test]
    fn test_render_header() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_header(&Header::default()).unwrap();
        assert!(html.contains(r#"href="/""#));
        assert!(html.contains(r#"href="/notes/">Notes</a>"#));
        assert!(html.contains(r#"href="https://github.com/sijakubo" rel="noopener">GitHub</a>"#));
    }

    #[test]
    fn test_render_notes() {
        let renderer = TemplateRenderer::new().unwrap();
        let entries = vec![entry("a", "Alpha"), entry("b", "Beta & Gamma")];
        let html = renderer.render_notes(&site(), &entries).unwrap();

        assert!(html.contains("<title>Notes | Field Notes</title>"));
        assert!(html.contains(r#"<a class="post-link" href="/notes/a">"#));
        assert!(html.contains("Beta &amp; Gamma"));
        assert!(html.contains(" - 2 min"));
        assert!(html.contains("About Alpha"));
        assert!(html.find("Alpha").unwrap() < html.find("Beta").unwrap());
    }

    #[test]
    fn test_render_notes_empty() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_notes(&site(), &[]).unwrap();
        assert!(html.contains("<h1>Notes</h1>"));
        assert!(!html.contains("blogpost"));
    }

    #[test]
    fn test_render_post() {
        let renderer = TemplateRenderer::new().unwrap();
        let post = PostPage {
            title: "Hello".to_string(),
            path: "/notes/hello".to_string(),
            date: "05 March, 2021".to_string(),
            time_to_read: 7,
            html: "<p>Tom &amp; <em>Jerry</em></p>".to_string(),
            description: "Cats & mice".to_string(),
        };
        let html = renderer.render_post(&site(), &post).unwrap();

        assert!(html.contains("<title>Hello | Field Notes</title>"));
        assert!(html.contains(r#"<meta name="description" content="Cats &amp; mice">"#));
        assert!(html.contains("05 March, 2021 - 7 min"));
        assert!(html.contains("<p>Tom &amp; <em>Jerry</em></p>"));
    }

    #[test]
    fn test_hrefs_are_escaped() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut odd = entry("a", "Alpha");
        odd.path = r#"/notes/say-"hi""#.to_string();
        let html = renderer.render_notes(&site(), &[odd]).unwrap();
        assert!(html.contains(r#"href="/notes/say-&quot;hi&quot;""#));

        let header = Header {
            external_href: r#"https://github.com/a"b"#.to_string(),
            ..Default::default()
        };
        let html = renderer.render_header(&header).unwrap();
        assert!(html.contains(r#"href="https://github.com/a&quot;b""#));
    }

    #[test]
    fn test_render_home_and_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let home = renderer.render_home(&site(), &[entry("a", "Alpha")]).unwrap();
        assert!(home.contains("<title>Field Notes</title>"));
        assert!(home.contains("Things I learned"));
        assert!(home.contains("Latest notes"));

        let missing = renderer.render_not_found(&site()).unwrap();
        assert!(missing.contains("NOT FOUND"));
        assert!(missing.contains(r#"href="/notes/""#));
    }
}
