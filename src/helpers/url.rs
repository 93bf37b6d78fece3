//! URL helper functions

use crate::config::SiteConfig;

/// Extensions of routes written as plain files rather than `<route>/index.html`
const FILE_EXTENSIONS: &[&str] = &["html", "htm", "xml", "css", "js", "json", "txt"];

/// Normalize a route to a leading slash and, for directory routes, a
/// trailing slash
///
/// # Examples
/// ```ignore
/// route_for("notes/hello")             // -> "/notes/hello/"
/// route_for("/notes/rust-1.75-release") // -> "/notes/rust-1.75-release/"
/// route_for("/feed.xml")               // -> "/feed.xml"
/// ```
pub fn route_for(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let is_file = !path.ends_with('/')
        && trimmed
            .rsplit('/')
            .next()
            .and_then(|last| last.rsplit_once('.'))
            .map(|(_, ext)| FILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

    if is_file {
        format!("/{}", trimmed)
    } else {
        format!("/{}/", trimmed)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/notes/") // -> "https://example.com/notes/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), route_for(path))
}

/// Whether a link leaves the site
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

/// Convert root-relative URLs in HTML content to absolute URLs
pub fn absolutize_urls(content: &str, base_url: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_for() {
        assert_eq!(route_for(""), "/");
        assert_eq!(route_for("/"), "/");
        assert_eq!(route_for("notes/hello"), "/notes/hello/");
        assert_eq!(route_for("/notes/hello/"), "/notes/hello/");
        assert_eq!(route_for("atom.xml"), "/atom.xml");
        assert_eq!(route_for("css/style.css"), "/css/style.css");
    }

    #[test]
    fn test_route_for_dotted_note_path() {
        assert_eq!(route_for("/notes/rust-1.75-release"), "/notes/rust-1.75-release/");
        assert_eq!(route_for("/notes/v0.2"), "/notes/v0.2/");
    }

    #[test]
    fn test_full_url_for() {
        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(full_url_for(&config, "notes"), "https://example.com/notes/");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://github.com/sijakubo"));
        assert!(!is_external("/notes"));
    }

    #[test]
    fn test_absolutize_urls() {
        let html = r#"<a href="/notes/a/">a</a><img src="/img.png">"#;
        assert_eq!(
            absolutize_urls(html, "https://x.y"),
            r#"<a href="https://x.y/notes/a/">a</a><img src="https://x.y/img.png">"#
        );
    }
}
