//! Navigation header

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::is_external;

/// A link in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub external: bool,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            external: is_external(href),
        }
    }
}

/// The site header: home, the notes index, and one external profile link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub site_title: String,
    pub notes_href: String,
    pub external_href: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            site_title: String::new(),
            notes_href: "/notes/".to_string(),
            external_href: "https://github.com/sijakubo".to_string(),
        }
    }
}

impl Header {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            site_title: config.title.clone(),
            notes_href: config.notes_route(),
            external_href: config.github_url.clone(),
        }
    }

    pub fn links(&self) -> [NavLink; 3] {
        [
            NavLink::new(&self.site_title, "/"),
            NavLink::new("Notes", &self.notes_href),
            NavLink::new("GitHub", &self.external_href),
        ]
    }
}
