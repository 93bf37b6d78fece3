//! Create a new note

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Scaffold a draft note and return the file written.
///
/// Notes start as drafts so they stay off the site until `draft: false`.
pub fn create_note(site: &Site, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = Utc::now().with_timezone(&site.config.tz());
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let notes_dir = site.source_dir.join(site.config.notes_dir.trim_matches('/'));
    fs::create_dir_all(&notes_dir)?;

    let file_path = notes_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let route = match path {
        Some(p) => format!("/{}", p.trim_matches('/')),
        None => format!("{}{}", site.config.notes_route(), slug),
    };

    let content = format!(
        "---\ntitle: {}\ndate: {}\npath: {}\ndraft: true\ndescription: \"\"\n---\n\n",
        yaml_quote(title),
        now.format("%Y-%m-%d %H:%M:%S"),
        route
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created draft note {:?}", file_path);

    Ok(file_path)
}

/// Quote a scalar when plain YAML would misread it
fn yaml_quote(s: &str) -> String {
    let needs_quotes = s.contains(": ")
        || s.contains(" #")
        || s.starts_with(|c: char| "!&*-?{}[]|>'\"%@`#,".contains(c));
    if needs_quotes {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}
