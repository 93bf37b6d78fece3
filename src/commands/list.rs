//! List notes and their publication status

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::content::loader::ContentLoader;
use crate::content::ContentQuery;
use crate::notes::{status, Status};
use crate::Site;

/// One line of the listing
#[derive(Debug, Clone, Serialize)]
pub struct NoteSummary {
    pub status: Status,
    pub date: String,
    pub title: String,
    pub path: String,
    pub source: String,
}

/// Summaries for every note, newest first.
/// Drafts and undated notes only appear when `all` is set
pub fn summaries(site: &Site, now: &DateTime<Tz>, all: bool) -> Result<Vec<NoteSummary>> {
    let store = ContentLoader::new(site).load_store()?;

    Ok(store
        .all()
        .iter()
        .map(|doc| (status(doc, now), doc))
        .filter(|(status, _)| all || matches!(status, Status::Published | Status::Scheduled))
        .map(|(status, doc)| NoteSummary {
            status,
            date: doc.date.clone(),
            title: doc.title.clone(),
            path: doc.path.clone(),
            source: doc.source.clone(),
        })
        .collect())
}

/// Print the notes of a site
pub fn run(site: &Site, all: bool, json: bool) -> Result<()> {
    let now = Utc::now().with_timezone(&site.config.tz());
    let notes = summaries(site, &now, all)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    println!("Notes ({}):", notes.len());
    for note in notes {
        println!(
            "  [{:<9}] {} - {} {} [{}]",
            note.status, note.date, note.title, note.path, note.source
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_summaries() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("source/notes");
        fs::create_dir_all(&notes).unwrap();
        fs::write(notes.join("a.md"), "---\ntitle: A\ndate: 2020-01-01\n---\n").unwrap();
        fs::write(notes.join("b.md"), "---\ntitle: B\ndate: 2099-01-01\n---\n").unwrap();
        fs::write(
            notes.join("c.md"),
            "---\ntitle: C\ndate: 2021-01-01\ndraft: true\n---\n",
        )
        .unwrap();

        let site = Site::with_config(dir.path(), SiteConfig::default());
        let now = Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let visible = summaries(&site, &now, false).unwrap();
        let titles: Vec<_> = visible.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
        assert_eq!(visible[0].status, Status::Scheduled);

        let everything = summaries(&site, &now, true).unwrap();
        assert_eq!(everything.len(), 3);
        assert!(everything.iter().any(|n| n.status == Status::Draft));
    }
}
