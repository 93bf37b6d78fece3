use chrono::TimeZone;
use chrono_tz::Tz;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use notes_rs::commands::generate::run_at;
use notes_rs::config::SiteConfig;
use notes_rs::Site;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_site(future: bool) -> (TempDir, Site) {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source");

    write(
        &source,
        "notes/scheduled.md",
        "---\ntitle: From The Future\ndate: 2099-01-01\npath: /notes/future\ndraft: false\n---\nNot yet.\n",
    );
    write(
        &source,
        "notes/published.md",
        "---\ntitle: Borrow Checker Notes\ndate: 2020-01-01\npath: /notes/borrowing\ndraft: false\n---\n\nOwnership *moves* by default.\n\n```rust\nlet a = b;\n```\n",
    );
    write(
        &source,
        "notes/draft.md",
        "---\ntitle: Half Written\ndate: 2020-06-01\npath: /notes/draft\ndraft: true\n---\nTBD\n",
    );
    write(
        &source,
        "notes/described.md",
        "---\ntitle: Described\ndate: 2019-05-01\npath: /notes/described\ndescription: Custom summary\n---\nBody text.\n",
    );
    write(&source, "images/logo.svg", "<svg/>");

    let config = SiteConfig {
        title: "Field Notes".to_string(),
        url: "https://notes.example.com".to_string(),
        future,
        ..Default::default()
    };
    let site = Site::with_config(dir.path(), config);
    (dir, site)
}

fn new_year_2024() -> chrono::DateTime<Tz> {
    Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn read(site: &Site, relative: &str) -> String {
    fs::read_to_string(site.public_dir.join(relative)).unwrap()
}

#[test]
fn test_notes_index_lists_only_publishable_notes_newest_first() {
    let (_dir, site) = sample_site(false);
    let report = run_at(&site, &new_year_2024()).unwrap();
    assert_eq!(report.listed, 2);

    let index = read(&site, "notes/index.html");
    assert!(index.contains("Borrow Checker Notes"));
    assert!(index.contains("Described"));
    assert!(!index.contains("From The Future"));
    assert!(!index.contains("Half Written"));
    assert!(index.find("Borrow Checker Notes").unwrap() < index.find("Described").unwrap());
    assert!(index.contains("01 January, 2020"));
    assert!(index.contains(" - 1 min"));
}

#[test]
fn test_post_page_contents() {
    let (_dir, site) = sample_site(false);
    run_at(&site, &new_year_2024()).unwrap();

    let page = read(&site, "notes/borrowing/index.html");
    assert!(page.contains("<h1 class=\"marked-header\">Borrow Checker Notes</h1>"));
    assert!(page.contains("01 January, 2020 - 1 min"));
    assert!(page.contains("<em>moves</em>"));
    assert!(page.contains("highlight rust"));
    // No description: the meta description is the excerpt
    assert!(page.contains(
        "<meta name=\"description\" content=\"Ownership moves by default. let a = b;\">"
    ));

    let described = read(&site, "notes/described/index.html");
    assert!(described.contains("<meta name=\"description\" content=\"Custom summary\">"));
}

#[test]
fn test_scheduled_and_draft_notes_get_no_page_by_default() {
    let (_dir, site) = sample_site(false);
    let report = run_at(&site, &new_year_2024()).unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.hidden, 1);
    assert!(!site.public_dir.join("notes/future/index.html").exists());
    assert!(!site.public_dir.join("notes/draft/index.html").exists());
}

#[test]
fn test_future_setting_renders_scheduled_page_but_keeps_it_unlisted() {
    let (_dir, site) = sample_site(true);
    let report = run_at(&site, &new_year_2024()).unwrap();

    assert_eq!(report.pages, 3);
    assert!(site.public_dir.join("notes/future/index.html").exists());
    assert!(!read(&site, "notes/index.html").contains("From The Future"));
}

#[test]
fn test_site_chrome_feed_and_assets() {
    let (_dir, site) = sample_site(false);
    let report = run_at(&site, &new_year_2024()).unwrap();
    assert_eq!(report.assets, 1);

    let home = read(&site, "index.html");
    assert!(home.contains("<title>Field Notes</title>"));
    assert!(home.contains("href=\"/notes/\">Notes</a>"));
    assert!(home.contains("https://github.com/sijakubo"));

    let feed = read(&site, "atom.xml");
    assert!(feed.contains("<link href=\"https://notes.example.com/notes/borrowing/\"/>"));
    assert!(!feed.contains("From The Future"));

    assert!(site.public_dir.join("404.html").exists());
    assert!(site.public_dir.join("css/style.css").exists());
    assert!(site.public_dir.join("images/logo.svg").exists());
}

#[test]
fn test_empty_site_generates_empty_index() {
    let dir = TempDir::new().unwrap();
    let site = Site::with_config(dir.path(), SiteConfig::default());

    let report = run_at(&site, &new_year_2024()).unwrap();
    assert_eq!(report.listed, 0);
    assert_eq!(report.pages, 0);
    assert!(read(&site, "notes/index.html").contains("<h1>Notes</h1>"));
}

fn shared_path_site(second: &str) -> (TempDir, Site) {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source");

    write(
        &source,
        "notes/live.md",
        "---\ntitle: Live Note\ndate: 2020-01-01\npath: /notes/x\n---\nThe live body.\n",
    );
    write(&source, "notes/second.md", second);

    let config = SiteConfig {
        url: "https://notes.example.com".to_string(),
        ..Default::default()
    };
    let site = Site::with_config(dir.path(), config);
    (dir, site)
}

#[test]
fn test_draft_rewrite_at_same_path_keeps_live_note() {
    let (_dir, site) = shared_path_site(
        "---\ntitle: Rewrite In Progress\ndate: 2021-01-01\npath: /notes/x\ndraft: true\n---\nThe draft body.\n",
    );
    let report = run_at(&site, &new_year_2024()).unwrap();
    assert_eq!(report.pages, 1);

    let page = read(&site, "notes/x/index.html");
    assert!(page.contains("Live Note"));
    assert!(page.contains("The live body."));
    assert!(!page.contains("The draft body."));

    let feed = read(&site, "atom.xml");
    assert!(feed.contains("<title>Live Note</title>"));
    assert!(feed.contains("The live body."));
    assert!(!feed.contains("The draft body."));
}

#[test]
fn test_scheduled_rewrite_at_same_path_keeps_live_note() {
    let (_dir, site) = shared_path_site(
        "---\ntitle: Coming Soon\ndate: 2099-01-01\npath: /notes/x\n---\nThe scheduled body.\n",
    );
    let report = run_at(&site, &new_year_2024()).unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(report.hidden, 1);

    let page = read(&site, "notes/x/index.html");
    assert!(page.contains("The live body."));
    assert!(!page.contains("The scheduled body."));

    let index = read(&site, "notes/index.html");
    assert!(index.contains("Live Note"));
    assert!(!index.contains("Coming Soon"));

    let feed = read(&site, "atom.xml");
    assert!(feed.contains("The live body."));
    assert!(!feed.contains("The scheduled body."));
}

#[test]
fn test_dotted_note_path_is_written_as_page() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("source"),
        "notes/release.md",
        "---\ntitle: Rust 1.75\ndate: 2023-12-28\npath: /notes/rust-1.75-release\n---\nAsync fn in traits.\n",
    );
    let site = Site::with_config(dir.path(), SiteConfig::default());

    run_at(&site, &new_year_2024()).unwrap();

    let target = site.public_dir.join("notes/rust-1.75-release");
    assert!(target.is_dir());
    assert!(read(&site, "notes/rust-1.75-release/index.html").contains("Async fn in traits."));
}
