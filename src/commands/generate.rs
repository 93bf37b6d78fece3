//! Generate static files

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::{GenerateReport, Generator};
use crate::{Site, CONFIG_FILE};

/// Generate the static site as of the current time
pub fn run(site: &Site) -> Result<()> {
    let now = Utc::now().with_timezone(&site.config.tz());
    run_at(site, &now)?;
    Ok(())
}

/// Generate the static site as of `now`
pub fn run_at(site: &Site, now: &DateTime<Tz>) -> Result<GenerateReport> {
    let start = Instant::now();

    let store = ContentLoader::new(site).load_store()?;
    tracing::info!("Loaded {} notes", store.len());

    let report = Generator::new(site)?.generate(&store, now)?;

    tracing::info!(
        "Generated {} pages ({} listed, {} held back, {} assets) in {:.2}s",
        report.pages,
        report.listed,
        report.hidden,
        report.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if site.source_dir.exists() {
        watcher.watch(&site.source_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce bursts of events from a single save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = reload(site).and_then(|site| run(&site)) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the configuration so edits to it take effect
pub(crate) fn reload(site: &Site) -> Result<Site> {
    Site::new(&site.base_dir)
}
