//! Initialize a new notes site

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: ''
description: ''
author: ''
language: en
timezone: UTC

# URL
url: http://example.com
github_url: https://github.com/sijakubo

# Directory
source_dir: source
public_dir: public
notes_dir: notes

# Writing
date_format: DD MMMM, YYYY
listing_excerpt_length: 300
post_excerpt_length: 160
words_per_minute: 265
# Render pages for notes dated in the future (they stay off the index)
future: false
highlight:
  line_number: true
  theme: base16-ocean.dark

# Home page & feed
home_notes: 5
feed_limit: 20
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    fs::create_dir_all(target_dir.join("source/notes"))?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let today = Utc::now().format("%Y-%m-%d");
    let sample_note = format!(
        r#"---
title: Hello World
date: {}
path: /notes/hello-world
draft: false
description: The first note on this site.
---

This is the first note. Notes live in `source/notes` as markdown files.

```bash
notes-rs new "My next note"
notes-rs server
```

New notes start with `draft: true`. Flip it to `false` once the note is ready;
a note dated in the future stays off the index until that date passes.
"#,
        today
    );

    fs::write(target_dir.join("source/notes/hello-world.md"), sample_note)?;

    Ok(())
}
