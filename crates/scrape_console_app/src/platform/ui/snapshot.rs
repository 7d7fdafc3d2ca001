//! Mirrors the console into a static HTML page that a browser can keep open.

use std::io::{self, Write};
use std::path::Path;

use scrape_console_core::html::{html_escape, render_history, render_result, render_status};
use scrape_console_core::{AppViewModel, PathField};
use tempfile::NamedTempFile;

pub fn render_page(view: &AppViewModel, link_base: &str) -> String {
    let disabled = if view.form.enabled { "" } else { " disabled" };
    let fields: String = PathField::ALL
        .into_iter()
        .map(|field| {
            format!(
                r#"<label>{label} <input name="{name}" value="{value}" readonly{disabled}></label>
"#,
                label = field.label(),
                name = field,
                value = html_escape(view.form.value(field)),
            )
        })
        .collect();

    format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Scrape Console</title></head>
<body>
<header>{status}</header>
<form id="scrapeForm">
{fields}</form>
<section id="resultBox">{result}</section>
<section id="historyBox">{history}</section>
</body>
</html>
"#,
        status = render_status(&view.status),
        result = render_result(&view.result, link_base),
        history = render_history(&view.history, link_base),
    )
}

/// Replaces `path` with `content` through a temp file in the same directory,
/// so readers never see a half-written page.
pub fn write_atomically(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
