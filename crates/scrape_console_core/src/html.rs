//! HTML fragments for the status pill, result panel and history panel.
//!
//! Every backend-supplied string passes through [`html_escape`]; paths in
//! download links are percent-encoded first.

use crate::view_model::{
    HistoryRowView, DOWNLOAD_INVALID_LABEL, DOWNLOAD_OUTPUT_LABEL, HISTORY_UNAVAILABLE_TEXT,
    NO_HISTORY_TEXT,
};
use crate::{HistoryPanel, ResultPanel, StatusPill};

pub const DOWNLOAD_PATH: &str = "/download";

/// Link to the backend download endpoint for `path`.
///
/// `link_base` is prepended verbatim; pass `""` for same-origin links.
pub fn download_href(link_base: &str, path: &str) -> String {
    format!(
        "{}{}?path={}",
        link_base.trim_end_matches('/'),
        DOWNLOAD_PATH,
        urlencoding::encode(path)
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_status(status: &StatusPill) -> String {
    let class = match status.tone {
        Some(tone) => format!("status-pill {}", tone.css_class()),
        None => "status-pill".to_string(),
    };
    format!(
        r#"<span id="statusPill" class="{class}">{text}</span>"#,
        text = html_escape(&status.text)
    )
}

pub fn render_result(panel: &ResultPanel, link_base: &str) -> String {
    match panel {
        ResultPanel::RunFailed {
            stderr: Some(stderr),
            ..
        } => format!(
            "<p>{}</p><p><strong>stderr</strong></p><code>{}</code>",
            html_escape(&panel.headline()),
            html_escape(stderr)
        ),
        ResultPanel::Completed { output, invalid } => format!(
            r#"<p>{headline}</p>
<p>Output CSV: <code>{output}</code></p>
<p>Invalid links CSV: <code>{invalid}</code></p>
{links}"#,
            headline = html_escape(&panel.headline()),
            output = html_escape(output),
            invalid = html_escape(invalid),
            links = download_row(link_base, output, invalid),
        ),
        _ => format!("<p>{}</p>", html_escape(&panel.headline())),
    }
}

pub fn render_history(panel: &HistoryPanel, link_base: &str) -> String {
    match panel {
        HistoryPanel::Empty => format!("<p>{NO_HISTORY_TEXT}</p>"),
        HistoryPanel::Unavailable => format!("<p>{HISTORY_UNAVAILABLE_TEXT}</p>"),
        HistoryPanel::Entries(rows) => rows
            .iter()
            .map(|row| render_history_row(row, link_base))
            .collect(),
    }
}

fn render_history_row(row: &HistoryRowView, link_base: &str) -> String {
    format!(
        r#"<div class="history-item">
<p><strong>{timestamp}</strong> — {status}</p>
<p>Input: <code>{input}</code></p>
<p>Output: <code>{output}</code></p>
<p>Invalid: <code>{invalid}</code></p>
{links}
</div>
"#,
        timestamp = html_escape(&row.timestamp),
        status = html_escape(&row.status),
        input = html_escape(&row.input),
        output = html_escape(&row.output),
        invalid = html_escape(&row.invalid),
        links = download_row(link_base, &row.output, &row.invalid),
    )
}

fn download_row(link_base: &str, output: &str, invalid: &str) -> String {
    format!(
        r#"<div class="download-row">{}{}</div>"#,
        download_link(link_base, output, DOWNLOAD_OUTPUT_LABEL),
        download_link(link_base, invalid, DOWNLOAD_INVALID_LABEL)
    )
}

fn download_link(link_base: &str, path: &str, label: &str) -> String {
    format!(
        r#"<a class="download-link" href="{}">{}</a>"#,
        html_escape(&download_href(link_base, path)),
        label
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_href_percent_encodes_path() {
        assert_eq!(
            download_href("", r"C:\out dir\a&b.csv"),
            "/download?path=C%3A%5Cout%20dir%5Ca%26b.csv"
        );
    }

    #[test]
    fn download_href_joins_base_without_double_slash() {
        assert_eq!(
            download_href("http://127.0.0.1:5000/", "x.csv"),
            "http://127.0.0.1:5000/download?path=x.csv"
        );
    }

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            html_escape(r#"<b a="1">'&'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&#39;&amp;&#39;&lt;/b&gt;"
        );
    }
}
