use std::fmt::Write as _;

use scrape_console_core::html::download_href;
use scrape_console_core::{
    AppViewModel, HistoryPanel, PathField, ResultPanel, StatusPill, DOWNLOAD_INVALID_LABEL,
    DOWNLOAD_OUTPUT_LABEL, HISTORY_UNAVAILABLE_TEXT, NO_HISTORY_TEXT,
};

const LABEL_WIDTH: usize = 17;

/// Plain-text rendering of the whole console for the terminal.
pub fn render(view: &AppViewModel, link_base: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Status: {}", status_label(&view.status));
    let _ = writeln!(
        out,
        "Form{}:",
        if view.form.enabled { "" } else { " (locked while running)" }
    );
    for field in PathField::ALL {
        let _ = writeln!(
            out,
            "  {:<width$} : {}",
            field.label(),
            view.form.value(field),
            width = LABEL_WIDTH
        );
    }

    out.push_str("Result:\n");
    render_result(&mut out, &view.result, link_base);

    out.push_str("History:\n");
    render_history(&mut out, &view.history, link_base);

    out
}

fn status_label(status: &StatusPill) -> String {
    match status.tone {
        Some(tone) => format!("[{}] ({})", status.text, tone.css_class()),
        None => format!("[{}]", status.text),
    }
}

fn render_result(out: &mut String, panel: &ResultPanel, link_base: &str) {
    let _ = writeln!(out, "  {}", panel.headline());
    match panel {
        ResultPanel::RunFailed {
            stderr: Some(stderr),
            ..
        } => {
            out.push_str("  stderr:\n");
            for line in stderr.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        ResultPanel::Completed { output, invalid } => {
            let _ = writeln!(out, "  Output CSV: {output}");
            let _ = writeln!(out, "  Invalid links CSV: {invalid}");
            download_lines(out, "  ", link_base, output, invalid);
        }
        _ => {}
    }
}

fn render_history(out: &mut String, panel: &HistoryPanel, link_base: &str) {
    match panel {
        HistoryPanel::Empty => {
            let _ = writeln!(out, "  {NO_HISTORY_TEXT}");
        }
        HistoryPanel::Unavailable => {
            let _ = writeln!(out, "  {HISTORY_UNAVAILABLE_TEXT}");
        }
        HistoryPanel::Entries(rows) => {
            for row in rows {
                let _ = writeln!(out, "  - {} — {}", row.timestamp, row.status);
                let _ = writeln!(out, "    Input: {}", row.input);
                let _ = writeln!(out, "    Output: {}", row.output);
                let _ = writeln!(out, "    Invalid: {}", row.invalid);
                download_lines(out, "    ", link_base, &row.output, &row.invalid);
            }
        }
    }
}

fn download_lines(out: &mut String, indent: &str, link_base: &str, output: &str, invalid: &str) {
    let _ = writeln!(
        out,
        "{indent}{DOWNLOAD_OUTPUT_LABEL}: {}",
        download_href(link_base, output)
    );
    let _ = writeln!(
        out,
        "{indent}{DOWNLOAD_INVALID_LABEL}: {}",
        download_href(link_base, invalid)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scrape_console_core::{FormView, HistoryRowView, StatusTone};

    #[test]
    fn idle_console_renders_placeholders() {
        let view = AppViewModel {
            form: FormView {
                enabled: true,
                ..FormView::default()
            },
            ..AppViewModel::default()
        };
        assert_eq!(
            render(&view, "http://127.0.0.1:5000"),
            "Status: [Idle]\n\
             Form:\n\
             \x20 Input folder      : \n\
             \x20 Output CSV        : \n\
             \x20 Invalid links CSV : \n\
             Result:\n\
             \x20 No runs yet.\n\
             History:\n\
             \x20 No history yet.\n"
        );
    }

    #[test]
    fn completed_run_lists_absolute_download_links() {
        let view = AppViewModel {
            status: StatusPill::new("Complete", Some(StatusTone::Success)),
            result: ResultPanel::Completed {
                output: "b".to_string(),
                invalid: "c d".to_string(),
            },
            history: HistoryPanel::Entries(vec![HistoryRowView {
                timestamp: "2024-05-02T10:00:00".to_string(),
                status: "success".to_string(),
                input: "a".to_string(),
                output: "b".to_string(),
                invalid: "c d".to_string(),
            }]),
            ..AppViewModel::default()
        };
        let text = render(&view, "http://127.0.0.1:5000");

        assert!(text.starts_with("Status: [Complete] (success)\nForm (locked while running):"));
        assert!(text.contains("  Download Output: http://127.0.0.1:5000/download?path=b\n"));
        assert!(text.contains("  Download Invalid: http://127.0.0.1:5000/download?path=c%20d\n"));
        assert!(text.contains("  - 2024-05-02T10:00:00 — success\n"));
    }

    #[test]
    fn stderr_is_indented_under_the_failure() {
        let view = AppViewModel {
            result: ResultPanel::RunFailed {
                message: "Scraper failed.".to_string(),
                stderr: Some("Traceback\n  boom".to_string()),
            },
            ..AppViewModel::default()
        };
        let text = render(&view, "");
        assert!(
            text.contains("  Run failed: Scraper failed.\n  stderr:\n    Traceback\n      boom\n")
        );
    }
}
