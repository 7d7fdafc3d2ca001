use scrape_console_core::{
    html, update, AppState, Effect, HistoryEntry, HistoryPanel, Msg, RequestFailed,
    NO_HISTORY_TEXT, UNKNOWN_STATUS,
};

fn refresh(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::RefreshHistoryClicked);
    match effects.as_slice() {
        [Effect::LoadHistory { request }] => (state, *request),
        other => panic!("unexpected effects {other:?}"),
    }
}

fn entry(timestamp: &str, status: Option<&str>) -> HistoryEntry {
    HistoryEntry {
        timestamp: timestamp.to_string(),
        status: status.map(str::to_string),
        input: format!("/in/{timestamp}"),
        output: format!("/out/{timestamp}.csv"),
        invalid: format!("/invalid/{timestamp}.csv"),
    }
}

#[test]
fn empty_history_shows_placeholder() {
    let (state, request) = refresh(AppState::new());
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            request,
            result: Ok(Vec::new()),
        },
    );

    let panel = state.view().history;
    assert_eq!(panel, HistoryPanel::Empty);
    assert_eq!(
        html::render_history(&panel, ""),
        format!("<p>{NO_HISTORY_TEXT}</p>")
    );
}

#[test]
fn entries_render_in_input_order_with_status_default() {
    let entries = vec![
        entry("2024-05-02T10:00:00", Some("success")),
        entry("2024-05-01T09:00:00", None),
        entry("2024-04-30T08:00:00", Some("")),
    ];
    let (state, request) = refresh(AppState::new());
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            request,
            result: Ok(entries),
        },
    );

    let panel = state.view().history;
    let rows = match &panel {
        HistoryPanel::Entries(rows) => rows.clone(),
        other => panic!("expected entries, got {other:?}"),
    };
    let stamps: Vec<_> = rows.iter().map(|row| row.timestamp.as_str()).collect();
    assert_eq!(
        stamps,
        vec!["2024-05-02T10:00:00", "2024-05-01T09:00:00", "2024-04-30T08:00:00"]
    );
    assert_eq!(rows[0].status, "success");
    assert_eq!(rows[1].status, UNKNOWN_STATUS);
    assert_eq!(rows[2].status, UNKNOWN_STATUS);

    let rendered = html::render_history(&panel, "");
    assert_eq!(rendered.matches(r#"<div class="history-item">"#).count(), 3);
    let first = rendered.find("2024-05-02").unwrap();
    let last = rendered.find("2024-04-30").unwrap();
    assert!(first < last);
    assert!(rendered.contains(r#"href="/download?path=%2Fout%2F2024-05-01T09%3A00%3A00.csv""#));
}

#[test]
fn history_failure_shows_unavailable() {
    let (state, request) = refresh(AppState::new());
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            request,
            result: Err(RequestFailed::new("timeout")),
        },
    );
    assert_eq!(state.view().history, HistoryPanel::Unavailable);
}

#[test]
fn older_history_response_cannot_replace_newer_one() {
    let (state, older) = refresh(AppState::new());
    let (state, newer) = refresh(state);

    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            request: newer,
            result: Ok(vec![entry("new", Some("success"))]),
        },
    );
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            request: older,
            result: Ok(Vec::new()),
        },
    );

    assert_eq!(state.view().history.entry_count(), 1);
}
