// =====
// TESTS: 6
// =====
//
// The terminal viewer end to end: appends, render loop, keys, export and the
// header height, drawn into a TestBackend.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use sticky_scroll::app::{
    FeedEvent, FeedSource, handle_feed_event, handle_terminal_event, parse_script, spawn_feed,
};
use sticky_scroll::chat::normalize_message;
use sticky_scroll::host::ScrollElement;

use crate::helpers::{local, pump, screen, test_app, test_terminal};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn assistant(text: &str) -> FeedEvent {
    FeedEvent::Message(normalize_message(&json!({ "role": "assistant", "content": text })))
}

#[tokio::test(start_paused = true)]
async fn transcript_follows_appends_through_the_render_loop() {
    local(async {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(dir.path());
        let mut terminal = test_terminal();

        for i in 0..100 {
            handle_feed_event(&mut app, assistant(&format!("message {i}")));
        }
        pump(&mut terminal, &mut app, 30).await;

        assert!(app.scroll.chat().has_auto_scrolled, "initial load used the force");
        assert_eq!(app.chat_view.scroll_top(), app.chat_view.max_scroll_top());
        let rows = screen(&terminal);
        assert!(rows.iter().any(|row| row.contains("message 99")), "screen: {rows:#?}");

        handle_feed_event(&mut app, assistant("late arrival"));
        pump(&mut terminal, &mut app, 30).await;
        assert_eq!(app.chat_view.scroll_top(), app.chat_view.max_scroll_top());
        assert!(screen(&terminal).iter().any(|row| row.contains("late arrival")));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn reading_history_holds_position_and_shows_indicator() {
    local(async {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(dir.path());
        let mut terminal = test_terminal();
        for i in 0..100 {
            handle_feed_event(&mut app, assistant(&format!("message {i}")));
        }
        pump(&mut terminal, &mut app, 30).await;

        handle_terminal_event(&mut app, key(KeyCode::Home));
        for i in 0..5 {
            handle_feed_event(&mut app, assistant(&format!("while away {i}")));
        }
        pump(&mut terminal, &mut app, 30).await;

        assert_eq!(app.chat_view.scroll_top(), 0.0);
        assert!(app.new_content_below());
        assert!(screen(&terminal)[0].contains("New messages below"));

        handle_terminal_event(&mut app, key(KeyCode::End));
        assert!(!app.new_content_below());
        pump(&mut terminal, &mut app, 2).await;
        assert!(!screen(&terminal)[0].contains("New messages below"));
        assert!(screen(&terminal).iter().any(|row| row.contains("while away 4")));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn new_session_clears_transcript_and_rearms_force() {
    local(async {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(dir.path());
        let mut terminal = test_terminal();
        for i in 0..60 {
            handle_feed_event(&mut app, assistant(&format!("old {i}")));
        }
        pump(&mut terminal, &mut app, 30).await;
        handle_terminal_event(&mut app, key(KeyCode::Home));

        handle_terminal_event(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.session, 2);
        assert!(app.messages.is_empty());
        let chat = app.scroll.chat();
        assert_eq!(
            (chat.has_auto_scrolled, chat.user_near_bottom, chat.new_content_below),
            (false, true, false)
        );
        drop(chat);

        pump(&mut terminal, &mut app, 2).await;
        assert!(
            screen(&terminal).iter().any(|row| row.contains("Waiting for messages in session 2"))
        );

        for i in 0..60 {
            handle_feed_event(&mut app, assistant(&format!("new {i}")));
        }
        pump(&mut terminal, &mut app, 30).await;
        assert!(app.scroll.chat().has_auto_scrolled);
        assert_eq!(app.chat_view.scroll_top(), app.chat_view.max_scroll_top());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn log_pane_follows_until_scrolled_up() {
    local(async {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(dir.path());
        let mut terminal = test_terminal();
        for i in 0..80 {
            handle_feed_event(&mut app, FeedEvent::Log(format!("log line {i}")));
        }
        pump(&mut terminal, &mut app, 5).await;
        assert_eq!(app.logs_view.scroll_top(), app.logs_view.max_scroll_top());
        assert!(screen(&terminal).iter().any(|row| row.contains("log line 79")));

        handle_terminal_event(&mut app, key(KeyCode::Tab));
        handle_terminal_event(&mut app, key(KeyCode::PageUp));
        let held = app.logs_view.scroll_top();
        assert!(!app.logs_following());

        handle_feed_event(&mut app, FeedEvent::Log("log line 80".to_owned()));
        pump(&mut terminal, &mut app, 5).await;
        assert_eq!(app.logs_view.scroll_top(), held);
        assert!(screen(&terminal).iter().any(|row| row.contains("paused, End to follow")));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn export_key_writes_file_and_grows_topbar() {
    local(async {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(dir.path());
        let mut terminal = test_terminal();
        handle_feed_event(&mut app, FeedEvent::Log("alpha".to_owned()));
        handle_feed_event(&mut app, FeedEvent::Log("beta".to_owned()));
        pump(&mut terminal, &mut app, 1).await;
        assert_eq!(app.topbar_height().as_deref(), Some("18px"));

        handle_terminal_event(&mut app, key(KeyCode::Char('e')));
        let files: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").path())
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(std::fs::read_to_string(&files[0]).expect("read"), "alpha\nbeta\n");
        let name = files[0].file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("sticky-logs-all-"), "name: {name}");

        pump(&mut terminal, &mut app, 1).await;
        assert_eq!(app.topbar_height().as_deref(), Some("36px"));
        assert!(screen(&terminal)[1].starts_with("  Exported 2 log lines to"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn scripted_feed_drives_the_view() {
    local(async {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(dir.path());
        let mut terminal = test_terminal();
        let script = parse_script(concat!(
            "{\"role\":\"user\",\"content\":\"ping\"}\n",
            "{\"log\":\"gateway up\"}\n",
            "{\"role\":\"assistant\",\"content\":[{\"type\":\"text\",\"text\":\"pong\"}]}\n",
        ))
        .expect("script");

        let feed = spawn_feed(
            app.feed_tx.clone(),
            FeedSource::Script(script),
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
        while let Ok(event) = app.feed_rx.try_recv() {
            handle_feed_event(&mut app, event);
        }
        feed.await.expect("feed task");
        pump(&mut terminal, &mut app, 3).await;

        assert_eq!(app.messages.len(), 2);
        assert_eq!(app.logs, ["gateway up"]);
        let rows = screen(&terminal);
        assert!(rows.iter().any(|row| row.contains("ping")));
        assert!(rows.iter().any(|row| row.contains("pong")));
    })
    .await;
}
