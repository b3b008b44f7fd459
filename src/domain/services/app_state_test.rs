use anyhow::bail;
use anyhow::Result;
use test_utils::upload_fixtures;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::new_id;
use crate::domain::models::Action;
use crate::domain::models::AssistantResponse;
use crate::domain::models::Author;
use crate::domain::models::FileKind;
use crate::domain::models::FileRecord;
use crate::domain::models::FileStatus;
use crate::domain::models::MessageType;
use crate::domain::services::BubbleList;
use crate::domain::services::Scroll;

impl Default for AppState {
    fn default() -> AppState {
        return AppState {
            bubble_list: BubbleList::new(),
            files: vec![],
            last_known_height: 300,
            last_known_width: 100,
            messages: vec![],
            notice: None,
            scroll: Scroll::default(),
            waiting_for_reply: false,
        };
    }
}

fn fixture_record(name: &str, size: u64, kind: FileKind) -> FileRecord {
    return FileRecord {
        id: new_id(),
        name: name.to_string(),
        size,
        kind,
        status: FileStatus::Uploading,
    };
}

fn fixture_response(text: &str, done: bool) -> AssistantResponse {
    return AssistantResponse {
        author: Author::Assistant,
        text: text.to_string(),
        done,
    };
}

mod handle_submit {
    use super::*;

    #[test]
    fn it_appends_a_user_message_and_clears_files() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.files = vec![fixture_record("a.pdf", 1000, FileKind::Pdf)];

        let should_break = app_state.handle_submit("Hello", &tx)?;

        assert!(!should_break);
        assert_eq!(app_state.messages.len(), 1);
        assert_eq!(app_state.messages[0].author, Author::User);
        assert_eq!(app_state.messages[0].text(), "Hello");
        assert!(app_state.files.is_empty());
        assert!(app_state.waiting_for_reply);

        match rx.try_recv()? {
            Action::CancelAllFiles() => {}
            _ => bail!("Wrong enum"),
        }
        match rx.try_recv()? {
            Action::AssistantRequest(prompt) => {
                assert_eq!(prompt.text, "Hello");
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_skips_file_cancellation_when_nothing_is_pending() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_submit("Hello", &tx)?;

        match rx.try_recv()? {
            Action::AssistantRequest(_) => {}
            _ => bail!("Wrong enum"),
        }
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_appends_exactly_one_reply_per_send() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_submit("Hello", &tx)?;
        app_state.handle_assistant_response(fixture_response("Hi!", true));

        assert_eq!(app_state.messages.len(), 2);
        assert_eq!(app_state.messages[1].author, Author::Assistant);
        assert_eq!(app_state.messages[1].text(), "Hi!");
        assert!(!app_state.waiting_for_reply);

        return Ok(());
    }

    #[test]
    fn it_keeps_messages_in_insertion_order() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_submit("First", &tx)?;
        app_state.handle_assistant_response(fixture_response("Reply one", true));
        app_state.handle_submit("Second", &tx)?;
        app_state.handle_assistant_response(fixture_response("Reply two", true));

        let authors = app_state
            .messages
            .iter()
            .map(|message| {
                return message.author.clone();
            })
            .collect::<Vec<Author>>();

        assert_eq!(
            authors,
            vec![
                Author::User,
                Author::Assistant,
                Author::User,
                Author::Assistant
            ]
        );
        assert_eq!(app_state.messages[2].text(), "Second");

        return Ok(());
    }

    #[test]
    fn it_extends_a_streamed_reply_in_place() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_submit("Hello", &tx)?;
        app_state.handle_assistant_response(fixture_response("Hi ", false));
        assert!(app_state.waiting_for_reply);

        app_state.handle_assistant_response(fixture_response("there!", true));

        assert_eq!(app_state.messages.len(), 2);
        assert_eq!(app_state.messages[1].text(), "Hi there!");
        assert!(!app_state.waiting_for_reply);

        return Ok(());
    }
}

mod files {
    use super::*;

    #[test]
    fn it_adds_files_in_one_batch() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.add_files(
            vec![
                fixture_record("a.pdf", 1000, FileKind::Pdf),
                fixture_record("b.png", 2000, FileKind::Image),
            ],
            &tx,
        )?;

        assert_eq!(app_state.files.len(), 2);
        assert!(app_state.files.iter().all(|file| {
            return file.status == FileStatus::Uploading;
        }));

        match rx.try_recv()? {
            Action::ProcessFiles(files) => {
                assert_eq!(files.len(), 2);
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_removes_a_file_by_id() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let record = fixture_record("a.pdf", 1000, FileKind::Pdf);
        let id = record.id.clone();
        app_state.files = vec![record, fixture_record("b.png", 2000, FileKind::Image)];

        app_state.remove_file(&id, &tx)?;

        assert_eq!(app_state.files.len(), 1);
        assert_eq!(app_state.files[0].name, "b.png");

        match rx.try_recv()? {
            Action::CancelFile(cancelled) => {
                assert_eq!(cancelled, id);
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_ignores_removing_an_unknown_id() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.files = vec![fixture_record("a.pdf", 1000, FileKind::Pdf)];

        app_state.remove_file("not-an-id", &tx)?;

        assert_eq!(app_state.files.len(), 1);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_clears_all_files() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.files = vec![
            fixture_record("a.pdf", 1000, FileKind::Pdf),
            fixture_record("b.png", 2000, FileKind::Image),
        ];

        app_state.clear_files(&tx)?;

        assert!(app_state.files.is_empty());
        match rx.try_recv()? {
            Action::CancelAllFiles() => {}
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_advances_file_status_forward_only() {
        let mut app_state = AppState::default();
        let record = fixture_record("a.pdf", 1000, FileKind::Pdf);
        let id = record.id.clone();
        app_state.files = vec![record];

        app_state.set_file_status(&id, FileStatus::Processing);
        assert_eq!(app_state.files[0].status, FileStatus::Processing);

        app_state.set_file_status(&id, FileStatus::Uploading);
        assert_eq!(app_state.files[0].status, FileStatus::Processing);

        app_state.set_file_status(&id, FileStatus::Complete);
        assert_eq!(app_state.files[0].status, FileStatus::Complete);

        app_state.set_file_status(&id, FileStatus::Error);
        assert_eq!(app_state.files[0].status, FileStatus::Complete);
    }

    #[test]
    fn it_ignores_status_events_for_removed_files() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let record = fixture_record("a.pdf", 1000, FileKind::Pdf);
        let id = record.id.clone();
        app_state.files = vec![record];

        app_state.remove_file(&id, &tx)?;
        app_state.set_file_status(&id, FileStatus::Processing);

        assert!(app_state.files.is_empty());
        return Ok(());
    }
}

mod handle_slash_commands {
    use super::*;

    #[test]
    fn it_breaks_on_quit() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let (should_break, should_continue) = app_state.handle_slash_commands("/q", &tx)?;

        assert!(should_break);
        assert!(!should_continue);
        assert!(app_state.messages.is_empty());

        return Ok(());
    }

    #[test]
    fn it_replies_to_help_without_involving_the_assistant() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        let should_break = app_state.handle_submit("/help", &tx)?;

        assert!(!should_break);
        assert!(!app_state.waiting_for_reply);
        assert_eq!(app_state.messages.len(), 1);
        assert_eq!(app_state.messages[0].author, Author::App);
        assert!(app_state.messages[0].text().contains("/attach"));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_attaches_files_from_paths() -> Result<()> {
        let (_dir, paths) = upload_fixtures(&[("a.pdf", 1000), ("b.png", 2000)]);
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        let input = format!(
            "/attach {} {}",
            paths[0].to_string_lossy(),
            paths[1].to_string_lossy()
        );
        let (should_break, should_continue) = app_state.handle_slash_commands(&input, &tx)?;

        assert!(!should_break);
        assert!(should_continue);
        assert_eq!(app_state.files.len(), 2);
        assert_eq!(app_state.files[0].name, "a.pdf");
        assert_eq!(app_state.files[0].size, 1000);
        assert_eq!(app_state.files[1].name, "b.png");

        match rx.try_recv()? {
            Action::ProcessFiles(files) => {
                assert_eq!(files.len(), 2);
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_returns_an_error_message_on_a_missing_path() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_slash_commands("/attach /does/not/exist.pdf", &tx)?;

        assert!(app_state.files.is_empty());
        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.author, Author::App);
        assert_eq!(last_message.message_type(), MessageType::Error);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_returns_an_error_message_when_attach_has_no_args() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_slash_commands("/attach", &tx)?;

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.message_type(), MessageType::Error);

        return Ok(());
    }

    #[test]
    fn it_removes_a_file_by_position() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.files = vec![
            fixture_record("a.pdf", 1000, FileKind::Pdf),
            fixture_record("b.png", 2000, FileKind::Image),
        ];
        let expected_id = app_state.files[1].id.clone();

        app_state.handle_slash_commands("/remove 2", &tx)?;

        assert_eq!(app_state.files.len(), 1);
        assert_eq!(app_state.files[0].name, "a.pdf");

        match rx.try_recv()? {
            Action::CancelFile(id) => {
                assert_eq!(id, expected_id);
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_returns_an_error_message_on_an_invalid_position() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.files = vec![fixture_record("a.pdf", 1000, FileKind::Pdf)];

        app_state.handle_slash_commands("/remove 5", &tx)?;

        assert_eq!(app_state.files.len(), 1);
        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.message_type(), MessageType::Error);

        return Ok(());
    }

    #[test]
    fn it_clears_files_and_sets_a_notice() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.files = vec![fixture_record("a.pdf", 1000, FileKind::Pdf)];

        app_state.handle_slash_commands("/clear", &tx)?;

        assert!(app_state.files.is_empty());
        assert_eq!(
            app_state.notice,
            Some("All uploaded files have been removed".to_string())
        );

        return Ok(());
    }
}
