use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Margin;
use ratatui::prelude::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::TextArea;
use crate::domain::models::TypingIndicator;
use crate::domain::models::Welcome;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::FileList;

fn render_header<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let title = "DocuChat";

    let mut status = "".to_string();
    if !app_state.files.is_empty() {
        status = format!("{} file(s) attached", app_state.files.len());
    }
    if let Some(notice) = &app_state.notice {
        status = notice.to_string();
    }

    let fill_length = (rect.width as usize).saturating_sub(title.len() + status.len());
    let line = Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::from(" ".repeat(fill_length)),
        Span::styled(status, Style::default().add_modifier(Modifier::DIM)),
    ]);

    frame.render_widget(Paragraph::new(line), rect);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let typing_indicator = TypingIndicator::default();
    let welcome = Welcome::default();

    #[cfg(feature = "dev")]
    {
        use tui_textarea::Input;
        use tui_textarea::Key;

        let test_str = "Summarize the attached quarterly report in three bullet points.";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        terminal.draw(|frame| {
            let files_height = FileList::height(&app_state.files);

            let mut constraints = vec![Constraint::Length(1), Constraint::Min(1)];
            if files_height > 0 {
                constraints.push(Constraint::Length(files_height));
            }
            constraints.push(Constraint::Max(4));

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.size());
            let chat_rect = layout[1];
            let input_rect = layout[layout.len() - 1];

            render_header(frame, layout[0], app_state);

            if chat_rect.width != app_state.last_known_width
                || chat_rect.height != app_state.last_known_height
            {
                app_state.set_rect(chat_rect);
            }

            if app_state.messages.is_empty() && app_state.files.is_empty() {
                welcome.render(frame, chat_rect);
            } else {
                app_state
                    .bubble_list
                    .render(frame, chat_rect, app_state.scroll.position);
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    chat_rect.inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            if files_height > 0 {
                FileList::render(frame, layout[2], &app_state.files);
            }

            if app_state.waiting_for_reply {
                typing_indicator.render(frame, input_rect);
            } else {
                frame.render_widget(textarea.widget(), input_rect);
            }
        })?;

        match events.next().await? {
            Event::AppMessage(message) => {
                app_state.append_message(message);
            }
            Event::AssistantPromptResponse(res) => {
                app_state.handle_assistant_response(res);
            }
            Event::FileStatusChanged(id, status) => {
                app_state.set_file_status(&id, status);
            }
            Event::FileProcessed { id, name } => {
                tracing::info!(id = %id, name = %name, "file processed");
                app_state.set_notice(&format!("{name} is ready for analysis"));
            }
            Event::FileFailed { id, name } => {
                tracing::warn!(id = %id, name = %name, "file rejected");
                app_state.set_notice(&format!("{name} is not a supported file type"));
            }
            Event::KeyboardCTRLC() => {
                if app_state.waiting_for_reply {
                    tx.send(Action::AbortReply())?;
                    app_state.waiting_for_reply = false;
                } else {
                    break;
                }
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_reply {
                    continue;
                }

                let input_str = &textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                let should_break = app_state.handle_submit(input_str, &tx)?;
                textarea = TextArea::default();
                if should_break {
                    break;
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_reply {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_reply {
                    textarea.insert_str(&text);
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {}
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::new();
    let mut events = EventsService::new(rx);

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
