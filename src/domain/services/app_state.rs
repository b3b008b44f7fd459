#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path::Path;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::AssistantPrompt;
use crate::domain::models::AssistantResponse;
use crate::domain::models::Author;
use crate::domain::models::FileRecord;
use crate::domain::models::FileStatus;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;

/// Single source of truth for session state. Only the UI loop mutates it, in
/// response to one event at a time; everything else communicates intent
/// through the action channel.
pub struct AppState {
    pub bubble_list: BubbleList,
    pub files: Vec<FileRecord>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub notice: Option<String>,
    pub scroll: Scroll,
    pub waiting_for_reply: bool,
}

impl AppState {
    pub fn new() -> AppState {
        return AppState {
            bubble_list: BubbleList::new(),
            files: vec![],
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            notice: None,
            scroll: Scroll::default(),
            waiting_for_reply: false,
        };
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    /// Entry point for everything typed into the input bar. Slash commands
    /// are dispatched without touching the transcript; anything else is sent
    /// to the assistant. Returns whether the UI loop should exit.
    pub fn handle_submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if SlashCommand::parse(input).is_some() {
            let (should_break, _handled) = self.handle_slash_commands(input, tx)?;
            return Ok(should_break);
        }

        self.append_message(Message::new(Author::User, input));

        // Attachments belong to the question that was just sent.
        self.clear_files(tx)?;

        self.waiting_for_reply = true;
        tx.send(Action::AssistantRequest(AssistantPrompt::new(
            input.to_string(),
        )))?;

        return Ok(false);
    }

    pub fn handle_slash_commands(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let command = match SlashCommand::parse(input) {
            Some(command) => command,
            None => return Ok((false, false)),
        };

        if command.is_quit() {
            return Ok((true, false));
        }

        if command.is_help() {
            self.append_message(Message::new(Author::App, &help_text()));
            return Ok((false, true));
        }

        if command.is_attach() {
            if command.args.is_empty() {
                self.append_error(
                    "You must specify at least one path with `/attach`. Run `/help` for more details.",
                );
                return Ok((false, true));
            }

            let mut records = vec![];
            for arg in &command.args {
                match FileRecord::from_path(Path::new(arg)) {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        self.append_error(&format!("There was an error attaching {arg}:\n\n{err}"));
                    }
                }
            }

            if !records.is_empty() {
                self.add_files(records, tx)?;
            }
            return Ok((false, true));
        }

        if command.is_remove() {
            let position = command.args.first().and_then(|e| {
                return e.parse::<usize>().ok();
            });

            match position {
                Some(idx) if idx >= 1 && idx <= self.files.len() => {
                    let id = self.files[idx - 1].id.clone();
                    self.remove_file(&id, tx)?;
                }
                _ => {
                    self.append_error(
                        "`/remove` takes the position of an attached file, as shown in the file list.",
                    );
                }
            }
            return Ok((false, true));
        }

        if command.is_clear() {
            self.clear_files(tx)?;
            self.set_notice("All uploaded files have been removed");
            return Ok((false, true));
        }

        return Ok((false, false));
    }

    pub fn handle_assistant_response(&mut self, res: AssistantResponse) {
        let mut appended = false;
        if let Some(last_message) = self.messages.last_mut() {
            if last_message.author != Author::User {
                last_message.append(&res.text);
                appended = true;
            }
        }

        if !appended {
            self.messages.push(Message::new(res.author, &res.text));
        }

        self.sync_dependants();

        if res.done {
            self.waiting_for_reply = false;
        }
    }

    pub fn add_files(
        &mut self,
        records: Vec<FileRecord>,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.files.extend(records.iter().cloned());
        tx.send(Action::ProcessFiles(records))?;
        return Ok(());
    }

    pub fn remove_file(&mut self, id: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let len_before = self.files.len();
        self.files.retain(|file| {
            return file.id != id;
        });

        if self.files.len() < len_before {
            tx.send(Action::CancelFile(id.to_string()))?;
        }

        return Ok(());
    }

    pub fn clear_files(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.files.is_empty() {
            return Ok(());
        }

        self.files.clear();
        tx.send(Action::CancelAllFiles())?;
        return Ok(());
    }

    /// Stage events from the pipeline are id keyed. Events for removed files
    /// find no record and fall through, and the lifecycle never moves
    /// backwards regardless of event arrival order.
    pub fn set_file_status(&mut self, id: &str, status: FileStatus) {
        if let Some(file) = self.files.iter_mut().find(|file| {
            return file.id == id;
        }) {
            if file.status.can_advance_to(status) {
                file.status = status;
            }
        }
    }

    pub fn set_notice(&mut self, notice: &str) {
        self.notice = Some(notice.to_string());
    }

    fn append_error(&mut self, text: &str) {
        self.append_message(Message::new_with_type(Author::App, MessageType::Error, text));
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width as usize);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.waiting_for_reply {
            self.scroll.last();
        }
    }
}
