use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::FilePipeline;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::AssistantName;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::infrastructure::assistants::AssistantManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /attach (/a) [PATH ...] - Attach one or more files to your next question.
- /remove (/rm) [NUMBER] - Remove an attached file by its position in the file list.
- /clear (/c) - Remove all attached files.
- /help (/h) - Provides this help menu.
- /quit /exit (/q) - Exit DocuChat.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Interrupt waiting for a reply if in progress, otherwise exit.

FILES:
Attached files run through a simulated upload and processing pipeline before they are marked ready. Files belong to the next message you send, and the list clears once that message goes out. Supported types: pdf, doc, docx, xls, xlsx, ppt, pptx, txt, csv, png, jpg, jpeg, gif, webp. Anything else lands in the error state.
        "#;

    return text.trim().to_string();
}

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::AppMessage(Message::new_with_type(
        Author::App,
        MessageType::Error,
        &format!("The assistant failed with the following error: {:?}", err),
    )))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let mut pipeline = FilePipeline::from_config()?;

        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match action.unwrap() {
                Action::AbortReply() => {
                    worker.abort();
                }
                Action::AssistantRequest(prompt) => {
                    worker = tokio::spawn(async move {
                        let name = AssistantName::parse(&Config::get(ConfigKey::Assistant))?;
                        let res = AssistantManager::get(name)?
                            .get_reply(prompt, &worker_tx)
                            .await;

                        if let Err(err) = res {
                            worker_error(err, &worker_tx)?;
                        }

                        return Ok(());
                    });
                }
                Action::CancelAllFiles() => {
                    pipeline.cancel_all();
                }
                Action::CancelFile(id) => {
                    pipeline.cancel(&id);
                }
                Action::ProcessFiles(files) => {
                    pipeline.process(&files, &tx);
                }
            }
        }
    }
}
