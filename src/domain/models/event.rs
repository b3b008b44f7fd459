use tui_textarea::Input;

use super::AssistantResponse;
use super::FileStatus;
use super::Message;

pub enum Event {
    AppMessage(Message),
    AssistantPromptResponse(AssistantResponse),
    FileFailed { id: String, name: String },
    FileProcessed { id: String, name: String },
    FileStatusChanged(String, FileStatus),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
