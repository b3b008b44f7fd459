use super::AssistantPrompt;
use super::FileRecord;

pub enum Action {
    AbortReply(),
    AssistantRequest(AssistantPrompt),
    CancelAllFiles(),
    CancelFile(String),
    ProcessFiles(Vec<FileRecord>),
}
