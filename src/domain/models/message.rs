#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::new_id;
use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
}

/// Chat content is almost always plain text, but the assistant seam allows
/// richer structured payloads. Rich content is opaque and rendered as pretty
/// printed JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    Text(String),
    Rich(serde_json::Value),
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub content: MessageContent,
    pub timestamp: DateTime<Local>,
    mtype: MessageType,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            id: new_id(),
            author,
            content: MessageContent::Text(text.to_string().replace('\t', "  ")),
            timestamp: Local::now(),
            mtype: MessageType::Normal,
        };
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            id: new_id(),
            author,
            content: MessageContent::Text(text.to_string().replace('\t', "  ")),
            timestamp: Local::now(),
            mtype,
        };
    }

    pub fn new_rich(author: Author, value: serde_json::Value) -> Message {
        return Message {
            id: new_id(),
            author,
            content: MessageContent::Rich(value),
            timestamp: Local::now(),
            mtype: MessageType::Normal,
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => return text.to_string(),
            MessageContent::Rich(value) => {
                return serde_json::to_string_pretty(value)
                    .unwrap_or_else(|_| return value.to_string());
            }
        }
    }

    /// Extends text content in place, used when replies stream in chunks.
    /// Rich content is a single complete payload and is left untouched.
    pub fn append(&mut self, text: &str) {
        if let MessageContent::Text(current) = &mut self.content {
            *current += &text.replace('\t', "  ");
        }
    }

    pub fn time_label(&self) -> String {
        return self.timestamp.format("%H:%M").to_string();
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text().split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if word.len() + char_count + 1 > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word.len() + 1;
                } else {
                    current_lines.push(word);
                    char_count += word.len() + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
