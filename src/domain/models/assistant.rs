#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use strum::EnumVariantNames;
use tokio::sync::mpsc;

use super::Author;
use super::Event;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AssistantName {
    Simulated,
}

impl AssistantName {
    pub fn parse(text: &str) -> Result<AssistantName> {
        if text == "simulated" {
            return Ok(AssistantName::Simulated);
        }

        bail!(format!("There is no assistant named {text}"))
    }
}

pub struct AssistantPrompt {
    pub text: String,
}

impl AssistantPrompt {
    pub fn new(text: String) -> AssistantPrompt {
        return AssistantPrompt { text };
    }
}

pub struct AssistantResponse {
    pub author: Author,
    pub text: String,
    pub done: bool,
}

#[async_trait]
pub trait Assistant {
    fn name(&self) -> AssistantName;

    /// Produces a reply for the given prompt. Replies may be streamed back to
    /// the UI in chunks through the channel; the final chunk carries
    /// `done = true`, which releases the input bar.
    async fn get_reply<'a>(
        &self,
        prompt: AssistantPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()>;
}

pub type AssistantBox = Box<dyn Assistant + Send + Sync>;
