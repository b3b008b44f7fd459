#[cfg(test)]
#[path = "simulated_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Assistant;
use crate::domain::models::AssistantName;
use crate::domain::models::AssistantPrompt;
use crate::domain::models::AssistantResponse;
use crate::domain::models::Author;
use crate::domain::models::Event;

const CANNED_REPLY: &str = "I understand your question about the uploaded documents. Let me analyze them and provide you with a comprehensive answer.";

/// Stand-in for a real model backend. Waits a fixed delay and replies with
/// canned text, one reply per prompt.
pub struct Simulated {
    delay: String,
}

impl Default for Simulated {
    fn default() -> Simulated {
        return Simulated {
            delay: Config::get(ConfigKey::ReplyDelay),
        };
    }
}

#[async_trait]
impl Assistant for Simulated {
    fn name(&self) -> AssistantName {
        return AssistantName::Simulated;
    }

    #[allow(clippy::implicit_return)]
    async fn get_reply<'a>(
        &self,
        prompt: AssistantPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let delay = self.delay.parse::<u64>()?;
        tracing::debug!(prompt = %prompt.text, delay_ms = delay, "simulating a reply");

        time::sleep(time::Duration::from_millis(delay)).await;

        tx.send(Event::AssistantPromptResponse(AssistantResponse {
            author: Author::Assistant,
            text: CANNED_REPLY.to_string(),
            done: true,
        }))?;

        return Ok(());
    }
}
