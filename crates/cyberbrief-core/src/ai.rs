//! Optional AI executive summary, an external collaborator: used only
//! when an API key is configured, and any failure degrades to a digest
//! without the summary paragraph.

use async_openai::{
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

use crate::config::OpenAiConfig;
use crate::{Error, Result};

pub struct ExecutiveSummarizer {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl ExecutiveSummarizer {
    pub fn new(config: &OpenAiConfig) -> Self {
        let api_config = async_openai::config::OpenAIConfig::new().with_api_key(&config.api_key);
        Self {
            client: Client::with_config(api_config),
            model: config.model.clone(),
        }
    }

    /// Produce a short executive paragraph over the day's headlines.
    pub async fn summarize(&self, headlines: &[String]) -> Result<String> {
        if headlines.is_empty() {
            return Err(Error::Ai("no headlines to summarize".to_string()));
        }

        let prompt = format!(
            "You are preparing an executive cybersecurity briefing. Write one short \
             paragraph (3-4 sentences) summarizing the business significance of today's \
             headlines. No preamble, no bullet points.\n\nHeadlines:\n{}",
            headlines.join("\n")
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| Error::Ai(e.to_string()))?,
            )])
            .max_tokens(200u32)
            .build()
            .map_err(|e| Error::Ai(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::Ai(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(Error::Ai("empty completion".to_string()));
        }

        Ok(content)
    }
}
