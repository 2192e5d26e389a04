use super::dialogue_repository::DialogueRepository;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI chat completion implementation of the dialogue repository
pub struct OpenAiDialogueRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiDialogueRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl DialogueRepository for OpenAiDialogueRepository {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(|e| format!("Invalid system prompt: {}", e))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt)
            .build()
            .map_err(|e| format!("Invalid user prompt: {}", e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![system.into(), user.into()])
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| format!("Invalid chat request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                "OpenAI chat completion failed"
            );
            format!("OpenAI chat error: {}", e)
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "OpenAI chat returned no content".to_string())?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = content.len(),
            "Dialogue completion received"
        );

        Ok(content)
    }
}
