use async_trait::async_trait;

/// Repository for the chat model that writes dialogues
#[async_trait]
pub trait DialogueRepository: Send + Sync {
    /// Send a system + user prompt and return the raw JSON object the model wrote
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, String>;
}
