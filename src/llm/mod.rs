use anyhow::Result;

pub mod openai;

pub use openai::LlmClient;

#[async_trait::async_trait]
pub trait Llm: Send + Sync {
    /// One chat completion: system instructions plus a single user turn.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
