//! OpenAI 호환 chat completion API 생성기(DeepSeek, Kimi, OpenAI).

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::application::ports::ArticleGenerator;
use crate::infrastructure::http::{collect_text, endpoint, send_json};

pub struct ChatCompletionGenerator {
    client: Client,
    name: &'static str,
    base_url: String,
    model: String,
    api_key: String,
}

impl ChatCompletionGenerator {
    pub fn new(
        client: Client,
        name: &'static str,
        base_url: &str,
        model: &str,
        api_key: String,
    ) -> Self {
        Self {
            client,
            name,
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl ArticleGenerator for ChatCompletionGenerator {
    fn name(&self) -> &str {
        self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false,
        });
        let request = self
            .client
            .post(endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&payload);

        let response = send_json(self.name, "request chat completion", request).await?;
        let content = response
            .pointer("/choices/0/message/content")
            .map(collect_text)
            .unwrap_or_default()
            .trim()
            .to_string();
        if content.is_empty() {
            bail!("{}: empty response content", self.name);
        }
        Ok(content)
    }
}
