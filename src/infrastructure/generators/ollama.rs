//! Ollama 로컬 모델(`/api/generate`) 생성기.

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::application::ports::ArticleGenerator;
use crate::infrastructure::http::{collect_text, endpoint, send_json};

pub struct OllamaGenerator {
    client: Client,
    host: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(client: Client, host: &str, model: &str) -> Self {
        Self {
            client,
            host: host.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ArticleGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });
        let request = self
            .client
            .post(endpoint(&self.host, "api/generate"))
            .json(&payload);

        let response = send_json(self.name(), "request Ollama API", request).await?;
        let content = collect_text(&response).trim().to_string();
        if content.is_empty() {
            bail!("ollama: empty response content");
        }
        Ok(content)
    }
}
