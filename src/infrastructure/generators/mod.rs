//! 글 생성 모델 어댑터 모음.
//! 선택한 모델을 우선 사용하고, Ollama 실패 시 키가 있는 원격 모델로 폴백한다.

mod chat_completion;
mod ollama;

use reqwest::Client;

use crate::application::config::{
    DEFAULT_DEEPSEEK_BASE, DEFAULT_DEEPSEEK_MODEL, DEFAULT_KIMI_BASE, DEFAULT_KIMI_MODEL,
    DEFAULT_OPENAI_BASE, DEFAULT_OPENAI_MODEL, GeneratorConfig, ModelProvider,
};
use crate::application::ports::ArticleGenerator;

pub use chat_completion::ChatCompletionGenerator;
pub use ollama::OllamaGenerator;

/// 우선 모델 + 폴백 모델 순서의 생성기 목록. API 키가 없는 원격 모델은 제외된다.
pub fn build_generators(config: &GeneratorConfig, client: &Client) -> Vec<Box<dyn ArticleGenerator>> {
    let mut generators: Vec<Box<dyn ArticleGenerator>> = Vec::new();

    match config.provider {
        ModelProvider::Ollama => {
            generators.push(Box::new(OllamaGenerator::new(
                client.clone(),
                config.ollama_host(),
                config.ollama_model(),
            )));
            // 로컬 모델이 실패하면 DeepSeek, Kimi 순으로 시도한다.
            generators.extend(remote(config, client, ModelProvider::DeepSeek));
            generators.extend(remote(config, client, ModelProvider::Kimi));
        }
        provider => generators.extend(remote(config, client, provider)),
    }

    generators
}

fn remote(
    config: &GeneratorConfig,
    client: &Client,
    provider: ModelProvider,
) -> Option<Box<dyn ArticleGenerator>> {
    let (settings, base, model) = match provider {
        ModelProvider::DeepSeek => (&config.deepseek, DEFAULT_DEEPSEEK_BASE, DEFAULT_DEEPSEEK_MODEL),
        ModelProvider::Kimi => (&config.kimi, DEFAULT_KIMI_BASE, DEFAULT_KIMI_MODEL),
        ModelProvider::OpenAi => (&config.openai, DEFAULT_OPENAI_BASE, DEFAULT_OPENAI_MODEL),
        ModelProvider::Ollama => return None,
    };
    let api_key = settings.api_key.clone()?;

    Some(Box::new(ChatCompletionGenerator::new(
        client.clone(),
        provider.name(),
        settings.api_base_or(base),
        settings.model_or(model),
        api_key,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::config::ChatModelConfig;

    fn names(config: &GeneratorConfig) -> Vec<String> {
        build_generators(config, &Client::new())
            .iter()
            .map(|g| g.name().to_string())
            .collect()
    }

    fn with_key(key: &str) -> ChatModelConfig {
        ChatModelConfig {
            api_key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn ollama_falls_back_to_keyed_remotes() {
        let config = GeneratorConfig {
            kimi: with_key("k"),
            openai: with_key("o"),
            ..Default::default()
        };
        assert_eq!(names(&config), ["ollama", "kimi"]);
    }

    #[test]
    fn remote_provider_requires_key() {
        let config = GeneratorConfig {
            provider: ModelProvider::OpenAi,
            ..Default::default()
        };
        assert!(names(&config).is_empty());

        let config = GeneratorConfig {
            provider: ModelProvider::DeepSeek,
            deepseek: with_key("d"),
            ..Default::default()
        };
        assert_eq!(names(&config), ["deepseek"]);
    }
}
