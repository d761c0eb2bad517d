//! 플랫폼/모델 설정 진단(inspection) 뷰 모델.
//! 비밀 값은 포함하지 않고 해석 여부와 누락 변수 이름만 담는다.

use serde::Serialize;

use super::env::{EnvReader, missing_vars, resolve_config};
use crate::application::config::{
    Config, DEFAULT_DEEPSEEK_MODEL, DEFAULT_KIMI_MODEL, DEFAULT_OPENAI_MODEL, ModelProvider,
};
use crate::domain::platform::Platform;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub platforms: Vec<PlatformInspection>,
    pub generator: GeneratorInspection,
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformInspection {
    pub id: &'static str,
    pub name: &'static str,
    /// 필수 자격 증명이 모두 해석됨
    pub configured: bool,
    /// 수동 게시 모드로 지정됨
    pub manual: bool,
    /// 게시 시 어댑터가 생성됨
    pub active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratorInspection {
    pub provider: ModelProvider,
    pub ollama_host: String,
    pub ollama_model: String,
    pub deepseek: ChatModelInspection,
    pub kimi: ChatModelInspection,
    pub openai: ChatModelInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatModelInspection {
    pub api_key_resolved: bool,
    pub model: String,
}

impl ConfigInspection {
    pub(crate) fn from_env<F>(reader: &EnvReader<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = resolve_config(reader);
        let platforms = Platform::ALL
            .iter()
            .map(|&platform| platform_inspection(&config, platform, missing_vars(reader, platform)))
            .collect();

        let generator = &config.generator;
        Self {
            platforms,
            generator: GeneratorInspection {
                provider: generator.provider,
                ollama_host: generator.ollama_host().to_string(),
                ollama_model: generator.ollama_model().to_string(),
                deepseek: ChatModelInspection {
                    api_key_resolved: generator.deepseek.api_key.is_some(),
                    model: generator.deepseek.model_or(DEFAULT_DEEPSEEK_MODEL).to_string(),
                },
                kimi: ChatModelInspection {
                    api_key_resolved: generator.kimi.api_key.is_some(),
                    model: generator.kimi.model_or(DEFAULT_KIMI_MODEL).to_string(),
                },
                openai: ChatModelInspection {
                    api_key_resolved: generator.openai.api_key.is_some(),
                    model: generator.openai.model_or(DEFAULT_OPENAI_MODEL).to_string(),
                },
            },
            output_dir: config.output_dir.as_ref().map(|p| p.display().to_string()),
        }
    }
}

fn platform_inspection(config: &Config, platform: Platform, missing: Vec<String>) -> PlatformInspection {
    let configured = config.platforms.has_credentials(platform);
    let manual = config.platforms.is_manual(platform);
    PlatformInspection {
        id: platform.id(),
        name: platform.display_name(),
        configured,
        manual,
        active: configured || manual,
        missing,
    }
}
