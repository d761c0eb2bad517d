//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 환경변수/.env 파일 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::platform::Platform;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen:7b-chat-q5_K_M";
pub const DEFAULT_DEEPSEEK_BASE: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";
pub const DEFAULT_KIMI_BASE: &str = "https://api.moonshot.cn/v1";
pub const DEFAULT_KIMI_MODEL: &str = "moonshot-v1-8k-vision-preview";
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// 게시 플랫폼 자격 증명
    pub platforms: PublishConfig,
    /// 글 생성 모델 설정
    pub generator: GeneratorConfig,
    /// 생성 글 저장 디렉터리(없으면 기본 데이터 디렉터리)
    pub output_dir: Option<PathBuf>,
}

/// 플랫폼별 자격 증명. 필수 값이 하나라도 비어 있으면 `None`이다.
#[derive(Debug, Clone, Default)]
pub struct PublishConfig {
    pub wordpress: Option<WordPressConfig>,
    pub cnblogs: Option<CnBlogsConfig>,
    pub juejin: Option<JuejinConfig>,
    pub zhihu: Option<ZhihuConfig>,
    pub csdn: Option<CsdnConfig>,
    pub xiaohongshu: Option<XiaohongshuConfig>,
    /// 자격 증명 없이 수동 게시 안내만 받을 플랫폼
    pub manual_platforms: Vec<Platform>,
}

#[derive(Debug, Clone)]
pub struct WordPressConfig {
    pub site_url: String,
    pub username: String,
    /// Application Password 권장
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct CnBlogsConfig {
    pub blog_name: String,
    pub username: String,
    pub password: String,
    /// 기본값은 blog_name
    pub blog_id: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JuejinConfig {
    pub cookie: String,
    /// 없으면 cookie의 `csrf_token=`에서 추출
    pub csrf_token: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ZhihuConfig {
    pub cookie: String,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CsdnConfig {
    pub cookie: String,
    pub username: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone)]
pub struct XiaohongshuConfig {
    pub access_token: String,
    pub api_base: Option<String>,
}

impl PublishConfig {
    /// 해당 플랫폼의 자격 증명이 완전히 해석되었는지 확인한다.
    pub fn has_credentials(&self, platform: Platform) -> bool {
        match platform {
            Platform::WordPress => self.wordpress.is_some(),
            Platform::CnBlogs => self.cnblogs.is_some(),
            Platform::Juejin => self.juejin.is_some(),
            Platform::Zhihu => self.zhihu.is_some(),
            Platform::Csdn => self.csdn.is_some(),
            Platform::Xiaohongshu => self.xiaohongshu.is_some(),
        }
    }

    pub fn is_manual(&self, platform: Platform) -> bool {
        self.manual_platforms.contains(&platform)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Ollama,
    DeepSeek,
    Kimi,
    OpenAi,
}

impl ModelProvider {
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "deepseek" => Some(Self::DeepSeek),
            "kimi" | "moonshot" => Some(Self::Kimi),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::DeepSeek => "deepseek",
            Self::Kimi => "kimi",
            Self::OpenAi => "openai",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    pub provider: ModelProvider,
    pub ollama_host: Option<String>,
    pub ollama_model: Option<String>,
    pub deepseek: ChatModelConfig,
    pub kimi: ChatModelConfig,
    pub openai: ChatModelConfig,
}

/// OpenAI 호환 chat completion 엔드포인트 설정.
#[derive(Debug, Clone, Default)]
pub struct ChatModelConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base: Option<String>,
}

impl GeneratorConfig {
    pub fn ollama_host(&self) -> &str {
        self.ollama_host.as_deref().unwrap_or(DEFAULT_OLLAMA_HOST)
    }

    pub fn ollama_model(&self) -> &str {
        self.ollama_model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL)
    }
}

impl ChatModelConfig {
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model.as_deref().unwrap_or(default)
    }

    pub fn api_base_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.api_base.as_deref().unwrap_or(default)
    }
}
