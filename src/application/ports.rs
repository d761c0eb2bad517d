//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, GeneratorConfig, PublishConfig};
use crate::domain::article::Article;
use crate::domain::publish::{PublishOptions, PublishResult};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 게시 플랫폼 하나의 어댑터 포트.
///
/// 원격 실패는 `Ok(PublishResult)`의 실패 결과로 돌려준다.
/// `Err`는 빈 제목 같은 계약 위반에만 사용한다.
#[async_trait]
pub trait PlatformPublisher: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    /// 보유한 자격 증명만 검사한다(I/O 없음).
    fn is_configured(&self) -> bool;

    /// 플랫폼에 맞게 본문/제목을 변환한다. 멱등이어야 한다.
    fn transform(&self, article: Article) -> Result<Article> {
        Ok(article)
    }

    async fn publish(&self, article: &Article, options: &PublishOptions) -> Result<PublishResult>;
}

/// 활성 플랫폼 어댑터 목록을 등록 순서대로 구성하는 팩토리 포트.
pub trait PublisherFactory: Send + Sync {
    fn build(&self, config: &PublishConfig) -> Vec<Box<dyn PlatformPublisher>>;
}

/// 프롬프트로 글 본문을 생성하는 모델 포트.
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// 우선 모델 + 폴백 모델 순서의 생성기 목록을 만드는 팩토리 포트.
pub trait GeneratorFactory: Send + Sync {
    fn build(&self, config: &GeneratorConfig) -> Vec<Box<dyn ArticleGenerator>>;
}

/// 생성된 글을 저장하는 포트.
pub trait ArticleStore: Send + Sync {
    fn save(&self, dir: &Path, stem: &str, content: &str) -> Result<PathBuf>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn platform_status(&self, platform: &str, status: &str, extra: Option<&str>);
    fn raw(&self, line: &str);
}
