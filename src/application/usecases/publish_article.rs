//! 글 하나를 활성 플랫폼 전체(또는 하나)에 게시하는 디스패처 유스케이스.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::application::config::PublishConfig;
use crate::application::ports::{PlatformPublisher, PublisherFactory, Reporter};
use crate::domain::article::Article;
use crate::domain::platform::matches_platform;
use crate::domain::publish::{PublishError, PublishOptions, PublishResult};

/// 원문 파싱, 어댑터 구성, 플랫폼별 변환/게시와 결과 집계를 담당한다.
pub struct MultiPublisher<'a> {
    pub config: &'a PublishConfig,
    pub factory: &'a dyn PublisherFactory,
    pub reporter: &'a dyn Reporter,
}

impl<'a> MultiPublisher<'a> {
    /// 원문에서 제목/본문을 분리한다.
    pub fn parse_article(&self, raw: &str) -> Article {
        Article::parse(raw)
    }

    /// 현재 설정으로 활성화되는 플랫폼 표시 이름 목록(등록 순서).
    pub fn active_platforms(&self) -> Vec<&'static str> {
        self.factory
            .build(self.config)
            .iter()
            .map(|publisher| publisher.name())
            .collect()
    }

    /// 활성 플랫폼 전체에 순서대로 게시한다.
    /// 어댑터 하나의 실패(오류/패닉)는 해당 결과에만 기록되고 나머지는 계속 진행한다.
    pub async fn publish(&self, raw: &str, options: &PublishOptions) -> Vec<PublishResult> {
        let article = self
            .parse_article(raw)
            .with_title_override(options.title.as_deref());
        let publishers = self.factory.build(self.config);
        info!(
            title = %article.title,
            platforms = publishers.len(),
            status = %options.status,
            "publishing article"
        );

        let mut results = Vec::with_capacity(publishers.len());
        for publisher in &publishers {
            results.push(self.run_one(publisher.as_ref(), &article, options).await);
        }
        results
    }

    /// 지정한 플랫폼 하나에만 게시한다(식별자 또는 표시 이름).
    pub async fn publish_to(
        &self,
        platform: &str,
        raw: &str,
        options: &PublishOptions,
    ) -> Result<PublishResult, PublishError> {
        let publisher = self
            .factory
            .build(self.config)
            .into_iter()
            .find(|p| matches_platform(platform, p.id(), p.name()))
            .ok_or_else(|| PublishError::PlatformNotFound(platform.trim().to_string()))?;

        let article = self
            .parse_article(raw)
            .with_title_override(options.title.as_deref());
        Ok(self.run_one(publisher.as_ref(), &article, options).await)
    }

    async fn run_one(
        &self,
        publisher: &dyn PlatformPublisher,
        article: &Article,
        options: &PublishOptions,
    ) -> PublishResult {
        let name = publisher.name();
        if !publisher.is_configured() {
            debug!(platform = publisher.id(), "no credentials, running in manual mode");
        }
        self.reporter.platform_status(name, "publishing", None);

        let attempt = AssertUnwindSafe(async {
            let transformed = publisher.transform(article.clone())?;
            publisher.publish(&transformed, options).await
        })
        .catch_unwind()
        .await;

        let result = match attempt {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => PublishResult::failed(name, format!("{err:#}"), None),
            Err(panic) => PublishResult::failed(name, panic_message(panic.as_ref()), None),
        };

        match result.error() {
            Some(error) => {
                warn!(platform = publisher.id(), %error, "publish failed");
                self.reporter.platform_status(name, "failed", Some(error));
            }
            None => {
                info!(platform = publisher.id(), url = ?result.url(), "publish finished");
                let status = if result.url().is_some() || result.id().is_some() {
                    "done"
                } else {
                    "manual"
                };
                self.reporter
                    .platform_status(name, status, result.url().or(result.message()));
            }
        }
        result
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("adapter panicked: {detail}")
}
