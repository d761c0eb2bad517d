//! 게시 플랫폼 어댑터와 등록표(registry).
//!
//! 등록표는 플랫폼별 활성 조건과 생성자를 고정 순서로 보관한다.
//! 자격 증명이 없는 어댑터는 수동 게시 모드로 지정된 경우에만 생성된다.

mod cnblogs;
mod csdn;
mod juejin;
mod wordpress;
mod xiaohongshu;
mod zhihu;

use anyhow::Result;
use reqwest::Client;

use crate::application::config::PublishConfig;
use crate::application::ports::PlatformPublisher;
use crate::domain::article::Article;
use crate::domain::markdown::{strip_emphasis, truncate_chars};
use crate::domain::platform::Platform;
use crate::domain::publish::{PublishError, PublishResult};

pub use cnblogs::CnBlogsPublisher;
pub use csdn::CsdnPublisher;
pub use juejin::JuejinPublisher;
pub use wordpress::WordPressPublisher;
pub use xiaohongshu::XiaohongshuPublisher;
pub use zhihu::ZhihuPublisher;

type BuildFn = fn(&PublishConfig, &Client) -> Box<dyn PlatformPublisher>;

/// 등록표 항목.
pub struct PlatformEntry {
    pub platform: Platform,
    pub build: BuildFn,
}

impl PlatformEntry {
    /// 자격 증명이 완전하거나 수동 모드로 지정되었을 때만 활성이다.
    pub fn is_active(&self, config: &PublishConfig) -> bool {
        config.has_credentials(self.platform) || config.is_manual(self.platform)
    }

    pub fn display_name(&self) -> &'static str {
        self.platform.display_name()
    }
}

/// 등록 순서 = 결과 순서.
pub static REGISTRY: [PlatformEntry; 6] = [
    PlatformEntry {
        platform: Platform::WordPress,
        build: build_wordpress,
    },
    PlatformEntry {
        platform: Platform::CnBlogs,
        build: build_cnblogs,
    },
    PlatformEntry {
        platform: Platform::Juejin,
        build: build_juejin,
    },
    PlatformEntry {
        platform: Platform::Zhihu,
        build: build_zhihu,
    },
    PlatformEntry {
        platform: Platform::Csdn,
        build: build_csdn,
    },
    PlatformEntry {
        platform: Platform::Xiaohongshu,
        build: build_xiaohongshu,
    },
];

/// 활성 플랫폼 어댑터를 등록 순서대로 생성한다.
pub fn build_publishers(config: &PublishConfig, client: &Client) -> Vec<Box<dyn PlatformPublisher>> {
    REGISTRY
        .iter()
        .filter(|entry| entry.is_active(config))
        .map(|entry| (entry.build)(config, client))
        .collect()
}

fn build_wordpress(config: &PublishConfig, client: &Client) -> Box<dyn PlatformPublisher> {
    Box::new(WordPressPublisher::new(config.wordpress.clone(), client.clone()))
}

fn build_cnblogs(config: &PublishConfig, client: &Client) -> Box<dyn PlatformPublisher> {
    Box::new(CnBlogsPublisher::new(config.cnblogs.clone(), client.clone()))
}

fn build_juejin(config: &PublishConfig, client: &Client) -> Box<dyn PlatformPublisher> {
    Box::new(JuejinPublisher::new(config.juejin.clone(), client.clone()))
}

fn build_zhihu(config: &PublishConfig, client: &Client) -> Box<dyn PlatformPublisher> {
    Box::new(ZhihuPublisher::new(config.zhihu.clone(), client.clone()))
}

fn build_csdn(config: &PublishConfig, client: &Client) -> Box<dyn PlatformPublisher> {
    Box::new(CsdnPublisher::new(config.csdn.clone(), client.clone()))
}

fn build_xiaohongshu(config: &PublishConfig, client: &Client) -> Box<dyn PlatformPublisher> {
    Box::new(XiaohongshuPublisher::new(config.xiaohongshu.clone(), client.clone()))
}

/// 수동 게시 안내 메시지.
pub(crate) fn manual_message(platform: Platform) -> String {
    format!(
        "credentials not configured, copy the content and publish to {} manually",
        platform.display_name()
    )
}

/// 수동 붙여넣기용 기본 형식.
pub(crate) fn copy_content(article: &Article) -> String {
    format!("{}\n\n{}", article.title, article.body)
}

/// 게시 직전 계약 검사. 빈 제목은 호출자 오류다.
pub(crate) fn ensure_publishable(article: &Article) -> Result<()> {
    if article.title.trim().is_empty() {
        return Err(PublishError::InvalidArticle("title is empty".to_string()).into());
    }
    Ok(())
}

/// 제목 표기 정리 + 길이 제한. 두 번 적용해도 결과가 같다.
pub(crate) fn fit_title(title: &str, max_chars: usize) -> String {
    truncate_chars(&strip_emphasis(title), max_chars)
}

/// 원격 오류를 실패 결과로 바꾼다.
pub(crate) fn remote_failure(platform: Platform, err: anyhow::Error, copy: String) -> PublishResult {
    PublishResult::failed(platform.display_name(), format!("{err:#}"), Some(copy))
}
