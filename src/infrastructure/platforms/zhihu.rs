//! 知乎 专栏 게시 어댑터.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::application::config::ZhihuConfig;
use crate::application::ports::PlatformPublisher;
use crate::domain::article::Article;
use crate::domain::markdown::{HtmlFlavor, normalize_headings, to_html};
use crate::domain::platform::Platform;
use crate::domain::publish::{PublishOptions, PublishResult};
use crate::infrastructure::http::{endpoint, json_string, send_json};

use super::{copy_content, ensure_publishable, fit_title, manual_message, remote_failure};

const PLATFORM: Platform = Platform::Zhihu;
const TITLE_LIMIT: usize = 100;
const API_BASE: &str = "https://www.zhihu.com";

pub struct ZhihuPublisher {
    config: Option<ZhihuConfig>,
    client: Client,
}

impl ZhihuPublisher {
    pub fn new(config: Option<ZhihuConfig>, client: Client) -> Self {
        Self { config, client }
    }

    async fn create_article(
        &self,
        config: &ZhihuConfig,
        article: &Article,
        options: &PublishOptions,
    ) -> Result<Value> {
        let payload = json!({
            "title": article.title,
            "content": to_html(&article.body, HtmlFlavor::Zhihu),
            "markdown": article.body,
            "topic": options.tags,
            "is_submit": options.status.is_publish(),
        });

        let url = endpoint(config.api_base.as_deref().unwrap_or(API_BASE), "api/v4/articles");
        debug!(%url, "creating Zhihu article");
        let request = self
            .client
            .post(url)
            .header("Cookie", &config.cookie)
            .header("Referer", "https://www.zhihu.com/")
            .json(&payload);
        send_json(PLATFORM.id(), "create article", request).await
    }
}

#[async_trait]
impl PlatformPublisher for ZhihuPublisher {
    fn id(&self) -> &'static str {
        PLATFORM.id()
    }

    fn name(&self) -> &'static str {
        PLATFORM.display_name()
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn transform(&self, article: Article) -> Result<Article> {
        Ok(Article::new(
            fit_title(&article.title, TITLE_LIMIT),
            normalize_headings(&article.body),
        ))
    }

    async fn publish(&self, article: &Article, options: &PublishOptions) -> Result<PublishResult> {
        ensure_publishable(article)?;
        let copy = copy_content(article);
        let Some(config) = &self.config else {
            return Ok(PublishResult::manual(self.name(), copy, manual_message(PLATFORM)));
        };

        match self.create_article(config, article, options).await {
            Ok(response) => {
                let id = json_string(&response, "/id");
                let url = json_string(&response, "/url")
                    .or_else(|| id.as_ref().map(|id| format!("https://zhuanlan.zhihu.com/p/{id}")));
                Ok(PublishResult::published(self.name(), url, id, options.status))
            }
            Err(err) => Ok(remote_failure(PLATFORM, err, copy)),
        }
    }
}
