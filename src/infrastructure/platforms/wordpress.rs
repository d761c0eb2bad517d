//! WordPress REST API(`/wp-json/wp/v2/posts`) 게시 어댑터.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::application::config::WordPressConfig;
use crate::application::ports::PlatformPublisher;
use crate::domain::article::Article;
use crate::domain::markdown::{HtmlFlavor, normalize_headings, to_html};
use crate::domain::platform::Platform;
use crate::domain::publish::{PublishOptions, PublishResult};
use crate::infrastructure::http::{endpoint, json_string, send_json};

use super::{copy_content, ensure_publishable, fit_title, manual_message, remote_failure};

const PLATFORM: Platform = Platform::WordPress;
const TITLE_LIMIT: usize = 200;
const WRAPPER_OPEN: &str = "<div class=\"ai-article\">";
const WRAPPER_CLOSE: &str = "</div>";

pub struct WordPressPublisher {
    config: Option<WordPressConfig>,
    client: Client,
}

impl WordPressPublisher {
    pub fn new(config: Option<WordPressConfig>, client: Client) -> Self {
        Self { config, client }
    }

    async fn create_post(
        &self,
        config: &WordPressConfig,
        article: &Article,
        options: &PublishOptions,
    ) -> Result<Value> {
        let mut payload = json!({
            "title": article.title,
            "content": post_content(&article.body),
            "status": options.status.to_string(),
        });
        // REST API는 분류/태그를 숫자 ID로만 받는다.
        if let Some(ids) = numeric_ids(&options.categories) {
            payload["categories"] = json!(ids);
        }
        if let Some(ids) = numeric_ids(&options.tags) {
            payload["tags"] = json!(ids);
        }

        let url = endpoint(&config.site_url, "wp-json/wp/v2/posts");
        debug!(%url, "creating WordPress post");
        let request = self
            .client
            .post(url)
            .basic_auth(&config.username, Some(&config.password))
            .json(&payload);
        send_json(PLATFORM.id(), "create post", request).await
    }
}

#[async_trait]
impl PlatformPublisher for WordPressPublisher {
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

        match self.create_post(config, article, options).await {
            Ok(response) => Ok(PublishResult::published(
                self.name(),
                json_string(&response, "/link"),
                json_string(&response, "/id"),
                options.status,
            )),
            Err(err) => Ok(remote_failure(PLATFORM, err, copy)),
        }
    }
}

/// 본문을 HTML로 렌더링해 `ai-article` 래퍼로 한 번만 감싼다.
fn post_content(body: &str) -> String {
    if body.trim_start().starts_with(WRAPPER_OPEN) {
        return body.to_string();
    }
    format!(
        "{WRAPPER_OPEN}\n{}\n{WRAPPER_CLOSE}",
        to_html(body, HtmlFlavor::Standard)
    )
}

/// 모든 값이 숫자일 때만 ID 목록으로 변환한다.
fn numeric_ids(values: &[String]) -> Option<Vec<u64>> {
    if values.is_empty() {
        return None;
    }
    let ids: Option<Vec<u64>> = values.iter().map(|v| v.trim().parse().ok()).collect();
    if ids.is_none() {
        debug!(?values, "skipping non-numeric WordPress term ids");
    }
    ids
}
