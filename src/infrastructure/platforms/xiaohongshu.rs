//! 小红书 노트 게시 어댑터.
//!
//! 공개 글쓰기 API가 없어 노트 생성 엔드포인트는 `XHS_API_BASE`로 지정한다.
//! 토큰이 없으면 제목/본문/태그를 붙여넣기 형식으로 돌려준다.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::application::config::XiaohongshuConfig;
use crate::application::ports::PlatformPublisher;
use crate::domain::article::Article;
use crate::domain::markdown::{extract_hashtags, to_short_form};
use crate::domain::platform::Platform;
use crate::domain::publish::{PublishOptions, PublishResult};
use crate::infrastructure::http::{endpoint, json_string, send_json};

use super::{ensure_publishable, fit_title, manual_message, remote_failure};

const PLATFORM: Platform = Platform::Xiaohongshu;
const TITLE_LIMIT: usize = 20;
const MIN_TAGS: usize = 5;
const MAX_TAGS: usize = 10;
const DEFAULT_TAGS: [&str; 3] = ["#AI工具", "#学习笔记", "#干货分享"];
const API_BASE: &str = "https://edith.xiaohongshu.com";

pub struct XiaohongshuPublisher {
    config: Option<XiaohongshuConfig>,
    client: Client,
}

impl XiaohongshuPublisher {
    pub fn new(config: Option<XiaohongshuConfig>, client: Client) -> Self {
        Self { config, client }
    }

    async fn create_note(
        &self,
        config: &XiaohongshuConfig,
        article: &Article,
        tags: &[String],
        options: &PublishOptions,
    ) -> Result<Value> {
        let names: Vec<&str> = tags.iter().map(|t| t.trim_start_matches('#')).collect();
        let payload = json!({
            "title": article.title,
            "desc": article.body,
            "tags": names,
            "privacy": if options.status.is_publish() { "public" } else { "private" },
        });

        let url = endpoint(config.api_base.as_deref().unwrap_or(API_BASE), "api/sns/v1/note");
        debug!(%url, "creating Xiaohongshu note");
        let request = self
            .client
            .post(url)
            .bearer_auth(&config.access_token)
            .json(&payload);
        send_json(PLATFORM.id(), "create note", request).await
    }
}

#[async_trait]
impl PlatformPublisher for XiaohongshuPublisher {
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
            to_short_form(&article.body),
        ))
    }

    async fn publish(&self, article: &Article, options: &PublishOptions) -> Result<PublishResult> {
        ensure_publishable(article)?;
        let tags = note_tags(&options.tags, &article.body);
        let copy = format!("{}\n\n{}\n\n{}", article.title, article.body, tags.join(" "));
        let Some(config) = &self.config else {
            return Ok(PublishResult::manual(self.name(), copy, manual_message(PLATFORM)));
        };

        match self.create_note(config, article, &tags, options).await {
            Ok(response) => {
                let id = json_string(&response, "/data/note_id")
                    .or_else(|| json_string(&response, "/data/id"))
                    .or_else(|| json_string(&response, "/id"));
                let url = id
                    .as_ref()
                    .map(|id| format!("https://www.xiaohongshu.com/explore/{id}"));
                Ok(PublishResult::published(self.name(), url, id, options.status))
            }
            Err(err) => Ok(remote_failure(PLATFORM, err, copy)),
        }
    }
}

/// 옵션 태그 → 본문 해시태그 → 기본 태그 순으로 모아 5개 이상, 10개 이하로 맞춘다.
fn note_tags(option_tags: &[String], body: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let candidates = option_tags
        .iter()
        .map(|t| t.trim().trim_start_matches('#'))
        .filter(|t| !t.is_empty())
        .map(|t| format!("#{t}"))
        .chain(extract_hashtags(body));
    for tag in candidates {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    for default in DEFAULT_TAGS {
        if tags.len() >= MIN_TAGS {
            break;
        }
        if !tags.iter().any(|t| t == default) {
            tags.push(default.to_string());
        }
    }
    tags.truncate(MAX_TAGS);
    tags
}
