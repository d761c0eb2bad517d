//! 掘金 게시 어댑터. 초안을 만든 뒤 게시 상태면 초안을 발행한다.

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use tracing::debug;

use crate::application::config::JuejinConfig;
use crate::application::ports::PlatformPublisher;
use crate::domain::article::Article;
use crate::domain::markdown::{HtmlFlavor, normalize_headings, plain_excerpt, to_html};
use crate::domain::platform::Platform;
use crate::domain::publish::{PublishOptions, PublishResult};
use crate::infrastructure::http::{endpoint, json_string, send_json};

use super::{copy_content, ensure_publishable, fit_title, manual_message, remote_failure};

const PLATFORM: Platform = Platform::Juejin;
const TITLE_LIMIT: usize = 100;
const BRIEF_LIMIT: usize = 100;
const API_BASE: &str = "https://api.juejin.cn";

pub struct JuejinPublisher {
    config: Option<JuejinConfig>,
    client: Client,
}

impl JuejinPublisher {
    pub fn new(config: Option<JuejinConfig>, client: Client) -> Self {
        Self { config, client }
    }

    fn post(&self, config: &JuejinConfig, path: &str, payload: &Value) -> RequestBuilder {
        let base = config.api_base.as_deref().unwrap_or(API_BASE);
        let url = endpoint(base, path);
        debug!(%url, "calling Juejin API");
        let mut request = self
            .client
            .post(url)
            .header("Cookie", &config.cookie)
            .json(payload);
        if let Some(token) = csrf_token(config) {
            request = request.header("X-Csrf-Token", token);
        }
        request
    }

    async fn create_draft(
        &self,
        config: &JuejinConfig,
        article: &Article,
        options: &PublishOptions,
    ) -> Result<String> {
        let payload = json!({
            "article_title": article.title,
            "mark_content": article.body,
            "html_content": to_html(&article.body, HtmlFlavor::Juejin),
            "brief_content": plain_excerpt(&article.body, BRIEF_LIMIT),
            "tag_ids": options.tags,
        });
        let request = self.post(config, "content_api/v1/article_draft/create", &payload);
        let response = send_json(PLATFORM.id(), "create draft", request).await?;
        check_err_no(&response, "create draft")?;

        match json_string(&response, "/data/id").or_else(|| json_string(&response, "/data/draft_id")) {
            Some(id) => Ok(id),
            None => bail!("{}: create draft returned no draft id", PLATFORM.id()),
        }
    }

    async fn publish_draft(&self, config: &JuejinConfig, draft_id: &str) -> Result<Option<String>> {
        let payload = json!({ "draft_id": draft_id });
        let request = self.post(config, "content_api/v1/article/publish", &payload);
        let response = send_json(PLATFORM.id(), "publish draft", request).await?;
        check_err_no(&response, "publish draft")?;
        Ok(json_string(&response, "/data/article_id"))
    }
}

#[async_trait]
impl PlatformPublisher for JuejinPublisher {
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

        let draft_id = match self.create_draft(config, article, options).await {
            Ok(id) => id,
            Err(err) => return Ok(remote_failure(PLATFORM, err, copy)),
        };

        if !options.status.is_publish() {
            return Ok(PublishResult::published(
                self.name(),
                Some(format!("https://juejin.cn/editor/drafts/{draft_id}")),
                Some(draft_id),
                options.status,
            ));
        }

        match self.publish_draft(config, &draft_id).await {
            Ok(article_id) => {
                let id = article_id.unwrap_or(draft_id);
                Ok(PublishResult::published(
                    self.name(),
                    Some(format!("https://juejin.cn/post/{id}")),
                    Some(id),
                    options.status,
                ))
            }
            Err(err) => Ok(remote_failure(PLATFORM, err, copy)),
        }
    }
}

/// 명시 토큰이 없으면 cookie의 `csrf_token=` 값을 사용한다.
fn csrf_token(config: &JuejinConfig) -> Option<String> {
    config.csrf_token.clone().or_else(|| {
        config
            .cookie
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix("csrf_token="))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// 掘金은 HTTP 200 + `err_no`로 오류를 알린다.
fn check_err_no(response: &Value, action: &str) -> Result<()> {
    let err_no = response.get("err_no").and_then(Value::as_i64).unwrap_or(0);
    if err_no != 0 {
        let message = json_string(response, "/err_msg").unwrap_or_else(|| "unknown error".to_string());
        bail!("{}: {action} failed (err_no {err_no}): {message}", PLATFORM.id());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cookie: &str, csrf: Option<&str>) -> JuejinConfig {
        JuejinConfig {
            cookie: cookie.into(),
            csrf_token: csrf.map(str::to_string),
            api_base: None,
        }
    }

    #[test]
    fn csrf_token_falls_back_to_cookie() {
        assert_eq!(
            csrf_token(&config("sessionid=a; csrf_token=xyz; other=1", None)).as_deref(),
            Some("xyz")
        );
        assert_eq!(
            csrf_token(&config("csrf_token=xyz", Some("explicit"))).as_deref(),
            Some("explicit")
        );
        assert_eq!(csrf_token(&config("sessionid=a", None)), None);
    }

    #[test]
    fn err_no_marks_failure() {
        assert!(check_err_no(&json!({"err_no": 0, "data": {}}), "x").is_ok());
        let err = check_err_no(&json!({"err_no": 403, "err_msg": "must login"}), "create draft")
            .unwrap_err()
            .to_string();
        assert!(err.contains("must login"));
    }

    #[test]
    fn transform_is_idempotent() {
        let p = JuejinPublisher::new(None, Client::new());
        for body in ["plain", "**bold**", "```go\nx := 1\n```", "[a](https://b.c)", "##Heading"] {
            let once = p.transform(Article::new("Title", body)).unwrap();
            assert_eq!(p.transform(once.clone()).unwrap(), once);
        }
    }
}
