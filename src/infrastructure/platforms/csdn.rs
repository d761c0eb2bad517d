//! CSDN 블로그 게시 어댑터.

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::application::config::CsdnConfig;
use crate::application::ports::PlatformPublisher;
use crate::domain::article::Article;
use crate::domain::markdown::{HtmlFlavor, label_code_fences, plain_excerpt, to_html};
use crate::domain::platform::Platform;
use crate::domain::publish::{PublishOptions, PublishResult};
use crate::infrastructure::http::{endpoint, json_string, send_json};

use super::{copy_content, ensure_publishable, fit_title, manual_message, remote_failure};

const PLATFORM: Platform = Platform::Csdn;
const TITLE_LIMIT: usize = 100;
const DESCRIPTION_LIMIT: usize = 200;
const API_BASE: &str = "https://blog.csdn.net";

pub struct CsdnPublisher {
    config: Option<CsdnConfig>,
    client: Client,
}

impl CsdnPublisher {
    pub fn new(config: Option<CsdnConfig>, client: Client) -> Self {
        Self { config, client }
    }

    async fn save_article(
        &self,
        config: &CsdnConfig,
        article: &Article,
        options: &PublishOptions,
    ) -> Result<Value> {
        let description = match plain_excerpt(&article.body, DESCRIPTION_LIMIT) {
            excerpt if excerpt.is_empty() => article.title.clone(),
            excerpt => excerpt,
        };
        let payload = json!({
            "title": article.title,
            "markdowncontent": article.body,
            "content": to_html(&article.body, HtmlFlavor::Csdn),
            "description": description,
            "tags": options.tags.join(","),
            "categories": options.categories.join(","),
            "type": "original",
            "status": u8::from(options.status.is_publish()),
        });

        let url = endpoint(
            config.api_base.as_deref().unwrap_or(API_BASE),
            "phoenix/article/publish",
        );
        debug!(%url, "saving CSDN article");
        let referer = format!(
            "https://blog.csdn.net/{}/article/details/",
            config.username.as_deref().unwrap_or_default()
        );
        let request = self
            .client
            .post(url)
            .header("Cookie", &config.cookie)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Referer", referer)
            .json(&payload);
        let response = send_json(PLATFORM.id(), "save article", request).await?;
        check_code(&response)?;
        Ok(response)
    }
}

#[async_trait]
impl PlatformPublisher for CsdnPublisher {
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
            label_code_fences(&article.body, "plaintext"),
        ))
    }

    async fn publish(&self, article: &Article, options: &PublishOptions) -> Result<PublishResult> {
        ensure_publishable(article)?;
        let copy = copy_content(article);
        let Some(config) = &self.config else {
            return Ok(PublishResult::manual(self.name(), copy, manual_message(PLATFORM)));
        };

        match self.save_article(config, article, options).await {
            Ok(response) => {
                let id = json_string(&response, "/data/id").or_else(|| json_string(&response, "/id"));
                let url = json_string(&response, "/data/url")
                    .or_else(|| json_string(&response, "/url"))
                    .or_else(|| article_url(config, id.as_deref()));
                Ok(PublishResult::published(self.name(), url, id, options.status))
            }
            Err(err) => Ok(remote_failure(PLATFORM, err, copy)),
        }
    }
}

fn article_url(config: &CsdnConfig, id: Option<&str>) -> Option<String> {
    let username = config.username.as_deref()?;
    Some(format!("https://blog.csdn.net/{username}/article/details/{}", id?))
}

/// 응답의 `code`가 200이 아니면 실패다. `code`가 없으면 HTTP 상태만 본다.
fn check_code(response: &Value) -> Result<()> {
    let Some(code) = response.get("code").and_then(Value::as_i64) else {
        return Ok(());
    };
    if code != 200 {
        let message = json_string(response, "/msg")
            .or_else(|| json_string(response, "/message"))
            .unwrap_or_else(|| "unknown error".to_string());
        bail!("{}: save article failed (code {code}): {message}", PLATFORM.id());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_labels_bare_fences_once() {
        let p = CsdnPublisher::new(None, Client::new());
        let once = p
            .transform(Article::new("T", "text\n```\nls -la\n```\n**b** [l](https://x.io)"))
            .unwrap();
        assert!(once.body.contains("```plaintext\nls -la\n```"));
        assert_eq!(p.transform(once.clone()).unwrap(), once);
    }

    #[test]
    fn non_200_code_is_failure() {
        assert!(check_code(&json!({"code": 200, "data": {"id": 1}})).is_ok());
        assert!(check_code(&json!({"id": 1})).is_ok());
        let err = check_code(&json!({"code": 400, "msg": "cookie expired"}))
            .unwrap_err()
            .to_string();
        assert!(err.contains("cookie expired"));
    }

    #[test]
    fn article_url_needs_username_and_id() {
        let config = CsdnConfig {
            cookie: "c".into(),
            username: Some("bob".into()),
            api_base: None,
        };
        assert_eq!(
            article_url(&config, Some("9")).as_deref(),
            Some("https://blog.csdn.net/bob/article/details/9")
        );
        assert_eq!(article_url(&config, None), None);
    }
}
