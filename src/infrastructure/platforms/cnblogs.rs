//! 博客园 MetaWeblog(XML-RPC) 게시 어댑터.

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::application::config::CnBlogsConfig;
use crate::application::ports::PlatformPublisher;
use crate::domain::article::Article;
use crate::domain::markdown::{HtmlFlavor, escape_html, normalize_headings, to_html};
use crate::domain::platform::Platform;
use crate::domain::publish::{PublishOptions, PublishResult};
use crate::infrastructure::http::send_text;

use super::{copy_content, ensure_publishable, fit_title, manual_message, remote_failure};

const PLATFORM: Platform = Platform::CnBlogs;
const TITLE_LIMIT: usize = 100;
const RPC_BASE: &str = "https://rpc.cnblogs.com/metaweblog";

pub struct CnBlogsPublisher {
    config: Option<CnBlogsConfig>,
    client: Client,
}

impl CnBlogsPublisher {
    pub fn new(config: Option<CnBlogsConfig>, client: Client) -> Self {
        Self { config, client }
    }

    fn rpc_url(config: &CnBlogsConfig) -> String {
        match &config.api_base {
            Some(base) => base.clone(),
            None => format!("{RPC_BASE}/{}", config.blog_name),
        }
    }

    async fn new_post(
        &self,
        config: &CnBlogsConfig,
        article: &Article,
        options: &PublishOptions,
    ) -> Result<String> {
        let body = new_post_call(config, article, options);
        let url = Self::rpc_url(config);
        debug!(%url, "calling metaWeblog.newPost");
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body);
        let response = send_text(PLATFORM.id(), "call metaWeblog.newPost", request).await?;

        if let Some(fault) = fault_string(&response) {
            bail!("{}: metaWeblog.newPost fault: {fault}", PLATFORM.id());
        }
        match first_value(&response) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => bail!("{}: metaWeblog.newPost returned no post id", PLATFORM.id()),
        }
    }
}

#[async_trait]
impl PlatformPublisher for CnBlogsPublisher {
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

        match self.new_post(config, article, options).await {
            Ok(id) => Ok(PublishResult::published(
                self.name(),
                Some(format!("https://www.cnblogs.com/{}/p/{id}", config.blog_name)),
                Some(id),
                options.status,
            )),
            Err(err) => Ok(remote_failure(PLATFORM, err, copy)),
        }
    }
}

/// `metaWeblog.newPost(blogid, username, password, post, publish)` 호출 본문.
fn new_post_call(config: &CnBlogsConfig, article: &Article, options: &PublishOptions) -> String {
    let blog_id = config.blog_id.as_deref().unwrap_or(&config.blog_name);
    let categories: String = options
        .categories
        .iter()
        .map(|c| format!("<value><string>{}</string></value>", escape_html(c)))
        .collect();

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<methodCall><methodName>metaWeblog.newPost</methodName><params>");
    for value in [blog_id, config.username.as_str(), config.password.as_str()] {
        xml.push_str(&format!(
            "<param><value><string>{}</string></value></param>",
            escape_html(value)
        ));
    }
    xml.push_str("<param><value><struct>");
    xml.push_str(&member("title", &string_value(&article.title)));
    let description = to_html(&article.body, HtmlFlavor::Standard);
    xml.push_str(&member("description", &string_value(&description)));
    xml.push_str(&member(
        "categories",
        &format!("<array><data>{categories}</data></array>"),
    ));
    if !options.tags.is_empty() {
        xml.push_str(&member("mt_keywords", &string_value(&options.tags.join(","))));
    }
    xml.push_str("</struct></value></param>");
    xml.push_str(&format!(
        "<param><value><boolean>{}</boolean></value></param>",
        u8::from(options.status.is_publish())
    ));
    xml.push_str("</params></methodCall>");
    xml
}

fn member(name: &str, value: &str) -> String {
    format!("<member><name>{name}</name><value>{value}</value></member>")
}

fn string_value(text: &str) -> String {
    format!("<string>{}</string>", escape_html(text))
}

/// 응답의 첫 `<value>` 안 스칼라 텍스트.
fn first_value(xml: &str) -> Option<String> {
    let start = xml.find("<value>")? + "<value>".len();
    let mut rest = xml[start..].trim_start();
    // <string>/<int>/<i4> 같은 타입 태그는 건너뛴다.
    if rest.starts_with('<') && !rest.starts_with("</") {
        let close = rest.find('>')?;
        rest = &rest[close + 1..];
    }
    let end = rest.find('<')?;
    Some(unescape_xml(rest[..end].trim()))
}

fn fault_string(xml: &str) -> Option<String> {
    let fault = &xml[xml.find("<fault>")?..];
    match fault.find("faultString</name>") {
        Some(idx) => first_value(&fault[idx..]),
        None => Some("unknown fault".to_string()),
    }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::publish::PublishStatus;

    fn config() -> CnBlogsConfig {
        CnBlogsConfig {
            blog_name: "alice".into(),
            username: "alice".into(),
            password: "p<w>".into(),
            blog_id: None,
            api_base: None,
        }
    }

    #[test]
    fn builds_escaped_method_call() {
        let options = PublishOptions {
            status: PublishStatus::Publish,
            tags: vec!["rust".into(), "async".into()],
            categories: vec!["[Markdown]".into()],
            ..Default::default()
        };
        let xml = new_post_call(&config(), &Article::new("A & B", "<p>x</p>"), &options);
        assert!(xml.contains("<methodName>metaWeblog.newPost</methodName>"));
        assert!(xml.contains("<string>p&lt;w&gt;</string>"));
        assert!(xml.contains("<name>title</name><value><string>A &amp; B</string>"));
        assert!(xml.contains("<string>&lt;p&gt;x&lt;/p&gt;</string>"));
        assert!(xml.contains("<name>mt_keywords</name><value><string>rust,async</string>"));
        assert!(xml.contains("<value><string>[Markdown]</string></value>"));
        assert!(xml.contains("<boolean>1</boolean>"));
    }

    #[test]
    fn parses_post_id_and_faults() {
        let ok = "<methodResponse><params><param><value><string>18231</string></value></param></params></methodResponse>";
        assert_eq!(first_value(ok).as_deref(), Some("18231"));
        assert_eq!(fault_string(ok), None);

        let fault = "<methodResponse><fault><value><struct>\
            <member><name>faultCode</name><value><int>0</int></value></member>\
            <member><name>faultString</name><value><string>bad &amp; wrong</string></value></member>\
            </struct></value></fault></methodResponse>";
        assert_eq!(fault_string(fault).as_deref(), Some("bad & wrong"));
    }

    #[test]
    fn rpc_url_defaults_to_blog_endpoint() {
        assert_eq!(
            CnBlogsPublisher::rpc_url(&config()),
            "https://rpc.cnblogs.com/metaweblog/alice"
        );
    }

    #[test]
    fn description_is_rendered_and_escaped_html() {
        let xml = new_post_call(
            &config(),
            &Article::new("T", "a ***b*** & Vec<T>"),
            &PublishOptions::default(),
        );
        assert!(xml.contains(
            "<string>&lt;p&gt;a &lt;em&gt;&lt;strong&gt;b&lt;/strong&gt;&lt;/em&gt; &amp;amp; Vec&amp;lt;T&amp;gt;&lt;/p&gt;</string>"
        ));
    }

    #[test]
    fn transform_is_idempotent() {
        let p = CnBlogsPublisher::new(None, Client::new());
        for body in [
            "# H\n\n**b** and `c`\n\n```\nx < y\n```",
            "##Nested ***strong*** text",
            "Vec<T> & <b>raw</b>",
        ] {
            let once = p.transform(Article::new("T", body)).unwrap();
            assert_eq!(p.transform(once.clone()).unwrap(), once, "{body}");
        }
    }

    #[tokio::test]
    async fn manual_copy_is_markdown() {
        let p = CnBlogsPublisher::new(None, Client::new());
        let article = p.transform(Article::new("T", "**b** & c")).unwrap();
        let result = p.publish(&article, &PublishOptions::default()).await.unwrap();
        assert_eq!(result.copy_content(), Some("T\n\n**b** & c"));
    }
}
