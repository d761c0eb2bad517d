//! 설정 해석 → 등록표 → 디스패처까지 이어지는 게시 흐름 통합 테스트.

mod support;

use std::collections::HashMap;

use ai_writer::application::config::PublishConfig;
use ai_writer::application::usecases::publish_article::MultiPublisher;
use ai_writer::domain::publish::{PublishError, PublishOptions, PublishStatus};
use ai_writer::infrastructure::adapters::{HttpPublisherFactory, QuietReporter};
use ai_writer::infrastructure::config::{EnvReader, resolve_publish_config};
use support::{StubServer, client};

fn config_from(vars: &[(&str, &str)]) -> PublishConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    resolve_publish_config(&EnvReader::new(move |name: &str| vars.get(name).cloned()))
}

fn draft() -> PublishOptions {
    PublishOptions {
        status: PublishStatus::Draft,
        ..Default::default()
    }
}

#[tokio::test]
async fn wordpress_only_config_publishes_one_result() {
    let server = StubServer::start(&[(
        "/wp-json/wp/v2/posts",
        201,
        r#"{"link":"https://x/1","id":1}"#,
    )])
    .await;
    let url = server.url();
    let config = config_from(&[
        ("WP_SITE_URL", url.as_str()),
        ("WP_USERNAME", "editor"),
        ("WP_PASSWORD", "app pass"),
    ]);
    let factory = HttpPublisherFactory::with_client(client());
    let publisher = MultiPublisher {
        config: &config,
        factory: &factory,
        reporter: &QuietReporter,
    };

    let results = publisher.publish("# My Title\n\nHello world", &draft()).await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.platform, "WordPress");
    assert!(result.success());
    assert_eq!(result.url(), Some("https://x/1"));
    assert_eq!(result.id(), Some("1"));
    assert!(result.message().unwrap().contains("draft"));

    let payload = server.requests()[0].json();
    assert_eq!(payload["title"], "My Title");
    let content = payload["content"].as_str().unwrap();
    assert!(content.contains("Hello world"));
    assert!(!content.contains("My Title"));
}

#[tokio::test]
async fn no_configuration_means_no_results() {
    let config = config_from(&[]);
    let factory = HttpPublisherFactory::with_client(client());
    let publisher = MultiPublisher {
        config: &config,
        factory: &factory,
        reporter: &QuietReporter,
    };

    assert!(publisher.active_platforms().is_empty());
    assert!(publisher.publish("content", &PublishOptions::default()).await.is_empty());
}

#[tokio::test]
async fn manual_platforms_return_copy_content_in_registry_order() {
    let config = config_from(&[("PUBLISH_MANUAL_PLATFORMS", "xhs, zhihu,juejin,cnblogs,csdn,wp")]);
    let factory = HttpPublisherFactory::with_client(client());
    let publisher = MultiPublisher {
        config: &config,
        factory: &factory,
        reporter: &QuietReporter,
    };

    let results = publisher
        .publish("# 标题\n\n正文内容", &PublishOptions::default())
        .await;

    let names: Vec<_> = results.iter().map(|r| r.platform.as_str()).collect();
    assert_eq!(names, ["WordPress", "博客园", "掘金", "知乎", "CSDN", "小红书"]);
    for result in &results {
        assert!(result.success(), "{result:?}");
        assert!(result.url().is_none());
        assert!(result.copy_content().unwrap().contains("正文内容"));
    }
}

#[tokio::test]
async fn one_failing_platform_does_not_stop_the_rest() {
    let server = StubServer::start(&[
        ("/wp-json/wp/v2/posts", 500, r#"{"message":"database error"}"#),
        ("/api/v4/articles", 200, r#"{"id":9,"url":"https://zhuanlan.zhihu.com/p/9"}"#),
    ])
    .await;
    let url = server.url();
    let config = config_from(&[
        ("WP_SITE_URL", url.as_str()),
        ("WP_USERNAME", "editor"),
        ("WP_PASSWORD", "app pass"),
        ("ZHIHU_Z_C0", "token"),
        ("ZHIHU_API_BASE", url.as_str()),
    ]);
    let factory = HttpPublisherFactory::with_client(client());
    let publisher = MultiPublisher {
        config: &config,
        factory: &factory,
        reporter: &QuietReporter,
    };

    let results = publisher.publish("# T\n\nbody", &draft()).await;

    assert_eq!(results.len(), 2);
    assert!(!results[0].success());
    assert!(results[0].error().unwrap().contains("database error"));
    assert!(results[0].copy_content().is_some());
    assert!(results[1].success());
    assert_eq!(results[1].url(), Some("https://zhuanlan.zhihu.com/p/9"));

    let zhihu = server
        .requests()
        .into_iter()
        .find(|r| r.path == "/api/v4/articles")
        .unwrap();
    assert_eq!(zhihu.header("cookie"), Some("z_c0=token"));
}

#[tokio::test]
async fn publish_to_targets_a_single_platform() {
    let server = StubServer::start(&[(
        "/phoenix/article/publish",
        200,
        r#"{"code":200,"data":{"id":3,"url":"https://blog.csdn.net/u/article/details/3"}}"#,
    )])
    .await;
    let url = server.url();
    let config = config_from(&[
        ("CSDN_COOKIE", "UserName=u"),
        ("CSDN_API_BASE", url.as_str()),
        ("PUBLISH_MANUAL_PLATFORMS", "zhihu"),
    ]);
    let factory = HttpPublisherFactory::with_client(client());
    let publisher = MultiPublisher {
        config: &config,
        factory: &factory,
        reporter: &QuietReporter,
    };

    let result = publisher
        .publish_to("csdn", "# T\n\nbody", &draft())
        .await
        .unwrap();
    assert_eq!(result.platform, "CSDN");
    assert_eq!(result.id(), Some("3"));
    assert_eq!(server.requests().len(), 1);

    let err = publisher
        .publish_to("wordpress", "# T\n\nbody", &draft())
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::PlatformNotFound(ref name) if name == "wordpress"));
}

#[tokio::test]
async fn title_override_reaches_the_platform() {
    let server = StubServer::start(&[("/api/v4/articles", 200, r#"{"id":1}"#)]).await;
    let url = server.url();
    let config = config_from(&[("ZHIHU_COOKIE", "z_c0=a"), ("ZHIHU_API_BASE", url.as_str())]);
    let factory = HttpPublisherFactory::with_client(client());
    let publisher = MultiPublisher {
        config: &config,
        factory: &factory,
        reporter: &QuietReporter,
    };
    let options = PublishOptions {
        title: Some("Better Title".into()),
        ..Default::default()
    };

    publisher.publish("# Parsed\n\nbody", &options).await;

    assert_eq!(server.requests()[0].json()["title"], "Better Title");
}
