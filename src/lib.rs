//! ai-writer library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::article::Article;
use domain::publish::{PublishOptions, PublishResult};
use interface::composition::AppComposition;

/// 원문에서 제목/본문을 분리한다.
pub fn parse_article(raw: &str) -> Article {
    Article::parse(raw)
}

/// 환경변수 설정으로 활성 플랫폼 전체에 게시한다(라이브러리 직접 호출용).
pub async fn publish(raw: &str, options: &PublishOptions) -> Result<Vec<PublishResult>> {
    let composition = AppComposition::quiet();
    let config = composition.load_config()?;
    Ok(composition
        .multi_publisher(&config.platforms)
        .publish(raw, options)
        .await)
}

/// 지정한 플랫폼 하나에만 게시한다.
pub async fn publish_to(platform: &str, raw: &str, options: &PublishOptions) -> Result<PublishResult> {
    let composition = AppComposition::quiet();
    let config = composition.load_config()?;
    Ok(composition
        .multi_publisher(&config.platforms)
        .publish_to(platform, raw, options)
        .await?)
}

/// 플랫폼 설정 점검 JSON 출력용 함수.
pub fn inspect_platforms_pretty_json() -> Result<String> {
    AppComposition::quiet().inspect_platforms_usecase().execute()
}
