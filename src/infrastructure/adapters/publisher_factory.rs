//! 플랫폼 어댑터 팩토리 포트 구현.

use reqwest::Client;

use crate::application::config::PublishConfig;
use crate::application::ports::{PlatformPublisher, PublisherFactory};
use crate::infrastructure::http::build_http_client;
use crate::infrastructure::platforms;

/// 등록표에서 활성 어댑터를 만들고 HTTP 클라이언트 하나를 공유한다.
pub struct HttpPublisherFactory {
    client: Client,
}

impl Default for HttpPublisherFactory {
    fn default() -> Self {
        Self::with_client(build_http_client())
    }
}

impl HttpPublisherFactory {
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PublisherFactory for HttpPublisherFactory {
    fn build(&self, config: &PublishConfig) -> Vec<Box<dyn PlatformPublisher>> {
        platforms::build_publishers(config, &self.client)
    }
}
