//! 글 생성기 팩토리 포트 구현.

use reqwest::Client;

use crate::application::config::GeneratorConfig;
use crate::application::ports::{ArticleGenerator, GeneratorFactory};
use crate::infrastructure::generators;
use crate::infrastructure::http::build_http_client;

pub struct HttpGeneratorFactory {
    client: Client,
}

impl Default for HttpGeneratorFactory {
    fn default() -> Self {
        Self {
            client: build_http_client(),
        }
    }
}

impl GeneratorFactory for HttpGeneratorFactory {
    fn build(&self, config: &GeneratorConfig) -> Vec<Box<dyn ArticleGenerator>> {
        generators::build_generators(config, &self.client)
    }
}
