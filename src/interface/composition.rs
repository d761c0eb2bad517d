//! 애플리케이션 조립(composition root) 모듈.

use anyhow::Result;

use crate::application::config::{Config, PublishConfig};
use crate::application::ports::{ConfigRepository, Reporter};
use crate::application::usecases::inspect_platforms::InspectPlatformsUseCase;
use crate::application::usecases::publish_article::MultiPublisher;
use crate::application::usecases::write_article::WriteArticleUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, EnvConfigRepository, FileArticleStore, HttpGeneratorFactory,
    HttpPublisherFactory, QuietReporter,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: EnvConfigRepository,
    publisher_factory: HttpPublisherFactory,
    generator_factory: HttpGeneratorFactory,
    store: FileArticleStore,
    reporter: Box<dyn Reporter>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::with_reporter(Box::new(ConsoleReporter::new()))
    }
}

impl AppComposition {
    /// 진행 상황을 출력하지 않는 조합(JSON 출력/라이브러리 호출용).
    pub fn quiet() -> Self {
        Self::with_reporter(Box::new(QuietReporter))
    }

    pub fn with_reporter(reporter: Box<dyn Reporter>) -> Self {
        Self {
            config_repo: EnvConfigRepository,
            publisher_factory: HttpPublisherFactory::default(),
            generator_factory: HttpGeneratorFactory::default(),
            store: FileArticleStore,
            reporter,
        }
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    pub fn load_config(&self) -> Result<Config> {
        self.config_repo.load()
    }

    /// 주어진 플랫폼 설정으로 게시 디스패처를 생성한다.
    pub fn multi_publisher<'a>(&'a self, config: &'a PublishConfig) -> MultiPublisher<'a> {
        MultiPublisher {
            config,
            factory: &self.publisher_factory,
            reporter: self.reporter.as_ref(),
        }
    }

    /// 글 생성 유스케이스를 생성한다.
    pub fn write_usecase(&self) -> WriteArticleUseCase<'_> {
        WriteArticleUseCase {
            generator_factory: &self.generator_factory,
            store: &self.store,
            reporter: self.reporter.as_ref(),
        }
    }

    /// 플랫폼 설정 점검 유스케이스를 생성한다.
    pub fn inspect_platforms_usecase(&self) -> InspectPlatformsUseCase<'_> {
        InspectPlatformsUseCase {
            config_repo: &self.config_repo,
        }
    }
}
