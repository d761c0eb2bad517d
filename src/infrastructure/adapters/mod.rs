//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod article_store;
mod config_repository;
mod generator_factory;
mod publisher_factory;
mod reporter;

pub use article_store::FileArticleStore;
pub use config_repository::EnvConfigRepository;
pub use generator_factory::HttpGeneratorFactory;
pub use publisher_factory::HttpPublisherFactory;
pub use reporter::{ConsoleReporter, QuietReporter};
