//! 설정 저장소 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::ConfigRepository;
use crate::infrastructure::config;

/// 환경변수(.env 포함) 기반 설정 저장소 어댑터.
pub struct EnvConfigRepository;

impl ConfigRepository for EnvConfigRepository {
    fn load(&self) -> Result<Config> {
        Ok(config::load())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        config::inspect_pretty_json()
    }
}
