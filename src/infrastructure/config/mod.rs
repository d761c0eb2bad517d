//! 환경변수(.env 포함) 기반 설정 로딩 모듈.
//! 프로세스 환경을 한 번 읽어 설정 스키마로 해석하고, 진단용 정보를 함께 제공한다.

mod env;
mod inspection;

use anyhow::Result;

pub use env::{
    APP_DIR, EnvReader, MANUAL_PLATFORMS_VAR, OUTPUT_DIR_VAR, load_dotenv, missing_vars,
    process_env, required_vars, resolve_config, resolve_generator_config, resolve_publish_config,
};
pub use inspection::{ChatModelInspection, ConfigInspection, GeneratorInspection, PlatformInspection};

use crate::application::config::Config;

/// `.env`를 적재한 뒤 프로세스 환경에서 설정을 해석한다.
pub fn load() -> Config {
    load_dotenv();
    resolve_config(&process_env())
}

/// 디버깅/진단용 설정 정보를 구성한다.
pub fn inspect() -> ConfigInspection {
    load_dotenv();
    ConfigInspection::from_env(&process_env())
}

/// 설정 진단 결과를 사람이 읽기 쉬운 JSON으로 반환한다.
pub fn inspect_pretty_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&inspect())?)
}
