//! 환경변수를 설정 스키마로 해석하는 리졸버.
//!
//! 해석 함수는 조회 클로저만 받으므로 테스트에서 임의의 환경을 주입할 수 있다.

use std::env;
use std::path::PathBuf;

use tracing::{debug, warn};
use url::Url;

use crate::application::config::{
    ChatModelConfig, CnBlogsConfig, Config, CsdnConfig, GeneratorConfig, JuejinConfig,
    ModelProvider, PublishConfig, WordPressConfig, XiaohongshuConfig, ZhihuConfig,
};
use crate::domain::platform::Platform;

pub const APP_DIR: &str = "ai-writer";
pub const MANUAL_PLATFORMS_VAR: &str = "PUBLISH_MANUAL_PLATFORMS";
pub const OUTPUT_DIR_VAR: &str = "AI_WRITER_OUTPUT_DIR";

/// 빈 문자열/공백은 값이 없는 것으로 취급하는 환경 조회기.
pub struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 모든 이름에 값이 있을 때만 값 목록을 돌려준다.
    fn all(&self, names: &[&str]) -> Option<Vec<String>> {
        names.iter().map(|name| self.get(name)).collect()
    }

    fn any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.get(name).is_some())
    }
}

/// 플랫폼 자격 증명 요건. 바깥 목록은 AND, 안쪽 목록은 OR.
pub fn required_vars(platform: Platform) -> &'static [&'static [&'static str]] {
    match platform {
        Platform::WordPress => &[&["WP_SITE_URL"], &["WP_USERNAME"], &["WP_PASSWORD"]],
        Platform::CnBlogs => &[
            &["CNBLOGS_BLOGNAME"],
            &["CNBLOGS_USERNAME"],
            &["CNBLOGS_PASSWORD"],
        ],
        Platform::Juejin => &[&["JUEJIN_COOKIE"]],
        Platform::Zhihu => &[&["ZHIHU_COOKIE", "ZHIHU_Z_C0"]],
        Platform::Csdn => &[&["CSDN_COOKIE"]],
        Platform::Xiaohongshu => &[&["XHS_ACCESS_TOKEN"]],
    }
}

/// 비어 있는 필수 변수 이름 목록(대안이 있으면 `A|B`).
pub fn missing_vars<F>(reader: &EnvReader<F>, platform: Platform) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    required_vars(platform)
        .iter()
        .filter(|alternatives| !reader.any(alternatives))
        .map(|alternatives| alternatives.join("|"))
        .collect()
}

pub fn resolve_config<F>(reader: &EnvReader<F>) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    Config {
        platforms: resolve_publish_config(reader),
        generator: resolve_generator_config(reader),
        output_dir: reader
            .get(OUTPUT_DIR_VAR)
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR))),
    }
}

pub fn resolve_publish_config<F>(reader: &EnvReader<F>) -> PublishConfig
where
    F: Fn(&str) -> Option<String>,
{
    PublishConfig {
        wordpress: reader
            .all(&["WP_SITE_URL", "WP_USERNAME", "WP_PASSWORD"])
            .and_then(|v| {
                Some(WordPressConfig {
                    site_url: http_url("WP_SITE_URL", &v[0])?,
                    username: v[1].clone(),
                    password: v[2].clone(),
                })
            }),
        cnblogs: reader
            .all(&["CNBLOGS_BLOGNAME", "CNBLOGS_USERNAME", "CNBLOGS_PASSWORD"])
            .map(|v| CnBlogsConfig {
                blog_name: v[0].clone(),
                username: v[1].clone(),
                password: v[2].clone(),
                blog_id: reader.get("CNBLOGS_BLOG_ID"),
                api_base: api_base(reader, "CNBLOGS_API_BASE"),
            }),
        juejin: reader.get("JUEJIN_COOKIE").map(|cookie| JuejinConfig {
            cookie,
            csrf_token: reader.get("JUEJIN_CSRF_TOKEN"),
            api_base: api_base(reader, "JUEJIN_API_BASE"),
        }),
        zhihu: reader
            .get("ZHIHU_COOKIE")
            .or_else(|| reader.get("ZHIHU_Z_C0").map(|token| format!("z_c0={token}")))
            .map(|cookie| ZhihuConfig {
                cookie,
                api_base: api_base(reader, "ZHIHU_API_BASE"),
            }),
        csdn: reader.get("CSDN_COOKIE").map(|cookie| CsdnConfig {
            cookie,
            username: reader.get("CSDN_USERNAME"),
            api_base: api_base(reader, "CSDN_API_BASE"),
        }),
        xiaohongshu: reader
            .get("XHS_ACCESS_TOKEN")
            .map(|access_token| XiaohongshuConfig {
                access_token,
                api_base: api_base(reader, "XHS_API_BASE"),
            }),
        manual_platforms: reader
            .get(MANUAL_PLATFORMS_VAR)
            .map(|list| parse_platform_list(&list))
            .unwrap_or_default(),
    }
}

/// http(s) URL만 받아들이고 끝의 `/`를 제거한다.
fn http_url(name: &str, value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Some(value.trim_end_matches('/').to_string())
        }
        _ => {
            warn!(variable = name, "ignoring value that is not an http(s) URL");
            None
        }
    }
}

fn api_base<F>(reader: &EnvReader<F>, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    reader.get(name).and_then(|value| http_url(name, &value))
}

fn parse_platform_list(list: &str) -> Vec<Platform> {
    let mut platforms = Vec::new();
    for item in list.split(',').map(str::trim).filter(|v| !v.is_empty()) {
        match Platform::from_id(item) {
            Some(platform) if !platforms.contains(&platform) => platforms.push(platform),
            Some(_) => {}
            None => warn!(platform = item, "ignoring unknown platform in {MANUAL_PLATFORMS_VAR}"),
        }
    }
    platforms
}

pub fn resolve_generator_config<F>(reader: &EnvReader<F>) -> GeneratorConfig
where
    F: Fn(&str) -> Option<String>,
{
    let provider = match reader.get("MODEL_PROVIDER") {
        Some(name) => ModelProvider::from_name(&name).unwrap_or_else(|| {
            warn!(provider = %name, "unknown MODEL_PROVIDER, using ollama");
            ModelProvider::Ollama
        }),
        None => ModelProvider::default(),
    };

    GeneratorConfig {
        provider,
        ollama_host: api_base(reader, "OLLAMA_HOST"),
        ollama_model: reader.get("OLLAMA_MODEL"),
        deepseek: ChatModelConfig {
            api_key: reader.get("DEEPSEEK_API_KEY"),
            model: reader.get("DEEPSEEK_MODEL"),
            api_base: api_base(reader, "DEEPSEEK_API_BASE"),
        },
        kimi: ChatModelConfig {
            api_key: reader.get("KIMI_API_KEY"),
            model: reader.get("KIMI_MODEL"),
            api_base: api_base(reader, "KIMI_API_BASE"),
        },
        openai: ChatModelConfig {
            api_key: reader.get("OPENAI_API_KEY"),
            model: reader.get("OPENAI_MODEL"),
            api_base: api_base(reader, "OPENAI_API_BASE"),
        },
    }
}

/// 프로세스 환경 조회기.
pub fn process_env() -> EnvReader<fn(&str) -> Option<String>> {
    EnvReader::new(lookup_process_env as fn(&str) -> Option<String>)
}

fn lookup_process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// `.env`를 현재 디렉터리, `<config_dir>/ai-writer/.env` 순으로 찾아 적재한다.
/// 이미 설정된 프로세스 환경변수는 덮어쓰지 않는다.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "loaded .env");
        return;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(APP_DIR).join(".env");
        if path.exists() && dotenvy::from_path(&path).is_ok() {
            debug!(path = %path.display(), "loaded .env");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn reader(vars: &[(&str, &str)]) -> EnvReader<impl Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvReader::new(move |name| map.get(name).cloned())
    }

    #[test]
    fn partial_credentials_resolve_to_absent() {
        let env = reader(&[
            ("WP_SITE_URL", "https://blog.example.com/"),
            ("WP_USERNAME", "alice"),
            ("WP_PASSWORD", "   "),
            ("CNBLOGS_BLOGNAME", "alice"),
        ]);
        let config = resolve_publish_config(&env);
        assert!(config.wordpress.is_none());
        assert!(config.cnblogs.is_none());
        assert_eq!(missing_vars(&env, Platform::WordPress), ["WP_PASSWORD"]);
        assert_eq!(
            missing_vars(&env, Platform::CnBlogs),
            ["CNBLOGS_USERNAME", "CNBLOGS_PASSWORD"]
        );
    }

    #[test]
    fn complete_credentials_are_trimmed() {
        let env = reader(&[
            ("WP_SITE_URL", " https://blog.example.com/ "),
            ("WP_USERNAME", "alice"),
            ("WP_PASSWORD", "app pass"),
        ]);
        let wp = resolve_publish_config(&env).wordpress.unwrap();
        assert_eq!(wp.site_url, "https://blog.example.com");
        assert_eq!(wp.password, "app pass");
    }

    #[test]
    fn invalid_urls_are_rejected() {
        let env = reader(&[
            ("WP_SITE_URL", "blog.example.com"),
            ("WP_USERNAME", "alice"),
            ("WP_PASSWORD", "pw"),
            ("CSDN_COOKIE", "c"),
            ("CSDN_API_BASE", "not a url"),
        ]);
        let config = resolve_publish_config(&env);
        assert!(config.wordpress.is_none());
        assert_eq!(config.csdn.unwrap().api_base, None);
    }

    #[test]
    fn zhihu_token_is_turned_into_cookie() {
        let env = reader(&[("ZHIHU_Z_C0", "tok")]);
        assert_eq!(resolve_publish_config(&env).zhihu.unwrap().cookie, "z_c0=tok");
        assert!(missing_vars(&env, Platform::Zhihu).is_empty());
        assert_eq!(
            missing_vars(&reader(&[]), Platform::Zhihu),
            ["ZHIHU_COOKIE|ZHIHU_Z_C0"]
        );
    }

    #[test]
    fn manual_platforms_are_parsed_and_deduplicated() {
        let env = reader(&[(MANUAL_PLATFORMS_VAR, "zhihu, xhs,medium,zhihu")]);
        let config = resolve_publish_config(&env);
        assert_eq!(
            config.manual_platforms,
            [Platform::Zhihu, Platform::Xiaohongshu]
        );
        assert!(config.zhihu.is_none());
    }

    #[test]
    fn generator_defaults_to_ollama() {
        let config = resolve_generator_config(&reader(&[("MODEL_PROVIDER", "nope")]));
        assert_eq!(config.provider, ModelProvider::Ollama);

        let config = resolve_generator_config(&reader(&[
            ("MODEL_PROVIDER", "DeepSeek"),
            ("DEEPSEEK_API_KEY", "sk-1"),
        ]));
        assert_eq!(config.provider, ModelProvider::DeepSeek);
        assert_eq!(config.deepseek.api_key.as_deref(), Some("sk-1"));
    }

    #[test]
    fn output_dir_prefers_explicit_variable() {
        let config = resolve_config(&reader(&[(OUTPUT_DIR_VAR, "/tmp/articles")]));
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/articles")));
    }
}
