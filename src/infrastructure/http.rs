//! 플랫폼/모델 HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::domain::markdown::truncate_chars;

/// 요청 하나의 전송 타임아웃.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// 오류 메시지에 포함할 응답 본문 최대 길이(문자).
const ERROR_BODY_LIMIT: usize = 300;

/// 게시/생성 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_http_client() -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("ai-writer/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// `base`와 `path`를 슬래시 하나로 이어 붙인다.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub async fn send_json(platform: &str, action: &str, request: RequestBuilder) -> Result<Value> {
    let body = send_text(platform, action, request).await?;
    serde_json::from_str(&body)
        .with_context(|| format!("{platform}: invalid JSON response while {action}"))
}

/// 본문 텍스트를 그대로 돌려주는 전송 함수. 2xx가 아니면 오류다.
pub async fn send_text(platform: &str, action: &str, request: RequestBuilder) -> Result<String> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{platform}: failed to {action}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("{platform}: failed to read {action} response body"))?;

    if !status.is_success() {
        bail!(
            "{platform}: {action} failed ({status}): {}",
            error_detail(&body)
        );
    }
    Ok(body)
}

/// 오류 응답에서 사람이 읽을 메시지를 고른다. JSON이 아니면 잘린 본문을 쓴다.
pub fn error_detail(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["/message", "/msg", "/err_msg", "/error/message", "/error"]
            .iter()
            .find_map(|pointer| json_string(&value, pointer))
    });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => truncate_chars(body.trim(), ERROR_BODY_LIMIT),
    }
}

/// JSON pointer 위치의 문자열/숫자 값을 문자열로 읽는다.
pub fn json_string(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// API 응답 구조에서 텍스트를 재귀적으로 추출한다.
pub fn collect_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_string(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(""),
        Value::Object(map) => {
            for key in ["response", "text", "output_text"] {
                if let Some(text) = map.get(key).and_then(Value::as_str) {
                    return text.to_string();
                }
            }
            for key in ["choices", "message", "content"] {
                if let Some(inner) = map.get(key) {
                    let text = collect_text(inner);
                    if !text.is_empty() {
                        return text;
                    }
                }
            }
            String::new()
        }
        _ => String::new(),
    }
}
