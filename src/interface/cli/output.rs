//! 게시 결과 출력 형식.

use anyhow::Result;

use crate::domain::publish::{PublishOutcome, PublishResult};

const COPY_RULE: &str = "---------------- copy below ----------------";

/// 플랫폼별 결과 줄과 수동 게시용 내용을 텍스트로 만든다.
pub fn render_results(results: &[PublishResult]) -> Vec<String> {
    let mut lines = Vec::new();
    for result in results {
        match &result.outcome {
            PublishOutcome::Published { url, id, message } => {
                let target = url.as_deref().or(id.as_deref()).unwrap_or("-");
                lines.push(format!("✅ {}: {target} ({message})", result.platform));
            }
            PublishOutcome::Manual {
                copy_content,
                message,
            } => {
                lines.push(format!("📋 {}: {message}", result.platform));
                push_copy_block(&mut lines, copy_content);
            }
            PublishOutcome::Failed {
                error,
                copy_content,
            } => {
                lines.push(format!("❌ {}: {error}", result.platform));
                if let Some(copy) = copy_content {
                    push_copy_block(&mut lines, copy);
                }
            }
        }
    }
    lines.push(summary(results));
    lines
}

fn push_copy_block(lines: &mut Vec<String>, content: &str) {
    lines.push(COPY_RULE.to_string());
    lines.extend(content.lines().map(str::to_string));
    lines.push("-".repeat(COPY_RULE.chars().count()));
}

/// `성공 수/전체` 요약 줄.
pub fn summary(results: &[PublishResult]) -> String {
    let ok = results.iter().filter(|r| r.success()).count();
    format!("Published {ok}/{} platforms", results.len())
}

pub fn results_json(results: &[PublishResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// 실패한 플랫폼이 하나라도 있으면 1.
pub fn exit_code(results: &[PublishResult]) -> i32 {
    if results.iter().all(PublishResult::success) {
        0
    } else {
        1
    }
}
