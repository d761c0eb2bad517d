//! 게시 옵션/결과 도메인 모델.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// 즉시 게시할지, 초안으로 저장할지 결정하는 상태값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Publish,
}

impl PublishStatus {
    pub fn is_publish(self) -> bool {
        matches!(self, Self::Publish)
    }

    /// 원격 호출 성공 시 결과 메시지.
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Draft => "saved as draft",
            Self::Publish => "published",
        }
    }
}

impl FromStr for PublishStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "publish" | "published" => Ok(Self::Publish),
            other => Err(format!("unknown publish status '{other}' (expected draft or publish)")),
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draft => "draft",
            Self::Publish => "publish",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub status: PublishStatus,
    /// 파싱된 제목 대신 사용할 제목
    pub title: Option<String>,
    /// 태그(플랫폼별 개수 제한은 어댑터가 적용)
    pub tags: Vec<String>,
    /// 카테고리(WordPress/博客园/CSDN)
    pub categories: Vec<String>,
}

/// 플랫폼 하나의 게시 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "PublishRecord")]
pub struct PublishResult {
    pub platform: String,
    pub outcome: PublishOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// 원격 호출 성공
    Published {
        url: Option<String>,
        id: Option<String>,
        message: String,
    },
    /// 자격 증명 없음: 원격 호출 없이 수동 게시용 내용만 제공
    Manual {
        copy_content: String,
        message: String,
    },
    /// 원격 호출 또는 변환 실패
    Failed {
        error: String,
        copy_content: Option<String>,
    },
}

impl PublishResult {
    pub fn published(
        platform: impl Into<String>,
        url: Option<String>,
        id: Option<String>,
        status: PublishStatus,
    ) -> Self {
        Self {
            platform: platform.into(),
            outcome: PublishOutcome::Published {
                url,
                id,
                message: status.success_message().to_string(),
            },
        }
    }

    pub fn manual(
        platform: impl Into<String>,
        copy_content: String,
        message: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            outcome: PublishOutcome::Manual {
                copy_content,
                message: message.into(),
            },
        }
    }

    pub fn failed(
        platform: impl Into<String>,
        error: impl Into<String>,
        copy_content: Option<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            outcome: PublishOutcome::Failed {
                error: error.into(),
                copy_content,
            },
        }
    }

    pub fn success(&self) -> bool {
        !matches!(self.outcome, PublishOutcome::Failed { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Published { url, .. } => url.as_deref(),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Published { id, .. } => id.as_deref(),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Published { message, .. } | PublishOutcome::Manual { message, .. } => {
                Some(message)
            }
            PublishOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn copy_content(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Manual { copy_content, .. } => Some(copy_content),
            PublishOutcome::Failed { copy_content, .. } => copy_content.as_deref(),
            PublishOutcome::Published { .. } => None,
        }
    }
}

/// 직렬화(JSON 출력)용 평탄화 레코드.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRecord {
    pub platform: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_content: Option<String>,
}

impl From<PublishResult> for PublishRecord {
    fn from(result: PublishResult) -> Self {
        let success = result.success();
        let mut record = PublishRecord {
            platform: result.platform,
            success,
            url: None,
            id: None,
            message: None,
            error: None,
            copy_content: None,
        };

        match result.outcome {
            PublishOutcome::Published { url, id, message } => {
                record.url = url;
                record.id = id;
                record.message = Some(message);
            }
            PublishOutcome::Manual {
                copy_content,
                message,
            } => {
                record.copy_content = Some(copy_content);
                record.message = Some(message);
            }
            PublishOutcome::Failed {
                error,
                copy_content,
            } => {
                record.error = Some(error);
                record.copy_content = copy_content;
            }
        }
        record
    }
}

/// 호출자에게 그대로 전달되는 게시 오류.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("platform '{0}' is not configured or not supported")]
    PlatformNotFound(String),

    #[error("invalid article: {0}")]
    InvalidArticle(String),
}
