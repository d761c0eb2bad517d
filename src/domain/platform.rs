//! 지원 게시 플랫폼(닫힌 집합) 정의.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    WordPress,
    CnBlogs,
    Juejin,
    Zhihu,
    Csdn,
    Xiaohongshu,
}

impl Platform {
    /// 등록 순서. 게시 결과도 이 순서를 따른다.
    pub const ALL: [Platform; 6] = [
        Platform::WordPress,
        Platform::CnBlogs,
        Platform::Juejin,
        Platform::Zhihu,
        Platform::Csdn,
        Platform::Xiaohongshu,
    ];

    /// 내부 식별자(설정/CLI 키)
    pub fn id(self) -> &'static str {
        match self {
            Self::WordPress => "wordpress",
            Self::CnBlogs => "cnblogs",
            Self::Juejin => "juejin",
            Self::Zhihu => "zhihu",
            Self::Csdn => "csdn",
            Self::Xiaohongshu => "xiaohongshu",
        }
    }

    /// 사용자 표시 이름
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WordPress => "WordPress",
            Self::CnBlogs => "博客园",
            Self::Juejin => "掘金",
            Self::Zhihu => "知乎",
            Self::Csdn => "CSDN",
            Self::Xiaohongshu => "小红书",
        }
    }

    /// 식별자/별칭을 플랫폼으로 변환한다(대소문자 무시).
    pub fn from_id(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wordpress" | "wp" => Some(Self::WordPress),
            "cnblogs" => Some(Self::CnBlogs),
            "juejin" => Some(Self::Juejin),
            "zhihu" => Some(Self::Zhihu),
            "csdn" => Some(Self::Csdn),
            "xiaohongshu" | "xhs" => Some(Self::Xiaohongshu),
            _ => None,
        }
    }
}

/// 사용자가 입력한 플랫폼 이름이 식별자 또는 표시 이름과 일치하는지 확인한다.
pub fn matches_platform(query: &str, id: &str, display_name: &str) -> bool {
    let query = query.trim();
    if query.eq_ignore_ascii_case(id) || query == display_name {
        return true;
    }
    Platform::from_id(query).is_some_and(|p| p.id() == id)
}
