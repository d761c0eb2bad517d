//! 글 생성 프롬프트 구성 규칙.

use std::str::FromStr;

/// 입력 원문의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// AI 대화 기록
    Chat,
    /// 링크 + 개인 메모
    Link,
    Default,
}

impl ContentKind {
    /// 원문 내용으로 종류를 추정한다.
    pub fn detect(content: &str) -> Self {
        if ["对话", "AI:", "User:"].iter().any(|m| content.contains(m)) {
            Self::Chat
        } else if content.contains("http") {
            Self::Link
        } else {
            Self::Default
        }
    }
}

/// 특정 플랫폼 문체로 쓰도록 지시하는 스타일.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformStyle {
    Xiaohongshu,
    Zhihu,
    Juejin,
    Csdn,
}

impl PlatformStyle {
    pub fn code(self) -> &'static str {
        match self {
            Self::Xiaohongshu => "xhs",
            Self::Zhihu => "zhihu",
            Self::Juejin => "juejin",
            Self::Csdn => "csdn",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::Xiaohongshu => {
                "注意：使用小红书风格，标题醒目，多用 emoji，段落简短，结尾附上话题标签。"
            }
            Self::Zhihu => "注意：使用知乎专栏风格，语气专业理性，论证清晰。",
            Self::Juejin => "注意：使用掘金技术文章风格，简洁直接，以干货为主。",
            Self::Csdn => "注意：使用 CSDN 博客风格，通俗易懂，步骤详细。",
        }
    }
}

impl FromStr for PlatformStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xhs" | "xiaohongshu" => Ok(Self::Xiaohongshu),
            "zhihu" => Ok(Self::Zhihu),
            "juejin" => Ok(Self::Juejin),
            "csdn" => Ok(Self::Csdn),
            other => Err(format!(
                "unknown style '{other}' (expected xhs, zhihu, juejin or csdn)"
            )),
        }
    }
}

/// 원문을 Markdown 글로 정리하도록 요청하는 프롬프트를 만든다.
pub fn build_article_prompt(content: &str, kind: ContentKind, style: Option<PlatformStyle>) -> String {
    let mut out = String::new();
    out.push_str("你是一位资深技术博主。");
    out.push_str(match kind {
        ContentKind::Chat => "请把下面的 AI 对话记录整理成一篇结构清晰的技术文章。\n",
        ContentKind::Link => "请结合下面的链接内容和我的理解，写一篇有个人见解的文章。\n",
        ContentKind::Default => "请把下面的内容整理成一篇有深度的文章。\n",
    });

    out.push_str("\n要求：\n");
    out.push_str("1. 第一行使用一级标题（# 标题），标题要吸引人\n");
    match kind {
        ContentKind::Chat => {
            out.push_str("2. 分段落组织逻辑，代码片段放进代码块\n");
            out.push_str("3. 关键步骤用加粗或列表标注，结尾给出总结\n");
        }
        ContentKind::Link => {
            out.push_str("2. 先概括原文核心观点，再融入我的理解和延伸\n");
            out.push_str("3. 段落清晰，逻辑通顺\n");
        }
        ContentKind::Default => {
            out.push_str("2. 内容有逻辑、有深度，适当加入个人见解\n");
        }
    }
    out.push_str("输出为 Markdown 格式。\n");
    if let Some(style) = style {
        out.push_str(style.instruction());
        out.push('\n');
    }

    out.push_str(match kind {
        ContentKind::Chat => "\n对话记录：\n",
        ContentKind::Link => "\n链接内容/笔记：\n",
        ContentKind::Default => "\n内容：\n",
    });
    out.push_str(content.trim());
    out.push('\n');
    out
}
