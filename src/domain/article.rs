//! 원문 Markdown에서 제목/본문을 분리하는 글 값 객체.

/// 제목 줄이 없을 때 사용하는 기본 제목.
pub const DEFAULT_TITLE: &str = "Untitled Article";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub body: String,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// 첫 번째 `# 제목` 줄을 제목으로 추출하고 본문에서 그 줄만 제거한다.
    /// 제목 줄이 없으면 기본 제목과 원문 전체를 사용한다.
    pub fn parse(raw: &str) -> Self {
        let mut offset = 0;
        for line in raw.split_inclusive('\n') {
            let content = line.trim_end_matches(['\n', '\r']);
            if let Some(title) = heading_title(content) {
                let mut body = String::with_capacity(raw.len());
                body.push_str(&raw[..offset]);
                body.push_str(&raw[offset + line.len()..]);
                return Self {
                    title: title.to_string(),
                    body: body.trim().to_string(),
                };
            }
            offset += line.len();
        }

        Self {
            title: DEFAULT_TITLE.to_string(),
            body: raw.to_string(),
        }
    }

    /// 게시 옵션의 제목 덮어쓰기를 적용한다(공백 값은 무시).
    pub fn with_title_override(mut self, title: Option<&str>) -> Self {
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            self.title = title.to_string();
        }
        self
    }
}

fn heading_title(line: &str) -> Option<&str> {
    // `#` 하나 + 공백 + 텍스트. `##` 이상은 제목 후보가 아니다.
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let title = rest.trim().trim_end_matches('#').trim_end();
    if title.is_empty() { None } else { Some(title) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_level_one_heading() {
        let article = Article::parse("# Hello\nBody text");
        assert_eq!(article.title, "Hello");
        assert_eq!(article.body, "Body text");
    }

    #[test]
    fn falls_back_to_default_title() {
        let article = Article::parse("No heading here");
        assert_eq!(article.title, DEFAULT_TITLE);
        assert_eq!(article.body, "No heading here");
    }

    #[test]
    fn removes_only_the_first_matching_heading() {
        let raw = "intro line\n# First\n\n## Section\ntext\n# Second\n";
        let article = Article::parse(raw);
        assert_eq!(article.title, "First");
        assert_eq!(article.body, "intro line\n\n## Section\ntext\n# Second");
    }

    #[test]
    fn ignores_deeper_headings_and_hashtags() {
        let article = Article::parse("## Not a title\n#tag\ncontent");
        assert_eq!(article.title, DEFAULT_TITLE);
        assert_eq!(article.body, "## Not a title\n#tag\ncontent");
    }

    #[test]
    fn title_is_never_a_bare_marker() {
        let article = Article::parse("# #\n# Real Title\nbody");
        assert_eq!(article.title, "Real Title");
    }

    #[test]
    fn handles_crlf_input() {
        let article = Article::parse("# Windows\r\n\r\nline one\r\n");
        assert_eq!(article.title, "Windows");
        assert_eq!(article.body, "line one");
    }

    #[test]
    fn title_override_replaces_parsed_title() {
        let article = Article::parse("# Parsed\nbody").with_title_override(Some("  Custom  "));
        assert_eq!(article.title, "Custom");

        let article = Article::parse("# Parsed\nbody").with_title_override(Some("   "));
        assert_eq!(article.title, "Parsed");
    }
}
