//! 플랫폼별 콘텐츠 변환에 쓰는 Markdown 도구.
//!
//! 모든 변환은 멱등이다. HTML 렌더링은 `pulldown_cmark` 이벤트 위에서 플랫폼별
//! 마크업을 입히고, 이미 렌더링된 본문은 그대로 통과시킨다.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

/// HTML 렌더링 방식(플랫폼별 마크업 차이).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlFlavor {
    /// WordPress/博客园 기본 마크업
    Standard,
    /// 掘金: 새 창 링크
    Juejin,
    /// 知乎: 외부 링크 클래스, figure 이미지, highlight 코드 블록
    Zhihu,
    /// CSDN: 언어 미지정 코드 블록에 기본 언어 지정
    Csdn,
}

impl HtmlFlavor {
    fn link_open(self, href: &str) -> String {
        let href = escape_html(href);
        match self {
            Self::Standard => format!("<a href=\"{href}\">"),
            Self::Juejin | Self::Csdn => format!("<a href=\"{href}\" target=\"_blank\">"),
            Self::Zhihu => format!(
                "<a href=\"{href}\" target=\"_blank\" class=\"external-link\" rel=\"nofollow\">"
            ),
        }
    }

    fn image(self, alt: &str, src: &str) -> String {
        let alt = escape_html(alt);
        let src = escape_html(src);
        match self {
            Self::Zhihu => format!(
                "<figure><img src=\"{src}\" alt=\"{alt}\" /><figcaption>{alt}</figcaption></figure>"
            ),
            _ => format!("<img src=\"{src}\" alt=\"{alt}\" />"),
        }
    }

    fn code_block_open(self, lang: Option<&str>) -> String {
        let lang = lang.or(match self {
            Self::Csdn => Some("plaintext"),
            _ => None,
        });
        let code_attr = lang
            .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
            .unwrap_or_default();
        match self {
            Self::Zhihu => format!("<pre class=\"highlight\"><code{code_attr}>"),
            _ => format!("<pre><code{code_attr}>"),
        }
    }
}

/// 이미 렌더링된 본문으로 보는 최상위 블록 태그.
const BLOCK_TAGS: [&str; 16] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "pre", "blockquote", "table", "hr",
    "div", "figure", "section",
];

/// 본문에 그대로 남기는 인라인 태그. 그 밖의 `<...>`는 텍스트로 이스케이프한다.
const INLINE_TAGS: [&str; 20] = [
    "a", "b", "i", "u", "s", "em", "strong", "code", "kbd", "sup", "sub", "mark", "del", "ins",
    "span", "br", "img", "li", "small", "abbr",
];

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

/// Markdown 본문을 HTML 조각으로 변환한다.
///
/// 이미 블록 태그로 시작하는 본문은 렌더링된 결과로 보고 그대로 돌려준다.
pub fn to_html(markdown: &str, flavor: HtmlFlavor) -> String {
    if is_rendered_html(markdown) {
        return markdown.to_string();
    }

    let events = FlavorEvents {
        inner: Parser::new_ext(markdown, markdown_options()),
        flavor,
        image: None,
    };
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out.trim_end().to_string()
}

/// 파서 이벤트에 플랫폼별 마크업을 입힌다.
struct FlavorEvents<I> {
    inner: I,
    flavor: HtmlFlavor,
    /// 열린 이미지의 (src, alt)
    image: Option<(String, String)>,
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for FlavorEvents<I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        loop {
            let event = self.inner.next()?;

            if self.image.is_some() {
                match event {
                    Event::End(TagEnd::Image) => {
                        if let Some((src, alt)) = self.image.take() {
                            return Some(Event::InlineHtml(self.flavor.image(&alt, &src).into()));
                        }
                    }
                    Event::Text(text) | Event::Code(text) => {
                        if let Some((_, alt)) = self.image.as_mut() {
                            alt.push_str(&text);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if let Event::Start(Tag::Image { dest_url, .. }) = &event {
                self.image = Some((dest_url.to_string(), String::new()));
                continue;
            }

            return Some(self.rewrite(event));
        }
    }
}

impl<I> FlavorEvents<I> {
    fn rewrite<'a>(&self, event: Event<'a>) -> Event<'a> {
        let flavor = self.flavor;
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                Event::InlineHtml(flavor.link_open(&dest_url).into())
            }
            Event::End(TagEnd::Link) => Event::InlineHtml("</a>".into()),
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
                    CodeBlockKind::Indented => None,
                };
                Event::Html(flavor.code_block_open(lang).into())
            }
            Event::End(TagEnd::CodeBlock) => Event::Html("</code></pre>\n".into()),
            Event::Code(code) if flavor == HtmlFlavor::Zhihu => Event::InlineHtml(
                format!("<code class=\"inline\">{}</code>", escape_html(&code)).into(),
            ),
            Event::InlineHtml(raw) if !is_known_markup(&raw) => Event::Text(raw),
            Event::Html(raw) if raw.trim_start().starts_with('<') && !is_known_markup(&raw) => {
                Event::Html(format!("<p>{}</p>\n", escape_html(raw.trim_end())).into())
            }
            other => other,
        }
    }
}

/// `<tag`, `</tag` 에서 소문자 태그 이름을 꺼낸다.
fn tag_name(raw: &str) -> Option<String> {
    let rest = raw.trim_start().strip_prefix('<')?;
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name: String = rest
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    Some(name.to_ascii_lowercase())
}

fn is_rendered_html(text: &str) -> bool {
    tag_name(text).is_some_and(|name| BLOCK_TAGS.contains(&name.as_str()))
}

fn is_known_markup(raw: &str) -> bool {
    raw.trim_start().starts_with("<!--")
        || tag_name(raw).is_some_and(|name| {
            BLOCK_TAGS.contains(&name.as_str()) || INLINE_TAGS.contains(&name.as_str())
        })
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((level, text))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|m| compact.chars().all(|c| c == *m))
}

fn bullet_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 코드 블록 밖의 `##제목`, `#   제목` 같은 제목 표기를 `## 제목`으로 정규화한다.
pub fn normalize_headings(markdown: &str) -> String {
    map_outside_fences(markdown, |line| {
        let level = line.chars().take_while(|c| *c == '#').count();
        if level == 0 || level > 6 {
            return line.to_string();
        }
        let text = line[level..].trim();
        if text.is_empty() || text.starts_with('#') {
            return line.to_string();
        }
        // `#태그`처럼 공백 없는 한 단어는 해시태그로 본다.
        if level == 1 && !line[1..].starts_with([' ', '\t']) {
            return line.to_string();
        }
        format!("{} {}", "#".repeat(level), text)
    })
}

/// 언어가 지정되지 않은 여는 코드 펜스에 기본 언어를 붙인다.
pub fn label_code_fences(markdown: &str, lang: &str) -> String {
    let mut in_fence = false;
    let mut out = Vec::new();
    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if let Some(info) = trimmed.strip_prefix("```") {
            if !in_fence && info.trim().is_empty() {
                let indent = &line[..line.len() - trimmed.len()];
                out.push(format!("{indent}```{lang}"));
            } else {
                out.push(line.to_string());
            }
            in_fence = !in_fence;
            continue;
        }
        out.push(line.to_string());
    }
    out.join("\n")
}

/// 제목에서 강조/코드 표기를 제거한다. 제거 후 새로 생긴 표기도 남기지 않는다.
pub fn strip_emphasis(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = current
            .replace("**", "")
            .replace("__", "")
            .replace('`', "")
            .trim()
            .to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// 문자 단위로 길이를 제한한다(UTF-8 경계 안전).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars()
        .take(max_chars)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// 본문에서 마크업을 걷어낸 요약문을 만든다.
pub fn plain_excerpt(markdown: &str, max_chars: usize) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut in_code_block = false;
    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) | Event::Code(text) if !in_code_block => {
                words.extend(text.split_whitespace().map(str::to_string));
            }
            _ => {}
        }
    }
    truncate_chars(&words.join(" "), max_chars)
}

/// `#话题` 형태의 해시태그를 순서대로(중복 없이)추출한다. 코드 블록은 제외한다.
pub fn extract_hashtags(markdown: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let mut prev: Option<char> = None;
        let mut current: Option<String> = None;
        for ch in line.chars() {
            if let Some(tag) = current.as_mut() {
                if ch.is_whitespace() || ch == '#' {
                    push_tag(&mut tags, current.take());
                } else {
                    tag.push(ch);
                    prev = Some(ch);
                    continue;
                }
            }
            if ch == '#' && prev.is_none_or(char::is_whitespace) {
                current = Some("#".to_string());
            }
            prev = Some(ch);
        }
        push_tag(&mut tags, current);
    }

    tags
}

fn push_tag(tags: &mut Vec<String>, tag: Option<String>) {
    if let Some(tag) = tag.filter(|t| t.chars().count() > 1)
        && !tags.contains(&tag)
    {
        tags.push(tag);
    }
}

/// 짧은 SNS 글 형식으로 변환한다(제목 기호 → 이모지, 굵게 → ⭐, 링크 → 텍스트).
pub fn to_short_form(markdown: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            out.push(format!("{CODE_MARK}{line}"));
            continue;
        }
        if line.starts_with(CODE_MARK) {
            out.push(line.to_string());
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            let text = short_form_inline(text);
            let converted = match level {
                1 => text,
                2 => format!("✅ {text}"),
                _ => format!("👉 {text}"),
            };
            out.push(String::new());
            out.push(converted);
            out.push(String::new());
            continue;
        }

        if is_rule(trimmed) {
            out.push(String::new());
            continue;
        }

        if let Some(item) = bullet_item(trimmed) {
            out.push(format!("• {}", short_form_inline(item)));
            continue;
        }

        out.push(short_form_inline(line.trim_end()));
    }

    collapse_blank_lines(&out)
}

const CODE_MARK: &str = "💻 ";

/// 한 줄의 인라인 마크업을 걷어낸다. 더 바뀌지 않을 때까지 반복한다.
fn short_form_inline(line: &str) -> String {
    let mut current = strip_inline_once(line);
    for _ in 0..4 {
        let next = strip_inline_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn strip_inline_once(line: &str) -> String {
    let (lead, body) = split_block_lead(line);
    let mut out = String::from(lead);
    let mut in_image = false;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Image { .. }) => in_image = true,
            Event::End(TagEnd::Image) => in_image = false,
            _ if in_image => {}
            Event::Start(Tag::Strong) => out.push('⭐'),
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => out.push_str(&code_span(&code)),
            Event::Html(raw) | Event::InlineHtml(raw) => out.push_str(raw.trim_end_matches('\n')),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
    out
}

/// 들여쓰기, 번호 목록, 인용 기호처럼 줄 앞에 그대로 둘 부분을 떼어낸다.
fn split_block_lead(line: &str) -> (&str, &str) {
    let body = line.trim_start();
    let indent = line.len() - body.len();

    let digits = body.chars().take_while(char::is_ascii_digit).count();
    let rest = &body[digits..];
    let marker = if digits > 0 && (rest.starts_with(". ") || rest.starts_with(") ")) {
        digits + 2
    } else if body.starts_with("> ") {
        2
    } else if body.starts_with('>') {
        1
    } else {
        0
    };

    (&line[..indent + marker], &body[marker..])
}

fn code_span(code: &str) -> String {
    let longest = code.split(|c: char| c != '`').map(str::len).max().unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

fn collapse_blank_lines(lines: &[String]) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            if out.last().is_some_and(|l| l.is_empty()) || out.is_empty() {
                continue;
            }
            out.push("");
        } else {
            out.push(line);
        }
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

fn map_outside_fences(markdown: &str, f: impl Fn(&str) -> String) -> String {
    let mut in_fence = false;
    let mut out = Vec::new();
    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(line.to_string());
            continue;
        }
        out.push(if in_fence { line.to_string() } else { f(line) });
    }
    out.join("\n")
}
