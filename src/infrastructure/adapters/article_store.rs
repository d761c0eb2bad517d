//! 생성 글 파일 저장 포트 구현 어댑터.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::application::ports::ArticleStore;
use crate::domain::markdown::truncate_chars;

const SLUG_LIMIT: usize = 50;

/// `<dir>/<YYYY-MM-DD>-<slug>.md`로 저장한다. 같은 이름이 있으면 번호를 붙인다.
pub struct FileArticleStore;

impl ArticleStore for FileArticleStore {
    fn save(&self, dir: &Path, stem: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;

        let base = format!("{}-{}", Local::now().format("%Y-%m-%d"), slugify(stem));
        let mut path = dir.join(format!("{base}.md"));
        let mut n = 2;
        while path.exists() {
            path = dir.join(format!("{base}-{n}.md"));
            n += 1;
        }

        fs::write(&path, content)
            .with_context(|| format!("failed to write article to {}", path.display()))?;
        Ok(path)
    }
}

/// 문자/숫자(한자 포함)만 남기고 나머지는 `-` 하나로 합친다.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = truncate_chars(slug.trim_end_matches('-'), SLUG_LIMIT);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "article".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_keeps_cjk_and_collapses_separators() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Rust 异步 编程"), "rust-异步-编程");
        assert_eq!(slugify("???"), "article");
    }

    #[test]
    fn saves_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let first = FileArticleStore.save(&out, "My Post", "one").unwrap();
        let second = FileArticleStore.save(&out, "My Post", "two").unwrap();

        assert_ne!(first, second);
        assert!(first.file_name().unwrap().to_string_lossy().ends_with("-my-post.md"));
        assert!(second.file_name().unwrap().to_string_lossy().ends_with("-my-post-2.md"));
        assert_eq!(fs::read_to_string(first).unwrap(), "one");
        assert_eq!(fs::read_to_string(second).unwrap(), "two");
    }
}
