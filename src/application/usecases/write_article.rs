//! 원문을 모델로 정리해 Markdown 글로 저장하는 유스케이스.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::application::config::Config;
use crate::application::ports::{ArticleGenerator, ArticleStore, GeneratorFactory, Reporter};
use crate::domain::article::Article;
use crate::domain::prompt::{ContentKind, PlatformStyle, build_article_prompt};

/// 출력 디렉터리가 설정되지 않았을 때 사용하는 상대 경로.
pub const FALLBACK_OUTPUT_DIR: &str = "articles";

#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub content: String,
    pub style: Option<PlatformStyle>,
}

#[derive(Debug, Clone)]
pub struct WrittenArticle {
    pub path: PathBuf,
    pub markdown: String,
    pub article: Article,
    /// 실제로 글을 만든 모델 이름
    pub generator: String,
}

/// 디렉터리 일괄 생성 결과.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<WrittenArticle>,
    /// (입력 파일, 오류 메시지)
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

pub struct WriteArticleUseCase<'a> {
    pub generator_factory: &'a dyn GeneratorFactory,
    pub store: &'a dyn ArticleStore,
    pub reporter: &'a dyn Reporter,
}

impl<'a> WriteArticleUseCase<'a> {
    pub async fn execute(&self, config: &Config, request: &WriteRequest) -> Result<WrittenArticle> {
        if request.content.trim().is_empty() {
            bail!("input content is empty");
        }

        let kind = ContentKind::detect(&request.content);
        self.reporter.section("Generate");
        self.reporter.kv("Kind", kind_label(kind));
        if let Some(style) = request.style {
            self.reporter.kv("Style", style.code());
        }

        let prompt = build_article_prompt(&request.content, kind, request.style);
        let generators = self.generator_factory.build(&config.generator);
        let (generator, markdown) = generate_with_fallback(self.reporter, &generators, &prompt).await?;

        let article = Article::parse(&markdown);
        let dir = config
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(FALLBACK_OUTPUT_DIR));
        let path = self.save(&dir, &article, &markdown)?;
        self.reporter.kv("Saved", &path.display().to_string());

        Ok(WrittenArticle {
            path,
            markdown,
            article,
            generator,
        })
    }

    /// 디렉터리의 `.txt`/`.md` 파일마다 글을 생성한다.
    ///
    /// 한 파일의 실패는 기록만 하고 다음 파일로 넘어간다.
    pub async fn execute_batch(
        &self,
        config: &Config,
        dir: &Path,
        style: Option<PlatformStyle>,
    ) -> Result<BatchReport> {
        let inputs = batch_inputs(dir)?;
        let total = inputs.len();
        info!(dir = %dir.display(), total, "starting batch generation");

        let mut report = BatchReport::default();
        for (index, path) in inputs.into_iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.reporter
                .status("Batch", &format!("{}/{total} {name}", index + 1));

            let outcome = match fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))
            {
                Ok(content) => self.execute(config, &WriteRequest { content, style }).await,
                Err(err) => Err(err),
            };
            match outcome {
                Ok(written) => report.written.push(written),
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "batch item failed");
                    self.reporter.status("Batch", &format!("{name} failed: {err:#}"));
                    report.failed.push((path, format!("{err:#}")));
                }
            }
        }

        self.reporter.status(
            "Batch",
            &format!("{}/{total} succeeded", report.written.len()),
        );
        Ok(report)
    }

    fn save(&self, dir: &Path, article: &Article, markdown: &str) -> Result<PathBuf> {
        self.store.save(dir, &article.title, markdown)
    }
}

/// 우선 모델부터 차례로 시도하고, 처음으로 비어 있지 않은 결과를 돌려준다.
async fn generate_with_fallback(
    reporter: &dyn Reporter,
    generators: &[Box<dyn ArticleGenerator>],
    prompt: &str,
) -> Result<(String, String)> {
    if generators.is_empty() {
        bail!("no model provider available. Set MODEL_PROVIDER and the matching API key");
    }

    let mut errors = Vec::new();
    for generator in generators {
        reporter.status("Model", &format!("generating with {}", generator.name()));
        match generator.generate(prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                return Ok((generator.name().to_string(), text.trim().to_string()));
            }
            Ok(_) => {
                warn!(generator = generator.name(), "model returned empty text");
                errors.push(format!("{}: empty response", generator.name()));
            }
            Err(err) => {
                warn!(generator = generator.name(), error = %err, "generation failed");
                errors.push(format!("{}: {err:#}", generator.name()));
            }
        }
    }
    bail!("all model providers failed: {}", errors.join("; "))
}

/// 일괄 생성 대상 파일을 이름 순으로 모은다.
fn batch_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory {}", dir.display()))?
            .path();
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "txt" | "md"));
        if is_text && path.is_file() {
            inputs.push(path);
        }
    }

    if inputs.is_empty() {
        bail!("no .txt or .md files found in {}", dir.display());
    }
    inputs.sort();
    Ok(inputs)
}

fn kind_label(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Chat => "chat",
        ContentKind::Link => "link",
        ContentKind::Default => "default",
    }
}
