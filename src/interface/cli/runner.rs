//! 파싱된 CLI 명령을 유스케이스 호출로 실행한다.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::usecases::write_article::WriteRequest;
use crate::domain::publish::PublishResult;
use crate::interface::composition::AppComposition;

use super::command::{BatchCommand, CliAction, PublishCommand, WriteCommand};
use super::output::{exit_code, render_results, results_json};

const PREVIEW_LINES: usize = 20;

/// 명령을 실행하고 프로세스 종료 코드를 돌려준다.
pub async fn run(action: CliAction) -> Result<i32> {
    match action {
        CliAction::InspectPlatforms => {
            let composition = AppComposition::quiet();
            println!("{}", composition.inspect_platforms_usecase().execute()?);
            Ok(0)
        }
        CliAction::Publish(command) => {
            let composition = if command.json {
                AppComposition::quiet()
            } else {
                AppComposition::default()
            };
            run_publish(&composition, command).await
        }
        CliAction::Write(command) => run_write(&AppComposition::default(), command).await,
        CliAction::Batch(command) => run_batch(&AppComposition::default(), command).await,
    }
}

async fn run_publish(composition: &AppComposition, command: PublishCommand) -> Result<i32> {
    let raw = read_file(&command.file)?;
    let config = composition.load_config()?;
    let publisher = composition.multi_publisher(&config.platforms);

    let results = match &command.platform {
        Some(platform) => vec![publisher.publish_to(platform, &raw, &command.options).await?],
        None => {
            composition.reporter().section("Publish");
            publisher.publish(&raw, &command.options).await
        }
    };

    if command.json {
        println!("{}", results_json(&results)?);
    } else {
        report_results(composition, &results);
    }
    Ok(exit_code(&results))
}

async fn run_write(composition: &AppComposition, command: WriteCommand) -> Result<i32> {
    let content = resolve_input(&command.input)?;
    let config = composition.load_config()?;
    let written = composition
        .write_usecase()
        .execute(
            &config,
            &WriteRequest {
                content,
                style: command.style,
            },
        )
        .await?;

    let reporter = composition.reporter();
    reporter.kv("Model", &written.generator);
    reporter.kv("Title", &written.article.title);
    reporter.section("Preview");
    for line in written.markdown.lines().take(PREVIEW_LINES) {
        reporter.raw(line);
    }
    if written.markdown.lines().count() > PREVIEW_LINES {
        reporter.raw("...");
    }

    if !command.publish {
        return Ok(0);
    }

    reporter.section("Publish");
    let results = composition
        .multi_publisher(&config.platforms)
        .publish(&written.markdown, &command.options)
        .await;
    report_results(composition, &results);
    Ok(exit_code(&results))
}

async fn run_batch(composition: &AppComposition, command: BatchCommand) -> Result<i32> {
    let config = composition.load_config()?;
    let report = composition
        .write_usecase()
        .execute_batch(&config, &command.dir, command.style)
        .await?;

    let reporter = composition.reporter();
    reporter.section("Batch");
    for written in &report.written {
        reporter.raw(&format!("  ✓ {}", written.path.display()));
    }
    for (path, error) in &report.failed {
        reporter.raw(&format!("  ✗ {}: {error}", path.display()));
    }
    reporter.raw(&format!(
        "{}/{} succeeded",
        report.written.len(),
        report.total()
    ));
    Ok(if report.failed.is_empty() { 0 } else { 1 })
}

fn report_results(composition: &AppComposition, results: &[PublishResult]) {
    let reporter = composition.reporter();
    if results.is_empty() {
        reporter.raw(
            "no platforms are active. Set platform credentials or PUBLISH_MANUAL_PLATFORMS (see `ai-writer platforms`)",
        );
        return;
    }
    reporter.section("Results");
    for line in render_results(results) {
        reporter.raw(&line);
    }
}

/// 인자 하나가 파일 경로면 파일 내용을, 아니면 인자를 이어 붙인 텍스트를 쓴다.
fn resolve_input(input: &[String]) -> Result<String> {
    if let [single] = input
        && Path::new(single).is_file()
    {
        return read_file(Path::new(single));
    }
    Ok(input.join(" "))
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
