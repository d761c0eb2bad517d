//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::prompt::PlatformStyle;
use crate::domain::publish::{PublishOptions, PublishStatus};

#[derive(Debug, Parser)]
#[command(name = "ai-writer")]
#[command(about = "Turn notes into articles and publish them to multiple blogging platforms")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate an article from a file or inline text with the configured model
    Write {
        /// Input file path, or the text itself
        #[arg(required = true)]
        input: Vec<String>,

        /// Platform writing style (xhs, zhihu, juejin, csdn)
        #[arg(long)]
        style: Option<PlatformStyle>,

        /// Publish the generated article to all active platforms
        #[arg(long)]
        publish: bool,

        #[command(flatten)]
        publish_args: PublishArgs,
    },
    /// Generate one article per .txt/.md file in a directory
    Batch {
        /// Directory holding the input notes
        dir: PathBuf,

        /// Platform writing style (xhs, zhihu, juejin, csdn)
        #[arg(long)]
        style: Option<PlatformStyle>,
    },
    /// Publish an existing Markdown file
    Publish {
        /// Markdown file to publish
        file: PathBuf,

        /// Override the title parsed from the first `# ` heading
        #[arg(long)]
        title: Option<String>,

        /// Publish to a single platform (id or display name)
        #[arg(long)]
        platform: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        publish_args: PublishArgs,
    },
    /// Show which platforms are configured and which variables are missing
    Platforms,
}

#[derive(Debug, Args)]
struct PublishArgs {
    /// draft or publish
    #[arg(long, default_value = "draft")]
    status: PublishStatus,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Category (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
}

#[derive(Debug)]
pub struct WriteCommand {
    pub input: Vec<String>,
    pub style: Option<PlatformStyle>,
    pub publish: bool,
    pub options: PublishOptions,
}

#[derive(Debug)]
pub struct BatchCommand {
    pub dir: PathBuf,
    pub style: Option<PlatformStyle>,
}

#[derive(Debug)]
pub struct PublishCommand {
    pub file: PathBuf,
    pub platform: Option<String>,
    pub json: bool,
    pub options: PublishOptions,
}

#[derive(Debug)]
pub enum CliAction {
    Write(WriteCommand),
    Batch(BatchCommand),
    Publish(PublishCommand),
    InspectPlatforms,
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Commands::Write {
                input,
                style,
                publish,
                publish_args,
            } => CliAction::Write(WriteCommand {
                input,
                style,
                publish,
                options: publish_args.into_options(None),
            }),
            Commands::Batch { dir, style } => CliAction::Batch(BatchCommand { dir, style }),
            Commands::Publish {
                file,
                title,
                platform,
                json,
                publish_args,
            } => CliAction::Publish(PublishCommand {
                file,
                platform,
                json,
                options: publish_args.into_options(title),
            }),
            Commands::Platforms => CliAction::InspectPlatforms,
        }
    }
}

impl PublishArgs {
    fn into_options(self, title: Option<String>) -> PublishOptions {
        PublishOptions {
            status: self.status,
            title,
            tags: self.tags,
            categories: self.categories,
        }
    }
}
