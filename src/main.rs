mod config;
mod github;
mod page;
mod render;
mod template;

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

use github::{GitHubClient, IssueSource, JsonFileSource};

/// Turn a GitHub repository's issues into a static blog page.
///
/// The repository and token come from REPO_OWNER, REPO_NAME and GITHUB_TOKEN
/// (or .issue-blog.toml); no flags are needed for the usual run.
#[derive(Parser, Debug)]
#[command(name = "issue-blog", version, about)]
struct Cli {
    /// Config file (defaults to .issue-blog.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTML template containing the {{LAST_UPDATED}}, {{TAG_FILTERS}} and {{BLOG_CONTENT}} placeholders
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output file, overwritten on every run
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render from a saved issue-listing JSON response instead of calling the GitHub API
    #[arg(long, value_name = "JSON")]
    issues_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Fetch(#[from] github::FetchError),

    #[error(transparent)]
    Template(#[from] template::TemplateError),
}

/// What a successful run produced.
struct Summary {
    output: PathBuf,
    open: usize,
    closed: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stdout)
        .init();

    let cli = Cli::parse();

    match run(cli).instrument(info_span!("issue_blog")).await {
        Ok(summary) => {
            println!(
                "{} Generated {} ({} open, {} closed)",
                "✓".green().bold(),
                summary.output.display(),
                summary.open,
                summary.closed
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "blog generation failed");
            eprintln!("{} {}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Summary, AppError> {
    info!("loading configuration");
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.template {
        config.paths.template = path;
    }
    if let Some(path) = cli.output {
        config.paths.output = path;
    }
    let repo = config.repo()?;

    let source: Box<dyn IssueSource> = match cli.issues_file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(GitHubClient::new(&config)?),
    };

    info!(source = %source.describe(), "fetching issues");
    let issues = source.fetch_issues().await?;
    info!(count = issues.len(), "found issues");

    info!("generating blog content");
    let content = page::build(&issues, &repo);

    info!(path = %config.paths.template.display(), "reading template");
    let template_html = template::read(&config.paths.template)?;
    let updated = template::last_updated(&Utc::now());
    let page_html = template::fill(&template_html, &content, &updated);
    template::write(&config.paths.output, &page_html)?;

    info!(path = %config.paths.output.display(), "generated page");
    info!(open = content.open, closed = content.closed, "stats");

    Ok(Summary {
        output: config.paths.output,
        open: content.open,
        closed: content.closed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/issues.json");

    #[tokio::test]
    async fn test_run_from_saved_issues() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("blog.toml");
        let template_path = dir.path().join("template.html");
        let issues_path = dir.path().join("issues.json");
        let output_path = dir.path().join("index.html");

        std::fs::write(&config_path, "[github]\nowner = \"octocat\"\nrepo = \"blog\"\n").unwrap();
        std::fs::write(
            &template_path,
            "<p>{{LAST_UPDATED}}</p>\n{{TAG_FILTERS}}\n<main>{{BLOG_CONTENT}}</main>",
        )
        .unwrap();
        std::fs::write(&issues_path, FIXTURE).unwrap();

        let cli = Cli {
            config: Some(config_path),
            template: Some(template_path),
            output: Some(output_path.clone()),
            issues_file: Some(issues_path),
        };
        let summary = run(cli).await.unwrap();
        assert_eq!((summary.open, summary.closed), (2, 1));
        assert_eq!(summary.output, output_path);

        let html = std::fs::read_to_string(&output_path).unwrap();
        assert!(!html.contains("{{"));
        assert!(html.contains(" UTC</p>"));
        assert!(html.contains("data-tag=\"announcement\">announcement</button>"));
        assert!(html.contains("📝 Recent Posts"));
        assert!(html.contains("📁 Archive"));
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<ul><li>one</li><br><li>two</li></ul>"));
        assert!(html.contains("<em>No content</em>"));
        assert!(html.contains("Published on January 5, 2024, 03:45 PM UTC by octocat • 2 comments"));
        assert!(!html.contains("Fix typo in template"));
    }

    #[tokio::test]
    async fn test_run_missing_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("blog.toml");
        let issues_path = dir.path().join("issues.json");
        std::fs::write(&config_path, "[github]\nowner = \"octocat\"\nrepo = \"blog\"\n").unwrap();
        std::fs::write(&issues_path, "[]").unwrap();

        let cli = Cli {
            config: Some(config_path),
            template: Some(dir.path().join("missing.html")),
            output: Some(dir.path().join("index.html")),
            issues_file: Some(issues_path),
        };
        let err = run(cli).await.err().unwrap();
        assert!(matches!(err, AppError::Template(_)));
        assert!(!dir.path().join("index.html").exists());
    }
}
