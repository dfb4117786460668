//! Repofolio - featured projects for portfolio sites
//!
//! A CLI tool that lists a GitHub account's repositories, selects and
//! enriches the ones worth showing, and writes a Markdown or JSON
//! "Featured Projects" document.
//!
//! Exit codes:
//!   0 - Success (including an empty project list)
//!   1 - Runtime error (bad config, fetch failure, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod feed;
mod github;
mod models;
mod report;

use analysis::AggregatorConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use feed::{FeedState, ProjectFeed};
use github::{FileSource, GitHubClient, GitHubSettings, ListOptions, RepositorySource};
use indicatif::{ProgressBar, ProgressStyle};
use models::{Showcase, ShowcaseMetadata};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config comes first: it can turn on verbose logging
    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(args.log_level(config.general.verbose))?;

    info!("Repofolio v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match run(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .repofolio.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Set [github] username, then list featured or hidden repositories.");
    Ok(())
}

/// Initialize logging. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: tracing::Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load the config file, apply CLI overrides and validate the result.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}

/// Everything a refresh and a write need, resolved from config and CLI.
struct RunContext {
    config: Config,
    aggregator: AggregatorConfig,
    options: ListOptions,
    source: Arc<dyn RepositorySource>,
    quiet: bool,
}

/// Run once, or keep refreshing with --watch. Returns the exit code.
async fn run(args: Args, config: Config) -> Result<i32> {
    let source: Arc<dyn RepositorySource> = match args.input {
        Some(ref input) => {
            info!("Reading repositories from {}", input.display());
            Arc::new(FileSource::new(input.clone()))
        }
        None => Arc::new(
            GitHubClient::new(GitHubSettings::from(&config.github))
                .context("Failed to create GitHub client")?,
        ),
    };

    let ctx = RunContext {
        aggregator: AggregatorConfig::from(&config),
        options: ListOptions::from(&config.github),
        source,
        quiet: args.quiet,
        config,
    };

    match args.watch {
        Some(secs) => run_watch(ctx, Duration::from_secs(secs), ctrl_c()).await,
        None => run_once(&ctx).await,
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Single fetch, aggregate and write.
async fn run_once(ctx: &RunContext) -> Result<i32> {
    let feed = ProjectFeed::new();

    let spinner = fetch_spinner(ctx);
    feed.refresh(ctx.source.as_ref(), &ctx.options, &ctx.aggregator)
        .await;
    spinner.finish_and_clear();

    let exit_code = write_state(&feed.snapshot(), ctx)?.unwrap_or(1);
    Ok(exit_code)
}

/// Refresh every `interval` until `shutdown` resolves, writing each published result.
///
/// At most one refresh is in flight; ticks that fire while it runs are skipped.
async fn run_watch<F>(ctx: RunContext, interval: Duration, shutdown: F) -> Result<i32>
where
    F: Future<Output = ()>,
{
    let ctx = Arc::new(ctx);
    let feed = Arc::new(ProjectFeed::new());
    let mut updates = feed.subscribe();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: Option<JoinHandle<bool>> = None;

    tokio::pin!(shutdown);

    if !ctx.quiet {
        println!(
            "👀 Watching {} every {}s (Ctrl-C to stop)",
            ctx.config.github.username,
            interval.as_secs()
        );
    }

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if in_flight.as_ref().is_some_and(|task| !task.is_finished()) {
                    debug!("Previous refresh still running, skipping tick");
                    continue;
                }
                let feed = Arc::clone(&feed);
                let ctx = Arc::clone(&ctx);
                in_flight = Some(tokio::spawn(async move {
                    feed.refresh(ctx.source.as_ref(), &ctx.options, &ctx.aggregator)
                        .await
                }));
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if let Err(e) = write_state(&state, &ctx) {
                    warn!("Failed to write output: {:#}", e);
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    if let Some(task) = in_flight {
        task.abort();
    }

    Ok(0)
}

fn fetch_spinner(ctx: &RunContext) -> ProgressBar {
    if ctx.quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "Fetching repositories for {}...",
        ctx.config.github.username
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Write the document for a published state.
///
/// Returns `None` for `Loading`, otherwise the exit code the state implies.
fn write_state(state: &FeedState, ctx: &RunContext) -> Result<Option<i32>> {
    let format = ctx.config.general.format;

    let (content, exit_code) = match state {
        FeedState::Loading => return Ok(None),
        FeedState::Ready { projects, fetched } => {
            let showcase = Showcase {
                metadata: ShowcaseMetadata {
                    username: ctx.config.github.username.clone(),
                    generated_at: Utc::now(),
                    repositories_fetched: *fetched,
                    projects_shown: projects.len(),
                },
                projects: projects.clone(),
            };
            let content = match format {
                OutputFormat::Json => report::generate_json_report(&showcase)?,
                OutputFormat::Markdown => report::generate_markdown_report(
                    &showcase,
                    ctx.config.projects.max_topics_shown,
                ),
            };
            (content, 0)
        }
        FeedState::Failed(message) => {
            let content = match format {
                OutputFormat::Json => report::generate_error_json(message)?,
                OutputFormat::Markdown => report::generate_error_markdown(message),
            };
            (content, 1)
        }
    };

    let output = Path::new(&ctx.config.general.output);
    std::fs::write(output, &content)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;

    if !ctx.quiet {
        match state {
            FeedState::Ready { projects, fetched } => {
                println!(
                    "✅ {} featured projects (from {} repositories) written to {}",
                    projects.len(),
                    fetched,
                    output.display()
                );
                for project in projects {
                    println!("   • {}", project.display_title());
                }
            }
            FeedState::Failed(message) => {
                eprintln!("❌ {} (written to {})", message, output.display());
            }
            FeedState::Loading => {}
        }
    }

    Ok(Some(exit_code))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location; a broken default file is ignored
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Ignoring {}: {:#}", CONFIG_FILE_NAME, e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use github::FetchError;
    use models::RepositoryRecord;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns `names[n]` on the n-th call (the last one repeats) after `delay`.
    struct ScriptedSource {
        names: Vec<&'static str>,
        delay: Duration,
        fail: bool,
        calls: AtomicUsize,
        running: AtomicUsize,
        peak_running: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(names: &[&'static str], delay: Duration) -> Self {
            Self {
                names: names.to_vec(),
                delay,
                fail: false,
                calls: AtomicUsize::new(0),
                running: AtomicUsize::new(0),
                peak_running: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(&[], Duration::ZERO)
            }
        }
    }

    impl RepositorySource for ScriptedSource {
        fn list_for_user<'a>(
            &'a self,
            _username: &'a str,
            _options: &'a ListOptions,
        ) -> BoxFuture<'a, Result<Vec<RepositoryRecord>, FetchError>> {
            async move {
                let call = self.calls.fetch_add(1, Ordering::SeqCst);
                let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak_running.fetch_max(running, Ordering::SeqCst);

                tokio::time::sleep(self.delay).await;
                self.running.fetch_sub(1, Ordering::SeqCst);

                if self.fail {
                    return Err(FetchError::Status {
                        status: 503,
                        message: "unavailable".to_string(),
                    });
                }
                let name = self.names[call.min(self.names.len() - 1)];
                Ok(vec![RepositoryRecord::new(call as u64 + 1, name)])
            }
            .boxed()
        }
    }

    fn context_with(
        source: Arc<dyn RepositorySource>,
        output: &Path,
        format: OutputFormat,
    ) -> RunContext {
        let mut config = Config::default();
        config.github.username = "octocat".to_string();
        config.general.output = output.display().to_string();
        config.general.format = format;

        RunContext {
            aggregator: AggregatorConfig::from(&config),
            options: ListOptions::from(&config.github),
            source,
            quiet: true,
            config,
        }
    }

    fn context_for(input: &Path, output: &Path, format: OutputFormat) -> RunContext {
        context_with(
            Arc::new(FileSource::new(input.to_path_buf())),
            output,
            format,
        )
    }

    #[tokio::test]
    async fn test_run_once_writes_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("repos.json");
        let output = dir.path().join("featured.md");
        let mut file = std::fs::File::create(&input).unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "my-portfolio", "html_url": "https://github.com/octocat/my-portfolio",
                 "updated_at": "2024-03-05T00:00:00Z"}}]"#
        )
        .unwrap();

        let ctx = context_for(&input, &output, OutputFormat::Markdown);
        assert_eq!(run_once(&ctx).await.unwrap(), 0);

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("## My portfolio"));
        assert!(written.contains("nextjs"));
    }

    #[tokio::test]
    async fn test_run_once_failure_writes_error_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.json");
        let output = dir.path().join("featured.json");

        let ctx = context_for(&input, &output, OutputFormat::Json);
        assert_eq!(run_once(&ctx).await.unwrap(), 1);

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("Error fetching featured projects"));
        assert!(!written.contains("projects\":"));
    }

    #[test]
    fn test_loading_state_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("featured.md");
        let ctx = context_for(&dir.path().join("x.json"), &output, OutputFormat::Markdown);

        assert_eq!(write_state(&FeedState::Loading, &ctx).unwrap(), None);
        assert!(!output.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_writes_each_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("featured.md");
        let source = Arc::new(ScriptedSource::new(&["alpha", "beta"], Duration::ZERO));
        let ctx = context_with(source.clone(), &output, OutputFormat::Markdown);

        // Ticks at 0s and 10s, stop at 15s.
        let shutdown = tokio::time::sleep(Duration::from_secs(15));
        let code = run_watch(ctx, Duration::from_secs(10), shutdown)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("## Beta"));
        assert!(!written.contains("## Alpha"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_slow_source_still_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("featured.md");
        let source = Arc::new(ScriptedSource::new(&["slow"], Duration::from_secs(2)));
        let ctx = context_with(source.clone(), &output, OutputFormat::Markdown);

        // Each fetch outlasts the interval.
        let shutdown = tokio::time::sleep(Duration::from_secs(30));
        run_watch(ctx, Duration::from_secs(1), shutdown)
            .await
            .unwrap();

        assert_eq!(source.peak_running.load(Ordering::SeqCst), 1);
        assert!(source.calls.load(Ordering::SeqCst) >= 5);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("## Slow"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_failure_writes_error_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("featured.json");
        let source = Arc::new(ScriptedSource::failing());
        let ctx = context_with(source.clone(), &output, OutputFormat::Json);

        let shutdown = tokio::time::sleep(Duration::from_secs(25));
        let code = run_watch(ctx, Duration::from_secs(10), shutdown)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("Error fetching featured projects"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_stops_before_first_publish() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("featured.md");
        let source = Arc::new(ScriptedSource::new(&["late"], Duration::from_secs(60)));
        let ctx = context_with(source, &output, OutputFormat::Markdown);

        let shutdown = tokio::time::sleep(Duration::from_secs(5));
        run_watch(ctx, Duration::from_secs(1), shutdown)
            .await
            .unwrap();

        assert!(!output.exists());
    }

    #[test]
    fn test_config_file_verbose_enables_debug_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[general]\nverbose = true\n\n[github]\nusername = \"octocat\"\n",
        )
        .unwrap();

        let args = Args::parse_from(["repofolio", "--config", path.to_str().unwrap()]);
        let config = resolve_config(&args).unwrap();

        assert!(config.general.verbose);
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);
    }
}
