use anyhow::{anyhow, Context, Result};
use catalog::{decode_duration, whole_minutes, PreferenceRules, VideoId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use selector::{
    InsertOutcome, InsertionReport, RunReport, Selection, SelectionConfig, SelectionMode,
    SelectionOrchestrator,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use youtube_client::{InMemoryPlatform, VideoPlatform, YouTubeClient, DEFAULT_BASE_URL};

/// playlist-filler - keeps a curated recitation playlist topped up
#[derive(Parser)]
#[command(name = "playlist-filler")]
#[command(about = "Find long, clean recitation videos and add them to a playlist", long_about = None)]
struct Cli {
    /// Destination playlist
    #[arg(long, env = "PLAYLIST_ID", global = true)]
    playlist_id: Option<String>,

    /// OAuth access token with playlist write scope
    #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true, global = true)]
    access_token: Option<String>,

    /// API root, for proxies and local testing
    #[arg(long, env = "YOUTUBE_API_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Serve searches and the playlist from a JSON fixture instead of the API
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// TOML file overriding the built-in creators, topics and title patterns
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Shortest acceptable video, in whole minutes
    #[arg(long, default_value = "15", global = true)]
    min_minutes: u64,

    /// Randomized mode gives up after examining this many candidates
    #[arg(long, default_value = "40", global = true)]
    max_attempts: usize,

    /// Ranked mode adds at most this many videos
    #[arg(long, default_value = "3", global = true)]
    max_to_add: usize,

    /// Seed for randomized selection (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Select but do not insert
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a broad candidate pool and add the best few
    Ranked,

    /// Add one qualifying video from random creator × topic searches
    Random,

    /// Add a specific video, guarded against duplicates
    Add {
        #[arg(long)]
        video_id: String,
    },

    /// List the playlist's current members
    Members,

    /// Run the offline checks against a single title
    Check {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        channel: String,

        /// Compact duration such as PT24M47S
        #[arg(long)]
        duration: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let rules = Arc::new(load_rules(cli.rules.as_deref())?);

    let command = match cli.command {
        Commands::Check {
            title,
            channel,
            duration,
        } => {
            handle_check(&rules, cli.min_minutes, &title, &channel, duration.as_deref());
            return Ok(());
        }
        command => command,
    };

    let playlist_id = cli
        .playlist_id
        .ok_or_else(|| anyhow!("--playlist-id (or PLAYLIST_ID) is required"))?;
    let platform = build_platform(cli.fixtures.as_deref(), cli.access_token, &cli.base_url)?;
    let config = SelectionConfig::default()
        .with_min_duration_minutes(cli.min_minutes)
        .with_max_attempts(cli.max_attempts)
        .with_max_to_add(cli.max_to_add);
    let orchestrator = SelectionOrchestrator::new(platform, rules, config)?;

    // Dispatch to appropriate command handler
    match command {
        Commands::Ranked => {
            handle_run(&orchestrator, &playlist_id, SelectionMode::Ranked, cli.seed, cli.dry_run)
                .await?
        }
        Commands::Random => {
            handle_run(
                &orchestrator,
                &playlist_id,
                SelectionMode::Randomized,
                cli.seed,
                cli.dry_run,
            )
            .await?
        }
        Commands::Add { video_id } => {
            handle_add(&orchestrator, &playlist_id, VideoId::new(video_id), cli.dry_run).await?
        }
        Commands::Members => handle_members(&orchestrator, &playlist_id).await?,
        Commands::Check { .. } => {}
    }

    Ok(())
}

fn load_rules(path: Option<&Path>) -> Result<PreferenceRules> {
    match path {
        Some(path) => PreferenceRules::load_from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Ok(PreferenceRules::default()),
    }
}

fn build_platform(
    fixtures: Option<&Path>,
    access_token: Option<String>,
    base_url: &str,
) -> Result<Arc<dyn VideoPlatform>> {
    if let Some(path) = fixtures {
        info!("Using fixture platform from {}", path.display());
        return Ok(Arc::new(InMemoryPlatform::from_fixture_file(path)?));
    }
    let token = access_token
        .ok_or_else(|| anyhow!("--access-token (or YOUTUBE_ACCESS_TOKEN) is required"))?;
    let client = YouTubeClient::new(token)
        .context("Failed to build YouTube client")?
        .with_base_url(base_url);
    Ok(Arc::new(client))
}

/// Handle the 'ranked' and 'random' commands
async fn handle_run(
    orchestrator: &SelectionOrchestrator,
    playlist_id: &str,
    mode: SelectionMode,
    seed: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let report = orchestrator.run(playlist_id, mode, &mut rng, dry_run).await?;
    print_report(&report);

    match report.selection {
        Selection::NoCandidate { attempts } => Err(anyhow!(
            "No suitable candidate found after {} attempts",
            attempts
        )),
        Selection::Accepted(_) => Ok(()),
    }
}

/// Handle the 'add' command
async fn handle_add(
    orchestrator: &SelectionOrchestrator,
    playlist_id: &str,
    video_id: VideoId,
    dry_run: bool,
) -> Result<()> {
    let mut context = orchestrator.load_context(playlist_id).await?;
    if dry_run {
        let verdict = if context.contains(&video_id) {
            "already present".yellow()
        } else {
            "would be added".green()
        };
        println!("{} {}", video_id, verdict);
        return Ok(());
    }

    match orchestrator.insert_video(&mut context, &video_id).await? {
        InsertOutcome::Added(item_id) => {
            println!("{} Added {} (playlist item {})", "✓".green(), video_id, item_id)
        }
        InsertOutcome::AlreadyPresent => {
            println!("{} {} is already in the playlist", "•".yellow(), video_id)
        }
        InsertOutcome::NotFound => {
            println!("{} {} was not found, nothing added", "✗".red(), video_id)
        }
        InsertOutcome::QuotaExceeded => {
            return Err(anyhow!("Quota exhausted, {} was not added", video_id))
        }
    }
    Ok(())
}

/// Handle the 'members' command
async fn handle_members(orchestrator: &SelectionOrchestrator, playlist_id: &str) -> Result<()> {
    let context = orchestrator.load_context(playlist_id).await?;
    println!(
        "{}",
        format!("Playlist {} holds {} videos", playlist_id, context.member_count())
            .bold()
            .blue()
    );
    let mut ids: Vec<&VideoId> = context.members().collect();
    ids.sort();
    for id in ids {
        println!("  - {}", id);
    }
    Ok(())
}

/// Handle the 'check' command
fn handle_check(
    rules: &PreferenceRules,
    min_minutes: u64,
    title: &str,
    channel: &str,
    duration: Option<&str>,
) {
    let yes_no = |ok: bool| if ok { "yes".green() } else { "no".red() };

    println!("{}", format!("Checking '{}'", title).bold().blue());
    println!("{}Clean title: {}", "• ".cyan(), yes_no(!rules.is_bad_title(title)));
    println!(
        "{}Preferred creator: {}",
        "• ".cyan(),
        yes_no(rules.matches_creator(title, channel))
    );
    println!(
        "{}Preference score: {}",
        "• ".cyan(),
        rules.preference_score(title, channel)
    );

    if let Some(encoded) = duration {
        match decode_duration(encoded) {
            Some(secs) => {
                let minutes = whole_minutes(secs);
                println!(
                    "{}Duration: {} s ({} min), at least {} min: {}",
                    "• ".cyan(),
                    secs,
                    minutes,
                    min_minutes,
                    yes_no(minutes >= min_minutes)
                );
            }
            None => println!("{}Duration: {} is unknown", "• ".cyan(), encoded.red()),
        }
    }
}

/// Helper function to format and print a run report
fn print_report(report: &RunReport) {
    println!(
        "{}",
        format!(
            "Playlist {} ({} videos before this run)",
            report.playlist_id, report.members_before
        )
        .bold()
        .blue()
    );

    for (rank, video) in report.selection.videos().iter().enumerate() {
        let minutes = video
            .duration_secs
            .map(|s| format!("{} min", whole_minutes(s)))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{}. {} | {} [{}] - Score: {} ({})",
            (rank + 1).to_string().green(),
            video.title,
            video.channel,
            minutes,
            video.score,
            video.video_id
        );
    }

    if let Some(insertion) = &report.insertion {
        print_insertion(insertion);
    }
}

fn print_insertion(report: &InsertionReport) {
    for inserted in &report.added {
        println!(
            "{} Added {} (playlist item {})",
            "✓".green(),
            inserted.video.video_id,
            inserted.item_id
        );
    }
    for id in &report.skipped_not_found {
        println!("{} {} was not found, skipped", "✗".red(), id);
    }
    for id in &report.skipped_present {
        println!("{} {} was already present, skipped", "•".yellow(), id);
    }
    if report.halted_on_quota {
        println!(
            "{} Quota exhausted, {} selected videos were not attempted",
            "!".red().bold(),
            report.not_attempted.len()
        );
    }
}
