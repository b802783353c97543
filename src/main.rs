use anyhow::{Context, Result};
use aoc_scaffold::{
    endpoint::DEFAULT_BASE_URL,
    scaffold::{self, InputKind},
    AocClient, FetchConfigBuilder,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Fetch an Advent of Code puzzle and scaffold a directory for solving it.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Day of the puzzle
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    day: u32,

    /// Year of the event
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    year: u32,

    /// Session cookie of a logged in account
    #[arg(long, env = "AOC_SESSION", default_value = "", hide_env_values = true)]
    session: String,

    /// Site to fetch from, e.g. a local mirror
    #[arg(long, env = "AOC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory the `<year>/<dayNN_title>` tree is created under
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Generate only Readme.md
    #[arg(long)]
    readme_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.session.is_empty() {
        warn!("AOC_SESSION is empty: part two and the problem input will not be received");
    }

    let config = FetchConfigBuilder::default()
        .base_url(args.base_url)
        .session(args.session)
        .build()?;
    let client = AocClient::new(config)?;

    info!("Fetching day {:02} info from Advent of Code {}", args.day, args.year);
    let record = client
        .fetch_day(args.year, args.day)
        .await
        .context("get day info")?;

    let day_name = scaffold::day_name(args.day, &record.title);
    info!("Creating directory {}/{}", args.year, day_name);
    let dir = scaffold::create_target_directory(&args.output_dir, args.year, &day_name)?;

    info!("Creating {}/Readme.md with day description", dir.display());
    scaffold::write_readme(&dir, &record.description)?;
    if args.readme_only {
        info!("Done");
        return Ok(());
    }

    info!("Creating {}/{}.rs template for solving", dir.display(), day_name);
    scaffold::write_solution(&dir, &day_name, args.year)?;

    info!(
        "Creating {}/{} input for testing. Maybe wrong, check!",
        dir.display(),
        InputKind::Test
    );
    scaffold::write_input(&dir, InputKind::Test, &record.test_input)?;

    info!("Creating {}/{} input for solving", dir.display(), InputKind::Problem);
    scaffold::write_input(&dir, InputKind::Problem, &record.problem_input)?;

    info!("Done. Let's solve this problem!");
    Ok(())
}
