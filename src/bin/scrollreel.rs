use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version, about = "Sample scroll choreographies offline")]
struct Cli {
    /// Log engine lifecycle events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON frame for a scroll offset.
    Sample(SampleArgs),
    /// Print the snap target for a free scroll offset.
    Snap(SnapArgs),
    /// List resolved region spans.
    Regions(RegionsArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input choreography JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll offset in pixels.
    #[arg(long, allow_negative_numbers = true)]
    offset: f64,

    /// Seconds of entry animation to play before sampling (default: first frame only).
    #[arg(long)]
    entry_elapsed: Option<f64>,
}

#[derive(Parser, Debug)]
struct SnapArgs {
    /// Input choreography JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Candidate scroll offset in pixels.
    #[arg(long, allow_negative_numbers = true)]
    offset: f64,
}

#[derive(Parser, Debug)]
struct RegionsArgs {
    /// Input choreography JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Snap(args) => cmd_snap(args),
        Command::Regions(args) => cmd_regions(args),
    }
}

fn init_logging(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => directives,
        Err(_) if verbose => "debug".to_string(),
        Err(_) => return,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_engine(path: &Path) -> anyhow::Result<scrollreel::AnimationEngine> {
    let doc = scrollreel::Choreography::from_path(path)
        .with_context(|| format!("load choreography '{}'", path.display()))?;
    let mut engine = doc
        .build()
        .with_context(|| format!("build engine from '{}'", path.display()))?;
    engine.init();
    Ok(engine)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{s}");
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.offset.is_finite(), "--offset must be finite");
    let mut engine = load_engine(&args.in_path)?;
    engine.on_scroll(args.offset);
    engine.settle();
    if let Some(elapsed) = args.entry_elapsed {
        anyhow::ensure!(
            elapsed.is_finite() && elapsed >= 0.0,
            "--entry-elapsed must be finite and >= 0"
        );
        engine.tick(elapsed);
    }
    print_json(&engine.frame())
}

fn cmd_snap(args: SnapArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.offset.is_finite(), "--offset must be finite");
    let engine = load_engine(&args.in_path)?;
    let total = engine.total_scrollable();
    let spans = engine.registry().spans();
    let controller = scrollreel::SnapController::new(engine.config().snap);
    let plan = controller.plan(args.offset, total, &spans);
    let region = plan
        .as_ref()
        .and_then(|p| spans.iter().find(|s| s.id == p.region()))
        .map(|s| s.label.clone());

    print_json(&serde_json::json!({
        "candidate": args.offset,
        "target": engine.compute_snap_target(args.offset),
        "total_scrollable": total,
        "region": region,
        "duration": plan.as_ref().map(|p| p.duration()),
    }))
}

fn cmd_regions(args: RegionsArgs) -> anyhow::Result<()> {
    let engine = load_engine(&args.in_path)?;
    print_json(&serde_json::json!({
        "total_scrollable": engine.total_scrollable(),
        "pin_spacing": engine.registry().pin_spacing(),
        "regions": engine.registry().spans(),
    }))
}
