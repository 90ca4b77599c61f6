use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in portfolio page config as JSON.
    Config(ConfigArgs),
    /// Run the page headlessly and print one JSON frame report per line.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Viewport width.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 900.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page config JSON. Defaults to the built-in portfolio.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width for the built-in portfolio.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height for the built-in portfolio.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Wheel delta applied before the first frame.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    wheel: f64,

    /// Glide to a section before the first frame: `hero`, `about`, `projects`, `skills`
    /// or `contact`.
    #[arg(long)]
    scroll_to: Option<String>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Config(args) => cmd_config(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_page_json(path: &Path) -> anyhow::Result<vitrine::PageConfig> {
    let f = File::open(path).with_context(|| format!("open page config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: vitrine::PageConfig =
        serde_json::from_reader(r).with_context(|| "parse page config JSON")?;
    Ok(config)
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let viewport = vitrine::Viewport::new(args.width, args.height)?;
    let config = vitrine::PageConfig::portfolio(viewport);
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let config = match &args.config {
        Some(path) => read_page_json(path)?,
        None => vitrine::PageConfig::portfolio(vitrine::Viewport::new(args.width, args.height)?),
    };
    config.validate()?;

    let mut page = vitrine::Page::new(&config, vitrine::HeadlessScroll::default())?
        .with_audio(Box::new(vitrine::OfflineSynth::default()));
    page.mount()?;
    if let Some(name) = &args.scroll_to {
        page.scroll_to(vitrine::Anchor::parse(name)?)?;
    }
    page.wheel(args.wheel);

    let dt = 1.0 / args.fps;
    let mut sink = vitrine::StyleBuffer::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for _ in 0..args.frames {
        let report = page.frame(dt, &mut sink);
        serde_json::to_writer(&mut out, &report).with_context(|| "write frame report")?;
        writeln!(out)?;
    }
    page.teardown();

    tracing::info!(
        frames = args.frames,
        writes = sink.write_count(),
        "simulation finished"
    );
    Ok(())
}
