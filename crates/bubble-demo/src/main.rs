// File: crates/bubble-demo/src/main.rs
// Summary: Demo builds the skills bubble chart (built-in, JSON config or CSV items) and drives it with random clicks.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use bubble_core::{AutoClicker, BubbleChart, ChartConfig, LoggingConfig, SkillItem};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "bubble-demo", about = "Skills bubble chart with random-click autoplay")]
struct Cli {
    /// Chart configuration JSON; defaults to the built-in portfolio payload.
    #[arg(long)]
    config: Option<PathBuf>,
    /// CSV with `text,count` columns replacing the configuration's items.
    #[arg(long)]
    items: Option<PathBuf>,
    /// Number of autoplay clicks.
    #[arg(long, default_value_t = 5)]
    rounds: usize,
    /// Milliseconds between autoplay clicks.
    #[arg(long, default_value_t = bubble_core::types::DEFAULT_CLICK_INTERVAL_MS)]
    interval_ms: u64,
    /// Do not sleep between clicks.
    #[arg(long)]
    no_wait: bool,
    /// Seed for reproducible click order.
    #[arg(long)]
    seed: Option<u64>,
    /// Write the final scene as JSON.
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Log level or filter directive (overridden by RUST_LOG).
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Log format: pretty or json.
    #[arg(long, default_value = "pretty")]
    log_format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig { level: cli.log_level.clone(), format: cli.log_format.clone() });

    let mut config = match &cli.config {
        Some(path) => {
            let path = resolve_path(path)?;
            tracing::info!("Loading chart config from {}", path.display());
            ChartConfig::load(&path).with_context(|| format!("failed to load config '{}'", path.display()))?
        }
        None => ChartConfig::portfolio(),
    };
    if let Some(path) = &cli.items {
        let path = resolve_path(path)?;
        config.data.items = load_items_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        tracing::info!("Loaded {} items from {}", config.data.items.len(), path.display());
    }
    if config.data.items.is_empty() {
        anyhow::bail!("no skill items loaded; check headers (text,count).");
    }

    let mut chart = BubbleChart::new(config)?;
    let clicker = AutoClicker::for_chart(&chart, Duration::from_millis(cli.interval_ms));
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let no_wait = cli.no_wait;
    let clicked = clicker.run(&mut chart, cli.rounds, &mut rng, |d| {
        if !no_wait { std::thread::sleep(d); }
    })?;

    for id in &clicked {
        let node = chart.scene().node(*id)?;
        println!("clicked {:<12} value {:>6} r {:>6.1}", node.item.text, node.item.count, node.r);
    }
    if let Some(central) = chart.scene().central() {
        println!("central bubble: {}", chart.scene().node(central)?.item.text);
    }

    if let Some(out) = &cli.dump {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(out).with_context(|| format!("failed to create '{}'", out.display()))?;
        serde_json::to_writer_pretty(file, chart.scene())?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    match config.format.as_str() {
        "json" => fmt().json().with_env_filter(filter).with_target(true).init(),
        _ => fmt().pretty().with_env_filter(filter).with_target(true).init(),
    }
}

fn resolve_path(p: &Path) -> Result<PathBuf> {
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Read `text,count` rows; header names are matched case-insensitively.
fn load_items_csv(path: &Path) -> Result<Vec<SkillItem>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (Some(ti), Some(ci)) = (find("text"), find("count")) else {
        anyhow::bail!("expected 'text' and 'count' columns, found {:?}", headers);
    };

    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("bad CSV record at row {}", line + 2))?;
        let (Some(text), Some(count)) = (rec.get(ti), rec.get(ci)) else { continue };
        if text.is_empty() { continue; }
        out.push(SkillItem::new(text, count));
    }
    Ok(out)
}
