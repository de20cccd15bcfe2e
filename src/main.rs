use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use svg_gate::{Config, ValidationContext, hardening::MAX_SVG_SIZE_PROPERTY, validate_svg};

/// Checks SVG files for oversized payloads and embedded scripts.
#[derive(Debug, Parser)]
#[command(name = "svg-gate", version)]
struct Args {
    /// TOML or JSON file with `limits.preview.maxSVGSize`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured SVG size limit (bytes)
    #[arg(long)]
    max_svg_size: Option<u64>,

    /// Files to validate
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let ctx = ValidationContext::new(load_config(&args)?);

    let results = join_all(args.files.iter().map(|path| check_file(&ctx, path))).await;

    let mut failed = 0usize;
    for (path, result) in args.files.iter().zip(results) {
        match result {
            Ok(()) => println!("{}: ok", path.display()),
            Err(e) => {
                failed += 1;
                println!("{}: {e:#}", path.display());
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, total = args.files.len(), "rejected svg files");
        std::process::exit(1);
    }

    Ok(())
}

// flag > config file > environment > built-in default
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut cfg = Config::from_env()?;
    if let Some(path) = &args.config {
        cfg = cfg.merge(Config::load(path)?);
    }
    if let Some(max) = args.max_svg_size {
        cfg = cfg.with_limit(MAX_SVG_SIZE_PROPERTY, i64::try_from(max)?);
    }
    Ok(cfg)
}

async fn check_file(ctx: &ValidationContext, path: &Path) -> anyhow::Result<()> {
    let buf = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(path = %path.display(), size = buf.len(), "validating");

    validate_svg(ctx, &buf).await?;
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().map_err(|e| anyhow::anyhow!("{e}"))?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
