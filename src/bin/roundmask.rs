use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roundmask", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a masking configuration into a PNG.
    Render(RenderArgs),
    /// Validate a masking configuration and print the derived descriptor.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input masking configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output width in pixels.
    #[arg(long)]
    width: u32,

    /// Output height in pixels.
    #[arg(long)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Content colour as `r,g,b,a` in 0..=1, straight alpha.
    #[arg(long, default_value = "1,1,1,1", value_parser = parse_colour)]
    colour: roundmask::Rgba,

    /// Shade rows on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Thread pool size; only used with `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input masking configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn parse_colour(s: &str) -> Result<roundmask::Rgba, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid colour component: {e}"))?;
    let [r, g, b, a] = parts[..] else {
        return Err(format!("expected 4 components, got {}", parts.len()));
    };
    let colour = roundmask::Rgba::new(r, g, b, a);
    if !colour.is_finite() {
        return Err("colour components must be finite".to_string());
    }
    Ok(colour)
}

fn read_masking_info(path: &Path) -> anyhow::Result<roundmask::MaskingInfo> {
    roundmask::MaskingInfo::from_json_path(path)
        .inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "masking configuration rejected")
        })
        .with_context(|| format!("load masking configuration '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let info = read_masking_info(&args.in_path)?;

    let quad = roundmask::MaskedQuad {
        canvas: roundmask::Canvas::new(args.width, args.height)?,
        descriptor: info.to_descriptor(),
        colour: args.colour,
        texture_edge: None,
    };
    let settings = roundmask::RasterSettings {
        parallel: args.parallel,
        threads: args.threads,
        clear_rgba: None,
    };
    let (frame, stats) = roundmask::rasterize_with_stats(&quad, &settings)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} covered, {} transparent, {} discarded)",
        args.out.display(),
        stats.covered,
        stats.transparent,
        stats.discarded
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let info = read_masking_info(&args.in_path)?;
    let json = serde_json::to_string_pretty(&info.to_descriptor())
        .context("serialize masking descriptor")?;
    println!("{json}");
    Ok(())
}
