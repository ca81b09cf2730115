use std::{cell::Cell, path::PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a slideshow MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the resolved timeline as JSON.
    Plan(PlanArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Image files or directories, in slide order.
    #[arg(long = "images", required = true, num_args = 1..)]
    images: Vec<PathBuf>,

    /// Slideshow config JSON; command-line values override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds per slide (required without --config).
    #[arg(long)]
    duration: Option<f64>,

    /// Transition name, comma-separated list of names, or `random`.
    #[arg(long)]
    transition: Option<String>,

    /// Transition overlap in seconds.
    #[arg(long)]
    transition_duration: Option<f64>,

    #[arg(long)]
    fps: Option<u32>,

    /// Seed for randomized transitions.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Replace an existing output file.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Render frames in parallel chunks.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Worker threads for parallel rendering (defaults to rayon's choice).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long, conflicts_with = "time", required_unless_present = "time")]
    frame: Option<u64>,

    /// Timestamp in seconds.
    #[arg(long)]
    time: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn resolve_config(args: &InputArgs) -> anyhow::Result<slidecast::SlideshowConfig> {
    let mut cfg = match (&args.config, args.duration) {
        (Some(path), _) => slidecast::SlideshowConfig::from_path(path)?,
        (None, Some(duration)) => slidecast::SlideshowConfig::new(duration),
        (None, None) => anyhow::bail!("either --duration or --config is required"),
    };
    if let Some(duration) = args.duration {
        cfg.slide_duration = duration;
    }
    if let Some(transition) = &args.transition {
        cfg.transition = transition.clone();
    }
    if let Some(d) = args.transition_duration {
        cfg.transition_duration = d;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.input)?;
    let job = slidecast::SlideshowJob {
        images: args.input.images,
        config,
        out_path: args.out,
        overwrite: args.overwrite,
        threading: slidecast::RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
        },
    };

    let last = Cell::new(u8::MAX);
    let progress = slidecast::ProgressFn(|p: slidecast::Progress| {
        let pct = p.percent();
        if pct != last.get() && pct % 10 == 0 {
            last.set(pct);
            eprintln!("{pct}% ({}/{} frames)", p.frames_done, p.frames_total);
        }
    });

    let report = job
        .run(&progress)
        .with_context(|| format!("render '{}'", job.out_path.display()))?;

    eprintln!(
        "wrote {} ({} images, {} frames, seed {})",
        report.out_path.display(),
        report.image_count,
        report.frame_count,
        report.seed
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.input)?;
    let timeline = slidecast::plan(&args.input.images, &config)?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &timeline).context("write timeline JSON")?;
    println!();
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.input)?;
    let timeline = slidecast::plan(&args.input.images, &config)?;
    let compositor = slidecast::Compositor::new(&timeline, config.fps()?)?;

    let frame = match (args.frame, args.time) {
        (Some(idx), _) => compositor.render_frame(slidecast::FrameIndex(idx))?,
        (None, Some(t)) => compositor.render_at(t)?,
        (None, None) => anyhow::bail!("either --frame or --time is required"),
    };

    if let Some(parent) = args.out.parent() {
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

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
