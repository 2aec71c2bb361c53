use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use panelizer::{
    BackgroundColor, BatchOptions, CanvasRatio, ConfigDocument, Layout, LayoutConfig,
    Orientation, UnitOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "panelizer", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out images and write panels into `panelizer_output/`.
    Run(RunArgs),
    /// Print the work queue without rendering anything.
    Queue(QueueArgs),
    /// Print the resolved configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Image files or directories (directories are scanned for jpg/jpeg/png).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Render units one at a time instead of on a worker pool.
    #[arg(long)]
    sequential: bool,

    /// Worker count for the pool (defaults to the number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Parser, Debug)]
struct QueueArgs {
    /// Image files or directories.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Configuration JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// framing | uniform
    #[arg(long)]
    layout: Option<Layout>,

    /// Canvas height in pixels.
    #[arg(long)]
    canvas_height: Option<u32>,

    /// 3:4 | 4:5 | 2:3 | 9:16
    #[arg(long)]
    ratio: Option<CanvasRatio>,

    /// white | black | lightgray | darkgray
    #[arg(long)]
    background: Option<BackgroundColor>,

    /// Framing padding percentages.
    #[arg(long)]
    pad_left: Option<f64>,
    #[arg(long)]
    pad_right: Option<f64>,
    #[arg(long)]
    pad_top: Option<f64>,
    #[arg(long)]
    pad_bottom: Option<f64>,

    /// Uniform border as a percentage of the canvas height.
    #[arg(long)]
    border: Option<f64>,

    /// inward | outward
    #[arg(long)]
    orientation: Option<Orientation>,

    /// Split wide single images into panorama panels.
    #[arg(long)]
    split_wide: bool,

    /// Stack consecutive landscape images of similar aspect.
    #[arg(long)]
    stack: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Queue(args) => cmd_queue(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config_doc(path: &Path) -> anyhow::Result<ConfigDocument> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let doc: ConfigDocument =
        serde_json::from_str(&s).with_context(|| "parse config JSON")?;
    Ok(doc)
}

fn resolve_config(args: &ConfigArgs) -> anyhow::Result<LayoutConfig> {
    let mut doc = match &args.config {
        Some(path) => read_config_doc(path)?,
        None => ConfigDocument::default(),
    };

    doc.layout = args.layout.or(doc.layout);
    doc.canvas_height = args.canvas_height.or(doc.canvas_height);
    doc.canvas_ratio = args.ratio.or(doc.canvas_ratio);
    doc.background_color = args.background.or(doc.background_color);
    if args.split_wide {
        doc.split_wide_images = Some(true);
    }
    if args.stack {
        doc.stack_landscape_images = Some(true);
    }

    let mut pad = doc.padding.unwrap_or_default();
    pad.left = args.pad_left.or(pad.left);
    pad.right = args.pad_right.or(pad.right);
    pad.top = args.pad_top.or(pad.top);
    pad.bottom = args.pad_bottom.or(pad.bottom);
    pad.uniform = args.border.or(pad.uniform);
    pad.orientation = args.orientation.or(pad.orientation);
    doc.padding = Some(pad);

    Ok(LayoutConfig::try_from(doc)?)
}

fn expand_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(panelizer::collect_images(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.config)?;
    let files = expand_inputs(&args.inputs)?;
    let opts = BatchOptions {
        parallel: !args.sequential,
        threads: args.jobs,
    };

    let report = panelizer::run_batch(&files, &config, &opts)?;
    for outcome in &report.outcomes {
        match outcome {
            UnitOutcome::Written(paths) => {
                for p in paths {
                    eprintln!("wrote {}", p.display());
                }
            }
            UnitOutcome::Missing => {}
            UnitOutcome::Failed { sidecar, error } => match sidecar {
                Some(p) => eprintln!("failed: {error} (see {})", p.display()),
                None => eprintln!("failed: {error}"),
            },
        }
    }

    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} units failed",
            report.failed,
            report.outcomes.len()
        );
    }
    Ok(())
}

fn cmd_queue(args: QueueArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.config)?;
    let files = expand_inputs(&args.inputs)?;
    for name in panelizer::queue_names(&files, &config) {
        println!("{name}");
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let json = serde_json::to_string_pretty(&config).with_context(|| "serialize config")?;
    println!("{json}");
    Ok(())
}
