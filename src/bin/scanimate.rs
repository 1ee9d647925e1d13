use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};

/// Turn a GIF or a set of images into a scanimation plus the striped pattern
/// used to view it. Move the pattern across the scanimation to see it animate.
#[derive(Parser, Debug)]
#[command(name = "scanimate", version)]
struct Cli {
    /// A single GIF, a single directory of images, or several images to stack.
    #[arg(required = true)]
    image_source: Vec<PathBuf>,

    /// Pattern used to create the scanimation [default: hgrid].
    #[arg(long, value_enum)]
    pattern: Option<PatternChoice>,

    /// Keep every n-th source frame [default: 1].
    #[arg(long)]
    downsample: Option<usize>,

    /// Width in pixels of each transparent stripe [default: 1].
    #[arg(long)]
    stripewidth: Option<u32>,

    /// Common output directory for scanimation.png and pattern.png.
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Output path of the scanimation (ignored with --dest).
    #[arg(long, alias = "scan_dest", default_value = scanimate::SCANIMATION_FILE)]
    scan_dest: PathBuf,

    /// Output path of the pattern (ignored with --dest).
    #[arg(long, alias = "patt_dest", default_value = scanimate::PATTERN_FILE)]
    patt_dest: PathBuf,

    /// Resize frames so the pattern period tiles them [default: none].
    #[arg(long, value_enum)]
    fit: Option<FitChoice>,

    /// Mask frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// JSON config file; command-line options take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write reveal_<k>.png per phase, simulating the sliding pattern.
    #[arg(long)]
    reveal_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternChoice {
    Hgrid,
    Vgrid,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitChoice {
    None,
    Crop,
    Pad,
    Scale,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    tracing::debug!(?config, "resolved config");

    // Downsampling happens in the pipeline.
    let stack = scanimate::load_source(&cli.image_source, 1).context("load image source")?;
    let run = scanimate::scanimate(&stack, &config).context("build scanimation")?;

    let paths = match &cli.dest {
        Some(dir) => scanimate::OutputPaths::in_dir(dir),
        None => scanimate::OutputPaths {
            scanimation: cli.scan_dest.clone(),
            pattern: cli.patt_dest.clone(),
        },
    };
    scanimate::write_scanimation(&run.output, &paths)?;
    eprintln!("wrote {}", paths.scanimation.display());
    eprintln!("wrote {}", paths.pattern.display());

    if let Some(dir) = &cli.reveal_dir {
        let views = scanimate::reveal_all(&run.output.composite, &run.grid)?;
        for (k, view) in views.iter().enumerate() {
            let path = dir.join(format!("reveal_{k}.png"));
            scanimate::save_png(&path, view)?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<scanimate::ScanimateConfig> {
    let mut config = match &cli.config {
        Some(path) => scanimate::ScanimateConfig::from_path(path)?,
        None => scanimate::ScanimateConfig::default(),
    };
    if let Some(p) = cli.pattern {
        config.pattern = match p {
            PatternChoice::Hgrid => scanimate::Orientation::Horizontal,
            PatternChoice::Vgrid => scanimate::Orientation::Vertical,
        };
    }
    if let Some(n) = cli.downsample {
        config.downsample = n;
    }
    if let Some(w) = cli.stripewidth {
        config.stripe_width = w;
    }
    if let Some(f) = cli.fit {
        config.fit = match f {
            FitChoice::None => scanimate::FitMode::None,
            FitChoice::Crop => scanimate::FitMode::Crop,
            FitChoice::Pad => scanimate::FitMode::Pad,
            FitChoice::Scale => scanimate::FitMode::Scale,
        };
    }
    if cli.parallel {
        config.parallel = true;
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
