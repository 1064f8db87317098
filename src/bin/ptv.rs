use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Turn PDFs and image folders into MP4 slideshows or scrolling videos.
#[derive(Parser, Debug)]
#[command(name = "ptv", version)]
struct Cli {
    /// PDF files and/or image directories, in playback order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output resolution WxH; 0 takes that dimension from the first image.
    #[arg(short = 'r', long, value_name = "WxH")]
    resolution: Option<String>,

    /// Output frames per second.
    #[arg(short = 'f', long)]
    fps: Option<f64>,

    /// Seconds of scrolling per source item.
    #[arg(short = 's', long = "seconds-per-item", value_name = "SECONDS")]
    seconds_per_item: Option<f64>,

    /// Total scroll duration in seconds; overrides --seconds-per-item.
    #[arg(short = 'd', long, value_name = "SECONDS")]
    duration: Option<f64>,

    /// Animation style: FRAMES, UP, DOWN, LEFT or RIGHT (or FRAME, U, D, L, R).
    #[arg(short = 'a', long = "style", value_name = "STYLE")]
    style: Option<String>,

    /// Output MP4 path. Defaults to the first input with an .mp4 extension.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Include GIFs found in directories, one item per frame.
    #[arg(long)]
    gif: bool,

    /// Reverse each directory's file order.
    #[arg(long = "rev-seq")]
    rev_seq: bool,

    /// JSON config file; command-line flags take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Debug logging.
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Warnings and errors only.
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn render_config(&self) -> anyhow::Result<ptv::RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => ptv::RenderConfig::from_json_path(path)?,
            None => ptv::RenderConfig::default(),
        };

        if let Some(res) = &self.resolution {
            (cfg.width, cfg.height) = ptv::parse_resolution(res)?;
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        if let Some(spp) = self.seconds_per_item {
            cfg.seconds_per_item = spp;
        }
        if let Some(d) = self.duration {
            cfg.duration = d;
        }
        if let Some(style) = &self.style {
            cfg.style = style.parse()?;
        }
        if let Some(out) = &self.output {
            cfg.output = Some(out.clone());
        }
        cfg.render_gifs |= self.gif;
        cfg.reverse |= self.rev_seq;
        cfg.threading.parallel |= self.parallel;
        if self.threads.is_some() {
            cfg.threading.threads = self.threads;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    let cfg = cli.render_config().context("invalid options")?;

    if !ptv::is_ffmpeg_on_path() {
        tracing::warn!("ffmpeg not found on PATH; encoding will fail");
    }
    if cli.inputs.iter().any(|p| ptv::sources::entries::is_pdf(p)) && !ptv::is_pdftoppm_on_path()
    {
        tracing::warn!("pdftoppm not found on PATH; PDF inputs will fail");
    }

    let rasterizer = ptv::Pdftoppm::default();
    let encoder = ptv::FfmpegEncoder::default();
    let summary = ptv::run(
        &cli.inputs,
        &cfg,
        ptv::Collaborators {
            rasterizer: &rasterizer,
            encoder: &encoder,
        },
    )?;

    eprintln!("wrote {}", summary.output.display());
    Ok(())
}
