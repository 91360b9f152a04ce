//! Render vortex frames to PPM images without a browser.
//!
//! Examples:
//!   inkloop-preview --out frames
//!   inkloop-preview --frames 120 --fps 30 --size 300
//!   inkloop-preview --config field.json --start 12.5 --frames 1

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use inkloop::config::FieldConfig;
use inkloop::view::VortexView;

#[derive(Parser)]
#[command(name = "inkloop-preview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render the waitlist vortex to PPM frames", long_about = None)]
struct Cli {
    /// Output directory
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Number of frames to render
    #[arg(short = 'n', long, default_value_t = 1)]
    frames: u32,

    /// Frames per simulated second
    #[arg(long, default_value_t = 30.0)]
    fps: f32,

    /// Elapsed time of the first frame, in seconds
    #[arg(long, default_value_t = 0.0)]
    start: f32,

    /// JSON field config (missing keys use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override viewport side, in pixels
    #[arg(long)]
    size: Option<u32>,

    /// Override particle count
    #[arg(long)]
    particles: Option<usize>,

    /// Override the attribute seed
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<FieldConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &cli.config {
        Some(path) => FieldConfig::from_json(&fs::read_to_string(path)?)?,
        None => FieldConfig::default(),
    };
    if let Some(size) = cli.size {
        cfg.viewport = size;
    }
    if let Some(n) = cli.particles {
        cfg.particle_count = n;
    }
    if let Some(seed) = cli.seed {
        cfg.seed = seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(format!("--fps must be positive, got {}", cli.fps).into());
    }

    let cfg = load_config(&cli)?;
    fs::create_dir_all(&cli.out)?;
    info!(
        particles = cfg.particle_count,
        viewport = cfg.viewport,
        frames = cli.frames,
        "rendering vortex preview"
    );

    let mut view = VortexView::mount(cfg)?;
    let started = Instant::now();
    for i in 0..cli.frames {
        let t = cli.start + i as f32 / cli.fps;
        let Some(frame) = view.frame_at(t) else {
            break;
        };
        let path = cli.out.join(format!("vortex_{i:05}.ppm"));
        frame.write_ppm(BufWriter::new(File::create(&path)?))?;
        debug!(frame = i, time = t, path = %path.display(), "wrote frame");
    }
    view.unmount();

    let secs = started.elapsed().as_secs_f64();
    info!(
        "wrote {} frame(s) to {} in {:.2}s",
        cli.frames,
        cli.out.display(),
        secs
    );
    Ok(())
}
