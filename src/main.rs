use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{info, warn};

use bitonal_life_rs::image_pipeline::{
    AutomatonPipeline, NeighborRule, PipelineConfig, TiffCompression, TransformRequest, spawn_transform,
};
use bitonal_life_rs::logger;

#[derive(Parser, Debug)]
#[command(name = "bitonal-life", about = "Run a two-color cellular automaton over a TIFF image")]
struct Args {
    /// Input TIFF image with at most two colors
    input: PathBuf,

    /// Output TIFF image
    output: PathBuf,

    /// Alive cells with fewer alive neighbors die
    #[arg(long, default_value_t = 4)]
    survival: i32,

    /// Dead cells with more alive neighbors are born
    #[arg(long, default_value_t = 4)]
    birth: i32,

    /// Number of generations to run
    #[arg(long, short = 'n', default_value_t = 1)]
    iterations: usize,

    /// Write living cells with the dead color and vice versa
    #[arg(long)]
    invert: bool,

    /// Swap the detected alive and dead colors
    #[arg(long)]
    reverse_colors: bool,

    /// Evaluate rows on all cores
    #[arg(long)]
    parallel: bool,

    /// none, lzw, deflate-fast, deflate-balanced or deflate-best
    #[arg(long, default_value = "lzw")]
    compression: TiffCompression,

    /// Refuse requests above this many generations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Log at debug level, including per-stage timings (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(args.verbose);

    info!("Starting bitonal-life...");

    let mut builder = PipelineConfig::builder()
        .compression(args.compression)
        .parallel(args.parallel);
    if let Some(max) = args.max_iterations {
        builder = builder.max_iterations(Some(max));
    }
    let pipeline = AutomatonPipeline::new(builder.build());

    info!("Compression: {:?}", pipeline.config().compression);
    info!(
        "Row evaluation: {}",
        if pipeline.config().parallel {
            "parallel"
        } else {
            "sequential"
        }
    );

    let loaded = pipeline
        .read_file(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    let request = TransformRequest::new(
        NeighborRule::new(args.survival, args.birth).inverted(args.invert),
        args.iterations,
    )
    .reversed(args.reverse_colors);

    let colors = match request.resolve_colors(&loaded.classification) {
        Ok(colors) => colors,
        Err(e) => bail!("{}: {}", args.input.display(), e),
    };
    info!("Alive color: {}, dead color: {}", colors.alive, colors.dead);

    let handle = spawn_transform(
        pipeline.engine(),
        loaded.image,
        colors,
        request.rule,
        request.iterations,
    );

    let total = handle.total_ticks().max(1);
    let mut last_percent = 0;
    for tick in handle.progress().iter() {
        let percent = tick * 100 / total;
        if percent >= last_percent + 10 {
            last_percent = percent;
            info!("Progress: {}%", percent);
        }
    }

    let image = match handle.join() {
        Ok(image) => image,
        Err(e) => {
            warn!("Transform failed: {}", e);
            return Err(e.into());
        }
    };

    pipeline
        .write_file(&image, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!("Image transform complete: {}", args.output.display());
    Ok(())
}
