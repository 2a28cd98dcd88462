use anyhow::Context;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use coinshaper::config::{
    DEFAULT_BLUR, DEFAULT_MIN_SIZE, DEFAULT_OUTPUT_DIR, DEFAULT_PADDING, DEFAULT_THRESHOLD,
};
use coinshaper::{Binarization, ContourRetrieval, Shaper, ShaperConfig};

/// Long flags that are also accepted with a single leading dash
const SINGLE_DASH_LONG: &[&str] = &[
    "saveProcessed",
    "blur",
    "th",
    "help",
    "otsu",
    "sobel",
    "invert",
    "tree",
    "min-size",
    "padding",
    "verbose",
];

#[derive(Parser)]
#[command(name = "coinsShaper")]
#[command(about = "Crop coin-like objects from a photo, pairing them across a second photo")]
struct Cli {
    /// First photo
    #[arg(value_name = "INPUT1")]
    input1: Option<PathBuf>,

    /// Second photo of the same objects, same framing
    #[arg(value_name = "INPUT2")]
    input2: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'o', value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Save grayscale and threshold/edge images for debugging
    #[arg(long = "saveProcessed")]
    save_processed: bool,

    /// Blur strength as a fraction of the shorter image side, 0.0 to 1.0
    #[arg(long, value_name = "N.N", default_value_t = DEFAULT_BLUR)]
    blur: f32,

    /// Binarization threshold level
    #[arg(long = "th", value_name = "N", default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Pick the threshold level automatically (Otsu)
    #[arg(long, conflicts_with = "sobel")]
    otsu: bool,

    /// Trace contours on Sobel edge strength instead of a threshold mask
    #[arg(long)]
    sobel: bool,

    /// Objects are darker than the background
    #[arg(long)]
    invert: bool,

    /// Keep nested contours, not just the outermost ones
    #[arg(long)]
    tree: bool,

    /// Ignore regions this size or smaller
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_MIN_SIZE)]
    min_size: u32,

    /// Margin added around every detected region
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_PADDING)]
    padding: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn binarization(&self) -> Binarization {
        if self.sobel {
            Binarization::Sobel
        } else if self.otsu {
            Binarization::Otsu
        } else {
            Binarization::Fixed {
                level: self.threshold,
            }
        }
    }

    fn to_config(&self) -> ShaperConfig {
        let retrieval = if self.tree {
            ContourRetrieval::Tree
        } else {
            ContourRetrieval::External
        };

        ShaperConfig::new()
            .with_output_dir(&self.output_dir)
            .with_save_processed(self.save_processed)
            .with_blur(self.blur)
            .with_binarization(self.binarization())
            .with_invert(self.invert)
            .with_retrieval(retrieval)
            .with_min_size(self.min_size)
            .with_padding(self.padding)
    }
}

/// Rewrite `-saveProcessed` style flags to `--saveProcessed`
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split('=').next().unwrap_or(rest);
            if SINGLE_DASH_LONG.contains(&name) {
                OsString::from(format!("-{}", s))
            } else {
                arg
            }
        })
        .collect()
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse_from(normalize_args(std::env::args_os()));

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Some(first) = args.input1.as_deref() else {
        eprintln!("Error: Need at least one input file");
        return Ok(ExitCode::from(255));
    };

    let shaper = Shaper::new(args.to_config());
    let summary = shaper
        .run(first, args.input2.as_deref())
        .context("Failed to shape coins")?;

    println!("\n=== Coin Detection Results ===");
    println!("Coins in {}: {}", first.display(), summary.first_count);
    if let (Some(second), Some(count)) = (args.input2.as_deref(), summary.second_count) {
        println!("Coins in {}: {}", second.display(), count);
        println!("Matched pairs: {}", summary.pair_count);
    }
    println!(
        "Wrote {} images to {}",
        summary.written.len(),
        shaper.config().output_dir.display()
    );
    if args.verbose {
        for path in &summary.written {
            println!("  {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
