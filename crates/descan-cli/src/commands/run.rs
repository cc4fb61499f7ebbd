use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use descan_core::io::image_io::{load_grayscale, save_png};
use descan_core::params::Params;
use descan_core::pipeline::{NullSink, Session};

use crate::summary::print_run_summary;

#[derive(Args)]
pub struct RunArgs {
    /// Input image file or directory of images
    pub input: PathBuf,

    /// Output file (single input) or directory (directory input)
    pub output: PathBuf,

    /// Parameter preset file (TOML)
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Long edge of the rescaled image in pixels
    #[arg(long)]
    pub target_size: Option<usize>,

    /// Lower bound of the content intensity range
    #[arg(long)]
    pub black: Option<u8>,

    /// Upper bound of the content intensity range
    #[arg(long)]
    pub white: Option<u8>,

    /// Margin kept around detected content, in source pixels
    #[arg(long)]
    pub border: Option<usize>,

    /// Gaussian blur kernel size (forced odd)
    #[arg(long)]
    pub kernel: Option<usize>,

    /// Contrast gain in hundredths (100 = gain 1.0)
    #[arg(long)]
    pub alpha: Option<u32>,

    /// Contrast pivot in hundredths (60 = pivot 0.6)
    #[arg(long)]
    pub beta: Option<u32>,

    /// Binarization threshold
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Bilateral filter neighborhood diameter
    #[arg(long)]
    pub bilateral_d: Option<usize>,

    /// Bilateral filter intensity sigma
    #[arg(long)]
    pub bilateral_color: Option<f64>,

    /// Bilateral filter spatial sigma
    #[arg(long)]
    pub bilateral_space: Option<f64>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let params = build_params(args)?;
    print_run_summary(&args.input, &args.output, &params);

    if args.input.is_dir() {
        run_directory(&args.input, &args.output, &params)
    } else {
        process_file(&args.input, &args.output, &params)
            .with_context(|| format!("Failed to process {}", args.input.display()))?;
        println!("Output saved to {}", args.output.display());
        Ok(())
    }
}

/// Normalize every file in `input`, writing `<stem>.png` into
/// `output`. Failing files are reported and skipped.
fn run_directory(input: &Path, output: &Path, params: &Params) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut entries: Vec<PathBuf> = std::fs::read_dir(input)
        .with_context(|| format!("Failed to read {}", input.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    if entries.is_empty() {
        bail!("No files found in {}", input.display());
    }

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut failed = 0usize;
    for path in &entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name.clone());

        let destination = output.join(Path::new(&name).with_extension("png"));
        if let Err(e) = process_file(path, &destination, params) {
            pb.println(format!("ERROR {name}: {e}"));
            failed += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    let ok = entries.len() - failed;
    println!("\n{ok} file(s) written to {}, {failed} failed", output.display());
    if failed > 0 && ok == 0 {
        bail!("every input file failed");
    }
    Ok(())
}

/// Run the whole pipeline over one file with a fresh session and
/// persist the binarized result.
fn process_file(input: &Path, output: &Path, params: &Params) -> Result<()> {
    let source = load_grayscale(input)?;
    let session = Session::new(source, params.clone())?;
    session.run_all(&mut NullSink)?;
    let result = session.finish(&mut NullSink)?;
    debug!(
        input = %input.display(),
        stage_runs = ?session.stage_runs(),
        height = result.height(),
        width = result.width(),
        "pipeline finished"
    );
    save_png(&result, output)?;
    Ok(())
}

fn build_params(args: &RunArgs) -> Result<Params> {
    let mut params = if let Some(ref preset) = args.params {
        let contents = std::fs::read_to_string(preset)
            .with_context(|| format!("Failed to read preset {}", preset.display()))?;
        toml::from_str(&contents).context("Invalid parameter preset")?
    } else {
        Params::default()
    };

    if let Some(v) = args.target_size {
        params.target_size = v;
    }
    if let Some(v) = args.black {
        params.threshold_black = v;
    }
    if let Some(v) = args.white {
        params.threshold_white = v;
    }
    if let Some(v) = args.border {
        params.border = v;
    }
    if let Some(v) = args.kernel {
        params.kernel_size = v;
    }
    if let Some(v) = args.alpha {
        params.contrast_alpha = v;
    }
    if let Some(v) = args.beta {
        params.contrast_beta = v;
    }
    if let Some(v) = args.threshold {
        params.binary_threshold = v;
    }
    if let Some(v) = args.bilateral_d {
        params.bilateral_diameter = v;
    }
    if let Some(v) = args.bilateral_color {
        params.bilateral_sigma_color = v;
    }
    if let Some(v) = args.bilateral_space {
        params.bilateral_sigma_space = v;
    }

    Ok(params)
}
