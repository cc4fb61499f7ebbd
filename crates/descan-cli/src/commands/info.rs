use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::Style;

use descan_core::io::image_io::load_grayscale;
use descan_core::params::{derive_kernel_size, Params};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = load_grayscale(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let label = Style::new().dim();
    let value = Style::new().bold().white();

    println!(
        "  {:<18}{}",
        label.apply_to("File"),
        value.apply_to(args.file.display())
    );
    println!(
        "  {:<18}{}",
        label.apply_to("Size (normalized)"),
        value.apply_to(format!("{}x{}", raster.width(), raster.height()))
    );

    let params = Params::default();
    println!(
        "  {:<18}{}",
        label.apply_to("Default target"),
        value.apply_to(params.target_size)
    );
    println!(
        "  {:<18}{}",
        label.apply_to("Derived kernel"),
        value.apply_to(derive_kernel_size(params.target_size, params.kernel_percent))
    );

    Ok(())
}
