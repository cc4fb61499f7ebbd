use std::path::Path;

use console::Style;

use descan_core::params::Params;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(input: &Path, output: &Path, params: &Params) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("descan"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Target size"),
        s.value.apply_to(params.target_size)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Content range"),
        s.value
            .apply_to(format!("[{}, {}]", params.threshold_black, params.threshold_white))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Border"),
        s.value.apply_to(params.border)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Blur kernel"),
        s.value.apply_to(params.kernel_size)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Contrast"),
        s.value.apply_to(format!(
            "alpha {} beta {}",
            params.contrast_alpha, params.contrast_beta
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Binarize at"),
        s.value.apply_to(params.binary_threshold)
    );
    println!();
}
